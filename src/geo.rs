//! Flat-earth distance approximations
//!
//! Good enough for a short-range visual aid, not for navigation: latitude
//! uses a fixed meridian constant, longitude is scaled by the cosine of the
//! latitude, and distances combine the two as if the ground were flat.

/// Kilometres per degree of latitude.
pub const KM_PER_DEG_LAT: f64 = 110.574;
/// Kilometres per degree of longitude at the equator.
pub const KM_PER_DEG_LON: f64 = 111.320;

/// A latitude/longitude pair in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Distance spanned by `lat` degrees of latitude. Unsigned.
pub fn lat_to_km(lat: f64) -> f64 {
    lat.abs() * KM_PER_DEG_LAT
}

/// Distance spanned by `lon` degrees of longitude at latitude `lat`. Unsigned.
/// Collapses to ~0 at the poles.
pub fn lon_to_km(lat: f64, lon: f64) -> f64 {
    lon.abs() * (KM_PER_DEG_LON * lat.to_radians().cos())
}

/// Euclidean combination of the latitude and longitude distance deltas
pub fn distance_km(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let dy = (lat_to_km(p1.lat) - lat_to_km(p2.lat)).abs();
    let dx = (lon_to_km(p1.lat, p1.lon) - lon_to_km(p2.lat, p2.lon)).abs();
    (dx * dx + dy * dy).sqrt()
}

/// Height and width in km of the window `observer ± radius_deg`, for the legend
pub fn viewbox_km(observer: GeoPoint, radius_deg: f64) -> (f64, f64) {
    let height =
        (lat_to_km(observer.lat - radius_deg) - lat_to_km(observer.lat + radius_deg)).abs();
    let width = (lon_to_km(observer.lat, observer.lon - radius_deg)
        - lon_to_km(observer.lat, observer.lon + radius_deg))
    .abs();
    (height, width)
}
