//! Aircraft records parsed from a dump1090 snapshot
//!
//! The receiver's JSON has no schema to speak of: coordinates show up as
//! numbers or numeric strings, and older and newer forks wrap the list
//! differently. Everything is validated here so the renderer only ever sees
//! well-formed records.

use crate::geo::GeoPoint;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
pub struct AircraftRecord {
    pub flight: String,
    pub position: GeoPoint,
}

/// Why a snapshot entry was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum Malformed {
    NotAnObject,
    Missing(&'static str),
    Invalid(&'static str),
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::NotAnObject => write!(f, "entry is not an object"),
            Malformed::Missing(field) => write!(f, "missing field '{}'", field),
            Malformed::Invalid(field) => write!(f, "invalid field '{}'", field),
        }
    }
}

impl AircraftRecord {
    pub fn from_json(entry: &Value) -> Result<Self, Malformed> {
        let obj = entry.as_object().ok_or(Malformed::NotAnObject)?;
        let lat = coordinate(obj, "lat", 90.0)?;
        let lon = coordinate(obj, "lon", 180.0)?;
        let flight = match obj.get("flight") {
            Some(Value::String(s)) => s.trim_end().to_string(),
            Some(_) => return Err(Malformed::Invalid("flight")),
            None => return Err(Malformed::Missing("flight")),
        };
        Ok(Self {
            flight,
            position: GeoPoint::new(lat, lon),
        })
    }
}

/// A coordinate given as a number or a numeric string
fn coordinate(obj: &Map<String, Value>, field: &'static str, limit: f64) -> Result<f64, Malformed> {
    let value = match obj.get(field) {
        None | Some(Value::Null) => return Err(Malformed::Missing(field)),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match value {
        Some(v) if v.is_finite() && v.abs() <= limit => Ok(v),
        _ => Err(Malformed::Invalid(field)),
    }
}

/// Locate the aircraft list: either the whole document (legacy `data.json`)
/// or its `aircraft` member (`aircraft.json`). None if neither shape matches.
pub fn snapshot_entries(doc: &Value) -> Option<&Vec<Value>> {
    match doc {
        Value::Array(entries) => Some(entries),
        Value::Object(obj) => obj.get("aircraft").and_then(Value::as_array),
        _ => None,
    }
}

/// Parse every well-formed entry, logging and skipping the rest
pub fn parse_entries(entries: &[Value]) -> Vec<AircraftRecord> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match AircraftRecord::from_json(entry) {
            Ok(record) => Some(record),
            Err(reason) => {
                warn!(index = i, %reason, "skipping malformed aircraft record");
                None
            }
        })
        .collect()
}
