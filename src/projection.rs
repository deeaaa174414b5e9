//! Geographic to screen-cell projection
//!
//! Not a map projection: latitude and longitude windows are linearly
//! re-mapped onto row and column ranges.

use crate::geo::GeoPoint;

/// Terminal dimensions in cells, queried fresh every frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenGrid {
    pub rows: u16,
    pub cols: u16,
}

impl ScreenGrid {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Clamp both sides to the shorter one
    pub fn square(self) -> Self {
        let side = self.rows.min(self.cols);
        Self { rows: side, cols: side }
    }

    /// Center cell as (row, col)
    pub fn center(&self) -> (i32, i32) {
        (self.rows as i32 / 2, self.cols as i32 / 2)
    }
}

/// Linear interpolation of `s` from `domain` onto `range`.
///
/// `domain.0 != domain.1` is a precondition; the radius floor keeps it true
/// for every window the radar builds.
pub fn project(s: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (a1, a2) = domain;
    let (b1, b2) = range;
    debug_assert!(a1 != a2, "projection domain has zero width");
    // b1 + (s - a1) * (b2 - b1) / (a2 - a1), arranged to be exact at both ends
    let t = (s - a1) / (a2 - a1);
    b1 * (1.0 - t) + b2 * t
}

/// The `center ± radius` window along one axis
pub fn window(center: f64, radius: f64) -> (f64, f64) {
    (center - radius, center + radius)
}

/// Map `point` to a (row, col) cell.
///
/// Latitude lands in `-rows..0` and the row is its magnitude, so north sits
/// at row 0. Points outside the window fold back through the absolute value
/// instead of being clipped; rows past the bottom edge are left for the
/// frame's bounds check.
pub fn project_to_cell(
    point: GeoPoint,
    observer: GeoPoint,
    radius_deg: f64,
    grid: ScreenGrid,
) -> (i32, i32) {
    let row = project(
        point.lat,
        window(observer.lat, radius_deg),
        (-(grid.rows as f64), 0.0),
    );
    let col = project(
        point.lon,
        window(observer.lon, radius_deg),
        (0.0, grid.cols as f64),
    );
    ((row as i32).saturating_abs(), col as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_hits_range_endpoints() {
        let cases = [
            ((0.0, 1.0), (0.0, 100.0)),
            ((51.3, 51.7), (-40.0, 0.0)),
            ((-0.3, 0.1), (0.0, 80.0)),
            ((10.0, -10.0), (5.0, 7.0)),
        ];
        for (domain, range) in cases {
            assert_eq!(project(domain.0, domain, range), range.0);
            assert_eq!(project(domain.1, domain, range), range.1);
        }
    }

    #[test]
    fn project_midpoint() {
        assert_eq!(project(5.0, (0.0, 10.0), (0.0, 80.0)), 40.0);
        assert_eq!(project(5.0, (0.0, 10.0), (-40.0, 0.0)), -20.0);
    }

    #[test]
    fn observer_projects_to_center() {
        let observer = GeoPoint::new(51.5, -0.1);
        let grid = ScreenGrid::new(40, 80);
        assert_eq!(project_to_cell(observer, observer, 0.2, grid), (20, 40));
    }

    #[test]
    fn north_is_up() {
        let observer = GeoPoint::new(10.0, 20.0);
        let grid = ScreenGrid::new(40, 80);
        let (north_row, _) = project_to_cell(GeoPoint::new(10.1, 20.0), observer, 0.2, grid);
        let (south_row, _) = project_to_cell(GeoPoint::new(9.9, 20.0), observer, 0.2, grid);
        assert!(north_row < 20);
        assert!(south_row > 20);
    }

    #[test]
    fn north_of_window_folds_back_into_view() {
        // 0.105 deg past the top edge lands at +10.5 and folds to row 10
        let observer = GeoPoint::new(10.0, 20.0);
        let grid = ScreenGrid::new(40, 80);
        let (row, _) = project_to_cell(GeoPoint::new(10.305, 20.0), observer, 0.2, grid);
        assert_eq!(row, 10);
    }

    #[test]
    fn south_of_window_stays_past_bottom() {
        let observer = GeoPoint::new(10.0, 20.0);
        let grid = ScreenGrid::new(40, 80);
        let (row, _) = project_to_cell(GeoPoint::new(9.7, 20.0), observer, 0.2, grid);
        assert!(row >= 40);
    }

    #[test]
    fn longitude_is_not_folded() {
        let observer = GeoPoint::new(10.0, 20.0);
        let grid = ScreenGrid::new(40, 80);
        let (_, col) = project_to_cell(GeoPoint::new(10.0, 19.7), observer, 0.2, grid);
        assert!(col < 0);
    }

    #[test]
    fn square_clamps_to_shorter_side() {
        assert_eq!(ScreenGrid::new(24, 100).square(), ScreenGrid::new(24, 24));
        assert_eq!(ScreenGrid::new(60, 30).square(), ScreenGrid::new(30, 30));
    }
}
