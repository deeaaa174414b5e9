//! Radar frame rendering
//!
//! Draws one complete frame: observer marker, range legends, aircraft count,
//! dotted border, and a marker/callsign/distance stack per aircraft. Every
//! cell write is bounds-checked on its own, so anything falling off the grid
//! is simply dropped.

use crate::aircraft::AircraftRecord;
use crate::config::ViewState;
use crate::frame::Frame;
use crate::geo::{distance_km, viewbox_km};
use crate::projection::{project_to_cell, ScreenGrid};
use crossterm::style::Color;

pub const OBSERVER_MARK: char = 'o';
pub const AIRCRAFT_MARK: char = 'x';
pub const BORDER_MARK: char = '.';

const OBSERVER_COLOR: Color = Color::Green;
const AIRCRAFT_COLOR: Color = Color::Yellow;
const FLIGHT_COLOR: Color = Color::Cyan;
const DISTANCE_COLOR: Color = Color::DarkGrey;
const LEGEND_COLOR: Color = Color::White;
const BORDER_COLOR: Color = Color::DarkGreen;

/// Footer column offset from the right edge
const FOOTER_INSET: i32 = 20;
/// Column of the height legend
const LEGEND_INSET: i32 = 2;

pub fn km_label(km: f64) -> String {
    format!("{} KM", km.round() as i64)
}

pub fn count_label(count: usize) -> String {
    let noun = if count == 1 { "plane" } else { "planes" };
    format!("{} {} detected", count, noun)
}

/// Effective layout grid: the live grid, squared off when requested
pub fn layout_grid(view: &ViewState, live: ScreenGrid) -> ScreenGrid {
    if view.square {
        live.square()
    } else {
        live
    }
}

/// Rebuild `frame` for the given snapshot. `live` is the current terminal
/// size; the frame is resized to it and all writes are clipped to it.
pub fn render_frame(
    frame: &mut Frame,
    aircraft: &[AircraftRecord],
    view: &ViewState,
    live: ScreenGrid,
) {
    frame.reset(live.cols, live.rows);

    let grid = layout_grid(view, live);
    let rows = grid.rows as i32;
    let cols = grid.cols as i32;
    let (mid_row, mid_col) = grid.center();
    let (height_km, width_km) = viewbox_km(view.observer, view.radius_deg);

    frame.set(mid_col, mid_row, OBSERVER_MARK, Some(OBSERVER_COLOR), true);
    frame.set_str(LEGEND_INSET, mid_row, &km_label(height_km), Some(LEGEND_COLOR), false);
    frame.set_str(mid_col, rows - 2, &km_label(width_km), Some(LEGEND_COLOR), false);
    let footer = count_label(aircraft.len());
    frame.set_str(cols - FOOTER_INSET, rows - 2, &footer, Some(LEGEND_COLOR), true);

    for y in 0..rows - 1 {
        frame.set(0, y, BORDER_MARK, Some(BORDER_COLOR), false);
    }
    for x in 0..cols - 1 {
        frame.set(x, rows - 1, BORDER_MARK, Some(BORDER_COLOR), false);
    }

    for plane in aircraft {
        draw_aircraft(frame, plane, view, grid);
    }
}

fn draw_aircraft(frame: &mut Frame, plane: &AircraftRecord, view: &ViewState, grid: ScreenGrid) {
    let (row, col) = project_to_cell(plane.position, view.observer, view.radius_deg, grid);
    let distance = distance_km(plane.position, view.observer);

    frame.set(col, row, AIRCRAFT_MARK, Some(AIRCRAFT_COLOR), true);
    frame.set_str(col, row - 1, &plane.flight, Some(FLIGHT_COLOR), false);
    frame.set_str(col, row - 2, &km_label(distance), Some(DISTANCE_COLOR), false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    fn london(square: bool) -> ViewState {
        ViewState::new(GeoPoint::new(51.5, -0.1), 0.2, square)
    }

    fn plane(flight: &str, lat: f64, lon: f64) -> AircraftRecord {
        AircraftRecord {
            flight: flight.to_string(),
            position: GeoPoint::new(lat, lon),
        }
    }

    fn render(aircraft: &[AircraftRecord], view: &ViewState, rows: u16, cols: u16) -> Frame {
        let mut frame = Frame::new(0, 0);
        render_frame(&mut frame, aircraft, view, ScreenGrid::new(rows, cols));
        frame
    }

    fn ch(frame: &Frame, row: i32, col: i32) -> char {
        frame.get(col, row).map(|c| c.ch).unwrap_or('\0')
    }

    #[test]
    fn labels() {
        assert_eq!(km_label(44.2296), "44 KM");
        assert_eq!(km_label(0.6), "1 KM");
        assert_eq!(km_label(0.0), "0 KM");
        assert_eq!(count_label(0), "0 planes detected");
        assert_eq!(count_label(1), "1 plane detected");
        assert_eq!(count_label(2), "2 planes detected");
    }

    #[test]
    fn empty_snapshot() {
        let frame = render(&[], &london(false), 40, 80);
        assert!(frame.row_text(38).ends_with("0 planes detected"));
        assert_eq!(frame.count(AIRCRAFT_MARK), 0);
        assert_eq!(ch(&frame, 20, 40), OBSERVER_MARK);
    }

    #[test]
    fn singular_and_plural_footer() {
        let one = render(&[plane("A", 51.5, -0.1)], &london(false), 40, 80);
        assert!(one.row_text(38).ends_with("1 plane detected"));

        let pair = [plane("A", 51.5, -0.1), plane("B", 51.45, -0.05)];
        let two = render(&pair, &london(false), 40, 80);
        assert!(two.row_text(38).ends_with("2 planes detected"));
    }

    #[test]
    fn aircraft_over_observer() {
        let frame = render(&[plane("BAW1", 51.5, -0.1)], &london(false), 40, 80);
        assert_eq!(ch(&frame, 20, 40), AIRCRAFT_MARK);
        assert!(frame.row_text(19)[40..].starts_with("BAW1"));
        assert!(frame.row_text(18)[40..].starts_with("0 KM"));
    }

    #[test]
    fn legends_and_border() {
        let frame = render(&[], &london(false), 40, 80);
        // height legend at mid-height, two columns in
        assert_eq!(&frame.row_text(20)[2..7], "44 KM");
        // width legend at mid-width on the row above the border
        let (_, width_km) = viewbox_km(GeoPoint::new(51.5, -0.1), 0.2);
        let bottom = frame.row_text(38);
        assert!(bottom[40..].starts_with(&km_label(width_km)));
        // left border stops short of the bottom row, bottom border short of the last column
        for y in 0..39 {
            assert_eq!(ch(&frame, y, 0), BORDER_MARK);
        }
        for x in 0..79 {
            assert_eq!(ch(&frame, 39, x), BORDER_MARK);
        }
        assert_eq!(ch(&frame, 39, 79), ' ');
    }

    #[test]
    fn off_grid_aircraft_is_dropped_without_disturbing_others() {
        let aircraft = [
            plane("WEST", 51.5, -1.5),
            plane("SOUTH", 50.0, -0.1),
            plane("EAST", 51.5, 2.0),
            plane("NEAR", 51.55, 0.0),
        ];
        let frame = render(&aircraft, &london(false), 40, 80);
        assert_eq!(frame.count(AIRCRAFT_MARK), 1);
        let (row, col) = project_to_cell(
            GeoPoint::new(51.55, 0.0),
            GeoPoint::new(51.5, -0.1),
            0.2,
            ScreenGrid::new(40, 80),
        );
        assert_eq!(ch(&frame, row, col), AIRCRAFT_MARK);
        assert!(frame.row_text((row - 1) as usize)[col as usize..].starts_with("NEAR"));
    }

    #[test]
    fn labels_clip_at_top_edge() {
        // lands on row 0: marker drawn, label and distance rows are off-grid
        let frame = render(&[plane("TOP", 51.7, -0.1)], &london(false), 40, 80);
        assert_eq!(ch(&frame, 0, 40), AIRCRAFT_MARK);
        assert_eq!(frame.count('T'), 0);
        assert_eq!(frame.count('K'), 2);
    }

    #[test]
    fn square_aspect_clamps_before_projection() {
        let view = london(true);
        assert_eq!(layout_grid(&view, ScreenGrid::new(24, 100)), ScreenGrid::new(24, 24));

        let frame = render(&[plane("SQ", 51.5, -0.1)], &view, 24, 100);
        assert_eq!(frame.size(), (100, 24));
        assert_eq!(ch(&frame, 12, 12), AIRCRAFT_MARK);
        // bottom border spans only the clamped width
        assert_eq!(ch(&frame, 23, 22), BORDER_MARK);
        assert_eq!(ch(&frame, 23, 23), ' ');
        assert_eq!(ch(&frame, 23, 60), ' ');
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let aircraft = [plane("A", 51.5, -0.1)];
        for (rows, cols) in [(0, 0), (1, 1), (2, 3), (3, 2)] {
            let frame = render(&aircraft, &london(false), rows, cols);
            assert_eq!(frame.size(), (cols, rows));
        }
    }

    #[test]
    fn resize_between_frames() {
        let mut frame = Frame::new(0, 0);
        let aircraft = [plane("A", 51.5, -0.1)];
        render_frame(&mut frame, &aircraft, &london(false), ScreenGrid::new(40, 80));
        render_frame(&mut frame, &aircraft, &london(false), ScreenGrid::new(20, 30));
        assert_eq!(frame.size(), (30, 20));
        assert_eq!(ch(&frame, 10, 15), AIRCRAFT_MARK);
        assert_eq!(frame.count(AIRCRAFT_MARK), 1);
    }
}
