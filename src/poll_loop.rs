//! The radar's main loop
//!
//! One iteration: read a key (non-blocking), fetch a snapshot, render it at
//! the current terminal size, sleep. The view is the only state that lives
//! across iterations.

use crate::config::ViewState;
use crate::error::Result;
use crate::frame::Frame;
use crate::projection::ScreenGrid;
use crate::radar::render_frame;
use crate::shutdown::CancelToken;
use crate::source::DataSource;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Help text for the radar keys
pub const HELP: &str = "\
Keys:
-      Zoom out (+0.1 deg)
+      Zoom in (-0.1 deg)
q      Quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Exiting(ExitReason),
}

pub struct RadarLoop<S: DataSource> {
    view: ViewState,
    source: S,
    interval: Duration,
    frame: Frame,
}

impl<S: DataSource> RadarLoop<S> {
    pub fn new(view: ViewState, source: S, interval: Duration) -> Self {
        Self {
            view,
            source,
            interval,
            frame: Frame::new(0, 0),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[cfg(test)]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Apply one keypress to the view
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> LoopState {
        match code {
            // raw mode delivers Ctrl+C as a key rather than a signal
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return LoopState::Exiting(ExitReason::Interrupted);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return LoopState::Exiting(ExitReason::Quit),
            KeyCode::Char('-') => {
                self.view.widen();
                debug!(radius = self.view.radius_deg, "range increased");
            }
            KeyCode::Char('+') => {
                self.view.narrow();
                debug!(radius = self.view.radius_deg, "range decreased");
            }
            _ => {}
        }
        LoopState::Running
    }

    /// Fetch a snapshot and rebuild the frame for `grid`
    pub fn tick(&mut self, grid: ScreenGrid) -> Result<()> {
        let aircraft = self.source.fetch_snapshot()?;
        render_frame(&mut self.frame, &aircraft, &self.view, grid);
        Ok(())
    }

    /// Run until quit, interrupt, or a failed fetch
    pub fn run(&mut self, term: &Terminal, cancel: &CancelToken) -> Result<ExitReason> {
        info!(
            lat = self.view.observer.lat,
            lon = self.view.observer.lon,
            radius = self.view.radius_deg,
            "radar running"
        );

        loop {
            if cancel.is_cancelled() {
                return Ok(ExitReason::Interrupted);
            }

            if let Some((code, mods)) = term.check_key()? {
                if let LoopState::Exiting(reason) = self.handle_key(code, mods) {
                    info!(?reason, "radar exiting");
                    return Ok(reason);
                }
            }

            let grid = term.grid()?;
            self.tick(grid)?;
            term.present(&self.frame)?;

            thread::sleep(self.interval);
        }
    }
}
