use crate::geo::GeoPoint;
use std::path::PathBuf;
use std::time::Duration;

/// Smallest radius the decrease key will step down from
pub const MIN_RADIUS_DEG: f64 = 0.2;
/// Radius change per key press
pub const RADIUS_STEP_DEG: f64 = 0.1;
/// Slack for rounding error picked up by repeated tenth-degree steps
const RADIUS_EPSILON: f64 = 1e-9;

pub const DEFAULT_RADIUS_DEG: f64 = 0.2;
pub const DEFAULT_URL: &str = "http://localhost:8080/data.json";
pub const DEFAULT_INTERVAL_MS: u64 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_READY_TIMEOUT_SECS: u64 = 30;

/// What the radar is looking at; the only state carried between frames
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub observer: GeoPoint,
    pub radius_deg: f64,
    pub square: bool,
}

impl ViewState {
    pub fn new(observer: GeoPoint, radius_deg: f64, square: bool) -> Self {
        Self {
            observer,
            radius_deg,
            square,
        }
    }

    /// Zoom out, without limit
    pub fn widen(&mut self) {
        self.radius_deg += RADIUS_STEP_DEG;
    }

    /// Zoom in. The floor check runs on the radius before the step.
    pub fn narrow(&mut self) {
        if self.radius_deg > MIN_RADIUS_DEG + RADIUS_EPSILON {
            self.radius_deg -= RADIUS_STEP_DEG;
        }
    }
}

/// Optional dump1090 process to run alongside the radar
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiverConfig {
    pub binary: PathBuf,
    pub keep_log: bool,
    pub ready_timeout: Duration,
}

/// Fully resolved runtime configuration
#[derive(Clone, Debug, PartialEq)]
pub struct RadarConfig {
    pub view: ViewState,
    pub url: String,
    pub interval: Duration,
    pub timeout: Duration,
    pub receiver: Option<ReceiverConfig>,
}
