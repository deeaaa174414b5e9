mod aircraft;
mod config;
mod error;
mod frame;
mod geo;
mod logging;
mod poll_loop;
mod projection;
mod radar;
mod receiver;
mod settings;
mod shutdown;
mod source;
mod terminal;

use clap::Parser;
use config::{
    RadarConfig, ReceiverConfig, ViewState, DEFAULT_INTERVAL_MS, DEFAULT_RADIUS_DEG,
    DEFAULT_READY_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_URL,
};
use error::{config_error, Result};
use geo::GeoPoint;
use poll_loop::{ExitReason, RadarLoop};
use receiver::ReceiverProcess;
use settings::Settings;
use shutdown::CancelToken;
use source::HttpSource;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use terminal::Terminal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "adsb-radar")]
#[command(version)]
#[command(about = "Track planes from a net-mode dump1090 on a terminal radar", long_about = None)]
#[command(after_help = poll_loop::HELP)]
struct Cli {
    /// Observer latitude in degrees
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees
    #[arg(short = 'y', long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Viewing radius in degrees [default: 0.2]
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    range: Option<f64>,

    /// URL of the dump1090 JSON snapshot [default: http://localhost:8080/data.json]
    #[arg(short, long)]
    url: Option<String>,

    /// Path to a dump1090 binary to start in net mode
    #[arg(short = 'd', long = "dump1090")]
    dump1090: Option<PathBuf>,

    /// Delete the dump1090 log file on exit
    #[arg(short, long)]
    nolog: bool,

    /// Force a square aspect ratio
    #[arg(short, long)]
    square: bool,

    /// Delay between frames in milliseconds [default: 50]
    #[arg(long)]
    interval: Option<u64>,

    /// HTTP timeout in seconds [default: 5]
    #[arg(long)]
    timeout: Option<u64>,

    /// Seconds to wait for dump1090 to come up [default: 30]
    #[arg(long)]
    ready_timeout: Option<u64>,

    /// Log file [default: <cache dir>/adsb-radar/adsb-radar.log]
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Merge flags over the settings file over built-in defaults
    fn into_config(self, settings: Settings) -> Result<RadarConfig> {
        let lat = self
            .lat
            .or(settings.observer.lat)
            .ok_or_else(|| config_error("observer latitude required (--lat or [observer] lat)"))?;
        let lon = self
            .lon
            .or(settings.observer.lon)
            .ok_or_else(|| config_error("observer longitude required (--lon or [observer] lon)"))?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(config_error(format!("latitude {} out of range", lat)));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(config_error(format!("longitude {} out of range", lon)));
        }

        let radius = self.range.or(settings.display.range).unwrap_or(DEFAULT_RADIUS_DEG);
        if !(radius.is_finite() && radius > 0.0) {
            return Err(config_error(format!("range must be positive, got {}", radius)));
        }

        let interval_ms = self
            .interval
            .or(settings.display.interval_ms)
            .unwrap_or(DEFAULT_INTERVAL_MS);
        if interval_ms == 0 {
            return Err(config_error("interval must be at least 1 ms"));
        }
        let timeout_secs = self
            .timeout
            .or(settings.source.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let ready_secs = self
            .ready_timeout
            .or(settings.receiver.ready_timeout_secs)
            .unwrap_or(DEFAULT_READY_TIMEOUT_SECS);

        let keep_log = !self.nolog && settings.receiver.keep_log.unwrap_or(true);
        let receiver = self.dump1090.or(settings.receiver.path).map(|binary| ReceiverConfig {
            binary,
            keep_log,
            ready_timeout: Duration::from_secs(ready_secs),
        });

        let square = self.square || settings.display.square.unwrap_or(false);

        Ok(RadarConfig {
            view: ViewState::new(GeoPoint::new(lat, lon), radius, square),
            url: self.url.or(settings.source.url).unwrap_or_else(|| DEFAULT_URL.to_string()),
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_secs(timeout_secs),
            receiver,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(logging::default_log_file);
    let _log_guard = match logging::init_logging(&log_file) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled ({}): {}", log_file.display(), e);
            None
        }
    };

    let config = match cli.into_config(Settings::load()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("adsb-radar: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(reason) => {
            info!(?reason, "exited");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Start the receiver if configured, run the radar, then clean up in order:
/// terminal, receiver process, receiver log. Cleanup runs once whatever the
/// exit cause.
fn run(config: &RadarConfig) -> Result<ExitReason> {
    let cancel = CancelToken::new();
    cancel.cancel_on_signal();

    let mut receiver = match &config.receiver {
        Some(receiver_config) => {
            println!("Starting dump1090");
            let mut receiver = ReceiverProcess::launch(receiver_config, Path::new("."))?;
            info!(log = %receiver.log_path().display(), "receiver launched");
            println!("Waiting for dump1090");
            receiver.wait_ready(&cancel)?;
            Some(receiver)
        }
        None => None,
    };

    let source = HttpSource::new(config.url.clone(), config.timeout);
    info!(url = source.url(), "polling");
    let mut radar = RadarLoop::new(config.view.clone(), source, config.interval);

    let result = match Terminal::new() {
        Ok(mut term) => {
            let result = radar.run(&term, &cancel);
            term.restore();
            result
        }
        Err(e) => Err(e.into()),
    };
    info!(radius = radar.view().radius_deg, "final range");

    if let Some(receiver) = receiver.as_mut() {
        println!("Killing dump1090");
        receiver.shutdown();
    }
    result
}
