//! dump1090 receiver process management
//!
//! Launches the receiver in networked mode with its output captured to a log
//! file, waits for the log to show signs of life, and tears everything down
//! exactly once when the radar exits.

use crate::config::ReceiverConfig;
use crate::error::{RadarError, Result};
use crate::shutdown::CancelToken;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Arguments that put dump1090 in network mode with aggressive decoding
const RECEIVER_ARGS: [&str; 2] = ["--net", "--aggressive"];
/// Log bytes that count as the receiver being up
const READY_LOG_BYTES: u64 = 10;
const READY_POLL: Duration = Duration::from_millis(100);

pub struct ReceiverProcess {
    child: Option<Child>,
    log_path: PathBuf,
    keep_log: bool,
    ready_timeout: Duration,
}

impl ReceiverProcess {
    /// Start the receiver, logging to a timestamped file in `log_dir`
    pub fn launch(config: &ReceiverConfig, log_dir: &Path) -> Result<Self> {
        let log_path = log_dir.join(format!("dump1090-{}.log", chrono::Utc::now().timestamp()));
        let log = File::create(&log_path)?;
        let log_err = log.try_clone()?;

        info!(binary = %config.binary.display(), log = %log_path.display(), "starting receiver");
        let spawned = Command::new(&config.binary)
            .args(RECEIVER_ARGS)
            .stdin(Stdio::null())
            .stdout(log)
            .stderr(log_err)
            .spawn();

        let child = match spawned {
            Ok(child) => child,
            Err(e) => {
                let _ = fs::remove_file(&log_path);
                return Err(e.into());
            }
        };

        Ok(Self {
            child: Some(child),
            log_path,
            keep_log: config.keep_log,
            ready_timeout: config.ready_timeout,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Block until the log grows past a few bytes
    pub fn wait_ready(&mut self, cancel: &CancelToken) -> Result<()> {
        let timeout = self.ready_timeout;
        let start = Instant::now();
        loop {
            let len = fs::metadata(&self.log_path).map(|m| m.len()).unwrap_or(0);
            if len > READY_LOG_BYTES {
                info!(elapsed = ?start.elapsed(), "receiver ready");
                return Ok(());
            }
            if let Some(child) = self.child.as_mut() {
                if let Some(status) = child.try_wait()? {
                    return Err(RadarError::ReceiverExited(status));
                }
            }
            if cancel.is_cancelled() {
                return Err(RadarError::Interrupted);
            }
            if start.elapsed() >= timeout {
                return Err(RadarError::ReceiverTimeout(timeout));
            }
            thread::sleep(READY_POLL);
        }
    }

    /// Kill the receiver and, unless asked to keep it, delete its log.
    /// Only the first call does anything.
    pub fn shutdown(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        info!("stopping receiver");
        if let Err(e) = child.kill() {
            warn!("failed to kill receiver: {}", e);
        }
        if let Err(e) = child.wait() {
            warn!("failed to reap receiver: {}", e);
        }

        if !self.keep_log {
            if let Err(e) = fs::remove_file(&self.log_path) {
                warn!(log = %self.log_path.display(), "failed to remove receiver log: {}", e);
            }
        }
    }
}

impl Drop for ReceiverProcess {
    fn drop(&mut self) {
        self.shutdown();
    }
}
