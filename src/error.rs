use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RadarError>;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("IO error {0}")]
    Io(#[from] std::io::Error),

    #[error("source unavailable at {url}: {reason}")]
    SourceUnavailable { url: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("receiver exited before becoming ready ({0})")]
    ReceiverExited(ExitStatus),

    #[error("receiver not ready after {0:?}")]
    ReceiverTimeout(Duration),

    #[error("interrupted")]
    Interrupted,
}

pub fn source_unavailable(url: &str, reason: impl ToString) -> RadarError {
    RadarError::SourceUnavailable {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

pub fn config_error(msg: impl ToString) -> RadarError {
    RadarError::Config(msg.to_string())
}
