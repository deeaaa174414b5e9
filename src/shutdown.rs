use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared flag that asks the radar to stop at its next check
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Cancel on SIGINT/SIGTERM instead of letting the process die with the
    /// terminal still in raw mode. In raw mode Ctrl+C arrives as a key event
    /// instead, and the poll loop handles it.
    pub fn cancel_on_signal(&self) {
        let token = self.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("interrupt signal received");
            token.cancel();
        }) {
            warn!("could not install signal handler: {}", e);
        }
    }
}
