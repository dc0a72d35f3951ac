//! Training progress channel
//!
//! The forecaster publishes a percentage in `[0, 100]` through a
//! [`ProgressReporter`]; callers read it from the paired [`ProgressWatcher`],
//! either by polling [`ProgressWatcher::current`] or by awaiting
//! [`ProgressWatcher::changed`]. The watcher can also request cooperative
//! cancellation, which training checks at every checkpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Create a connected reporter/watcher pair starting at 0%
pub fn progress_channel() -> (ProgressReporter, ProgressWatcher) {
    let (tx, rx) = watch::channel(0.0);
    let cancelled = Arc::new(AtomicBool::new(false));
    (
        ProgressReporter {
            tx,
            cancelled: Arc::clone(&cancelled),
        },
        ProgressWatcher { rx, cancelled },
    )
}

/// Producer side, held by the forecast task
#[derive(Debug)]
pub struct ProgressReporter {
    tx: watch::Sender<f64>,
    cancelled: Arc<AtomicBool>,
}

impl ProgressReporter {
    /// Publish a new percentage, clamped to `[0, 100]`
    pub fn report(&self, percent: f64) {
        self.tx.send_replace(percent.clamp(0.0, 100.0));
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Consumer side, held by whoever displays progress
#[derive(Debug, Clone)]
pub struct ProgressWatcher {
    rx: watch::Receiver<f64>,
    cancelled: Arc<AtomicBool>,
}

impl ProgressWatcher {
    /// Latest published percentage
    pub fn current(&self) -> f64 {
        *self.rx.borrow()
    }

    /// Wait for the next update; `None` once the reporter is dropped
    pub async fn changed(&mut self) -> Option<f64> {
        match self.rx.changed().await {
            Ok(()) => Some(*self.rx.borrow_and_update()),
            Err(_) => None,
        }
    }

    /// Ask the running forecast to stop at its next checkpoint
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
