use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use scanbatch_common::warn;
use tokio::task::JoinHandle;

/// Exit status for a process stopped by SIGINT.
const INTERRUPTED_EXIT: i32 = 130;

/// Watches for Ctrl-C while a batch runs.
///
/// The first signal raises the flag so the worker stops before its next
/// target. A second one exits right away.
pub struct CancelHandle {
    task: JoinHandle<()>,
}

impl CancelHandle {
    pub fn install(flag: Arc<AtomicBool>) -> Self {
        let task = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            flag.store(true, Ordering::Relaxed);
            warn!("Stopping after the current target, press Ctrl-C again to quit now");

            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(INTERRUPTED_EXIT);
            }
        });
        Self { task }
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
