//! # Batch Submission
//!
//! Feeds a fixed list of URLs through the scanner one at a time: add the
//! target, then start a scan on it.
//!
//! The worker:
//! 1. checks the cancellation flag before each URL (never mid-request),
//! 2. reports exactly one outcome per processed URL on the event channel,
//! 3. keeps going after a failed URL.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::ScannerApi;

/// The request a URL failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AddTarget,
    StartScan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Started {
        total: usize,
    },
    Processing {
        index: usize,
        total: usize,
        url: String,
    },
    Submitted {
        index: usize,
        url: String,
        target_id: String,
        scan_started: bool,
    },
    Failed {
        index: usize,
        url: String,
        stage: Stage,
        /// Set when the target was created before the scan failed to start.
        target_id: Option<String>,
        error: String,
    },
    Cancelled {
        processed: usize,
        total: usize,
    },
    Finished(BatchSummary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub submitted: usize,
    pub failed: usize,
    pub cancelled: bool,
}

impl BatchSummary {
    /// URLs never attempted because the batch was cancelled.
    pub fn skipped(&self) -> usize {
        self.total - self.submitted - self.failed
    }
}

pub struct BatchRunner<A> {
    api: A,
    profile_id: Option<String>,
    cancel: Arc<AtomicBool>,
    events: Option<UnboundedSender<BatchEvent>>,
}

impl<A: ScannerApi> BatchRunner<A> {
    /// `profile_id` of `None` only registers targets.
    pub fn new(api: A, profile_id: Option<String>) -> Self {
        Self {
            api,
            profile_id,
            cancel: Arc::new(AtomicBool::new(false)),
            events: None,
        }
    }

    pub fn with_events(mut self, events: UnboundedSender<BatchEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Shares an existing cancellation flag instead of the runner's own.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Setting the returned flag stops the batch before the next URL.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub async fn run(&self, urls: &[String]) -> BatchSummary {
        let total = urls.len();
        let mut summary = BatchSummary {
            total,
            ..BatchSummary::default()
        };
        self.emit(BatchEvent::Started { total });

        for (index, url) in urls.iter().enumerate() {
            if self.cancel.load(Ordering::Relaxed) {
                debug!(processed = index, total, "batch cancelled");
                summary.cancelled = true;
                self.emit(BatchEvent::Cancelled {
                    processed: index,
                    total,
                });
                break;
            }

            self.emit(BatchEvent::Processing {
                index,
                total,
                url: url.clone(),
            });

            let event = self.submit(index, url).await;
            match event {
                BatchEvent::Submitted { .. } => summary.submitted += 1,
                _ => summary.failed += 1,
            }
            self.emit(event);
        }

        self.emit(BatchEvent::Finished(summary));
        summary
    }

    async fn submit(&self, index: usize, url: &str) -> BatchEvent {
        let target_id = match self.api.add_target(url).await {
            Ok(id) => id,
            Err(e) => {
                return BatchEvent::Failed {
                    index,
                    url: url.to_string(),
                    stage: Stage::AddTarget,
                    target_id: None,
                    error: e.to_string(),
                };
            }
        };

        let Some(profile_id) = self.profile_id.as_deref() else {
            return BatchEvent::Submitted {
                index,
                url: url.to_string(),
                target_id,
                scan_started: false,
            };
        };

        match self.api.start_scan(&target_id, profile_id).await {
            Ok(()) => BatchEvent::Submitted {
                index,
                url: url.to_string(),
                target_id,
                scan_started: true,
            },
            Err(e) => BatchEvent::Failed {
                index,
                url: url.to_string(),
                stage: Stage::StartScan,
                target_id: Some(target_id),
                error: e.to_string(),
            },
        }
    }

    fn emit(&self, event: BatchEvent) {
        if let Some(tx) = &self.events {
            // A dropped observer must not stop the batch.
            let _ = tx.send(event);
        }
    }
}

impl<A: ScannerApi + 'static> BatchRunner<A> {
    /// Runs the batch on its own task.
    pub fn spawn(self, urls: Vec<String>) -> JoinHandle<BatchSummary> {
        tokio::spawn(async move { self.run(&urls).await })
    }
}
