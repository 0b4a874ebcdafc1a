//! Periodic background export of a classifier.
//!
//! [`AutosaveTask`] runs on its own thread and calls [`Classifier::export`]
//! every interval until stopped. Stopping wakes the thread immediately, so
//! shutdown does not wait for the rest of an interval. Consecutive export
//! failures are counted; once the policy limit is reached the task gives up
//! and logs an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use serde::Serialize;

use crate::classifier::engine::Classifier;
use crate::config::{DEFAULT_MAX_AUTOSAVE_FAILURES, StorageSettings};
use crate::error::{ClassifierError, Result};

/// When and how persistently to autosave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosavePolicy {
    /// Time between exports.
    pub interval: Duration,

    /// Consecutive failures after which the task stops; 0 never stops.
    pub max_consecutive_failures: u32,
}

impl AutosavePolicy {
    /// Export every `interval`, giving up after the default number of failures.
    pub fn every(interval: Duration) -> Self {
        AutosavePolicy {
            interval,
            max_consecutive_failures: DEFAULT_MAX_AUTOSAVE_FAILURES,
        }
    }

    /// Set the failure limit.
    pub fn with_max_consecutive_failures(mut self, max: u32) -> Self {
        self.max_consecutive_failures = max;
        self
    }

    /// The policy configured in `settings`, or `None` when autosave is disabled.
    pub fn from_settings(settings: &StorageSettings) -> Option<Self> {
        settings.autosave_interval().map(|interval| AutosavePolicy {
            interval,
            max_consecutive_failures: settings.max_autosave_failures,
        })
    }

    fn exhausted(&self, consecutive_failures: u32) -> bool {
        self.max_consecutive_failures > 0 && consecutive_failures >= self.max_consecutive_failures
    }
}

/// Counters kept by a running autosave task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AutosaveStats {
    /// Successful exports.
    pub saves_completed: u64,

    /// Failed exports.
    pub saves_failed: u64,

    /// Failures since the last success.
    pub consecutive_failures: u32,

    /// Message of the most recent failure.
    pub last_error: Option<String>,

    /// When the last successful export finished.
    pub last_saved_at: Option<DateTime<Utc>>,

    /// Whether the task is still exporting.
    pub running: bool,
}

/// Handle to the autosave thread.
///
/// Dropping the handle stops the thread and waits for it.
#[derive(Debug)]
pub struct AutosaveTask {
    policy: AutosavePolicy,
    stop_sender: Sender<()>,
    running: Arc<AtomicBool>,
    stats: Arc<Mutex<AutosaveStats>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl AutosaveTask {
    /// Start exporting `classifier` according to `policy`.
    pub fn start(classifier: Arc<Classifier>, policy: AutosavePolicy) -> Result<Self> {
        if policy.interval.is_zero() {
            return Err(ClassifierError::autosave("autosave interval must be positive"));
        }

        info!(
            "Autosave enabled every {:?} to {}",
            policy.interval,
            classifier.store().describe()
        );

        let (stop_sender, stop_receiver) = bounded(1);
        let running = Arc::new(AtomicBool::new(true));
        let stats = Arc::new(Mutex::new(AutosaveStats::default()));

        let worker = {
            let running = Arc::clone(&running);
            let stats = Arc::clone(&stats);
            thread::Builder::new()
                .name("bayes-autosave".to_string())
                .spawn(move || {
                    run(&classifier, policy, &stop_receiver, &stats);
                    running.store(false, Ordering::Release);
                })?
        };

        Ok(AutosaveTask {
            policy,
            stop_sender,
            running,
            stats,
            worker: Some(worker),
        })
    }

    /// The policy the task was started with.
    pub fn policy(&self) -> AutosavePolicy {
        self.policy
    }

    /// Whether the thread is still exporting.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// A copy of the current counters.
    pub fn stats(&self) -> AutosaveStats {
        let mut stats = self.stats.lock().clone();
        stats.running = self.is_running();
        stats
    }

    /// Stop the thread and wait for it to finish.
    ///
    /// An export already in progress completes first. Calling `stop` more
    /// than once is harmless.
    pub fn stop(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        // The thread may already have exited and dropped the receiver.
        let _ = self.stop_sender.try_send(());
        worker
            .join()
            .map_err(|_| ClassifierError::autosave("autosave thread panicked"))?;

        debug!("Autosave stopped");
        Ok(())
    }
}

impl Drop for AutosaveTask {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!("{e}");
        }
    }
}

fn run(
    classifier: &Classifier,
    policy: AutosavePolicy,
    stop_receiver: &Receiver<()>,
    stats: &Mutex<AutosaveStats>,
) {
    loop {
        match stop_receiver.recv_timeout(policy.interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }

        match classifier.export() {
            Ok(()) => {
                let mut stats = stats.lock();
                stats.saves_completed += 1;
                stats.consecutive_failures = 0;
                stats.last_saved_at = Some(Utc::now());
            }
            Err(e) => {
                let consecutive = {
                    let mut stats = stats.lock();
                    stats.saves_failed += 1;
                    stats.consecutive_failures += 1;
                    stats.last_error = Some(e.to_string());
                    stats.consecutive_failures
                };
                warn!("Autosave failed ({consecutive} in a row): {e}");

                if policy.exhausted(consecutive) {
                    error!("Autosave giving up after {consecutive} consecutive failures");
                    return;
                }
            }
        }
    }
}
