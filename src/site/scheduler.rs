//! Background rebuild scheduler
//!
//! Rebuilds the site on a fixed interval until stopped. The running flag is
//! owned here and start/stop are its only mutation points; there is no
//! global state to race on.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::repository::Repository;
use crate::site::SiteBuilder;

/// Periodically rebuilds the site on a background thread
///
/// ## Lifecycle
/// - `start()`: Stopped → Running, spawns the loop; a no-op while Running
/// - `stop()`: Running → Stopped by clearing the flag; the loop observes it
///   only after finishing its current build-and-wait cycle, so stop latency
///   is bounded by one build plus one interval
///
/// ## Concurrency:
/// - `running`: the cooperative flag checked once per cycle
/// - `builds`: completed cycles, observable as the build-count probe
/// - `worker`: the loop's join handle; the mutex serializes start/stop so
///   two callers cannot both decide to spawn
pub struct Scheduler {
    repository: Arc<Repository>,
    builder: SiteBuilder,
    interval: Duration,

    running: Arc<AtomicBool>,
    builds: Arc<AtomicU64>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    /// Create a stopped scheduler
    pub fn new(repository: Arc<Repository>, builder: SiteBuilder, interval: Duration) -> Self {
        Self {
            repository,
            builder,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            builds: Arc::new(AtomicU64::new(0)),
            worker: Mutex::new(None),
        }
    }

    /// Start the rebuild loop; a no-op if it is already running
    ///
    /// Exactly one loop exists at a time. A start right after a stop first
    /// waits out the stopped loop's final cycle - without the join, the old
    /// loop could wake mid-sleep, see the re-raised flag, and keep running
    /// next to the new one.
    pub fn start(&self) {
        let mut worker = self.worker.lock();

        if self.running.load(Ordering::SeqCst) {
            tracing::debug!("rebuild loop already running");
            return;
        }

        if let Some(handle) = worker.take() {
            let _ = handle.join();
        }

        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let builds = Arc::clone(&self.builds);
        let repository = Arc::clone(&self.repository);
        let builder = self.builder.clone();
        let interval = self.interval;

        *worker = Some(thread::spawn(move || {
            tracing::info!("rebuild loop started (interval {:?})", interval);

            while running.load(Ordering::SeqCst) {
                match builder.build(&repository) {
                    Ok(summary) => tracing::debug!(
                        "automatic rebuild: {} pages written, {} skipped",
                        summary.pages_written,
                        summary.pages_skipped
                    ),
                    Err(e) => tracing::warn!("automatic rebuild failed: {}", e),
                }

                builds.fetch_add(1, Ordering::SeqCst);
                thread::sleep(interval);
            }

            tracing::info!("rebuild loop stopped");
        }));
    }

    /// Clear the running flag
    ///
    /// Returns immediately; the loop exits after its current cycle.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the loop is (cooperatively) running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Completed build-and-wait cycles since creation
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::SeqCst)
    }
}
