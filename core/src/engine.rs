//! The sweep engine.
//!
//! Scans are executed by one dedicated task, so at most one scan body runs at a
//! time and a new scan never starts before the previous worker pool has exited.
//! Requests are handed to that task through a single-slot watch channel: a
//! request that has not started yet is simply overwritten by the next one, and
//! `abort` empties the slot.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use portsweep_common::config::SweepConfig;
use portsweep_common::{error, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::channel::{EventSender, SweepEvent};
use crate::prober::{ProbeParams, Prober};
use crate::queue::WorkQueue;
use crate::sequencer;
use crate::worker::WorkerPool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRequest {
    pub origin: Ipv4Addr,
    pub params: ProbeParams,
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: u64,
    request: SweepRequest,
}

/// Handle used by callers to start, abort and tear down sweeps.
///
/// Must be created inside a tokio runtime.
pub struct SweepEngine {
    config: SweepConfig,
    queue: Arc<WorkQueue>,
    pending: watch::Sender<Option<Scheduled>>,
    next_id: AtomicU64,
    /// Id of the last request whose scan actually started, `0` for none.
    started: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl SweepEngine {
    pub fn new(
        config: SweepConfig,
        prober: Arc<dyn Prober>,
        events: EventSender,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid sweep configuration")?;

        let queue = Arc::new(WorkQueue::new());
        let (pending, requests) = watch::channel(None);
        let started = Arc::new(AtomicU64::new(0));

        let runner = ScanRunner {
            queue: Arc::clone(&queue),
            started: Arc::clone(&started),
            pool: WorkerPool::new(config.workers),
            prober,
            events,
            requests,
        };
        let task = tokio::spawn(runner.run());

        Ok(Self {
            config,
            queue,
            pending,
            next_id: AtomicU64::new(1),
            started,
            task,
        })
    }

    /// Sweeps the window around `origin` with the configured port and path.
    pub fn sweep(&self, origin: Ipv4Addr) {
        self.sweep_request(SweepRequest {
            origin,
            params: ProbeParams {
                port: self.config.port,
                path: self.config.path.clone(),
            },
        });
    }

    /// Cancels whatever is running or pending and schedules `request`.
    pub fn sweep_request(&self, request: SweepRequest) {
        self.abort();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, origin = %request.origin, port = request.params.port, "sweep scheduled");
        self.pending.send_replace(Some(Scheduled { id, request }));
    }

    /// Drops the pending request and every queued address.
    ///
    /// Probes already in flight finish and are still reported; the running
    /// scan then completes normally. Returns `true` if a request that had not
    /// started yet was dropped.
    pub fn abort(&self) -> bool {
        let started = self.started.load(Ordering::Acquire);
        // A request whose scan already started is cleared without waking the
        // engine task.
        let dropped_request = self
            .pending
            .send_if_modified(|slot| slot.take().is_some_and(|scheduled| scheduled.id != started));
        let dropped_addrs = self.queue.clear();
        if dropped_request || dropped_addrs > 0 {
            debug!(dropped_request, dropped_addrs, "sweep aborted");
        }
        dropped_request
    }

    /// Addresses still waiting for a worker.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Aborts and stops the engine task once the current scan has drained.
    ///
    /// The returned handle resolves when the task has exited.
    pub fn destroy(self) -> JoinHandle<()> {
        self.abort();
        let Self { pending, task, .. } = self;
        drop(pending);
        task
    }
}

struct ScanRunner {
    queue: Arc<WorkQueue>,
    started: Arc<AtomicU64>,
    pool: WorkerPool,
    prober: Arc<dyn Prober>,
    events: EventSender,
    requests: watch::Receiver<Option<Scheduled>>,
}

impl ScanRunner {
    async fn run(mut self) {
        while self.requests.changed().await.is_ok() {
            loop {
                // Read the generation first: a clear after this point makes the
                // request we are about to take stale.
                let generation = self.queue.generation();
                let Some(scheduled) = self.requests.borrow_and_update().clone() else {
                    break;
                };
                if self.scan(scheduled, generation).await {
                    break;
                }
            }
        }
        debug!("sweep engine stopped");
    }

    /// Returns `false` if the request was superseded before it could start.
    async fn scan(&self, scheduled: Scheduled, generation: u64) -> bool {
        let Scheduled { id, request } = scheduled;
        let addresses = sequencer::generate(request.origin);
        let total = addresses.len();

        if !self.queue.seed(generation, addresses) {
            debug!(origin = %request.origin, "sweep superseded before start");
            return false;
        }
        self.started.store(id, Ordering::Release);

        info!(
            origin = %request.origin,
            port = request.params.port,
            total,
            workers = self.pool.size(),
            "sweep started"
        );
        self.events.send(SweepEvent::Start { total });

        let report = self
            .pool
            .run(
                Arc::clone(&self.queue),
                Arc::clone(&self.prober),
                Arc::new(request.params),
                self.events.clone(),
            )
            .await;

        if report.interrupted > 0 {
            // Nobody is left to drain what the dead workers did not take.
            let abandoned = self.queue.clear();
            error!(
                interrupted = report.interrupted,
                abandoned,
                "waiting for workers was interrupted"
            );
        }
        info!(probed = report.probed, total, "sweep finished");
        self.events.send(SweepEvent::Complete);
        true
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
