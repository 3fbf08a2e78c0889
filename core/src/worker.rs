//! Concurrent probe loops.
//!
//! Every worker pulls from the shared [`WorkQueue`] until it runs dry, then
//! exits. Workers never talk to each other; the queue is all they share.

use std::sync::Arc;

use portsweep_common::error;
use tokio::task::JoinSet;
use tracing::debug;

use crate::channel::{EventSender, SweepEvent};
use crate::prober::{ProbeParams, Prober, Reachable};
use crate::queue::WorkQueue;

/// Outcome of one pool run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// Addresses taken off the queue and probed.
    pub probed: usize,
    /// Workers whose task panicked or was cancelled.
    pub interrupted: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn size(&self) -> usize {
        self.workers
    }

    /// Spawns the workers and waits until every one of them has exited.
    pub async fn run(
        &self,
        queue: Arc<WorkQueue>,
        prober: Arc<dyn Prober>,
        params: Arc<ProbeParams>,
        events: EventSender,
    ) -> PoolReport {
        let mut set = JoinSet::new();
        for id in 0..self.workers {
            set.spawn(work(
                id,
                Arc::clone(&queue),
                Arc::clone(&prober),
                Arc::clone(&params),
                events.clone(),
            ));
        }

        let mut report = PoolReport::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(probed) => report.probed += probed,
                Err(e) => {
                    error!("worker interrupted: {e}");
                    report.interrupted += 1;
                }
            }
        }
        report
    }
}

async fn work(
    id: usize,
    queue: Arc<WorkQueue>,
    prober: Arc<dyn Prober>,
    params: Arc<ProbeParams>,
    events: EventSender,
) -> usize {
    let mut probed = 0;
    while let Some(addr) = queue.pop() {
        let event = match prober.probe(addr, &params).await {
            Ok(Reachable {
                host,
                response_code,
            }) => SweepEvent::Reachable {
                host,
                response_code,
            },
            Err(error) => SweepEvent::Unreachable { addr, error },
        };
        events.send(event);
        probed += 1;
    }
    debug!(worker = id, probed, "queue drained");
    probed
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
