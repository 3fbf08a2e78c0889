//! Ordered delivery of sweep events to a single observer.
//!
//! Worker tasks and the engine task all hold an [`EventSender`]; exactly one
//! [`EventReceiver`] exists and is drained by the observer's context, either
//! from async code via [`EventReceiver::recv`] or from a plain thread via
//! [`EventReceiver::blocking_recv`].

use std::net::Ipv4Addr;

use portsweep_common::error::ProbeError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

#[derive(Debug)]
pub enum SweepEvent {
    /// A scan seeded its queue with `total` addresses.
    Start { total: usize },
    /// A probe got an answer.
    Reachable { host: String, response_code: u16 },
    /// A probe failed.
    Unreachable { addr: Ipv4Addr, error: ProbeError },
    /// Every worker of the scan has exited.
    Complete,
}

#[derive(Debug, Clone)]
pub struct EventSender {
    tx: UnboundedSender<SweepEvent>,
}

#[derive(Debug)]
pub struct EventReceiver {
    rx: UnboundedReceiver<SweepEvent>,
}

pub fn channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}

impl EventSender {
    /// Queues `event` for the observer. Returns `false` once the observer is gone.
    pub fn send(&self, event: SweepEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                trace!(?event, "observer dropped, event discarded");
                false
            }
        }
    }
}

impl EventReceiver {
    pub async fn recv(&mut self) -> Option<SweepEvent> {
        self.rx.recv().await
    }

    /// For observers living on a thread outside the runtime.
    pub fn blocking_recv(&mut self) -> Option<SweepEvent> {
        self.rx.blocking_recv()
    }

    pub fn try_recv(&mut self) -> Option<SweepEvent> {
        self.rx.try_recv().ok()
    }
}


// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
