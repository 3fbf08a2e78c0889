//! The pending-address queue shared by the engine and its workers.

use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe FIFO of addresses that still have to be probed.
///
/// Every `clear` starts a new generation. Seeding with a stale generation is
/// refused, so a scan aborted between being scheduled and being seeded never
/// puts its addresses on the queue.
#[derive(Debug, Default)]
pub struct WorkQueue {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    pending: VecDeque<Ipv4Addr>,
    generation: u64,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, addr: Ipv4Addr) {
        self.lock().pending.push_back(addr);
    }

    /// Hands out the next address, each one exactly once.
    pub fn pop(&self) -> Option<Ipv4Addr> {
        self.lock().pending.pop_front()
    }

    /// Drops every address not yet handed to a worker.
    ///
    /// Probes already in flight are unaffected.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let dropped = inner.pending.len();
        inner.pending.clear();
        inner.generation = inner.generation.wrapping_add(1);
        dropped
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Appends `addrs` only if no `clear` happened since `generation` was read.
    pub fn seed(&self, generation: u64, addrs: impl IntoIterator<Item = Ipv4Addr>) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        inner.pending.extend(addrs);
        true
    }

    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }

    // A panicking worker must not wedge the queue for everyone else.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
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
