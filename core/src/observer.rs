//! Observer-side handling of sweep events.
//!
//! [`SweepObserver`] is the only writer of [`SweepState`]. It is driven one
//! event at a time on the observer's context, so the state needs no locking.

use portsweep_common::warn;
use tracing::debug;

use crate::channel::{EventReceiver, SweepEvent};

/// Notifications surfaced to whoever renders the sweep.
pub trait SweepCallback: Send {
    fn on_host_found(&mut self, hostname: &str, response_code: u16);

    fn on_progress(&mut self, progress: usize, max: usize);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepState {
    pub progress: usize,
    pub max: usize,
    pub complete: bool,
}

pub struct SweepObserver {
    state: SweepState,
    callback: Box<dyn SweepCallback>,
}

impl SweepObserver {
    pub fn new(callback: Box<dyn SweepCallback>) -> Self {
        Self {
            state: SweepState::default(),
            callback,
        }
    }

    pub fn set_callback(&mut self, callback: Box<dyn SweepCallback>) {
        self.callback = callback;
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    /// Applies one event. Returns `false` if it was discarded as stray.
    ///
    /// Once a scan is complete only a new `Start` is accepted; anything else
    /// belongs to a finished or superseded scan.
    pub fn handle(&mut self, event: SweepEvent) -> bool {
        if self.state.complete && !matches!(event, SweepEvent::Start { .. }) {
            warn!(?event, "unexpected callback");
            return false;
        }

        match event {
            SweepEvent::Start { total } => {
                self.state = SweepState {
                    progress: 0,
                    max: total,
                    complete: false,
                };
            }
            SweepEvent::Reachable {
                host,
                response_code,
            } => {
                self.callback.on_host_found(&host, response_code);
                self.state.progress += 1;
            }
            SweepEvent::Unreachable { addr, error } => {
                debug!(%addr, %error, "unreachable");
                self.state.progress += 1;
            }
            SweepEvent::Complete => {
                self.state.complete = true;
                self.state.progress = self.state.max;
            }
        }

        self.callback.on_progress(self.state.progress, self.state.max);
        true
    }

    /// Drains `events` until every sender is gone.
    pub async fn run(mut self, mut events: EventReceiver) -> Self {
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        self
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
