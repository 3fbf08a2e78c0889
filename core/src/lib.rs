//! Local-network port sweeping.
//!
//! A [`SweepEngine`] probes the addresses around an origin with a bounded pool
//! of workers and reports every outcome through a single [`channel`] to one
//! [`SweepObserver`].
//!
//! ```text
//! caller ── sweep(origin) ──▶ engine task ──▶ WorkQueue ◀── workers ──▶ Prober
//!                                  │                          │
//!                                  └──── Start / Complete ────┴── Reachable / Unreachable ──▶ observer
//! ```

pub mod channel;
pub mod engine;
pub mod observer;
pub mod prober;
pub mod queue;
pub mod sequencer;
pub mod worker;

pub use channel::{EventReceiver, EventSender, SweepEvent};
pub use engine::{SweepEngine, SweepRequest};
pub use observer::{SweepCallback, SweepObserver, SweepState};
pub use prober::{HttpProber, ProbeParams, Prober, Reachable, TcpConnectProber};
