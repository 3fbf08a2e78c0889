//! Shared building blocks for `portsweep`.
//!
//! Holds the pieces both the engine and the command line need: sweep
//! configuration, error types, the logging macros and local interface lookup.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
