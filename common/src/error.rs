use std::time::Duration;

use thiserror::Error;

/// Why a single address could not be probed.
///
/// Never fatal to a sweep: the address is reported as unreachable and counted
/// towards progress.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no answer within {0:?}")]
    Timeout(Duration),
    #[error("http request failed: {0}")]
    Http(String),
}

impl ProbeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("port 0 cannot be probed")]
    ZeroPort,
    #[error("probe timeout must be greater than zero")]
    ZeroTimeout,
    #[error("probe path must start with '/': {0}")]
    RelativePath(String),
}
