use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_PATH: &str = "/";
pub const DEFAULT_WORKERS: usize = 16;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1_000);

/// Construction-time settings of a sweep engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Port probed on every candidate address.
    pub port: u16,
    /// Resource requested by probers that speak an application protocol.
    pub path: String,
    /// Number of concurrent probe loops per scan.
    pub workers: usize,
    /// Upper bound for a single probe.
    pub timeout: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if !self.path.starts_with('/') {
            return Err(ConfigError::RelativePath(self.path.clone()));
        }
        Ok(())
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
