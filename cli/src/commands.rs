pub mod origin;
pub mod sweep;

use std::net::Ipv4Addr;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use portsweep_common::config::{DEFAULT_PATH, DEFAULT_PORT, DEFAULT_WORKERS, SweepConfig};

const DEFAULT_TIMEOUT_MS: u64 = 1_000;

#[derive(Parser)]
#[command(name = "portsweep")]
#[command(about = "Sweeps the local subnet for hosts serving a port.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce decorative output (-q drops headers, -qq prints only hosts)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the address a sweep would start from
    #[command(alias = "o")]
    Origin,
    /// Probe the addresses around an origin
    #[command(alias = "s")]
    Sweep(SweepArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Address to sweep around, defaults to this host's LAN address
    pub origin: Option<Ipv4Addr>,

    /// Port probed on every address
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Resource requested from every host
    #[arg(long, default_value = DEFAULT_PATH)]
    pub path: String,

    /// Number of concurrent probes
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Per-probe timeout in milliseconds
    #[arg(short, long = "timeout", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Only complete a TCP handshake instead of issuing an HTTP request
    #[arg(long)]
    pub connect_only: bool,
}

impl SweepArgs {
    pub fn to_config(&self) -> SweepConfig {
        SweepConfig {
            port: self.port,
            path: self.path.clone(),
            workers: self.workers,
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
