//! The per-address probe capability.
//!
//! The engine only needs [`Prober`]; the concrete adapters below are what the
//! command line wires in.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use portsweep_common::error::ProbeError;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Parameters passed along with every probe of a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeParams {
    pub port: u16,
    /// Resource requested by application-level probers.
    pub path: String,
}

/// A host that answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachable {
    pub host: String,
    pub response_code: u16,
}

/// Classifies one address as reachable or not.
///
/// Every call must finish in finite time.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr, params: &ProbeParams) -> Result<Reachable, ProbeError>;
}

/// Plain TCP handshake. Reachable hosts report response code `0`.
#[derive(Debug, Clone)]
pub struct TcpConnectProber {
    timeout: Duration,
}

impl TcpConnectProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, addr: Ipv4Addr, params: &ProbeParams) -> Result<Reachable, ProbeError> {
        let socket_addr = SocketAddr::from((addr, params.port));

        match timeout(self.timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_stream)) => Ok(Reachable {
                host: addr.to_string(),
                response_code: 0,
            }),
            Ok(Err(e)) => Err(ProbeError::Io(e)),
            Err(_elapsed) => Err(ProbeError::Timeout(self.timeout)),
        }
    }
}

/// Requests `params.path` over HTTP and reports the status code.
///
/// Any HTTP answer counts as reachable, error statuses included. Redirects are
/// not followed and proxies are bypassed, so the code belongs to the probed host.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()
            .context("building http client")?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, addr: Ipv4Addr, params: &ProbeParams) -> Result<Reachable, ProbeError> {
        let url = format!("http://{addr}:{}{}", params.port, params.path);

        match self.client.get(&url).send().await {
            Ok(resp) => Ok(Reachable {
                host: resp
                    .url()
                    .host_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| addr.to_string()),
                response_code: resp.status().as_u16(),
            }),
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout(self.timeout)),
            Err(e) if e.is_connect() => Err(ProbeError::Io(std::io::Error::other(e))),
            Err(e) => Err(ProbeError::Http(e.to_string())),
        }
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
