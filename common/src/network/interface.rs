//! Local interface lookup.
//!
//! Finds the address a sweep should start from when the caller does not name
//! one: the private IPv4 address of the most suitable LAN interface.

use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback or virtual interface.
    NotPhysical,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    /// The interface carries no private IPv4 address to sweep around.
    NoPrivateIpv4,
}

/// Returns the private IPv4 address of the best LAN interface.
pub fn lan_origin() -> anyhow::Result<Ipv4Addr> {
    let candidates: Vec<NetworkInterface> = pnet::datalink::interfaces()
        .into_iter()
        .filter(|intf| is_viable_lan_interface(intf, is_physical).is_ok())
        .collect();

    let Some(intf) = select_best_lan_interface(candidates, is_wired) else {
        anyhow::bail!("No interfaces available to derive a sweep origin");
    };

    private_ipv4(&intf)
        .ok_or_else(|| anyhow::anyhow!("Interface {} has no private IPv4 address", intf.name))
}

fn private_ipv4(intf: &NetworkInterface) -> Option<Ipv4Addr> {
    intf.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) if v4.ip().is_private() => Some(v4.ip()),
        _ => None,
    })
}

fn is_viable_lan_interface(
    intf: &NetworkInterface,
    is_physical: impl Fn(&NetworkInterface) -> bool,
) -> Result<(), ViabilityError> {
    if !intf.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if intf.is_loopback() || !is_physical(intf) {
        return Err(ViabilityError::NotPhysical);
    }
    if intf.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    if private_ipv4(intf).is_none() {
        return Err(ViabilityError::NoPrivateIpv4);
    }
    Ok(())
}

fn select_best_lan_interface(
    interfaces: Vec<NetworkInterface>,
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> Option<NetworkInterface> {
    let wired = interfaces.iter().position(|intf| is_wired(intf)).unwrap_or(0);
    interfaces.into_iter().nth(wired)
}

fn is_wired(intf: &NetworkInterface) -> bool {
    is_physical(intf) && !is_wireless(intf)
}

#[cfg(target_os = "linux")]
fn is_physical(intf: &NetworkInterface) -> bool {
    std::path::Path::new(&format!("/sys/class/net/{}/device", intf.name)).exists()
}

#[cfg(target_os = "linux")]
fn is_wireless(intf: &NetworkInterface) -> bool {
    std::path::Path::new(&format!("/sys/class/net/{}/wireless", intf.name)).exists()
}

// Without sysfs every interface with a MAC counts as hardware.
#[cfg(not(target_os = "linux"))]
fn is_physical(intf: &NetworkInterface) -> bool {
    intf.mac.is_some()
}

#[cfg(not(target_os = "linux"))]
fn is_wireless(_intf: &NetworkInterface) -> bool {
    false
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
