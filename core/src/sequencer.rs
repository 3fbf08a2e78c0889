//! Scan order generation.
//!
//! Candidates are produced outwards from the origin (±1, ±2, … ±127) so hosts
//! that joined the network recently, and were therefore handed an address near
//! ours by a sequential DHCP server, are probed first.

use std::net::Ipv4Addr;

/// Furthest distance from the origin that is still probed.
pub const MAX_DELTA: u8 = 127;

/// Upper bound of addresses a single sweep can produce.
pub const MAX_CANDIDATES: usize = 2 * MAX_DELTA as usize;

/// Lazily yields the sweep order around `origin`.
///
/// Only the last octet changes. A last octet of `0` is never produced.
#[derive(Debug, Clone)]
pub struct AddressSequence {
    origin: Ipv4Addr,
    delta: u8,
    upward: bool,
}

impl AddressSequence {
    pub fn new(origin: Ipv4Addr) -> Self {
        Self {
            origin,
            delta: 1,
            upward: false,
        }
    }
}

impl Iterator for AddressSequence {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        while self.delta <= MAX_DELTA {
            let [a, b, c, start] = self.origin.octets();
            let last = if self.upward {
                start.wrapping_add(self.delta)
            } else {
                start.wrapping_sub(self.delta)
            };

            if self.upward {
                self.delta += 1;
            }
            self.upward = !self.upward;

            if last != 0 {
                return Some(Ipv4Addr::new(a, b, c, last));
            }
        }
        None
    }
}

/// Collects the full sweep order for `origin`.
pub fn generate(origin: Ipv4Addr) -> Vec<Ipv4Addr> {
    AddressSequence::new(origin).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
