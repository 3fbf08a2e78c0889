use portsweep_common::network::interface;
use portsweep_core::sequencer;

use crate::terminal::print;

pub fn origin() -> anyhow::Result<()> {
    let origin = interface::lan_origin()?;
    let window = sequencer::generate(origin);

    print::aligned_line("Origin", origin.to_string());
    if let (Some(first), Some(last)) = (window.first(), window.last()) {
        print::aligned_line("Window", format!("{} addresses, {first} .. {last}", window.len()));
    }
    Ok(())
}
