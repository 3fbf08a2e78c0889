use std::sync::{Arc, Mutex, PoisonError};

use colored::*;
use indicatif::ProgressStyle;
use portsweep_core::SweepCallback;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use super::print::{self, colors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundHost {
    pub hostname: String,
    pub response_code: u16,
}

/// Hosts collected by a [`TerminalCallback`], shared with the command that
/// prints the summary.
pub type FoundHosts = Arc<Mutex<Vec<FoundHost>>>;

/// Renders sweep notifications onto the progress bar of `span`.
pub struct TerminalCallback {
    span: Span,
    found: FoundHosts,
    live: bool,
}

impl TerminalCallback {
    pub fn new(span: Span, found: FoundHosts, q_level: u8) -> Self {
        Self {
            span,
            found,
            live: q_level < 2,
        }
    }
}

impl SweepCallback for TerminalCallback {
    fn on_host_found(&mut self, hostname: &str, response_code: u16) {
        if self.live {
            print::print(&format!(
                "{} {} {}",
                "[+]".green().bold(),
                hostname.color(colors::PRIMARY),
                format!("({response_code})").color(colors::SEPARATOR)
            ));
        }
        self.found
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(FoundHost {
                hostname: hostname.to_string(),
                response_code,
            });
    }

    fn on_progress(&mut self, progress: usize, max: usize) {
        self.span.pb_set_length(max as u64);
        self.span.pb_set_position(progress as u64);
    }
}

pub fn style() -> anyhow::Result<ProgressStyle> {
    let style = ProgressStyle::with_template("{spinner:.blue} [{bar:40.green/black}] {pos}/{len} {msg}")?
        .progress_chars("█▆▁")
        .tick_strings(&["▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁"]);
    Ok(style)
}
