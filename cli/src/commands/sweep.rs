use std::net::Ipv4Addr;
use std::sync::{Arc, PoisonError};
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use portsweep_common::{network::interface, success, warn};
use portsweep_core::{
    HttpProber, Prober, SweepEngine, SweepObserver, TcpConnectProber, channel,
};
use tokio::task::JoinHandle;
use tracing::info_span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use super::SweepArgs;
use crate::terminal::print::{self, colors};
use crate::terminal::progress::{self, FoundHost, FoundHosts, TerminalCallback};

pub async fn sweep(args: SweepArgs, q_level: u8) -> anyhow::Result<()> {
    let cfg = args.to_config();
    let origin: Ipv4Addr = match args.origin {
        Some(origin) => origin,
        None => interface::lan_origin().context("no origin given and none could be detected")?,
    };

    let prober: Arc<dyn Prober> = if args.connect_only {
        Arc::new(TcpConnectProber::new(cfg.timeout))
    } else {
        Arc::new(HttpProber::new(cfg.timeout)?)
    };

    if q_level == 0 {
        print::aligned_line("Origin", origin.to_string());
        print::aligned_line("Port", cfg.port.to_string());
        if !args.connect_only {
            print::aligned_line("Path", cfg.path.clone());
        }
        print::aligned_line("Workers", cfg.workers.to_string());
    }

    let span = info_span!("sweep", indicatif.pb_show = true);
    span.pb_set_style(&progress::style()?);
    span.pb_start();

    let found: FoundHosts = FoundHosts::default();
    let callback = TerminalCallback::new(span.clone(), Arc::clone(&found), q_level);
    let mut observer = SweepObserver::new(Box::new(callback));

    let (tx, mut rx) = channel::channel();
    let sweeper = SweepEngine::new(cfg.clone(), prober, tx)?;
    sweeper.sweep(origin);

    // Ctrl-C takes the engine out to destroy it; the loop then runs until the
    // engine task drops the last sender.
    let mut engine = Some(sweeper);
    let mut stopping: Option<JoinHandle<()>> = None;

    let start_time = Instant::now();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => {
                    observer.handle(event);
                    if observer.state().complete {
                        break;
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c, if engine.is_some() => {
                warn!("Interrupted, waiting for in-flight probes to return");
                stopping = engine.take().map(SweepEngine::destroy);
            }
        }
    }

    if let Some(handle) = engine.map(SweepEngine::destroy).or(stopping) {
        handle.await.context("sweep engine task failed")?;
    }
    drop(span);

    let hosts: Vec<FoundHost> = std::mem::take(
        &mut *found.lock().unwrap_or_else(PoisonError::into_inner),
    );
    sweep_ends(hosts, cfg.port, start_time.elapsed(), q_level);
    Ok(())
}

fn sweep_ends(mut hosts: Vec<FoundHost>, port: u16, total_time: Duration, q_level: u8) {
    if hosts.is_empty() {
        print::header("zero hosts answered", q_level);
        print::no_results();
        return;
    }

    if q_level > 1 {
        for host in &hosts {
            print::print(&host.hostname);
        }
        return;
    }

    print::header("sweep results", q_level);
    hosts.sort_by_key(|host| host.hostname.parse::<Ipv4Addr>().ok());
    for (idx, host) in hosts.iter().enumerate() {
        print::tree_head(idx, &host.hostname);
        print::as_tree_one_level(vec![
            ("Port".to_string(), port.to_string().normal()),
            ("Code".to_string(), response_code(host.response_code)),
        ]);
    }
    print_summary(hosts.len(), total_time, q_level);
}

fn response_code(code: u16) -> ColoredString {
    let label = code_label(code);
    match code {
        0 | 200..=299 => label.green(),
        300..=399 => label.yellow(),
        _ => label.red(),
    }
}

/// Connect-only probes carry no application response.
fn code_label(code: u16) -> String {
    match code {
        0 => "open".to_string(),
        _ => code.to_string(),
    }
}

fn print_summary(hosts_len: usize, total_time: Duration, q_level: u8) {
    let unit = if hosts_len == 1 { "host" } else { "hosts" };
    let summary = format!(
        "Sweep complete: {hosts_len} {unit} answered in {:.2}s",
        total_time.as_secs_f64()
    );

    match q_level {
        0 => {
            print::fat_separator();
            print::centerln(&summary, |s| s.color(colors::TEXT_DEFAULT).bold());
        }
        _ => success!("{}", summary),
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
