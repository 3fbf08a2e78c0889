#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;

use portsweep_common::config::SweepConfig;
use portsweep_core::{channel, sequencer, SweepEngine, SweepObserver, SweepState};

use crate::utils::{observe_until_complete, Call, Recorder, ScriptedProber, Seen};

const ORIGIN: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 10);

fn config(workers: usize) -> SweepConfig {
    SweepConfig {
        port: 80,
        workers,
        ..Default::default()
    }
}

/// Every probe fails: the observer sees Start, one progress step per address
/// and a final Complete, and never hears about a host.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sweep_with_no_reachable_hosts() {
    let total = sequencer::generate(ORIGIN).len();
    let prober = Arc::new(ScriptedProber::unreachable());
    let recorder = Recorder::default();
    let mut observer = SweepObserver::new(Box::new(recorder.clone()));
    let (tx, mut rx) = channel::channel();

    let engine = SweepEngine::new(config(4), prober.clone(), tx).unwrap();
    engine.sweep(ORIGIN);

    let seen = observe_until_complete(&mut observer, &mut rx, 1).await;

    assert_eq!(seen.first(), Some(&Seen::Start(total)));
    assert_eq!(seen.last(), Some(&Seen::Complete));
    assert_eq!(seen.iter().filter(|s| **s == Seen::Result).count(), total);

    let mut expected: Vec<(usize, usize)> = (0..=total).map(|p| (p, total)).collect();
    expected.push((total, total));
    assert_eq!(recorder.progress(), expected);
    assert!(recorder.hosts().is_empty());

    assert_eq!(
        observer.state(),
        SweepState {
            progress: total,
            max: total,
            complete: true
        }
    );

    let mut probed = prober.probed();
    probed.sort();
    let mut generated = sequencer::generate(ORIGIN);
    generated.sort();
    assert_eq!(probed, generated);

    engine.destroy().await.unwrap();
}

/// One neighbour answers with 200: exactly one host notification, placed
/// between the progress updates surrounding its arrival.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sweep_reports_single_reachable_host() {
    let neighbour = Ipv4Addr::new(192, 168, 1, 11);
    let total = sequencer::generate(ORIGIN).len();
    let prober = Arc::new(ScriptedProber::unreachable().with_host(neighbour, 200));
    let recorder = Recorder::default();
    let mut observer = SweepObserver::new(Box::new(recorder.clone()));
    let (tx, mut rx) = channel::channel();

    let engine = SweepEngine::new(config(4), prober, tx).unwrap();
    engine.sweep(ORIGIN);
    observe_until_complete(&mut observer, &mut rx, 1).await;

    assert_eq!(recorder.hosts(), vec![("192.168.1.11".to_string(), 200)]);

    let calls = recorder.calls();
    let found = calls
        .iter()
        .position(|call| matches!(call, Call::Host(..)))
        .unwrap();
    let Call::Progress(before, _) = calls[found - 1] else {
        panic!("host notification not preceded by progress");
    };
    assert_eq!(calls[found + 1], Call::Progress(before + 1, total));
    assert_eq!(observer.state().progress, total);

    engine.destroy().await.unwrap();
}

/// Two sweeps issued back to back: the first never starts, so the observer
/// only ever sees the second one.
#[tokio::test]
async fn restart_before_start_runs_only_latest_sweep() {
    let first = Ipv4Addr::new(10, 0, 1, 10);
    let second = Ipv4Addr::new(10, 0, 2, 128);
    let prober = Arc::new(ScriptedProber::unreachable());
    let recorder = Recorder::default();
    let mut observer = SweepObserver::new(Box::new(recorder.clone()));
    let (tx, mut rx) = channel::channel();

    let engine = SweepEngine::new(config(4), prober.clone(), tx).unwrap();
    engine.sweep(first);
    engine.sweep(second);

    let seen = observe_until_complete(&mut observer, &mut rx, 1).await;
    let handle = engine.destroy();
    handle.await.unwrap();
    assert!(rx.recv().await.is_none(), "events after the latest sweep");

    let starts: Vec<&Seen> = seen.iter().filter(|s| matches!(s, Seen::Start(_))).collect();
    assert_eq!(starts, vec![&Seen::Start(sequencer::generate(second).len())]);

    let probed = prober.probed();
    assert_eq!(probed.len(), 254);
    assert!(probed.iter().all(|addr| addr.octets()[..3] == [10, 0, 2]));
}

/// Back to back sweeps of the same origin give identical totals.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn repeated_sweeps_report_same_total() {
    let total = sequencer::generate(ORIGIN).len();
    let recorder = Recorder::default();
    let mut observer = SweepObserver::new(Box::new(recorder.clone()));
    let (tx, mut rx) = channel::channel();

    let engine = SweepEngine::new(config(8), Arc::new(ScriptedProber::unreachable()), tx).unwrap();

    for _ in 0..2 {
        engine.sweep(ORIGIN);
        let seen = observe_until_complete(&mut observer, &mut rx, 1).await;
        assert_eq!(seen[0], Seen::Start(total));
        assert_eq!(observer.state().progress, total);
    }

    engine.destroy().await.unwrap();
}
