#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;

use portsweep_common::config::SweepConfig;
use portsweep_core::{channel, sequencer, EventReceiver, SweepEngine, SweepObserver, SweepState};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::utils::{
    observe_until_complete, GatedProber, PanickingProber, Recorder, Seen, EVENT_TIMEOUT,
};

const WORKERS: usize = 4;

fn config() -> SweepConfig {
    SweepConfig {
        workers: WORKERS,
        ..Default::default()
    }
}

async fn wait_parked(parked: &mut UnboundedReceiver<Ipv4Addr>, count: usize) {
    for _ in 0..count {
        tokio::time::timeout(EVENT_TIMEOUT, parked.recv())
            .await
            .expect("workers never parked")
            .expect("prober dropped");
    }
}

fn results(seen: &[Seen]) -> usize {
    seen.iter().filter(|s| **s == Seen::Result).count()
}

async fn assert_closed(rx: &mut EventReceiver) {
    let next = tokio::time::timeout(EVENT_TIMEOUT, rx.recv()).await.unwrap();
    assert!(next.is_none(), "unexpected event {next:?}");
}

/// Aborting after 50 addresses were dispatched: nothing else is probed and a
/// single Complete still arrives once the in-flight probes return.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn abort_mid_sweep_stops_dispatch() {
    let origin = Ipv4Addr::new(192, 168, 1, 10);
    let total = sequencer::generate(origin).len();
    let (prober, mut parked) = GatedProber::new(50 - WORKERS);
    let prober = Arc::new(prober);
    let recorder = Recorder::default();
    let mut observer = SweepObserver::new(Box::new(recorder.clone()));
    let (tx, mut rx) = channel::channel();

    let engine = SweepEngine::new(config(), prober.clone(), tx).unwrap();
    engine.sweep(origin);
    wait_parked(&mut parked, WORKERS).await;

    engine.abort();
    assert_eq!(engine.queued(), 0);
    prober.release(WORKERS);

    let seen = observe_until_complete(&mut observer, &mut rx, 1).await;

    assert_eq!(seen.first(), Some(&Seen::Start(total)));
    assert_eq!(results(&seen), 50);
    assert_eq!(prober.started(), 50);

    let progress = recorder.progress();
    assert_eq!(progress[progress.len() - 2], (50, total));
    assert_eq!(progress[progress.len() - 1], (total, total));

    engine.destroy().await.unwrap();
    assert_closed(&mut rx).await;
}

/// A new sweep issued while the previous one is still probing waits for the
/// previous pool to exit: its Complete precedes the new Start.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sweep_during_scan_waits_for_previous_pool() {
    let first = Ipv4Addr::new(10, 0, 1, 128);
    let second = Ipv4Addr::new(10, 0, 2, 128);
    let (prober, mut parked) = GatedProber::new(0);
    let prober = Arc::new(prober.only_in(first));
    let recorder = Recorder::default();
    let mut observer = SweepObserver::new(Box::new(recorder.clone()));
    let (tx, mut rx) = channel::channel();

    let engine = SweepEngine::new(config(), prober.clone(), tx).unwrap();
    engine.sweep(first);
    wait_parked(&mut parked, WORKERS).await;

    engine.sweep(second);
    prober.release(WORKERS);

    let seen = observe_until_complete(&mut observer, &mut rx, 2).await;

    let mut expected = vec![Seen::Start(254)];
    expected.extend(std::iter::repeat_n(Seen::Result, WORKERS));
    expected.push(Seen::Complete);
    expected.push(Seen::Start(254));
    expected.extend(std::iter::repeat_n(Seen::Result, 254));
    expected.push(Seen::Complete);
    assert_eq!(seen, expected);

    assert_eq!(prober.started(), WORKERS);
    assert_eq!(
        observer.state(),
        SweepState {
            progress: 254,
            max: 254,
            complete: true
        }
    );

    engine.destroy().await.unwrap();
}

/// Destroying the engine mid-sweep lets in-flight probes finish, emits the
/// final Complete and then shuts the engine task down.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn destroy_mid_sweep_still_completes() {
    let (prober, mut parked) = GatedProber::new(10);
    let prober = Arc::new(prober);
    let mut observer = SweepObserver::new(Box::new(Recorder::default()));
    let (tx, mut rx) = channel::channel();

    let engine = SweepEngine::new(config(), prober.clone(), tx).unwrap();
    engine.sweep(Ipv4Addr::new(172, 16, 0, 1));
    wait_parked(&mut parked, WORKERS).await;

    let stopped = engine.destroy();
    prober.release(WORKERS);

    let seen = observe_until_complete(&mut observer, &mut rx, 1).await;
    assert_eq!(results(&seen), 10 + WORKERS);

    tokio::time::timeout(EVENT_TIMEOUT, stopped).await.unwrap().unwrap();
    assert_closed(&mut rx).await;
}

/// Workers dying inside the prober still end the scan with Complete, so the
/// observer reaches full progress instead of stalling.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn crashed_workers_still_complete_the_sweep() {
    let recorder = Recorder::default();
    let mut observer = SweepObserver::new(Box::new(recorder.clone()));
    let (tx, mut rx) = channel::channel();

    let engine = SweepEngine::new(config(), Arc::new(PanickingProber), tx).unwrap();
    engine.sweep(Ipv4Addr::new(10, 0, 0, 128));

    let seen = observe_until_complete(&mut observer, &mut rx, 1).await;

    assert_eq!(seen, vec![Seen::Start(254), Seen::Complete]);
    assert_eq!(
        observer.state(),
        SweepState {
            progress: 254,
            max: 254,
            complete: true
        }
    );
    assert_eq!(recorder.progress().last(), Some(&(254, 254)));
    assert_eq!(engine.queued(), 0);

    engine.destroy().await.unwrap();
    assert_closed(&mut rx).await;
}
