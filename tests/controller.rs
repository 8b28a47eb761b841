use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Instant};
use url::Url;
use url_poller::{
    ChannelSubscriber, Controller, Event, EventKind, EventReceiver, FailureReason, PollOutcome,
    PollerConfig, PollerService, Probe, SessionStatus, StartError, StopOutcome,
};

/// Probe with a fixed delay that either succeeds or fails with `reason`.
struct Scripted {
    delay: Duration,
    reason: Option<FailureReason>,
    calls: AtomicU64,
}

impl Scripted {
    fn ok(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            reason: None,
            calls: AtomicU64::new(0),
        })
    }

    fn failing(delay: Duration, reason: FailureReason) -> Arc<Self> {
        Arc::new(Self {
            delay,
            reason: Some(reason),
            calls: AtomicU64::new(0),
        })
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Probe for Scripted {
    async fn probe(&self, target: &Url, _timeout: Duration) -> PollOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        time::sleep(self.delay).await;
        match self.reason {
            None => PollOutcome::response(target.as_str(), 200, self.delay, None),
            Some(reason) => PollOutcome::failure(target.as_str(), reason, "scripted", self.delay),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Probe that counts calls made after `stop_requested` is raised.
#[derive(Default)]
struct StopWatch {
    stop_requested: AtomicBool,
    calls: AtomicU64,
    late_calls: AtomicU64,
}

#[async_trait]
impl Probe for StopWatch {
    async fn probe(&self, target: &Url, _timeout: Duration) -> PollOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.stop_requested.load(Ordering::SeqCst) {
            self.late_calls.fetch_add(1, Ordering::SeqCst);
        }
        time::sleep(Duration::from_millis(10)).await;
        PollOutcome::response(target.as_str(), 200, Duration::from_millis(10), None)
    }
}

fn build(probe: Arc<dyn Probe>) -> (Controller, EventReceiver) {
    let (sub, rx) = ChannelSubscriber::pair();
    let controller = Controller::builder(PollerConfig::default())
        .with_subscriber(sub)
        .with_probe(probe)
        .build()
        .expect("controller");
    (controller, rx)
}

/// Shuts the controller down and returns every event it published.
async fn finish(controller: Controller, mut rx: EventReceiver) -> Vec<Event> {
    controller.shutdown().await;
    let mut events = Vec::new();
    while let Some(ev) = rx.recv().await {
        events.push(ev);
    }
    events
}

fn outcomes(events: &[Event]) -> Vec<PollOutcome> {
    events.iter().filter_map(|e| e.outcome.clone()).collect()
}

#[tokio::test(start_paused = true)]
async fn start_then_immediate_stop_emits_at_most_one_outcome() {
    let probe = Scripted::ok(Duration::from_millis(50));
    let (controller, rx) = build(probe);

    controller.start("http://svc.test/health", 2).await.unwrap();
    assert!(controller.stop().await.is_stopped());
    assert_eq!(controller.status().await, SessionStatus::Idle);
    assert!(controller.session().await.is_none());

    let events = finish(controller, rx).await;
    assert!(outcomes(&events).len() <= 1);
}

#[tokio::test(start_paused = true)]
async fn start_while_running_is_rejected_and_keeps_session() {
    let (controller, rx) = build(Scripted::ok(Duration::from_millis(10)));

    let first = controller.start("http://a.test/", 3).await.unwrap();
    let err = controller.start("http://b.test/", 7).await.unwrap_err();

    assert_eq!(err.as_label(), "already_running");
    let current = controller.session().await.expect("running session");
    assert_eq!(current, first);
    assert_eq!(current.target.as_str(), "http://a.test/");
    assert_eq!(current.interval, Duration::from_secs(3));
    assert_eq!(controller.status().await, SessionStatus::Running);

    let events = finish(controller, rx).await;
    assert!(events.iter().all(|e| e.target.as_ref() == "http://a.test/"));
}

#[tokio::test(start_paused = true)]
async fn stop_while_idle_is_a_silent_noop() {
    let (controller, rx) = build(Scripted::ok(Duration::ZERO));

    assert_eq!(controller.stop().await, StopOutcome::NotRunning);
    assert_eq!(controller.stop().await, StopOutcome::NotRunning);
    assert_eq!(controller.status().await, SessionStatus::Idle);

    assert!(finish(controller, rx).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn emits_at_least_k_outcomes_in_timestamp_order() {
    let probe = Scripted::ok(Duration::from_millis(20));
    let (controller, rx) = build(probe.clone());

    controller.start("http://svc.test/", 1).await.unwrap();
    time::sleep(Duration::from_millis(3_500)).await;
    controller.stop().await;

    let events = finish(controller, rx).await;
    let outs = outcomes(&events);
    assert!(outs.len() >= 3, "got {} outcomes", outs.len());
    assert_eq!(outs.len() as u64, probe.calls());
    assert!(outs.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    let ticks: Vec<u64> = events
        .iter()
        .filter(|e| e.is_poll_result())
        .filter_map(|e| e.tick)
        .collect();
    let mut sorted = ticks.clone();
    sorted.sort_unstable();
    assert_eq!(ticks, sorted);
}

#[tokio::test(start_paused = true)]
async fn probe_failures_are_outcomes_and_polling_continues() {
    let probe = Scripted::failing(Duration::from_millis(5), FailureReason::ConnectionRefused);
    let (controller, rx) = build(probe);

    controller.start("http://down.test/", 1).await.unwrap();
    time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(controller.status().await, SessionStatus::Running);
    controller.stop().await;

    let outs = outcomes(&finish(controller, rx).await);
    assert!(outs.len() >= 3);
    assert!(outs
        .iter()
        .all(|o| !o.succeeded && o.reason == Some(FailureReason::ConnectionRefused)));
}

#[tokio::test(start_paused = true)]
async fn slow_probe_does_not_drift_ticks() {
    // 700ms probes on a 1s interval: each tick still fires on the 1s grid.
    let probe = Scripted::ok(Duration::from_millis(700));
    let (controller, rx) = build(probe.clone());

    controller.start("http://slow.test/", 1).await.unwrap();
    time::sleep(Duration::from_millis(4_100)).await;
    controller.stop().await;

    assert_eq!(probe.calls(), 5);
    assert_eq!(outcomes(&finish(controller, rx).await).len(), 5);
}

#[tokio::test(start_paused = true)]
async fn stop_waits_for_the_inflight_probe() {
    let (controller, rx) = build(Scripted::ok(Duration::from_millis(800)));

    controller.start("http://slow.test/", 5).await.unwrap();
    time::sleep(Duration::from_millis(100)).await;

    let before = Instant::now();
    let stopped = controller.stop().await;
    assert!(before.elapsed() >= Duration::from_millis(600));
    assert!(stopped.is_stopped());
    assert_eq!(controller.status().await, SessionStatus::Idle);

    let kinds: Vec<EventKind> = finish(controller, rx).await.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::SessionStarted,
            EventKind::ProbeCompleted,
            EventKind::SessionStopped
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn overrunning_probe_is_reported_as_timeout() {
    // Probe ignores its timeout; the runner caps it below the interval.
    let (controller, rx) = build(Scripted::ok(Duration::from_secs(30)));

    controller.start("http://hang.test/", 1).await.unwrap();
    time::sleep(Duration::from_millis(1_500)).await;
    controller.stop().await;

    let outs = outcomes(&finish(controller, rx).await);
    assert!(!outs.is_empty());
    assert!(outs
        .iter()
        .all(|o| o.reason == Some(FailureReason::Timeout) && o.latency < Duration::from_secs(1)));
}

#[tokio::test(start_paused = true)]
async fn concurrent_starts_create_a_single_session() {
    let (controller, rx) = build(Scripted::ok(Duration::from_millis(10)));
    let controller = Arc::new(controller);

    let attempts = (0..8).map(|i| {
        let c = Arc::clone(&controller);
        tokio::spawn(async move { c.start(&format!("http://svc{i}.test/"), 1).await })
    });
    let results = futures::future::join_all(attempts).await;

    let accepted = results
        .iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Ok(Err(StartError::AlreadyRunning { .. }))))
        .count();
    assert_eq!((accepted, rejected), (1, 7));

    controller.stop().await;
    let controller = Arc::try_unwrap(controller).ok().expect("sole owner");
    let started = finish(controller, rx)
        .await
        .iter()
        .filter(|e| e.kind == EventKind::SessionStarted)
        .count();
    assert_eq!(started, 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_stops_share_one_teardown() {
    let (controller, rx) = build(Scripted::ok(Duration::from_millis(500)));
    let controller = Arc::new(controller);
    controller.start("http://svc.test/", 2).await.unwrap();
    time::sleep(Duration::from_millis(50)).await;

    let a = tokio::spawn({
        let c = Arc::clone(&controller);
        async move { c.stop().await }
    });
    let b = tokio::spawn({
        let c = Arc::clone(&controller);
        async move { c.stop().await }
    });
    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    assert!(a.is_stopped() || b.is_stopped());
    assert_eq!(controller.status().await, SessionStatus::Idle);

    let controller = Arc::try_unwrap(controller).ok().expect("sole owner");
    let stopped = finish(controller, rx)
        .await
        .iter()
        .filter(|e| e.kind == EventKind::SessionStopped)
        .count();
    assert_eq!(stopped, 1);
}

#[tokio::test(start_paused = true)]
async fn start_during_teardown_is_rejected_then_allowed() {
    let (controller, rx) = build(Scripted::ok(Duration::from_millis(500)));
    let controller = Arc::new(controller);
    let first = controller.start("http://svc.test/", 2).await.unwrap();
    time::sleep(Duration::from_millis(50)).await;

    let stopper = tokio::spawn({
        let c = Arc::clone(&controller);
        async move { c.stop().await }
    });
    time::sleep(Duration::from_millis(10)).await;
    assert_eq!(controller.status().await, SessionStatus::Stopping);
    let err = controller.start("http://other.test/", 1).await.unwrap_err();
    assert_eq!(err.as_label(), "stop_in_progress");

    stopper.await.unwrap();
    let second = controller.start("http://other.test/", 1).await.unwrap();
    assert!(second.id > first.id);
    controller.stop().await;

    let controller = Arc::try_unwrap(controller).ok().expect("sole owner");
    drop(finish(controller, rx).await);
}

#[tokio::test(start_paused = true)]
async fn invalid_inputs_create_no_session_and_no_events() {
    let (controller, rx) = build(Scripted::ok(Duration::ZERO));
    let controller = Arc::new(controller);
    let service = PollerService::new(Arc::clone(&controller));

    let empty = service.start_polling("", 5).await;
    assert!(empty.starts_with("Error: invalid target"), "{empty}");

    let zero = service.start_polling("http://svc.test/", 0).await;
    assert!(zero.starts_with("Error: invalid interval"), "{zero}");
    assert!(zero.contains("interval must be greater than 0"));

    let negative = service.start_polling("http://svc.test/", -1).await;
    assert!(negative.starts_with("Error:"));

    assert_eq!(controller.status().await, SessionStatus::Idle);
    drop(service);
    let controller = Arc::try_unwrap(controller).ok().expect("sole owner");
    assert!(finish(controller, rx).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn service_reports_string_results() {
    let (controller, rx) = build(Scripted::ok(Duration::from_millis(5)));
    let controller = Arc::new(controller);
    let service = PollerService::new(Arc::clone(&controller));

    assert_eq!(
        service.start_polling("https://svc.test/health", 5).await,
        "Started polling https://svc.test/health every 5 seconds"
    );
    assert!(service
        .start_polling("https://svc.test/health", 5)
        .await
        .starts_with("Error: already polling"));
    assert_eq!(service.stop_polling().await, "Polling stopped");
    assert_eq!(service.stop_polling().await, "Not currently polling");

    drop(service);
    let controller = Arc::try_unwrap(controller).ok().expect("sole owner");
    let events = finish(controller, rx).await;
    let payloads: Vec<_> = events.iter().filter_map(PollerService::wire_message).collect();
    assert!(payloads.len() <= 1);
    for (channel, payload) in payloads {
        assert_eq!(channel, "pollResult");
        assert_eq!(payload["success"], true);
    }
}

#[tokio::test(start_paused = true)]
async fn no_probe_starts_once_stop_is_called() {
    let probe = Arc::new(StopWatch::default());
    let (controller, rx) = build(probe.clone());

    controller.start("http://svc.test/", 1).await.unwrap();
    // Land exactly on the second tick's deadline.
    time::sleep(Duration::from_secs(1)).await;
    probe.stop_requested.store(true, Ordering::SeqCst);
    assert!(controller.stop().await.is_stopped());

    assert_eq!(probe.late_calls.load(Ordering::SeqCst), 0);
    let outs = outcomes(&finish(controller, rx).await);
    assert_eq!(outs.len() as u64, probe.calls.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_controller_stops_polling() {
    let probe = Scripted::ok(Duration::from_millis(10));
    let (controller, rx) = build(probe.clone());

    controller.start("http://svc.test/", 1).await.unwrap();
    time::sleep(Duration::from_millis(1_500)).await;
    let at_drop = probe.calls();
    assert_eq!(at_drop, 2);

    drop(controller);
    drop(rx);
    time::sleep(Duration::from_secs(5)).await;
    assert_eq!(probe.calls(), at_drop);
}
