//! End-to-end tests for the chrome controller against a recording host.
//!
//! Time is passed explicitly except in the worker test.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use horizon_chrome::{
    ChangeOrigin, ChromeConfig, ChromeController, ChromeEvent, CursorShape, DebounceWorker,
    DragState, Easing, HostError, HostWindow, Point, PointerEvent, PressOutcome, Rect, Region,
    Size, SuppressionLevel, UpdateBehavior, WindowStyle, WorkerConfig,
};

const DEBOUNCE: Duration = Duration::from_millis(15);

#[derive(Debug, Default)]
struct MockHost {
    bounds: Rect,
    writes: Vec<Rect>,
    cursors: Vec<CursorShape>,
    available: Option<Rect>,
    unavailable: bool,
}

impl MockHost {
    fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }
}

impl HostWindow for MockHost {
    fn bounds(&self) -> Result<Rect, HostError> {
        if self.unavailable {
            Err(HostError::BoundsUnavailable("minimized".into()))
        } else {
            Ok(self.bounds)
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.writes.push(bounds);
    }

    fn available_area(&self) -> Option<Rect> {
        self.available
    }

    fn set_cursor(&mut self, cursor: CursorShape) {
        self.cursors.push(cursor);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn controller(config: ChromeConfig) -> ChromeController {
    init_tracing();
    ChromeController::new(config).unwrap()
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

/// Run every timer until none is left. Returns the number of bounds writes.
fn drain(chrome: &mut ChromeController, host: &mut MockHost) -> usize {
    let mut writes = 0;
    for _ in 0..1000 {
        let Some(deadline) = chrome.next_deadline() else {
            return writes;
        };
        writes += chrome.process_timers(deadline, host);
    }
    panic!("timers never drained");
}

#[test]
fn test_corner_drag_applies_after_debounce() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    let outcome = chrome.pointer_pressed(PointerEvent::new((290.0, 10.0), t0), &mut host);
    assert_eq!(outcome, PressOutcome::Started(Region::TopRight));
    assert_eq!(chrome.drag_state(), DragState::Active(Region::TopRight));
    assert_eq!(chrome.cursor(), CursorShape::ResizeNeSw);

    let target = chrome.pointer_moved(PointerEvent::new((310.0, 10.0), at(t0, 5)), &mut host);
    assert_eq!(target, Some(Rect::new(0.0, 0.0, 320.0, 300.0)));
    assert!(host.writes.is_empty());

    assert_eq!(chrome.process_timers(at(t0, 5) + DEBOUNCE, &mut host), 1);
    assert_eq!(host.bounds, Rect::new(0.0, 0.0, 320.0, 300.0));

    let session = chrome
        .pointer_released(PointerEvent::new((310.0, 10.0), at(t0, 30)), &mut host)
        .unwrap();
    assert_eq!(session.region(), Region::TopRight);
    assert_eq!(session.anchor(), Point::new(290.0, 10.0));
    assert_eq!(session.start_bounds(), Rect::new(0.0, 0.0, 300.0, 300.0));
    assert!(session.moved());
    assert_eq!(chrome.drag_state(), DragState::Idle);
}

#[test]
fn test_burst_collapses_to_last_request() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    chrome.pointer_pressed(PointerEvent::new((298.0, 150.0), t0), &mut host);
    for (i, x) in [300.0, 305.0, 311.0, 340.0].into_iter().enumerate() {
        let time = at(t0, 4 * i as u64);
        chrome.pointer_moved(PointerEvent::new((x, 150.0), time), &mut host);
        assert_eq!(chrome.process_timers(time, &mut host), 0);
    }

    assert_eq!(drain(&mut chrome, &mut host), 1);
    assert_eq!(host.writes, vec![Rect::new(0.0, 0.0, 342.0, 300.0)]);
}

#[test]
fn test_static_apply_is_idempotent() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let target = Rect::new(40.0, 30.0, 500.0, 400.0);
    let t0 = Instant::now();

    chrome.request_bounds(target, t0);
    drain(&mut chrome, &mut host);
    chrome.request_bounds(target, at(t0, 100));
    drain(&mut chrome, &mut host);

    assert_eq!(host.writes, vec![target, target]);
    assert_eq!(host.bounds, target);
}

#[test]
fn test_undersized_request_clamped() {
    let config = ChromeConfig::default().with_min_size(Size::new(200.0, 150.0));
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));

    chrome.request_bounds(Rect::new(10.0, 10.0, -5.0, 20.0), Instant::now());
    drain(&mut chrome, &mut host);
    assert_eq!(host.bounds, Rect::new(10.0, 10.0, 200.0, 150.0));
}

#[test]
fn test_animation_is_monotonic_and_exact() {
    let config = ChromeConfig::default()
        .with_update_behavior(UpdateBehavior::Animate)
        .with_animation(Duration::from_millis(100), 8)
        .with_easing(Easing::EaseInOut);
    let mut chrome = controller(config);
    let from = Rect::new(100.0, 100.0, 300.0, 300.0);
    let target = Rect::new(0.0, 20.0, 640.0, 457.0);
    let mut host = MockHost::new(from);

    chrome.request_bounds(target, Instant::now());
    assert_eq!(drain(&mut chrome, &mut host), 9);

    assert_eq!(host.writes.first(), Some(&from));
    assert_eq!(host.writes.last(), Some(&target));

    let components = |r: &Rect| [r.left(), r.top(), r.width(), r.height()];
    let start = components(&from);
    let end = components(&target);
    for pair in host.writes.windows(2) {
        let (a, b) = (components(&pair[0]), components(&pair[1]));
        for i in 0..4 {
            if end[i] >= start[i] {
                assert!(b[i] >= a[i], "component {i} went backwards: {a:?} -> {b:?}");
            } else {
                assert!(b[i] <= a[i], "component {i} went backwards: {a:?} -> {b:?}");
            }
        }
    }

    // Every frame lies on the straight line from `from` to `target`.
    for frame in &host.writes {
        let c = components(frame);
        let t = (c[2] - start[2]) / (end[2] - start[2]);
        for i in 0..4 {
            let expected = start[i] + (end[i] - start[i]) * t;
            assert!((c[i] - expected).abs() < 0.01, "{frame:?} is off the line");
        }
    }
}

#[test]
fn test_request_mid_animation_restarts_from_current_bounds() {
    let config = ChromeConfig::default()
        .with_update_behavior(UpdateBehavior::Animate)
        .with_animation(Duration::from_millis(100), 4)
        .with_debounce(Duration::from_millis(10));
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 200.0, 200.0));
    let t0 = Instant::now();

    chrome.request_bounds(Rect::new(0.0, 0.0, 600.0, 200.0), t0);
    chrome.process_timers(at(t0, 10), &mut host);
    chrome.process_timers(at(t0, 35), &mut host);
    assert_eq!(host.bounds, Rect::new(0.0, 0.0, 300.0, 200.0));

    chrome.request_bounds(Rect::new(0.0, 0.0, 100.0, 200.0), at(t0, 40));
    assert_eq!(chrome.suppression_level(), SuppressionLevel::None);
    let writes_before = host.writes.len();

    drain(&mut chrome, &mut host);
    let restart = &host.writes[writes_before..];
    assert_eq!(restart.first(), Some(&Rect::new(0.0, 0.0, 300.0, 200.0)));
    assert_eq!(restart.last(), Some(&Rect::new(0.0, 0.0, 100.0, 200.0)));
    assert_eq!(restart.len(), 5);
}

#[test]
fn test_notifications_suppressed_during_apply() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    chrome.layout_applied().connect(move |applied| {
        sink.lock().push((applied.bounds, applied.suppressed, applied.origin));
    });
    let t0 = Instant::now();

    chrome.pointer_pressed(PointerEvent::new((150.0, 150.0), t0), &mut host);
    chrome.pointer_moved(PointerEvent::new((170.0, 160.0), t0), &mut host);
    drain(&mut chrome, &mut host);

    let moved = Rect::new(20.0, 10.0, 300.0, 300.0);
    assert_eq!(*seen.lock(), vec![(moved, true, ChangeOrigin::User)]);

    // After a pointer-driven pass only user notifications get through until
    // the echo of the write arrives.
    assert_eq!(chrome.suppression_level(), SuppressionLevel::Manual);
    assert!(chrome.should_react(ChangeOrigin::User));
    assert!(!chrome.should_react(ChangeOrigin::Programmatic));

    assert!(!chrome.window_resized(moved, at(t0, 40)));
    assert_eq!(chrome.suppression_level(), SuppressionLevel::None);
    assert!(chrome.should_react(ChangeOrigin::Programmatic));
    assert!(!chrome.window_resized(moved, at(t0, 45)));
    assert!(chrome.window_resized(Rect::new(0.0, 0.0, 800.0, 600.0), at(t0, 50)));
}

#[test]
fn test_external_resizes_accepted_long_after_drag() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    chrome.pointer_pressed(PointerEvent::new((150.0, 150.0), t0), &mut host);
    chrome.pointer_moved(PointerEvent::new((170.0, 160.0), at(t0, 5)), &mut host);
    drain(&mut chrome, &mut host);
    chrome.pointer_released(PointerEvent::new((170.0, 160.0), at(t0, 30)), &mut host);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::Manual);

    // No echo ever arrives; external changes still get through.
    for i in 0..5u64 {
        let bounds = Rect::new(0.0, 0.0, 800.0 + i as f32, 600.0);
        assert!(chrome.window_resized(bounds, at(t0, 10_000 + 100 * i)));
        assert_eq!(chrome.pending_bounds(), Some(bounds));
    }
}

#[test]
fn test_new_press_releases_manual_level() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    chrome.pointer_pressed(PointerEvent::new((150.0, 150.0), t0), &mut host);
    chrome.pointer_moved(PointerEvent::new((160.0, 150.0), at(t0, 5)), &mut host);
    drain(&mut chrome, &mut host);
    chrome.pointer_released(PointerEvent::new((160.0, 150.0), at(t0, 30)), &mut host);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::Manual);

    chrome.pointer_pressed(PointerEvent::new((150.0, 150.0), at(t0, 1000)), &mut host);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::None);
}

#[test]
fn test_programmatic_pass_restores_policy() {
    let config = ChromeConfig::default().with_suppression_policy(SuppressionLevel::None);
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    let target = Rect::new(0.0, 0.0, 400.0, 300.0);
    chrome.request_bounds(target, t0);
    drain(&mut chrome, &mut host);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::None);

    // The echo of our own write is ignored, a genuine external resize is not.
    assert!(!chrome.window_resized(target, at(t0, 50)));
    assert!(chrome.window_resized(Rect::new(0.0, 0.0, 500.0, 300.0), at(t0, 60)));
    assert_eq!(chrome.pending_bounds(), Some(Rect::new(0.0, 0.0, 500.0, 300.0)));

    chrome.set_suppression_policy(SuppressionLevel::All);
    assert!(!chrome.window_resized(Rect::new(0.0, 0.0, 600.0, 300.0), at(t0, 70)));
}

#[test]
fn test_suppressed_between_animation_frames() {
    let config = ChromeConfig::default().with_update_behavior(UpdateBehavior::Animate);
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    chrome.request_bounds(Rect::new(0.0, 0.0, 600.0, 300.0), t0);
    chrome.process_timers(t0 + DEBOUNCE, &mut host);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::All);
    assert!(!chrome.should_react(ChangeOrigin::User));

    drain(&mut chrome, &mut host);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::None);
}

#[test]
fn test_policy_change_between_frames_keeps_suppression() {
    let config = ChromeConfig::default()
        .with_update_behavior(UpdateBehavior::Animate)
        .with_suppression_policy(SuppressionLevel::Manual);
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();
    let target = Rect::new(0.0, 0.0, 600.0, 300.0);

    chrome.request_bounds(target, t0);
    chrome.process_timers(t0 + DEBOUNCE, &mut host);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::All);

    chrome.set_suppression_policy(SuppressionLevel::None);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::All);
    assert!(!chrome.should_react(ChangeOrigin::Programmatic));

    // A resize notification between frames must not restart layout.
    let Some(deadline) = chrome.next_deadline() else {
        panic!("frame timer missing");
    };
    chrome.process_timers(deadline, &mut host);
    assert!(!chrome.window_resized(Rect::new(0.0, 0.0, 345.0, 300.0), deadline));
    assert_eq!(chrome.pending_bounds(), None);

    drain(&mut chrome, &mut host);
    assert_eq!(host.bounds, target);
    assert_eq!(host.writes.len(), 11);
    assert_eq!(chrome.suppression_level(), SuppressionLevel::None);
}

/// Double-click the middle of the window's top border, then run all timers.
fn double_click_top_edge(chrome: &mut ChromeController, host: &mut MockHost, start: Instant) {
    let top = (host.bounds.left() + host.bounds.width() / 2.0, host.bounds.top() + 2.0);
    assert_eq!(
        chrome.pointer_pressed(PointerEvent::new(top, start), host),
        PressOutcome::Started(Region::Top)
    );
    chrome.pointer_released(PointerEvent::new(top, at(start, 60)), host);
    assert_eq!(
        chrome.pointer_pressed(PointerEvent::new(top, at(start, 150)), host),
        PressOutcome::ToggleMaximize
    );
    chrome.pointer_released(PointerEvent::new(top, at(start, 200)), host);
    drain(chrome, host);
}

#[test]
fn test_double_click_on_top_edge_toggles_maximize() {
    let mut chrome = controller(ChromeConfig::default());
    let restored = Rect::new(100.0, 100.0, 300.0, 300.0);
    let maximized = Rect::new(0.0, 0.0, 1920.0, 1040.0);
    let mut host = MockHost::new(restored);
    host.available = Some(maximized);
    let t0 = Instant::now();

    double_click_top_edge(&mut chrome, &mut host, t0);
    assert_eq!(host.bounds, maximized);
    assert!(chrome.is_maximized());

    double_click_top_edge(&mut chrome, &mut host, at(t0, 2000));
    assert_eq!(host.bounds, restored);
    assert!(!chrome.is_maximized());

    double_click_top_edge(&mut chrome, &mut host, at(t0, 4000));
    assert_eq!(host.bounds, maximized);
}

#[test]
fn test_external_restore_clears_maximized_state() {
    let mut chrome = controller(ChromeConfig::default());
    let maximized = Rect::new(0.0, 0.0, 1920.0, 1040.0);
    let mut host = MockHost::new(Rect::new(100.0, 100.0, 300.0, 300.0));
    host.available = Some(maximized);
    let t0 = Instant::now();

    double_click_top_edge(&mut chrome, &mut host, t0);
    assert!(chrome.is_maximized());

    let snapped = Rect::new(0.0, 0.0, 960.0, 1040.0);
    assert!(chrome.window_resized(snapped, at(t0, 1000)));
    assert!(!chrome.is_maximized());
    drain(&mut chrome, &mut host);

    // The next double-click maximizes again instead of restoring.
    double_click_top_edge(&mut chrome, &mut host, at(t0, 3000));
    assert_eq!(host.bounds, maximized);
    assert!(chrome.is_maximized());
}

#[test]
fn test_slow_second_click_starts_a_drag() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    host.available = Some(Rect::new(0.0, 0.0, 1920.0, 1040.0));
    let t0 = Instant::now();

    chrome.pointer_pressed(PointerEvent::new((150.0, 2.0), t0), &mut host);
    chrome.pointer_released(PointerEvent::new((150.0, 2.0), at(t0, 50)), &mut host);
    let outcome = chrome.pointer_pressed(PointerEvent::new((150.0, 2.0), at(t0, 900)), &mut host);
    assert_eq!(outcome, PressOutcome::Started(Region::Top));
    assert!(!chrome.is_maximized());
}

#[test]
fn test_maximize_falls_back_to_configured_bounds() {
    let fallback = Rect::new(0.0, 0.0, 1280.0, 720.0);
    let config = ChromeConfig::default().with_maximized_bounds(fallback);
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(10.0, 10.0, 300.0, 300.0));
    let t0 = Instant::now();

    assert!(chrome.toggle_maximize(t0, &mut host));
    drain(&mut chrome, &mut host);
    assert_eq!(host.bounds, fallback);
}

#[test]
fn test_maximize_without_area_is_dropped() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(10.0, 10.0, 300.0, 300.0));

    assert!(!chrome.toggle_maximize(Instant::now(), &mut host));
    assert_eq!(chrome.next_deadline(), None);
    assert!(!chrome.is_maximized());
}

#[test]
fn test_fixed_style_only_moves() {
    let config = ChromeConfig::default().with_style(WindowStyle::Fixed);
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    let outcome = chrome.pointer_pressed(PointerEvent::new((290.0, 10.0), t0), &mut host);
    assert_eq!(outcome, PressOutcome::Started(Region::Client));
    assert_eq!(chrome.cursor(), CursorShape::Move);

    chrome.pointer_moved(PointerEvent::new((310.0, 10.0), t0), &mut host);
    drain(&mut chrome, &mut host);
    assert_eq!(host.bounds, Rect::new(20.0, 0.0, 300.0, 300.0));
}

#[test]
fn test_style_change_freezes_resize_mid_drag() {
    let mut chrome = controller(ChromeConfig::default());
    let start = Rect::new(0.0, 0.0, 300.0, 300.0);
    let mut host = MockHost::new(start);
    let t0 = Instant::now();

    chrome.pointer_pressed(PointerEvent::new((298.0, 150.0), t0), &mut host);
    assert_eq!(
        chrome.pointer_moved(PointerEvent::new((318.0, 150.0), t0), &mut host),
        Some(Rect::new(0.0, 0.0, 320.0, 300.0))
    );

    chrome.set_window_style(WindowStyle::Fixed);
    assert_eq!(
        chrome.pointer_moved(PointerEvent::new((340.0, 150.0), t0), &mut host),
        Some(start)
    );
    assert_eq!(chrome.drag_state(), DragState::Active(Region::Right));
}

#[test]
fn test_hover_updates_region_and_cursor() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(100.0, 100.0, 300.0, 300.0));
    let t0 = Instant::now();

    chrome.pointer_moved(PointerEvent::new((102.0, 250.0), t0), &mut host);
    assert_eq!(chrome.region_under_pointer(), Region::Left);
    chrome.pointer_moved(PointerEvent::new((103.0, 251.0), t0), &mut host);
    chrome.pointer_moved(PointerEvent::new((250.0, 250.0), t0), &mut host);
    assert_eq!(chrome.region_under_pointer(), Region::Client);
    chrome.pointer_moved(PointerEvent::new((50.0, 50.0), t0), &mut host);
    assert_eq!(chrome.region_under_pointer(), Region::None);

    // Only changes are pushed to the host.
    assert_eq!(
        host.cursors,
        vec![CursorShape::ResizeHorizontal, CursorShape::Arrow]
    );
}

#[test]
fn test_unavailable_bounds_drop_press() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    host.unavailable = true;

    let outcome = chrome.pointer_pressed(PointerEvent::new((290.0, 10.0), Instant::now()), &mut host);
    assert_eq!(outcome, PressOutcome::Ignored);
    assert_eq!(chrome.drag_state(), DragState::Idle);
    assert_eq!(chrome.current_bounds(&host), None);
}

#[test]
fn test_capture_loss_ends_drag() {
    let mut chrome = controller(ChromeConfig::default());
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    chrome.pointer_pressed(PointerEvent::new((150.0, 150.0), t0), &mut host);
    assert!(chrome.capture_lost(&mut host).is_some());
    assert_eq!(chrome.drag_state(), DragState::Idle);
    assert_eq!(
        chrome.pointer_moved(PointerEvent::new((170.0, 150.0), t0), &mut host),
        None
    );
}

#[test]
fn test_behavior_none_discards_requests() {
    let config = ChromeConfig::default().with_update_behavior(UpdateBehavior::None);
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));

    assert!(chrome.request_bounds(Rect::new(0.0, 0.0, 500.0, 500.0), Instant::now()));
    assert_eq!(drain(&mut chrome, &mut host), 0);
    assert!(host.writes.is_empty());
    assert_eq!(chrome.pending_bounds(), None);
}

#[test]
fn test_destroy_cancels_pending_work() {
    let config = ChromeConfig::default().with_update_behavior(UpdateBehavior::Animate);
    let mut chrome = controller(config);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let t0 = Instant::now();

    chrome.request_bounds(Rect::new(0.0, 0.0, 600.0, 300.0), t0);
    chrome.process_timers(t0 + DEBOUNCE, &mut host);
    assert_eq!(host.writes.len(), 1);

    chrome.destroy();
    assert!(chrome.is_destroyed());
    assert_eq!(chrome.next_deadline(), None);
    assert!(!chrome.request_bounds(Rect::new(0.0, 0.0, 100.0, 100.0), at(t0, 50)));
    assert_eq!(chrome.process_timers(at(t0, 500), &mut host), 0);
    assert_eq!(host.writes.len(), 1);
}

#[test]
fn test_drop_with_worker_does_not_join() {
    let (worker, events) = DebounceWorker::with_channel(WorkerConfig::default()).unwrap();
    let mut chrome = controller(ChromeConfig::default()).with_worker(worker);
    chrome.request_bounds(Rect::new(0.0, 0.0, 400.0, 400.0), Instant::now());

    let started = Instant::now();
    drop(chrome);
    assert!(started.elapsed() < Duration::from_secs(1));

    // The worker still shuts down on its own.
    let stopped = std::iter::from_fn(|| events.recv_timeout(Duration::from_secs(2)).ok())
        .any(|event| matches!(event, ChromeEvent::Stopped));
    assert!(stopped);
}

#[test]
fn test_worker_wakes_controller() {
    let (worker, events) = DebounceWorker::with_channel(WorkerConfig::default()).unwrap();
    let mut chrome = controller(ChromeConfig::default()).with_worker(worker);
    let mut host = MockHost::new(Rect::new(0.0, 0.0, 300.0, 300.0));

    chrome.request_bounds(Rect::new(0.0, 0.0, 400.0, 400.0), Instant::now());

    let event = events.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(event.is_settle());
    assert_eq!(chrome.handle_event(event, &mut host), 1);
    assert_eq!(host.bounds, Rect::new(0.0, 0.0, 400.0, 400.0));

    chrome.destroy();
}
