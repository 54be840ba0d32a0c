//! The per-window chrome controller.
//!
//! [`ChromeController`] wires the pieces together:
//!
//! ```text
//! pointer events -> HitTester -> DragEngine -> LayoutCoordinator -> HostWindow
//!                                                     |
//!                                             layout_applied signal
//! ```
//!
//! The controller is driven from the window's thread. Timers fire when the
//! host calls [`process_timers`](ChromeController::process_timers), either
//! from its own event loop using [`next_deadline`](ChromeController::next_deadline)
//! or in response to the [`ChromeEvent`]s posted by an attached
//! [`DebounceWorker`].

use std::time::Instant;

use horizon_chrome_core::logging::targets;
use horizon_chrome_core::{ChromeEvent, DebounceWorker, Signal};

use crate::config::{ChromeConfig, ConfigResult};
use crate::cursor::CursorShape;
use crate::drag::{DragEngine, DragSession, DragState, PressOutcome};
use crate::geometry::{Point, Rect, Size};
use crate::hit_test::{HitTester, Region, WindowStyle};
use crate::host::HostWindow;
use crate::layout::{LayoutApplied, LayoutCoordinator, UpdateBehavior};
use crate::suppression::{ChangeOrigin, SuppressionLevel};

/// A pointer sample in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Screen-space position in logical pixels.
    pub position: Point,
    /// When the sample was taken.
    pub time: Instant,
}

impl PointerEvent {
    /// Create a pointer event.
    pub fn new(position: impl Into<Point>, time: Instant) -> Self {
        Self {
            position: position.into(),
            time,
        }
    }
}

/// Custom window chrome for one borderless window.
pub struct ChromeController {
    hit_tester: HitTester,
    style: WindowStyle,
    maximized_fallback: Option<Rect>,
    engine: DragEngine,
    coordinator: LayoutCoordinator,
    hover: Region,
    cursor: CursorShape,
    worker: Option<DebounceWorker>,
    destroyed: bool,
}

impl std::fmt::Debug for ChromeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeController")
            .field("style", &self.style)
            .field("hover", &self.hover)
            .field("drag", &self.engine.state())
            .field("coordinator", &self.coordinator)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl ChromeController {
    /// Create a controller from a validated configuration.
    pub fn new(config: ChromeConfig) -> ConfigResult<Self> {
        config.validate()?;

        let engine = DragEngine::new(
            config.min_size,
            config.client_drag,
            config.double_click_interval(),
        );
        let coordinator =
            LayoutCoordinator::new(config.debounce(), config.animation(), config.min_size)
                .with_behavior(config.update_behavior)
                .with_suppression_policy(config.suppression_policy);

        tracing::debug!(target: targets::CONTROLLER, ?config, "chrome controller created");
        Ok(Self {
            hit_tester: config.hit_tester(),
            style: config.style,
            maximized_fallback: config.maximized_bounds,
            engine,
            coordinator,
            hover: Region::None,
            cursor: CursorShape::Arrow,
            worker: None,
            destroyed: false,
        })
    }

    /// Attach a debounce worker that wakes the host whenever a timer is due.
    pub fn with_worker(mut self, worker: DebounceWorker) -> Self {
        self.attach_worker(worker);
        self
    }

    /// Attach a debounce worker, replacing any previous one.
    pub fn attach_worker(&mut self, worker: DebounceWorker) {
        if let Some(previous) = self.worker.replace(worker) {
            previous.stop();
        }
        self.arm_worker();
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Handle a pointer press.
    pub fn pointer_pressed(
        &mut self,
        event: PointerEvent,
        host: &mut dyn HostWindow,
    ) -> PressOutcome {
        if self.destroyed {
            return PressOutcome::Ignored;
        }
        let bounds = match host.bounds() {
            Ok(bounds) => bounds,
            Err(err) => {
                tracing::warn!(target: targets::CONTROLLER, %err, "bounds unavailable, press dropped");
                return PressOutcome::Ignored;
            }
        };

        let region = self.classify(event.position, bounds);
        self.hover = region;

        let outcome = self
            .engine
            .pointer_down(event.position, event.time, region, bounds);
        if outcome != PressOutcome::Ignored {
            self.coordinator.release_suppression();
        }
        match outcome {
            PressOutcome::ToggleMaximize => {
                self.toggle_maximize_from(bounds, event.time, host);
            }
            PressOutcome::Started(Region::Client) => self.show_cursor(CursorShape::Move, host),
            PressOutcome::Started(region) => self.show_cursor(region.cursor(), host),
            PressOutcome::Ignored => {}
        }
        outcome
    }

    /// Handle a pointer move.
    ///
    /// While a drag is active this returns the bounds requested for the
    /// sample. Otherwise it updates the hover region and cursor.
    pub fn pointer_moved(&mut self, event: PointerEvent, host: &mut dyn HostWindow) -> Option<Rect> {
        if self.destroyed {
            return None;
        }

        if let Some(target) = self.engine.pointer_move(event.position, self.style) {
            self.request(target, ChangeOrigin::User, event.time);
            return Some(target);
        }

        match host.bounds() {
            Ok(bounds) => {
                let hit = self.hit_tester.hit_test(
                    bounds.to_local(event.position),
                    bounds.size,
                    self.style,
                );
                if hit.region != self.hover {
                    tracing::trace!(target: targets::CONTROLLER, region = ?hit.region, "hover region changed");
                }
                self.hover = hit.region;
                self.show_cursor(hit.cursor, host);
            }
            Err(err) => {
                tracing::trace!(target: targets::CONTROLLER, %err, "hover skipped");
            }
        }
        None
    }

    /// Handle a pointer release. Returns the session that ended, if any.
    pub fn pointer_released(
        &mut self,
        event: PointerEvent,
        host: &mut dyn HostWindow,
    ) -> Option<DragSession> {
        let session = self.engine.pointer_up(event.time);
        if session.is_some() {
            self.show_cursor(self.hover.cursor(), host);
        }
        session
    }

    /// Handle loss of pointer capture.
    pub fn capture_lost(&mut self, host: &mut dyn HostWindow) -> Option<DragSession> {
        let session = self.engine.capture_lost();
        self.hover = Region::None;
        self.show_cursor(CursorShape::Arrow, host);
        session
    }

    // =========================================================================
    // Bounds requests
    // =========================================================================

    /// Request new bounds from application code.
    pub fn request_bounds(&mut self, bounds: Rect, now: Instant) -> bool {
        self.request(bounds, ChangeOrigin::Programmatic, now)
    }

    /// Handle a size/position-changed notification from the window system.
    ///
    /// Echoes of the controller's own writes are ignored and end the
    /// `Manual` level left by a pointer-driven pass. Other notifications are
    /// ignored while the level suppresses programmatic changes. Returns
    /// `true` if a layout was requested.
    pub fn window_resized(&mut self, bounds: Rect, now: Instant) -> bool {
        if self.destroyed {
            return false;
        }
        if self.coordinator.last_applied() == Some(bounds) {
            tracing::trace!(target: targets::CONTROLLER, ?bounds, "resize notification echoed own write");
            self.coordinator.release_suppression();
            return false;
        }
        self.coordinator.release_suppression();
        if !self.coordinator.should_react(ChangeOrigin::Programmatic) {
            tracing::trace!(target: targets::CONTROLLER, ?bounds, "resize notification suppressed");
            return false;
        }
        if self.engine.is_maximized() {
            tracing::debug!(target: targets::CONTROLLER, ?bounds, "window left maximized state externally");
            self.engine.clear_maximized();
        }
        self.request(bounds, ChangeOrigin::Programmatic, now)
    }

    /// Toggle between the maximized and restored bounds.
    pub fn toggle_maximize(&mut self, now: Instant, host: &mut dyn HostWindow) -> bool {
        match host.bounds() {
            Ok(bounds) => self.toggle_maximize_from(bounds, now, host),
            Err(err) => {
                tracing::warn!(target: targets::CONTROLLER, %err, "bounds unavailable, maximize toggle dropped");
                false
            }
        }
    }

    fn toggle_maximize_from(&mut self, bounds: Rect, now: Instant, host: &mut dyn HostWindow) -> bool {
        let Some(area) = host.available_area().or(self.maximized_fallback) else {
            tracing::warn!(target: targets::CONTROLLER, "no maximized area known, toggle dropped");
            return false;
        };
        let target = self.engine.toggle_maximize(bounds, area);
        tracing::debug!(
            target: targets::CONTROLLER,
            ?target,
            maximized = self.engine.is_maximized(),
            "maximize toggled"
        );
        self.request(target, ChangeOrigin::User, now)
    }

    fn request(&mut self, bounds: Rect, origin: ChangeOrigin, now: Instant) -> bool {
        if self.destroyed {
            return false;
        }
        let accepted = self.coordinator.request_bounds(bounds, origin, now);
        if accepted {
            self.arm_worker();
        }
        accepted
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// The next instant [`process_timers`](Self::process_timers) has work to do.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.coordinator.next_deadline()
    }

    /// Run all timers due at `now`. Returns the number of bounds writes.
    pub fn process_timers(&mut self, now: Instant, host: &mut dyn HostWindow) -> usize {
        if self.destroyed {
            return 0;
        }
        let writes = self.coordinator.process_timers(now, host);
        self.arm_worker();
        writes
    }

    /// Handle an event posted by the debounce worker.
    pub fn handle_event(&mut self, event: ChromeEvent, host: &mut dyn HostWindow) -> usize {
        match event {
            ChromeEvent::Settle { token, deadline } => {
                tracing::trace!(target: targets::CONTROLLER, token, "settle event");
                self.process_timers(Instant::now().max(deadline), host)
            }
            ChromeEvent::Stopped => {
                tracing::debug!(target: targets::CONTROLLER, "debounce worker stopped");
                self.worker = None;
                0
            }
        }
    }

    fn arm_worker(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        let result = match self.coordinator.next_deadline() {
            Some(deadline) => worker.arm(deadline).map(|_| ()),
            None => worker.disarm(),
        };
        if let Err(err) = result {
            tracing::warn!(target: targets::CONTROLLER, %err, "failed to arm debounce worker");
        }
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Set how settled requests are applied.
    pub fn set_update_behavior(&mut self, behavior: UpdateBehavior) {
        self.coordinator.set_behavior(behavior);
    }

    /// The current update behavior.
    pub fn update_behavior(&self) -> UpdateBehavior {
        self.coordinator.behavior()
    }

    /// Set the suppression level restored after programmatic passes.
    pub fn set_suppression_policy(&mut self, policy: SuppressionLevel) {
        self.coordinator.set_suppression_policy(policy);
    }

    /// The suppression level in effect now.
    pub fn suppression_level(&self) -> SuppressionLevel {
        self.coordinator.governor().level()
    }

    /// Change the window style. An active drag keeps running with the new
    /// style's resize mask.
    pub fn set_window_style(&mut self, style: WindowStyle) {
        if style != self.style {
            tracing::debug!(target: targets::CONTROLLER, ?style, "window style changed");
        }
        self.style = style;
    }

    /// The current window style.
    pub fn window_style(&self) -> WindowStyle {
        self.style
    }

    /// Change the minimum window size.
    pub fn set_min_size(&mut self, min_size: Size) {
        self.engine.set_min_size(min_size);
        self.coordinator.set_min_size(min_size);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if a size/position-changed notification of the given origin
    /// should be acted upon now.
    pub fn should_react(&self, origin: ChangeOrigin) -> bool {
        self.coordinator.should_react(origin)
    }

    /// Signal emitted for every bounds write.
    pub fn layout_applied(&self) -> &Signal<LayoutApplied> {
        self.coordinator.layout_applied()
    }

    /// The region under the pointer as of the last sample.
    pub fn region_under_pointer(&self) -> Region {
        self.hover
    }

    /// The cursor last pushed to the host.
    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// The drag engine state.
    pub fn drag_state(&self) -> DragState {
        self.engine.state()
    }

    /// Check if the last maximize toggle went to the maximized bounds.
    pub fn is_maximized(&self) -> bool {
        self.engine.is_maximized()
    }

    /// The window's current bounds, or the last written bounds if the host
    /// cannot report them.
    pub fn current_bounds(&self, host: &dyn HostWindow) -> Option<Rect> {
        host.bounds().ok().or(self.coordinator.last_applied())
    }

    /// The bounds waiting for the debounce timer, if any.
    pub fn pending_bounds(&self) -> Option<Rect> {
        self.coordinator.pending().map(|pending| pending.target)
    }

    /// Check if [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Tear down the controller: cancel timers, abandon any animation,
    /// discard the pending request and stop the worker, waiting for its
    /// thread to exit.
    pub fn destroy(&mut self) {
        if let Some(worker) = self.teardown() {
            worker.stop_and_join();
        }
    }

    fn teardown(&mut self) -> Option<DebounceWorker> {
        if self.destroyed {
            return None;
        }
        self.destroyed = true;
        self.coordinator.shutdown();
        self.engine.capture_lost();
        tracing::debug!(target: targets::CONTROLLER, "chrome controller destroyed");
        self.worker.take()
    }

    fn classify(&self, pointer: Point, bounds: Rect) -> Region {
        self.hit_tester
            .hit_test(bounds.to_local(pointer), bounds.size, self.style)
            .region
    }

    fn show_cursor(&mut self, cursor: CursorShape, host: &mut dyn HostWindow) {
        if cursor != self.cursor {
            self.cursor = cursor;
            host.set_cursor(cursor);
        }
    }
}

impl Drop for ChromeController {
    fn drop(&mut self) {
        // Request shutdown without joining.
        if let Some(worker) = self.teardown() {
            worker.stop();
        }
    }
}
