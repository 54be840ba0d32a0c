//! Debounced, optionally animated application of window bounds.
//!
//! The [`LayoutCoordinator`] is the only thing that writes bounds to the
//! host. Requests land in a single pending slot (last write wins) and a
//! debounce timer restarts on every request. When the timer expires the
//! pending target is applied according to the current [`UpdateBehavior`]:
//!
//! - `None`: the request is dropped.
//! - `Static`: the target is applied in one step.
//! - `Animate`: `steps + 1` frames interpolate from the bounds at settle time
//!   to the target, one frame per frame interval. The first frame is applied
//!   at settle time, the last frame is exactly the target.
//!
//! Every apply runs inside the [`SuppressionGovernor`] and is announced
//! through [`LayoutCoordinator::layout_applied`] while suppression is still
//! in force.
//!
//! Time is passed in explicitly. Hosts call
//! [`process_timers`](LayoutCoordinator::process_timers) when
//! [`next_deadline`](LayoutCoordinator::next_deadline) has passed.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use horizon_chrome_core::logging::targets;
use horizon_chrome_core::{Signal, TimerId, TimerManager};

use crate::easing::{Easing, ease};
use crate::geometry::{Rect, Size};
use crate::host::HostWindow;
use crate::suppression::{BoundsDriver, ChangeOrigin, SuppressionGovernor, SuppressionLevel};

/// How settled requests are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateBehavior {
    /// Discard requests.
    None,
    /// Apply the target in a single step.
    #[default]
    Static,
    /// Interpolate to the target over several frames.
    Animate,
}

/// Frame parameters for [`UpdateBehavior::Animate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Total duration of an animated pass.
    pub duration: Duration,
    /// Number of interpolation steps; a pass applies `steps + 1` frames.
    pub steps: u32,
    /// Progress curve.
    pub easing: Easing,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(150),
            steps: 10,
            easing: Easing::Linear,
        }
    }
}

impl AnimationSettings {
    /// Time between consecutive frames.
    pub fn frame_interval(&self) -> Duration {
        self.duration / self.steps.max(1)
    }

    /// The frames of a pass from `from` to `to`, first to last.
    ///
    /// Always `steps + 1` long; the first frame is `from` and the last is
    /// exactly `to`.
    pub fn frames(&self, from: Rect, to: Rect) -> VecDeque<Rect> {
        let steps = self.steps.max(1);
        let mut frames: VecDeque<Rect> = (0..steps)
            .map(|i| from.lerp(&to, ease(self.easing, i as f32 / steps as f32)))
            .collect();
        frames.push_back(to);
        frames
    }
}

/// The request waiting for the debounce timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingLayout {
    /// Bounds to apply, already clamped to the minimum size.
    pub target: Rect,
    /// When the request was made.
    pub requested_at: Instant,
    /// Monotonic request counter.
    pub sequence: u64,
    /// Who asked.
    pub origin: ChangeOrigin,
}

/// Notification sent for every bounds write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutApplied {
    /// The bounds just written to the host.
    pub bounds: Rect,
    /// Whether observers should ignore this change. Always `true` while the
    /// coordinator is applying, so reacting to it cannot re-enter layout.
    pub suppressed: bool,
    /// Who asked for the pass this write belongs to.
    pub origin: ChangeOrigin,
    /// Whether this is the last write of its pass.
    pub final_step: bool,
}

#[derive(Debug)]
struct ActiveAnimation {
    frames: VecDeque<Rect>,
    origin: ChangeOrigin,
    timer: TimerId,
}

/// Debounces bounds requests and applies them to a host window.
pub struct LayoutCoordinator {
    behavior: UpdateBehavior,
    debounce: Duration,
    animation: AnimationSettings,
    min_size: Size,
    pending: Option<PendingLayout>,
    timers: TimerManager,
    debounce_timer: Option<TimerId>,
    animating: Option<ActiveAnimation>,
    governor: SuppressionGovernor,
    layout_applied: Signal<LayoutApplied>,
    next_sequence: u64,
    last_applied: Option<Rect>,
    shut_down: bool,
}

impl std::fmt::Debug for LayoutCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutCoordinator")
            .field("behavior", &self.behavior)
            .field("pending", &self.pending)
            .field("animating", &self.animating.is_some())
            .field("level", &self.governor.level())
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}

impl LayoutCoordinator {
    /// Create a coordinator with the given debounce delay and frame settings.
    pub fn new(debounce: Duration, animation: AnimationSettings, min_size: Size) -> Self {
        Self {
            behavior: UpdateBehavior::default(),
            debounce,
            animation,
            min_size,
            pending: None,
            timers: TimerManager::new(),
            debounce_timer: None,
            animating: None,
            governor: SuppressionGovernor::default(),
            layout_applied: Signal::new(),
            next_sequence: 0,
            last_applied: None,
            shut_down: false,
        }
    }

    /// Set the update behavior.
    pub fn with_behavior(mut self, behavior: UpdateBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set the suppression policy.
    pub fn with_suppression_policy(mut self, policy: SuppressionLevel) -> Self {
        self.governor.set_policy(policy);
        self
    }

    /// The current update behavior.
    pub fn behavior(&self) -> UpdateBehavior {
        self.behavior
    }

    /// Change the update behavior. Applies from the next settle on.
    pub fn set_behavior(&mut self, behavior: UpdateBehavior) {
        self.behavior = behavior;
    }

    /// Change the suppression policy. During an animated pass the change
    /// applies once the pass settles.
    pub fn set_suppression_policy(&mut self, policy: SuppressionLevel) {
        self.governor.set_policy(policy);
    }

    /// End the `Manual` level left by a pointer-driven pass, returning to
    /// the suppression policy. No effect during a pass.
    pub fn release_suppression(&mut self) {
        self.governor.release();
    }

    /// Change the minimum size applied to new requests.
    pub fn set_min_size(&mut self, min_size: Size) {
        self.min_size = min_size;
    }

    /// The suppression state.
    pub fn governor(&self) -> &SuppressionGovernor {
        &self.governor
    }

    /// Check if a notification of the given origin should be acted upon now.
    pub fn should_react(&self, origin: ChangeOrigin) -> bool {
        self.governor.should_react(origin)
    }

    /// Signal emitted for every bounds write.
    pub fn layout_applied(&self) -> &Signal<LayoutApplied> {
        &self.layout_applied
    }

    /// The request waiting for the debounce timer, if any.
    pub fn pending(&self) -> Option<&PendingLayout> {
        self.pending.as_ref()
    }

    /// Check if an animated pass still has frames to apply.
    pub fn is_animating(&self) -> bool {
        self.animating.is_some()
    }

    /// The bounds most recently written to the host.
    pub fn last_applied(&self) -> Option<Rect> {
        self.last_applied
    }

    /// Check if [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// The next instant [`process_timers`](Self::process_timers) has work to do.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Queue `target` for application, replacing any pending request.
    ///
    /// Restarts the debounce timer and abandons the remaining frames of an
    /// animated pass. Returns `false` if the request was rejected.
    pub fn request_bounds(&mut self, target: Rect, origin: ChangeOrigin, now: Instant) -> bool {
        if self.shut_down {
            tracing::debug!(target: targets::LAYOUT, "request after shutdown ignored");
            return false;
        }
        if !target.is_finite() {
            tracing::warn!(target: targets::LAYOUT, ?target, "non-finite bounds rejected");
            return false;
        }

        if let Some(animation) = self.animating.take() {
            let _ = self.timers.stop(animation.timer);
            self.governor.settle(animation.origin);
            tracing::debug!(
                target: targets::LAYOUT,
                remaining = animation.frames.len(),
                "animation abandoned"
            );
        }

        self.next_sequence += 1;
        let target = target.with_min_size(self.min_size);
        if let Some(previous) = self.pending.replace(PendingLayout {
            target,
            requested_at: now,
            sequence: self.next_sequence,
            origin,
        }) {
            tracing::trace!(target: targets::LAYOUT, superseded = previous.sequence, "pending request replaced");
        }

        if let Some(timer) = self.debounce_timer.take() {
            let _ = self.timers.stop(timer);
        }
        self.debounce_timer = Some(self.timers.start_one_shot(self.debounce, now));

        tracing::trace!(target: targets::LAYOUT, ?target, ?origin, sequence = self.next_sequence, "layout requested");
        true
    }

    /// Run every timer due at `now`. Returns the number of bounds writes.
    #[tracing::instrument(skip(self, host), target = "horizon_chrome::layout", level = "trace")]
    pub fn process_timers(&mut self, now: Instant, host: &mut dyn HostWindow) -> usize {
        let mut writes = 0;
        for id in self.timers.process_expired(now) {
            if self.debounce_timer == Some(id) {
                self.debounce_timer = None;
                writes += self.settle(now, host);
            } else if self.animating.as_ref().is_some_and(|a| a.timer == id) {
                writes += self.advance_animation(host);
            }
        }
        writes
    }

    /// Apply the pending request now, without waiting for the debounce timer.
    ///
    /// Returns the number of bounds writes.
    pub fn settle(&mut self, now: Instant, host: &mut dyn HostWindow) -> usize {
        if let Some(timer) = self.debounce_timer.take() {
            let _ = self.timers.stop(timer);
        }
        let Some(pending) = self.pending.take() else {
            return 0;
        };

        match self.behavior {
            UpdateBehavior::None => {
                tracing::debug!(target: targets::LAYOUT, sequence = pending.sequence, "layout discarded");
                0
            }
            UpdateBehavior::Static => {
                self.apply(
                    pending.target,
                    pending.origin,
                    BoundsDriver::for_origin(pending.origin),
                    false,
                    host,
                );
                1
            }
            UpdateBehavior::Animate => self.start_animation(pending, now, host),
        }
    }

    fn start_animation(
        &mut self,
        pending: PendingLayout,
        now: Instant,
        host: &mut dyn HostWindow,
    ) -> usize {
        let from = match host.bounds() {
            Ok(bounds) => bounds,
            Err(err) => {
                tracing::warn!(target: targets::LAYOUT, %err, "bounds unavailable, dropping layout pass");
                return 0;
            }
        };

        let mut frames = self.animation.frames(from, pending.target);
        let Some(first) = frames.pop_front() else {
            return 0;
        };
        let continuing = !frames.is_empty();
        self.apply(first, pending.origin, BoundsDriver::Animation, continuing, host);

        if continuing {
            let timer = self
                .timers
                .start_repeating(self.animation.frame_interval(), now);
            tracing::debug!(
                target: targets::LAYOUT,
                ?from,
                to = ?pending.target,
                frames = frames.len() + 1,
                "animation started"
            );
            self.animating = Some(ActiveAnimation {
                frames,
                origin: pending.origin,
                timer,
            });
        }
        1
    }

    fn advance_animation(&mut self, host: &mut dyn HostWindow) -> usize {
        let Some(mut animation) = self.animating.take() else {
            return 0;
        };
        let Some(frame) = animation.frames.pop_front() else {
            let _ = self.timers.stop(animation.timer);
            return 0;
        };

        let continuing = !animation.frames.is_empty();
        self.apply(frame, animation.origin, BoundsDriver::Animation, continuing, host);

        if continuing {
            self.animating = Some(animation);
        } else {
            let _ = self.timers.stop(animation.timer);
            tracing::debug!(target: targets::LAYOUT, "animation finished");
        }
        1
    }

    fn apply(
        &mut self,
        bounds: Rect,
        origin: ChangeOrigin,
        driver: BoundsDriver,
        continuing: bool,
        host: &mut dyn HostWindow,
    ) {
        self.governor.begin(driver);

        host.set_bounds(bounds);
        self.last_applied = Some(bounds);
        self.layout_applied.emit(LayoutApplied {
            bounds,
            suppressed: !self.governor.should_react(origin),
            origin,
            final_step: !continuing,
        });

        self.governor.end(driver, origin, continuing);
        tracing::trace!(target: targets::LAYOUT, ?bounds, ?driver, "bounds applied");
    }

    /// Cancel all pending work. Later requests are ignored.
    pub fn shutdown(&mut self) {
        self.timers.clear();
        self.debounce_timer = None;
        self.animating = None;
        self.pending = None;
        self.governor.reset();
        self.shut_down = true;
        tracing::debug!(target: targets::LAYOUT, "layout coordinator shut down");
    }
}
