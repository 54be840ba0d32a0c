//! Drag/resize engine.
//!
//! Turns pointer presses, moves and releases into candidate window bounds.
//! The engine is a two-state machine:
//!
//! - **Idle**: no drag in progress.
//! - **Active**: a [`DragSession`] captured on press. Every move produces new
//!   bounds computed from the session's start bounds and the pointer's offset
//!   from the anchor, so rounding never accumulates across samples.
//!
//! The engine never applies bounds itself; callers forward each result to the
//! layout coordinator.
//!
//! A press/release on the top or bottom edge that did not move the pointer is
//! remembered as a click. A second press on the same edge within the
//! double-click interval is reported as [`PressOutcome::ToggleMaximize`]
//! instead of starting a new session.

use std::time::{Duration, Instant};

use horizon_chrome_core::logging::targets;

use crate::geometry::{Point, Rect, Size};
use crate::hit_test::{Region, WindowStyle};

/// State captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// The region the press landed on.
    region: Region,
    /// Screen-space pointer position at press time.
    anchor: Point,
    /// Window bounds at press time.
    start_bounds: Rect,
    /// Whether any move sample changed the pointer position.
    moved: bool,
}

impl DragSession {
    /// The region the session was started on.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Screen-space pointer position at press time.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Window bounds at press time.
    pub fn start_bounds(&self) -> Rect {
        self.start_bounds
    }

    /// Whether the pointer moved during the session.
    pub fn moved(&self) -> bool {
        self.moved
    }
}

/// Current engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    Idle,
    /// A drag started on the given region is in progress.
    Active(Region),
}

/// What a pointer press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A drag session started on the given region.
    Started(Region),
    /// The press completed a double-click on the top or bottom edge.
    ToggleMaximize,
    /// Nothing happened (session already active, outside the window, or a
    /// client press with client moves disabled).
    Ignored,
}

/// A completed click, kept for double-click detection.
#[derive(Debug, Clone, Copy)]
struct ClickRecord {
    region: Region,
    released_at: Instant,
}

/// The drag/resize state machine for one window.
#[derive(Debug, Clone)]
pub struct DragEngine {
    /// The active session, if any.
    session: Option<DragSession>,
    /// Width and height never drop below this.
    min_size: Size,
    /// Whether a client-area press starts a move.
    client_drag: bool,
    /// Maximum gap between a release and the next press of a double-click.
    double_click_interval: Duration,
    /// The last click on a maximize-toggling edge.
    last_click: Option<ClickRecord>,
    /// Bounds to return to when leaving the maximized state.
    restored: Option<Rect>,
}

impl DragEngine {
    /// Create an idle engine.
    pub fn new(min_size: Size, client_drag: bool, double_click_interval: Duration) -> Self {
        Self {
            session: None,
            min_size,
            client_drag,
            double_click_interval,
            last_click: None,
            restored: None,
        }
    }

    /// The current state.
    pub fn state(&self) -> DragState {
        match self.session {
            Some(session) => DragState::Active(session.region),
            None => DragState::Idle,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Check if a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Check if the last maximize toggle went to the maximized rectangle.
    pub fn is_maximized(&self) -> bool {
        self.restored.is_some()
    }

    /// The minimum window size enforced during resizes.
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// Set the minimum window size.
    pub fn set_min_size(&mut self, min_size: Size) {
        self.min_size = min_size;
    }

    /// Handle a pointer press at a screen-space position.
    ///
    /// `region` is the classification of the press and `bounds` the window's
    /// bounds at that moment.
    pub fn pointer_down(
        &mut self,
        pointer: Point,
        time: Instant,
        region: Region,
        bounds: Rect,
    ) -> PressOutcome {
        if self.session.is_some() {
            tracing::debug!(target: targets::DRAG, ?region, "press ignored, session already active");
            return PressOutcome::Ignored;
        }

        if let Some(click) = self.last_click.take()
            && region.toggles_maximize()
            && click.region == region
            && time.saturating_duration_since(click.released_at) <= self.double_click_interval
        {
            tracing::debug!(target: targets::DRAG, ?region, "double-click, toggling maximize");
            return PressOutcome::ToggleMaximize;
        }

        match region {
            Region::None => PressOutcome::Ignored,
            Region::Client if !self.client_drag => PressOutcome::Ignored,
            _ => {
                self.session = Some(DragSession {
                    region,
                    anchor: pointer,
                    start_bounds: bounds,
                    moved: false,
                });
                tracing::debug!(target: targets::DRAG, ?region, ?bounds, "drag session started");
                PressOutcome::Started(region)
            }
        }
    }

    /// Handle a pointer move; returns the candidate bounds if a session is active.
    ///
    /// `style` is read on every sample: switching to [`WindowStyle::Fixed`]
    /// mid-drag freezes the size while client moves keep working.
    pub fn pointer_move(&mut self, pointer: Point, style: WindowStyle) -> Option<Rect> {
        let min_size = self.min_size;
        let session = self.session.as_mut()?;
        if pointer != session.anchor {
            session.moved = true;
        }

        let bounds = drag_bounds(session, pointer, style, min_size);
        tracing::trace!(target: targets::DRAG, region = ?session.region, ?bounds, "drag sample");
        Some(bounds)
    }

    /// Handle a pointer release. Returns the session that ended, if any.
    pub fn pointer_up(&mut self, time: Instant) -> Option<DragSession> {
        let session = self.session.take()?;
        if session.region.toggles_maximize() && !session.moved {
            self.last_click = Some(ClickRecord {
                region: session.region,
                released_at: time,
            });
        }
        tracing::debug!(target: targets::DRAG, region = ?session.region, "drag session ended");
        Some(session)
    }

    /// Handle loss of pointer capture. Ends the session without recording a click.
    pub fn capture_lost(&mut self) -> Option<DragSession> {
        self.last_click = None;
        let session = self.session.take();
        if let Some(session) = &session {
            tracing::debug!(target: targets::DRAG, region = ?session.region, "pointer capture lost");
        }
        session
    }

    /// Compute the target of a maximize toggle.
    ///
    /// From the restored state this remembers `current` and returns
    /// `maximized`; from the maximized state it returns the remembered bounds.
    pub fn toggle_maximize(&mut self, current: Rect, maximized: Rect) -> Rect {
        match self.restored.take() {
            Some(restored) => restored,
            None => {
                self.restored = Some(current);
                maximized
            }
        }
    }

    /// Forget the maximized state, e.g. after the host restored the window itself.
    pub fn clear_maximized(&mut self) {
        self.restored = None;
    }
}

/// Bounds for a drag sample, relative to the session's start bounds.
fn drag_bounds(session: &DragSession, pointer: Point, style: WindowStyle, min: Size) -> Rect {
    let delta = pointer - session.anchor;
    let start = session.start_bounds;

    if session.region == Region::Client {
        return start.translate(delta);
    }

    let axes = session.region.axes_for(style);
    let edges = session.region.edges();
    let (mut left, mut top, mut right, mut bottom) =
        (start.left(), start.top(), start.right(), start.bottom());

    // A moving edge stops where the size would drop below the minimum; a
    // window that already starts undersized may grow but never shrinks.
    if axes.horizontal() {
        if edges.left {
            let limit = (right - min.width).max(start.left());
            left = (start.left() + delta.x).min(limit);
        }
        if edges.right {
            let limit = (left + min.width).min(start.right());
            right = (start.right() + delta.x).max(limit);
        }
    }
    if axes.vertical() {
        if edges.top {
            let limit = (bottom - min.height).max(start.top());
            top = (start.top() + delta.y).min(limit);
        }
        if edges.bottom {
            let limit = (top + min.height).min(start.bottom());
            bottom = (start.bottom() + delta.y).max(limit);
        }
    }

    Rect::from_edges(left, top, right, bottom)
}
