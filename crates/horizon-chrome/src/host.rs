//! The seam between the chrome and the windowing system.
//!
//! The controller never talks to a toolkit directly. Everything it needs from
//! the window (its current bounds, a way to set them, the area a maximized
//! window should fill, and the cursor) goes through [`HostWindow`].
//! [`WinitHost`] implements it for a `winit` window.

use std::sync::Arc;

use thiserror::Error;
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition};
use winit::window::Window;

use horizon_chrome_core::logging::targets;

use crate::cursor::CursorShape;
use crate::geometry::{Point, Rect};

/// Errors reported by a host window.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// The platform cannot report the window's bounds.
    #[error("window bounds are unavailable: {0}")]
    BoundsUnavailable(String),

    /// The window has been closed.
    #[error("window is closed")]
    Closed,
}

/// A native window whose bounds the chrome controls.
///
/// All rectangles are screen-space logical pixels.
pub trait HostWindow {
    /// The window's current outer bounds.
    fn bounds(&self) -> Result<Rect, HostError>;

    /// Move and resize the window in one step.
    fn set_bounds(&mut self, bounds: Rect);

    /// The rectangle a maximized window should occupy.
    ///
    /// Hosts that cannot tell return `None`; the controller then falls back
    /// to its configured maximized bounds.
    fn available_area(&self) -> Option<Rect> {
        None
    }

    /// Show the given cursor over the window.
    fn set_cursor(&mut self, cursor: CursorShape) {
        let _ = cursor;
    }
}

/// [`HostWindow`] backed by a `winit` window.
#[derive(Debug, Clone)]
pub struct WinitHost {
    window: Arc<Window>,
}

impl WinitHost {
    /// Wrap a window.
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }

    /// The wrapped window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Convert a window-relative cursor position, as delivered by
    /// `WindowEvent::CursorMoved`, into a screen-space logical point.
    pub fn screen_point(&self, position: PhysicalPosition<f64>) -> Result<Point, HostError> {
        let scale = self.window.scale_factor();
        let origin = self
            .window
            .inner_position()
            .map_err(|err| HostError::BoundsUnavailable(err.to_string()))?
            .to_logical::<f64>(scale);
        let local = position.to_logical::<f64>(scale);
        Ok(Point::new(
            (origin.x + local.x) as f32,
            (origin.y + local.y) as f32,
        ))
    }
}

/// The inner size to request so the window's outer size becomes that of
/// `bounds`. `outer` and `inner` are the window's current logical sizes;
/// their difference is whatever decoration the platform still draws.
fn inner_size_for(
    bounds: Rect,
    outer: LogicalSize<f64>,
    inner: LogicalSize<f64>,
) -> LogicalSize<f64> {
    let extra_w = (outer.width - inner.width).max(0.0);
    let extra_h = (outer.height - inner.height).max(0.0);
    LogicalSize::new(
        (bounds.width() as f64 - extra_w).max(1.0),
        (bounds.height() as f64 - extra_h).max(1.0),
    )
}

impl HostWindow for WinitHost {
    fn bounds(&self) -> Result<Rect, HostError> {
        let scale = self.window.scale_factor();
        let position = self
            .window
            .outer_position()
            .map_err(|err| HostError::BoundsUnavailable(err.to_string()))?
            .to_logical::<f64>(scale);
        let size = self.window.outer_size().to_logical::<f64>(scale);
        Ok(Rect::new(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        ))
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.window.set_outer_position(LogicalPosition::new(
            bounds.left() as f64,
            bounds.top() as f64,
        ));
        let scale = self.window.scale_factor();
        let inner = inner_size_for(
            bounds,
            self.window.outer_size().to_logical(scale),
            self.window.inner_size().to_logical(scale),
        );
        // Some platforms resize asynchronously and report back through `Resized`.
        if self.window.request_inner_size(inner).is_none() {
            tracing::trace!(target: targets::HOST, ?bounds, "resize queued by platform");
        }
    }

    fn available_area(&self) -> Option<Rect> {
        let monitor = self.window.current_monitor()?;
        let scale = monitor.scale_factor();
        let position = monitor.position().to_logical::<f64>(scale);
        let size = monitor.size().to_logical::<f64>(scale);
        Some(Rect::new(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        ))
    }

    fn set_cursor(&mut self, cursor: CursorShape) {
        self.window.set_cursor(cursor.to_cursor_icon());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borderless_inner_size_matches_bounds() {
        let bounds = Rect::new(10.0, 20.0, 640.0, 480.0);
        let size = LogicalSize::new(300.0, 200.0);
        assert_eq!(inner_size_for(bounds, size, size), LogicalSize::new(640.0, 480.0));
    }

    #[test]
    fn test_decorations_are_subtracted() {
        let bounds = Rect::new(0.0, 0.0, 640.0, 480.0);
        let outer = LogicalSize::new(308.0, 238.0);
        let inner = LogicalSize::new(300.0, 200.0);
        assert_eq!(inner_size_for(bounds, outer, inner), LogicalSize::new(632.0, 442.0));
    }

    #[test]
    fn test_inner_size_never_collapses() {
        let bounds = Rect::new(0.0, 0.0, 4.0, 4.0);
        let outer = LogicalSize::new(20.0, 40.0);
        let inner = LogicalSize::new(10.0, 10.0);
        assert_eq!(inner_size_for(bounds, outer, inner), LogicalSize::new(1.0, 1.0));
    }
}
