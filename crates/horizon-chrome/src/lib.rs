//! Custom window chrome for borderless windows.
//!
//! Horizon Chrome reimplements the non-client behavior an operating system
//! normally provides (dragging, eight-way resizing, double-click to maximize)
//! for a window whose native border has been removed.
//!
//! - **Hit testing**: [`HitTester`] maps a pointer position to a [`Region`],
//!   a [`CursorShape`] and the axes a drag may resize.
//! - **Drag/resize**: [`DragEngine`] turns pointer presses, moves and
//!   releases into candidate bounds.
//! - **Layout**: [`LayoutCoordinator`] debounces requests and applies them
//!   instantly or animated, under a [`SuppressionGovernor`] that keeps the
//!   window's own change notifications from feeding back into layout.
//! - **Host seam**: [`HostWindow`] abstracts the native window;
//!   [`WinitHost`] implements it for `winit`.
//!
//! [`ChromeController`] ties these together for one window.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use horizon_chrome::{
//!     ChromeConfig, ChromeController, HostError, HostWindow, PointerEvent, Rect,
//! };
//!
//! struct Window(Rect);
//!
//! impl HostWindow for Window {
//!     fn bounds(&self) -> Result<Rect, HostError> {
//!         Ok(self.0)
//!     }
//!     fn set_bounds(&mut self, bounds: Rect) {
//!         self.0 = bounds;
//!     }
//! }
//!
//! let mut window = Window(Rect::new(0.0, 0.0, 300.0, 300.0));
//! let mut chrome = ChromeController::new(ChromeConfig::default()).unwrap();
//!
//! // Grab the top-right corner and pull it 20 pixels to the right.
//! let t0 = Instant::now();
//! chrome.pointer_pressed(PointerEvent::new((290.0, 10.0), t0), &mut window);
//! chrome.pointer_moved(PointerEvent::new((310.0, 10.0), t0), &mut window);
//!
//! // Nothing is applied until the debounce delay has passed.
//! let settle = chrome.next_deadline().unwrap();
//! assert_eq!(settle, t0 + Duration::from_millis(15));
//! chrome.process_timers(settle, &mut window);
//! assert_eq!(window.0, Rect::new(0.0, 0.0, 320.0, 300.0));
//! ```

pub mod config;
pub mod controller;
pub mod cursor;
pub mod drag;
pub mod easing;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod suppression;

pub use config::{ChromeConfig, ConfigError, ConfigResult};
pub use controller::{ChromeController, PointerEvent};
pub use cursor::CursorShape;
pub use drag::{DragEngine, DragSession, DragState, PressOutcome};
pub use easing::{Easing, ease};
pub use geometry::{Point, Rect, Size};
pub use hit_test::{HitTestResult, HitTester, Region, ResizeAxes, WindowStyle, classify};
pub use host::{HostError, HostWindow, WinitHost};
pub use layout::{
    AnimationSettings, LayoutApplied, LayoutCoordinator, PendingLayout, UpdateBehavior,
};
pub use suppression::{BoundsDriver, ChangeOrigin, SuppressionGovernor, SuppressionLevel};

pub use horizon_chrome_core::{ChromeEvent, DebounceWorker, Signal, WorkerConfig};
