//! Logging facilities for Horizon Chrome.
//!
//! Horizon Chrome uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_chrome=debug")
//!     .init();
//! ```
//!
//! Per-sample data (pointer moves, animation frames, timer fires) is logged at
//! `trace`, state transitions at `debug`, and dropped layout passes at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_chrome_core";
    /// Timer system target.
    pub const TIMER: &str = "horizon_chrome_core::timer";
    /// Signal system target.
    pub const SIGNAL: &str = "horizon_chrome_core::signal";
    /// Debounce worker target.
    pub const WORKER: &str = "horizon_chrome_core::worker";
    /// Hit-region classification target.
    pub const HIT_TEST: &str = "horizon_chrome::hit_test";
    /// Drag/resize engine target.
    pub const DRAG: &str = "horizon_chrome::drag";
    /// Layout update coordinator target.
    pub const LAYOUT: &str = "horizon_chrome::layout";
    /// Notification suppression target.
    pub const SUPPRESSION: &str = "horizon_chrome::suppression";
    /// Controller facade target.
    pub const CONTROLLER: &str = "horizon_chrome::controller";
    /// Host window integration target.
    pub const HOST: &str = "horizon_chrome::host";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_chrome::config";
}
