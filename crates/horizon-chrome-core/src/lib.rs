//! Core systems for Horizon Chrome.
//!
//! This crate provides the framework-neutral runtime pieces the chrome
//! controller is built on:
//!
//! - **Timers**: Cooperative one-shot and repeating timers with an explicit clock
//! - **Signals**: Slot notification used for "layout applied" events
//! - **Debounce Worker**: A helper thread that sleeps until a deadline and
//!   posts a settle event back to the owning thread
//! - **Logging**: `tracing` target names for every subsystem
//!
//! # Timer Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use horizon_chrome_core::TimerManager;
//!
//! let start = Instant::now();
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot(Duration::from_millis(15), start);
//!
//! assert!(timers.process_expired(start).is_empty());
//! assert_eq!(timers.process_expired(start + Duration::from_millis(15)), vec![id]);
//! ```

mod error;
mod event;
pub mod logging;
pub mod signal;
mod timer;
pub mod worker;

pub use error::{ChromeError, Result, TimerError, WorkerError};
pub use event::ChromeEvent;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerKind, TimerManager};
pub use worker::{DebounceWorker, WorkerConfig};
