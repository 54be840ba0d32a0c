//! Error types for Horizon Chrome.

use thiserror::Error;

/// The main error type for Horizon Chrome core operations.
#[derive(Debug, Error)]
pub enum ChromeError {
    /// Timer-related error.
    #[error("timer error: {0}")]
    Timer(#[from] TimerError),

    /// Debounce worker error.
    #[error("worker error: {0}")]
    Worker(#[from] WorkerError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    #[error("invalid or expired timer ID")]
    InvalidTimerId,
}

/// Errors raised by the debounce worker thread.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The OS refused to spawn the worker thread.
    #[error("failed to spawn debounce worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker has been stopped and no longer accepts commands.
    #[error("debounce worker has stopped")]
    Stopped,
}

/// A specialized Result type for Horizon Chrome core operations.
pub type Result<T> = std::result::Result<T, ChromeError>;
