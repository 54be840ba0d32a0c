//! Debounce worker: a dedicated thread that turns a deadline into a wake-up.
//!
//! The chrome controller is single-threaded. The only thing it ever waits
//! for is its debounce interval, and that wait happens here, on a helper
//! thread, so the owning thread never blocks. The worker holds no layout
//! state: it sleeps until the most recently armed deadline and then hands a
//! [`ChromeEvent::Settle`] to a sink. The sink forwards it to the owning
//! thread, typically through a channel or an event loop proxy.
//!
//! Re-arming replaces the pending deadline, so a burst of `arm` calls
//! produces a single settle event once the burst goes quiet.
//!
//! # Example
//!
//! ```no_run
//! use std::time::{Duration, Instant};
//! use horizon_chrome_core::worker::{DebounceWorker, WorkerConfig};
//!
//! let (worker, events) = DebounceWorker::with_channel(WorkerConfig::default())?;
//! worker.arm(Instant::now() + Duration::from_millis(15))?;
//!
//! let event = events.recv()?;
//! assert!(event.is_settle());
//! worker.stop_and_join();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use parking_lot::Mutex;

use crate::error::WorkerError;
use crate::event::ChromeEvent;
use crate::logging::targets;

/// Configuration for a debounce worker thread.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Thread name, visible in debuggers and panic messages.
    pub name: String,
    /// Optional stack size in bytes.
    pub stack_size: Option<usize>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: "horizon-chrome-debounce".to_string(),
            stack_size: None,
        }
    }
}

impl WorkerConfig {
    /// Set the thread name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the thread stack size.
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }
}

/// Commands sent to the worker thread.
#[derive(Debug)]
enum WorkerCommand {
    /// Replace the pending deadline.
    Arm { token: u64, deadline: Instant },
    /// Forget the pending deadline.
    Disarm,
    /// Exit the thread.
    Shutdown,
}

/// A dedicated thread that realizes debounce delays.
pub struct DebounceWorker {
    /// Channel sender for commands.
    commands: Sender<WorkerCommand>,
    /// Thread handle for joining.
    handle: Mutex<Option<JoinHandle<()>>>,
    /// Cleared when the thread exits or `stop` is called.
    running: Arc<AtomicBool>,
    /// Source of arm tokens.
    next_token: AtomicU64,
}

impl DebounceWorker {
    /// Spawn a worker that delivers its events to `sink`.
    ///
    /// `sink` runs on the worker thread and must only forward the event.
    pub fn spawn<F>(config: WorkerConfig, sink: F) -> Result<Self, WorkerError>
    where
        F: Fn(ChromeEvent) + Send + 'static,
    {
        let (sender, receiver) = unbounded();
        let running = Arc::new(AtomicBool::new(true));

        let mut builder = thread::Builder::new().name(config.name.clone());
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let thread_running = running.clone();
        let handle = builder.spawn(move || {
            worker_loop(&receiver, &sink);
            thread_running.store(false, Ordering::Release);
            sink(ChromeEvent::Stopped);
        })?;

        tracing::debug!(target: targets::WORKER, name = %config.name, "debounce worker started");

        Ok(Self {
            commands: sender,
            handle: Mutex::new(Some(handle)),
            running,
            next_token: AtomicU64::new(1),
        })
    }

    /// Spawn a worker whose events are delivered through a channel.
    pub fn with_channel(
        config: WorkerConfig,
    ) -> Result<(Self, Receiver<ChromeEvent>), WorkerError> {
        let (sender, receiver) = unbounded();
        let worker = Self::spawn(config, move |event| {
            // The receiving side may already be gone during teardown.
            let _ = sender.send(event);
        })?;
        Ok((worker, receiver))
    }

    /// Check if the worker is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Arm (or re-arm) the worker for `deadline`.
    ///
    /// Any previously armed deadline is discarded. Returns the token carried
    /// by the resulting [`ChromeEvent::Settle`].
    pub fn arm(&self, deadline: Instant) -> Result<u64, WorkerError> {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.send(WorkerCommand::Arm { token, deadline })?;
        Ok(token)
    }

    /// Cancel the pending deadline, if any.
    pub fn disarm(&self) -> Result<(), WorkerError> {
        self.send(WorkerCommand::Disarm)
    }

    fn send(&self, command: WorkerCommand) -> Result<(), WorkerError> {
        if !self.is_running() {
            return Err(WorkerError::Stopped);
        }
        self.commands
            .send(command)
            .map_err(|_| WorkerError::Stopped)
    }

    /// Request the worker to stop. Any pending deadline is dropped.
    ///
    /// This is non-blocking; use `join()` to wait for the thread.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
        let _ = self.commands.send(WorkerCommand::Shutdown);
    }

    /// Wait for the worker thread to finish.
    ///
    /// Returns `true` if the worker was joined successfully, `false` if
    /// already joined or the thread panicked.
    pub fn join(&self) -> bool {
        let mut handle = self.handle.lock();
        match handle.take() {
            Some(h) => h.join().is_ok(),
            None => false,
        }
    }

    /// Stop the worker and wait for it to finish.
    pub fn stop_and_join(&self) -> bool {
        self.stop();
        self.join()
    }
}

impl Drop for DebounceWorker {
    fn drop(&mut self) {
        self.stop();
        // Don't block in drop - just request shutdown
    }
}

impl std::fmt::Debug for DebounceWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebounceWorker")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(DebounceWorker: Send, Sync);

/// The worker loop: wait for the armed deadline or the next command.
fn worker_loop<F>(receiver: &Receiver<WorkerCommand>, sink: &F)
where
    F: Fn(ChromeEvent),
{
    let mut armed: Option<(u64, Instant)> = None;

    loop {
        let command = match armed {
            Some((_, deadline)) => receiver.recv_deadline(deadline),
            None => receiver
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };

        match command {
            Ok(WorkerCommand::Arm { token, deadline }) => {
                armed = Some((token, deadline));
            }
            Ok(WorkerCommand::Disarm) => {
                armed = None;
            }
            Ok(WorkerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!(target: targets::WORKER, "debounce worker exiting");
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some((token, deadline)) = armed.take() {
                    tracing::trace!(target: targets::WORKER, token, "debounce deadline elapsed");
                    sink(ChromeEvent::Settle { token, deadline });
                }
            }
        }
    }
}
