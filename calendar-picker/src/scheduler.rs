//! Deferred work on the host's event queue.
//!
//! ## Usage
//!
//! The picker never spawns threads or timers of its own. Work that must run
//! after the current gesture has been fully processed is handed to a
//! [`Scheduler`] supplied by the host. [`LocalQueue`] is a plain FIFO that a
//! single-threaded host drains once per turn of its event loop.

use std::{
    collections::VecDeque,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;
use tracing::trace;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after the caller's current call stack has unwound.
pub trait Scheduler: Send + Sync {
    /// Queues `task` and returns a handle that can cancel it.
    ///
    /// Implementations must not run the task before returning.
    fn schedule(&self, task: Task) -> TaskHandle;
}

/// Cancellation token for a scheduled task.
///
/// Clones share the same token.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    /// Creates a live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the task as cancelled. Cancelling twice is harmless.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A first-in, first-out task queue drained explicitly by its owner.
#[derive(Default)]
pub struct LocalQueue {
    tasks: Mutex<VecDeque<(TaskHandle, Task)>>,
}

impl LocalQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of queued tasks, cancelled ones included.
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Returns true when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Runs queued tasks in order until the queue is empty and returns how
    /// many actually ran.
    ///
    /// Cancelled tasks are discarded without running. Tasks queued while
    /// draining run in the same call.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // The lock must not be held while a task runs; tasks may schedule.
            let Some((handle, task)) = self.tasks.lock().pop_front() else {
                break;
            };
            if handle.is_cancelled() {
                trace!("Skipping cancelled task");
                continue;
            }
            task();
            ran += 1;
        }
        ran
    }

    /// Drops every queued task without running it.
    pub fn clear(&self) {
        self.tasks.lock().clear();
    }
}

impl Scheduler for LocalQueue {
    fn schedule(&self, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        self.tasks.lock().push_back((handle.clone(), task));
        handle
    }
}

impl fmt::Debug for LocalQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalQueue")
            .field("len", &self.len())
            .finish()
    }
}
