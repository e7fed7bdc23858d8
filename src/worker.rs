use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, error};

use crate::semaphore::Semaphore;
use crate::Result;

/// A unit of work submitted to the pool.
///
/// Fire-and-forget: once pushed, the closure is owned by a worker's queue
/// until it runs. No handle or result channel is returned.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// State shared between a `Worker` handle and its background thread.
struct Shared {
    queue: Mutex<VecDeque<Task>>,
    semaphore: Semaphore,
    running: AtomicBool,
    // Queued tasks plus the task currently executing, so `join` only
    // observes zero after the last task has finished.
    pending: AtomicUsize,
}

/// A single worker: one dedicated OS thread draining a private FIFO queue.
///
/// The thread sleeps in [`Semaphore::wait`] while the queue is empty and is
/// woken by [`push`](Worker::push) or by shutdown. Tasks pushed to the same
/// worker run strictly in submission order, one at a time; a slow task delays
/// everything queued behind it.
pub struct Worker {
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawns a worker with the given id.
    ///
    /// The background thread is named `pool-worker-{id}` and is live before
    /// this returns: the constructor yields until the thread has raised its
    /// running flag, so the worker is ready to accept signals immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS cannot spawn the thread.
    pub fn new(id: u32) -> Result<Self> {
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            semaphore: Semaphore::new(0),
            running: AtomicBool::new(false),
            pending: AtomicUsize::new(0),
        });

        let thread = thread::Builder::new()
            .name(format!("pool-worker-{id}"))
            .spawn({
                let shared = Arc::clone(&shared);
                move || run(&shared, id)
            })?;

        while !shared.running.load(Ordering::Acquire) {
            thread::yield_now();
        }

        Ok(Worker {
            shared,
            thread: Some(thread),
        })
    }

    /// Appends `task` to the tail of the queue and signals the thread.
    ///
    /// The queue is unbounded, so this never blocks on capacity. May be
    /// called concurrently from any number of threads. A push that races
    /// with the worker being dropped may enqueue a task that is never
    /// executed; it is silently discarded with the queue.
    pub fn push(&self, task: Task) {
        {
            let mut queue = self.shared.queue.lock().expect("worker queue poisoned");
            queue.push_back(task);
            self.shared.pending.fetch_add(1, Ordering::Release);
        }
        self.shared.semaphore.notify();
    }

    /// Number of tasks queued or currently executing.
    ///
    /// A point-in-time snapshot; concurrent pushes and drains may change the
    /// value before the caller looks at it.
    pub fn task_count(&self) -> usize {
        self.shared.pending.load(Ordering::Acquire)
    }

    /// Blocks until this worker has (transiently) no pending tasks.
    ///
    /// Busy-polls with a cooperative yield rather than blocking on a signal,
    /// so the wait costs CPU proportional to the drain time. Nothing stops
    /// other threads from pushing during or after the wait; this is a
    /// best-effort drain, not a barrier.
    pub fn join(&self) {
        while self.task_count() > 0 {
            thread::yield_now();
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        // Wake the thread even if no task is pending.
        self.shared.semaphore.notify();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// The worker loop, run on the dedicated thread.
fn run(shared: &Shared, id: u32) {
    shared.running.store(true, Ordering::Release);
    debug!("Worker {id} started");

    while shared.running.load(Ordering::Acquire) {
        shared.semaphore.wait();

        loop {
            let task = {
                let mut queue = shared.queue.lock().expect("worker queue poisoned");
                queue.pop_front()
            };
            let Some(task) = task else { break };

            debug!("Worker {id} executing task");
            // Catch panics so the worker loop continues
            if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
                error!("Worker {id} task panicked, continuing");
            }
            shared.pending.fetch_sub(1, Ordering::Release);
        }
    }

    debug!("Worker {id} shutting down");
}
