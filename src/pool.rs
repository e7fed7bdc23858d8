use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;

use crate::worker::Worker;
use crate::Result;

/// A fixed-size pool of [`Worker`]s with round-robin task dispatch.
///
/// All workers are constructed eagerly; the pool never grows or shrinks.
/// Dropping the pool drains every queue, then stops and joins every worker
/// thread.
pub struct ThreadPool {
    workers: Vec<Worker>,
    cursor: AtomicUsize,
}

impl ThreadPool {
    /// Creates a pool with the given number of workers.
    ///
    /// Passing `0` selects the hardware-reported logical CPU count. The
    /// effective count is clamped to `1..=num_cpus`, so oversized requests
    /// are capped rather than honored. Every worker thread is live before
    /// this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if any worker thread cannot be spawned; the pool is
    /// not constructed with a reduced size.
    pub fn new(worker_count: u32) -> Result<Self> {
        let max_worker_count = num_cpus::get().max(1);
        let worker_count = match worker_count as usize {
            0 => max_worker_count,
            requested => requested.clamp(1, max_worker_count),
        };

        let workers = (0..worker_count)
            .map(|id| Worker::new(id as u32))
            .collect::<Result<Vec<_>>>()?;

        debug!("Thread pool started with {worker_count} workers");
        Ok(ThreadPool {
            workers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// The number of workers, fixed at construction.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Sum of every worker's pending-task snapshot.
    ///
    /// Approximate: the per-worker counts are read without a pool-wide lock.
    pub fn task_count(&self) -> usize {
        self.workers.iter().map(Worker::task_count).sum()
    }

    /// Submits a task to the next worker in round-robin order.
    ///
    /// Consecutive uncontended pushes land one-per-worker across the pool.
    /// This is static assignment: a worker stuck on a slow task still
    /// receives its share of new tasks.
    pub fn push<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.workers.len();
        self.workers[index].push(Box::new(task));
    }

    /// Blocks until every worker has (transiently) drained its queue.
    ///
    /// Workers are waited on in order; see [`Worker::join`] for the
    /// busy-poll cost and the non-barrier caveat.
    pub fn join(&self) {
        for worker in &self.workers {
            worker.join();
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.join();
        // Workers drop in order, each stopping and joining its thread
    }
}
