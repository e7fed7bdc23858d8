use std::sync::{Condvar, Mutex};

/// A counting semaphore built from a mutex-guarded count and a condvar.
///
/// Used by each [`Worker`](crate::Worker) to sleep while its queue is empty
/// and wake when a task or a shutdown request arrives. The count records how
/// many wake signals are owed, not how many tasks are queued.
pub struct Semaphore {
    count: Mutex<usize>,
    condvar: Condvar,
}

impl Semaphore {
    /// Creates a semaphore with the given starting count.
    pub fn new(count: usize) -> Self {
        Semaphore {
            count: Mutex::new(count),
            condvar: Condvar::new(),
        }
    }

    /// Increments the count and wakes one thread blocked in [`wait`](Self::wait).
    ///
    /// Never blocks. The increment and the wakeup happen under the same lock,
    /// so a concurrent `wait` either sees the new count or receives the signal.
    pub fn notify(&self) {
        let mut count = self.count.lock().expect("semaphore lock poisoned");
        *count += 1;
        self.condvar.notify_one();
    }

    /// Blocks until the count is positive, then decrements it and returns.
    ///
    /// Robust against spurious wakeups: the predicate is re-checked after
    /// every wake, and the decrement happens in the same critical section as
    /// the final check.
    pub fn wait(&self) {
        let count = self.count.lock().expect("semaphore lock poisoned");
        let mut count = self
            .condvar
            .wait_while(count, |count| *count == 0)
            .expect("semaphore lock poisoned");
        *count -= 1;
    }
}
