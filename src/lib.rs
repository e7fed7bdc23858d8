#![deny(missing_docs)]

//! A fixed-size worker thread pool with round-robin dispatch.
//!
//! Each [`Worker`] owns one dedicated OS thread and a private FIFO task
//! queue, sleeping on a counting [`Semaphore`] while idle. A [`ThreadPool`]
//! holds a fixed collection of workers and spreads submitted tasks across
//! them in round-robin order. Submission is fire-and-forget: tasks return
//! nothing to the caller, and per-worker FIFO order is the only ordering
//! guarantee.

mod error;
mod pool;
mod semaphore;
mod worker;

pub use error::{PoolError, Result};
pub use pool::ThreadPool;
pub use semaphore::Semaphore;
pub use worker::{Task, Worker};
