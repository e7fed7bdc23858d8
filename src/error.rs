use std::io;
use thiserror::Error;

/// Error type for taskpool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// IO error from spawning a worker thread.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for taskpool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
