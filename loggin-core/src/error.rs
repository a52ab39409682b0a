use thiserror::Error;

/// Errors returned by sink registration.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was absent or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Every sink slot is taken.
    #[error("sink table is full ({capacity} slots)")]
    Capacity { capacity: usize },

    /// Opening a log file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
