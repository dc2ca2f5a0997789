use std::fmt;

/// Error returned when a skip list cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The initial batch had no elements, so there is nothing to seed the root with.
    EmptyBatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyBatch => write!(f, "cannot build a skip list from an empty batch"),
        }
    }
}

impl std::error::Error for Error {}
