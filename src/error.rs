use std::str::Utf8Error;
use thiserror::Error;

/// The only failure [`crate::extract`] and friends can report: the input
/// never became a document tree.  Once a tree exists extraction always
/// succeeds.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("markup is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),

    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    /// `size` is a lower bound: a reader is only drained one byte past
    /// `limit`.
    #[error("markup is at least {size} bytes, over the configured limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}
