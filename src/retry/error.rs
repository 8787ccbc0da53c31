use thiserror::Error;

/// Terminal failure of a retry loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetryError<E> {
    /// The final permitted attempt failed. Holds that attempt's error, untouched.
    #[error(transparent)]
    Operation(E),

    /// The attempt budget was zero, so the operation never ran.
    #[error("reached max retries without success")]
    MaxRetriesExceeded,

    /// The cancellation token fired while waiting between attempts.
    #[error("retry loop was cancelled")]
    Cancelled,
}

impl<E> RetryError<E> {
    /// Whether this is the zero-attempt sentinel rather than a real failure.
    pub fn is_max_retries_exceeded(&self) -> bool {
        matches!(self, Self::MaxRetriesExceeded)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Borrow the error returned by the last attempt, if there was one.
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            Self::Operation(e) => Some(e),
            _ => None,
        }
    }

    /// Take the error returned by the last attempt, if there was one.
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            Self::Operation(e) => Some(e),
            _ => None,
        }
    }
}
