//! Default producer error type.
//!
//! The engine is generic over the error channel and never inspects what a
//! producer passes to `error()`. `Error` is what `Observable<T>` uses when no
//! other error type is named.

use alloc::string::String;
use core::fmt;

/// Result type alias for rivulet operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by producers through the error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Failure reported by a hand-written producer.
    Producer {
        message: String,
    },
    /// A promise-like source settled with a failure.
    Rejected {
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Producer { message } => {
                write!(f, "Producer error: {}", message)
            }
            Error::Rejected { reason } => {
                write!(f, "Promise rejected: {}", reason)
            }
        }
    }
}

impl Error {
    /// Creates a producer error.
    pub fn producer(message: impl Into<String>) -> Self {
        Error::Producer {
            message: message.into(),
        }
    }

    /// Creates a rejection error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Error::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns true if this error came from a rejected promise.
    #[inline]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::producer("socket closed");
        assert!(err.to_string().contains("Producer error"));
        assert!(err.to_string().contains("socket closed"));

        let err = Error::rejected("timeout");
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_error_constructors() {
        let err = Error::rejected("nope");
        match err {
            Error::Rejected { ref reason } => assert_eq!(reason, "nope"),
            _ => panic!("Wrong error type"),
        }
        assert!(err.is_rejection());
        assert!(!Error::producer("x").is_rejection());
    }
}
