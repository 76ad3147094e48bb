//! Error type definitions for pairing-engine operations

use thiserror::Error;

/// Primary error type for the pairing engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input has the wrong number of bytes or components
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Argument rejected: zero inverse, non-residue square root, non-canonical
    /// coefficient, point off the curve or outside the subgroup
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Encoded value could not be parsed
    #[error("serialization error: {context}: {message}")]
    SerializationError {
        context: &'static str,
        message: String,
    },

    /// Random generation error
    #[error("random generation error: {context}: {message}")]
    RandomGenerationError {
        context: &'static str,
        message: String,
    },

    /// Arithmetic reached a state its inputs should have ruled out
    #[error("processing error in {context}: {message}")]
    Processing {
        context: &'static str,
        message: String,
    },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for pairing-engine operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its details
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::SerializationError { message, .. } => {
                Self::SerializationError { context, message }
            }
            Self::RandomGenerationError { message, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::Processing { message, .. } => Self::Processing { context, message },
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }

    /// Replace the message of an existing error
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidLength { context, expected, actual } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::SerializationError { context, .. } => {
                Self::SerializationError { context, message }
            }
            Self::RandomGenerationError { context, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::Processing { context, .. } => Self::Processing { context, message },
            Self::Other { context, .. } => Self::Other { context, message },
        }
    }

    /// True for the argument-validation kinds callers are expected to handle
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. } | Self::InvalidParameter { .. } | Self::SerializationError { .. }
        )
    }
}
