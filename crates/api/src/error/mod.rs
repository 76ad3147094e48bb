//! Error handling for the pairing engine

pub mod traits;
pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export error traits
pub use traits::ResultExt;

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Self {
        Self::InvalidLength {
            context: "array conversion",
            expected: 0,
            actual: 0,
        }
    }
}

// Specialized result types for different operations
pub type FieldResult<T> = Result<T>;
pub type GroupResult<T> = Result<T>;
pub type PairingResult<T> = Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_keeps_details() {
        let err = Error::InvalidLength {
            context: "Fp2::from_byte_array",
            expected: 64,
            actual: 63,
        };
        assert_eq!(
            err.with_context("engine"),
            Error::InvalidLength {
                context: "engine",
                expected: 64,
                actual: 63,
            }
        );

        let err = Error::InvalidParameter {
            context: "Fp::invert",
            message: "zero has no inverse".into(),
        };
        assert_eq!(err.to_string(), "Fp::invert: zero has no inverse");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_result_ext() {
        let r: core::result::Result<(), Error> = Err(Error::Other {
            context: "a",
            message: "b".into(),
        });
        let r = r.with_context("c").with_message("d");
        assert_eq!(
            r,
            Err(Error::Other {
                context: "c",
                message: "d".into(),
            })
        );
    }
}
