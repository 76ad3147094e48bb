//! Validation utilities for arithmetic inputs

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate that a length is a whole number of fixed-size chunks
#[inline(always)]
pub fn multiple_of(context: &'static str, actual: usize, chunk: usize) -> Result<()> {
    if chunk == 0 || actual % chunk != 0 {
        return Err(Error::Length {
            context,
            expected: (actual / chunk.max(1) + 1) * chunk,
            actual,
        });
    }
    Ok(())
}
