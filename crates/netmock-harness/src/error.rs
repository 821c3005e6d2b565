//! Verification error types.

use std::fmt;

use thiserror::Error;

use crate::{
    expectation::Times,
    recorder::{Call, Method},
};

/// One way the recorded calls disagree with the expectations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    /// A call that no expectation matches.
    #[error("unexpected call: {call}")]
    Unexpected {
        /// The offending call.
        call: Call,
    },

    /// An expectation whose call count is out of bounds.
    #[error("{method}({matchers}): expected {expected} call(s), got {actual}")]
    Count {
        /// Expected method.
        method: Method,
        /// Rendered argument matchers.
        matchers: String,
        /// Allowed call count.
        expected: Times,
        /// Calls attributed to the expectation.
        actual: usize,
    },
}

/// Returned by `verify` when expectations are not met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyError {
    mismatches: Vec<Mismatch>,
}

impl VerifyError {
    pub(crate) fn new(mismatches: Vec<Mismatch>) -> Self {
        Self { mismatches }
    }

    /// Every mismatch found, unexpected calls first.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} call expectation failure(s)", self.mismatches.len())?;
        for mismatch in &self.mismatches {
            write!(f, "\n  - {mismatch}")?;
        }
        Ok(())
    }
}

impl std::error::Error for VerifyError {}
