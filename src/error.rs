//! Error types for estimator construction and merging.

use thiserror::Error;

use crate::estimator::{MAX_PRECISION, MIN_PRECISION};

/// Errors returned by fallible estimator operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorError {
    /// Requested precision lies outside the supported
    /// [`MIN_PRECISION`]`..=`[`MAX_PRECISION`] range.
    #[error("invalid precision {0}: must be in {min}..={max}", min = MIN_PRECISION, max = MAX_PRECISION)]
    InvalidPrecision(u8),

    /// Attempted to merge estimators built with different precisions.
    #[error("precision mismatch: cannot merge precision {rhs} into precision {lhs}")]
    PrecisionMismatch {
        /// Precision of the estimator being merged into.
        lhs: u8,
        /// Precision of the estimator being merged from.
        rhs: u8,
    },
}
