//! `cardinality-sketch` is a Rust crate for estimating the number of distinct
//! elements in a stream or dataset using a fixed, precision-controlled amount
//! of memory.
//!
//! This library uses HyperLogLog with runtime configurable precision: an
//! estimator built with precision `p` keeps `2^p` one-byte registers, answers
//! `count` with a relative error around `1.04 / sqrt(2^p)`, and merges with
//! any other estimator of the same precision. Merging is the union operation:
//! shards can ingest items independently (for example one estimator per
//! thread) and be combined at collection time without losing accuracy.
//!
//! Items are hashed with [`wyhash`](https://crates.io/crates/wyhash) by
//! default, a fast non-cryptographic hash with uniform 64-bit output; use
//! [`CardinalityEstimator::with_hasher`] to plug in another `Hasher`.
//!
//! ```
//! use cardinality_sketch::CardinalityEstimator;
//!
//! # fn main() -> Result<(), cardinality_sketch::EstimatorError> {
//! let mut estimator = CardinalityEstimator::new(12)?;
//! estimator.add("flow-1");
//! estimator.add("flow-1");
//! assert_eq!(estimator.count(), 1);
//!
//! let mut shard = CardinalityEstimator::new(12)?;
//! shard.add("flow-1");
//! estimator.merge(&shard)?;
//! assert_eq!(estimator.count(), 1);
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod estimator;
#[cfg(feature = "with_serde")]
mod serde;

pub use crate::error::EstimatorError;
pub use crate::estimator::{
    CardinalityEstimator, DEFAULT_PRECISION, MAX_PRECISION, MIN_PRECISION,
};
