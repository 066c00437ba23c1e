//! Cardinality estimator based on the HyperLogLog algorithm with runtime
//! configurable precision.
//!
//! The estimator is defined by a `precision` parameter in [4..16] range, which
//! sets the number of hash bits used for register indexing:
//! - `m = 2^precision` registers are allocated, one byte each.
//! - Expected relative error:
//!   precision = 10: 1.04 / sqrt(2^10) = 3.25%
//!   precision = 12: 1.04 / sqrt(2^12) = 1.62%
//!   precision = 14: 1.04 / sqrt(2^14) = 0.81%
//!   precision = 16: 1.04 / sqrt(2^16) = 0.41%
//!
//! # Data storage format
//! Registers are stored in a single heap allocated byte array with
//! `2^precision` slots indexed by the top `precision` bits of the item hash:
//! - `registers[i]` stores the maximum rank observed for bucket `i`,
//!   with 0 meaning no item has reached the bucket yet.
//! - rank is the number of leading zeros in the remaining hash bits plus one.
//!   A guard bit keeps ranks in [1..65 - precision] range, so every rank
//!   fits in one byte at any supported precision.
//!
//! Inserts touch at most one register, estimates scan the whole array and
//! apply the correction matching the detected range:
//! - small range: linear counting based on the number of zero registers.
//! - middle range: raw HyperLogLog estimate with `alpha` bias correction.
//! - large range: logarithmic correction for hash collisions once the raw
//!   estimate approaches `2^32`.
//!
//! [Original HyperLogLog paper](https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)

use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::mem::size_of;

use wyhash::WyHash;

use crate::error::EstimatorError;

/// Minimum supported precision parameter
pub const MIN_PRECISION: u8 = 4;
/// Maximum supported precision parameter
pub const MAX_PRECISION: u8 = 16;
/// Precision parameter used by `Default` construction
pub const DEFAULT_PRECISION: u8 = 12;

pub struct CardinalityEstimator<H: Hasher + Default = WyHash> {
    /// Number of hash bits used for register indexing
    pub(crate) precision: u8,
    /// Bias correction constant, fixed at construction based on `precision`
    alpha: f64,
    /// Register ranks, one byte per register, `2^precision` slots
    pub(crate) registers: Box<[u8]>,
    /// Zero-sized build hasher
    build_hasher: BuildHasherDefault<H>,
}

impl CardinalityEstimator {
    /// Creates new instance of `CardinalityEstimator` with default `WyHash` hasher.
    ///
    /// Returns `EstimatorError::InvalidPrecision` if `precision` is outside
    /// of [`MIN_PRECISION`]`..=`[`MAX_PRECISION`] range.
    #[inline]
    pub fn new(precision: u8) -> Result<Self, EstimatorError> {
        Self::with_hasher(precision)
    }
}

impl<H: Hasher + Default> CardinalityEstimator<H> {
    /// Creates new instance of `CardinalityEstimator` with custom hasher type.
    ///
    /// Estimators only produce meaningful merges and comparisons when built
    /// with the same hasher type.
    #[inline]
    pub fn with_hasher(precision: u8) -> Result<Self, EstimatorError> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(EstimatorError::InvalidPrecision(precision));
        }
        Ok(Self::from_precision(precision))
    }

    /// Creates estimator with already validated `precision`
    fn from_precision(precision: u8) -> Self {
        let m = 1usize << precision;
        Self {
            precision,
            alpha: alpha(m),
            registers: vec![0u8; m].into_boxed_slice(),
            build_hasher: BuildHasherDefault::default(),
        }
    }

    /// Insert a hashable item into `CardinalityEstimator`
    #[inline]
    pub fn add<T: Hash + ?Sized>(&mut self, item: &T) {
        let mut hasher = self.build_hasher.build_hasher();
        item.hash(&mut hasher);
        self.add_hash(hasher.finish());
    }

    /// Insert an already computed 64-bit hash into `CardinalityEstimator`.
    ///
    /// The hash must come from a function distributing items uniformly
    /// across all 64 bits, like the ones `add` computes.
    #[inline]
    pub fn add_hash(&mut self, hash: u64) {
        let precision = u32::from(self.precision);
        let idx = (hash >> (64 - precision)) as usize;
        // Guard bit at position `precision - 1` bounds the rank
        // by `65 - precision`, so it always fits in one byte.
        let w = (hash << precision) | (1 << (precision - 1));
        let rank = (w.leading_zeros() + 1) as u8;
        // SAFETY: `idx` has `precision` bits and `registers` holds `2^precision` slots.
        let register = unsafe { self.registers.get_unchecked_mut(idx) };
        if rank > *register {
            *register = rank;
        }
    }

    /// Return cardinality estimate
    #[inline]
    pub fn count(&self) -> usize {
        let m = self.registers.len() as f64;
        let mut sum = 0.0;
        let mut zeros = 0usize;
        for &rank in self.registers.iter() {
            sum += 1.0 / ((1u64 << rank) as f64);
            zeros += usize::from(rank == 0);
        }

        let raw = self.alpha * m * m / sum;
        let two_pow_32 = (1u64 << 32) as f64;
        let estimate = if raw <= 2.5 * m {
            if zeros > 0 {
                // Small range: linear counting over zero registers
                m * (m / (zeros as f64)).ln()
            } else {
                raw
            }
        } else if raw > two_pow_32 / 30.0 {
            // Large range: correction for hash collisions close to 2^32
            -two_pow_32 * (1.0 - raw / two_pow_32).ln()
        } else {
            raw
        };

        (estimate + 0.5) as usize
    }

    /// Merge cardinality estimators
    ///
    /// Merged estimate equals the estimate of a single estimator that has
    /// seen the union of both input streams. Returns
    /// `EstimatorError::PrecisionMismatch` when precisions differ, leaving
    /// `self` unchanged.
    #[inline]
    pub fn merge(&mut self, rhs: &Self) -> Result<(), EstimatorError> {
        if self.precision != rhs.precision {
            return Err(EstimatorError::PrecisionMismatch {
                lhs: self.precision,
                rhs: rhs.precision,
            });
        }

        for (lhs_rank, &rhs_rank) in self.registers.iter_mut().zip(rhs.registers.iter()) {
            *lhs_rank = (*lhs_rank).max(rhs_rank);
        }

        Ok(())
    }

    /// Return precision this estimator was created with
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Return memory size of `CardinalityEstimator`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.registers.len()
    }
}

impl<H: Hasher + Default> Default for CardinalityEstimator<H> {
    /// Creates estimator with `DEFAULT_PRECISION`
    fn default() -> Self {
        Self::from_precision(DEFAULT_PRECISION)
    }
}

impl<H: Hasher + Default> Clone for CardinalityEstimator<H> {
    /// Clone `CardinalityEstimator`
    fn clone(&self) -> Self {
        Self {
            precision: self.precision,
            alpha: self.alpha,
            registers: self.registers.clone(),
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<H: Hasher + Default> PartialEq for CardinalityEstimator<H> {
    /// Compare cardinality estimators
    fn eq(&self, rhs: &Self) -> bool {
        self.precision == rhs.precision && self.registers == rhs.registers
    }
}

impl<H: Hasher + Default> Debug for CardinalityEstimator<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, estimate: {}, size: {} }}",
            self.precision,
            self.count(),
            self.size_of()
        )
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}
