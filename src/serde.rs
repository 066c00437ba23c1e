//! # Serde module for CardinalityEstimator
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `CardinalityEstimator`. It uses `serde`'s custom serialization and deserialization mechanisms.
//!
//! `CardinalityEstimator` is serialized into a tuple: `(precision, registers)`, where
//! `registers` is the raw register byte array in index order.
//!
//! During deserialization the tuple is validated before the estimator is rebuilt:
//! the precision must be in supported range, the register array must hold exactly
//! `2^precision` entries, and every rank must fit the `65 - precision` bound.
//! Payloads violating any of these produce a deserialization error instead of a
//! corrupted estimator.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)

use std::hash::Hasher;

use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::estimator::CardinalityEstimator;

impl<H: Hasher + Default> Serialize for CardinalityEstimator<H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Begin a new serialized tuple with two elements.
        let mut tup = serializer.serialize_tuple(2)?;

        // The first element is the precision, the second is the register array.
        tup.serialize_element(&self.precision)?;
        tup.serialize_element(&*self.registers)?;

        // Finalize the tuple.
        tup.end()
    }
}

impl<'de, H: Hasher + Default> Deserialize<'de> for CardinalityEstimator<H> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Deserialize the tuple written by the serialize method and validate
        // every part of it before rebuilding the estimator.
        let (precision, registers): (u8, Vec<u8>) = Deserialize::deserialize(deserializer)?;

        let mut estimator = Self::with_hasher(precision).map_err(Error::custom)?;
        if registers.len() != estimator.registers.len() {
            return Err(Error::custom(format!(
                "invalid register count {} for precision {precision}: expected {}",
                registers.len(),
                estimator.registers.len(),
            )));
        }
        // The guard bit bounds every observable rank by `65 - precision`.
        let max_rank = 65 - precision;
        if let Some(&rank) = registers.iter().find(|&&rank| rank > max_rank) {
            return Err(Error::custom(format!(
                "invalid register rank {rank} for precision {precision}: expected at most {max_rank}"
            )));
        }

        estimator.registers.copy_from_slice(&registers);
        Ok(estimator)
    }
}
