//! Demonstrates sharded ingestion: one estimator per worker thread, merged
//! into a single union estimate at collection time without replaying streams.

use std::thread;

use cardinality_sketch::{CardinalityEstimator, EstimatorError};

const PRECISION: u8 = 14;
const SHARDS: usize = 4;
const ITEMS_PER_SHARD: usize = 250_000;

fn main() -> Result<(), EstimatorError> {
    // Each worker owns its estimator, so ingestion takes no locks. Shard
    // ranges overlap by half to show duplicates collapsing across shards.
    let mut workers = Vec::new();
    for shard in 0..SHARDS {
        let mut estimator = CardinalityEstimator::new(PRECISION)?;
        workers.push(thread::spawn(move || {
            let start = shard * ITEMS_PER_SHARD / 2;
            for i in start..start + ITEMS_PER_SHARD {
                estimator.add(&format!("user-{i}"));
            }
            estimator
        }));
    }

    let mut total = CardinalityEstimator::new(PRECISION)?;
    for worker in workers {
        let shard = worker.join().expect("worker thread panicked");
        println!("shard count = {}", shard.count());
        total.merge(&shard)?;
    }

    let exact = (SHARDS + 1) * ITEMS_PER_SHARD / 2;
    println!("merged count = {} (exact distinct = {exact})", total.count());

    Ok(())
}
