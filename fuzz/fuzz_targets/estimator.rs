#![no_main]

use cardinality_sketch::CardinalityEstimator;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Both nibbles of the first byte pick precisions in supported range.
    let precision = 4 + data[0] % 13;
    let other_precision = 4 + (data[0] >> 4) % 13;

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut estimator1 = CardinalityEstimator::new(precision).unwrap();
    for chunk in first_half.chunks(8) {
        let mut bytes = [0u8; 8];
        bytes[..chunk.len()].copy_from_slice(chunk);
        estimator1.add_hash(u64::from_le_bytes(bytes));
        assert!(estimator1.count() > 0);
        assert!(estimator1.size_of() > 0);
    }

    let mut estimator2 = CardinalityEstimator::new(precision).unwrap();
    for chunk in second_half.chunks(4) {
        estimator2.add(chunk);
        assert!(estimator2.count() > 0);
        assert!(estimator2.size_of() > 0);
    }

    estimator1.merge(&estimator2).unwrap();

    let mut estimator3 = CardinalityEstimator::new(other_precision).unwrap();
    for chunk in second_half.chunks(16) {
        estimator3.add(chunk);
    }
    if other_precision == precision {
        estimator1.merge(&estimator3).unwrap();
    } else {
        assert!(estimator1.merge(&estimator3).is_err());
    }
});
