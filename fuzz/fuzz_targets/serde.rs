#![no_main]

use cardinality_sketch::CardinalityEstimator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut estimator) = serde_json::from_slice::<CardinalityEstimator>(data) {
        estimator.add(&1);
        assert!(estimator.count() > 0);

        // Anything that passed validation must round-trip unchanged.
        let payload = serde_json::to_vec(&estimator).unwrap();
        let restored: CardinalityEstimator = serde_json::from_slice(&payload).unwrap();
        assert_eq!(restored, estimator);
    }
});
