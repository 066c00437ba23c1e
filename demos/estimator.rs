use cardinality_sketch::{CardinalityEstimator, EstimatorError};

fn main() -> Result<(), EstimatorError> {
    let mut estimator1 = CardinalityEstimator::new(12)?;
    for i in 0..10 {
        estimator1.add(&i);
    }
    println!("estimator1 count = {}", estimator1.count());

    let mut estimator2 = CardinalityEstimator::new(12)?;
    for i in 10..15 {
        estimator2.add(&i);
    }
    println!("estimator2 count = {}", estimator2.count());

    estimator1.merge(&estimator2)?;
    println!("merged count = {}", estimator1.count());

    Ok(())
}
