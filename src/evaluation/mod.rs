//! Route and solution evaluation.

mod evaluator;

pub use evaluator::RouteEvaluator;
