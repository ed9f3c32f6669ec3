mod evaluator;


pub use evaluator::CriteriaEvaluator;
