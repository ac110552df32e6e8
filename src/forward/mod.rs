pub mod evaluator;

pub use evaluator::{EvalContext, NodeOutputs};
