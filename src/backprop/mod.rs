pub mod engine;

pub use engine::{backpropagate, output_delta};
