pub mod dataset;
pub mod truth_table;

pub use dataset::{Dataset, Sample};
pub use truth_table::{and_gate, or_gate, xor_gate, Gate};
