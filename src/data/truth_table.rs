use clap::ValueEnum;
use serde::{Serialize, Deserialize};

use crate::data::dataset::Dataset;

/// Two-input boolean functions used as toy classification problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    And,
    Or,
    Xor,
}

impl Gate {
    pub fn eval(&self, a: bool, b: bool) -> bool {
        match self {
            Gate::And => a && b,
            Gate::Or => a || b,
            Gate::Xor => a != b,
        }
    }

    /// The four rows `(0,0) (0,1) (1,0) (1,1)` with a single 0/1 target.
    pub fn dataset(&self) -> Dataset {
        let bit = |b: bool| if b { 1.0 } else { 0.0 };
        [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .map(|(a, b)| (vec![bit(a), bit(b)], vec![bit(self.eval(a, b))]))
            .collect()
    }
}

pub fn and_gate() -> Dataset {
    Gate::And.dataset()
}

pub fn or_gate() -> Dataset {
    Gate::Or.dataset()
}

pub fn xor_gate() -> Dataset {
    Gate::Xor.dataset()
}
