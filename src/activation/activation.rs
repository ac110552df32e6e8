use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt::Debug;

/// A scalar activation whose derivative can be written in terms of its own
/// output `y = f(x)`.
///
/// The backward pass only ever sees node outputs, never the pre-activation
/// sums, so `derivative_from_output(f(x))` must equal `f'(x)`.
pub trait Activation: Debug + Send + Sync {
    fn function(&self, x: f64) -> f64;

    fn derivative_from_output(&self, y: f64) -> f64;
}

/// Built-in activations, selectable from a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    Tanh,
    Identity,
    #[serde(rename = "leaky_relu")]
    LeakyReLU { alpha: f64 },
}

impl Activation for ActivationFunction {
    fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Identity => x,
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    fn derivative_from_output(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => y * (1.0 - y),
            ActivationFunction::Tanh => 1.0 - y * y,
            ActivationFunction::Identity => 1.0,
            // alpha > 0 keeps the sign of x and y equal
            ActivationFunction::LeakyReLU { alpha } => if y > 0.0 { 1.0 } else { *alpha },
        }
    }
}
