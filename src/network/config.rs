use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::graph::topology::{validate_widths, WeightInit};

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

fn default_name() -> String {
    "network".to_owned()
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

/// Serializable description of a network: shape, activation and training
/// rate. Weights are never part of it.
///
/// ```json
/// { "name": "xor", "layer_widths": [2, 4, 1], "learning_rate": 0.5, "seed": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Human-readable label, used in log output.
    #[serde(default = "default_name")]
    pub name: String,
    /// `[n0 … nL]`: input width, hidden widths, output width.
    pub layer_widths: Vec<usize>,
    #[serde(default)]
    pub activation: ActivationFunction,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub weight_init: WeightInit,
    /// Fixes the initial weights when set.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(layer_widths: &[usize]) -> Self {
        NetworkConfig {
            name: default_name(),
            layer_widths: layer_widths.to_vec(),
            activation: ActivationFunction::default(),
            learning_rate: DEFAULT_LEARNING_RATE,
            weight_init: WeightInit::default(),
            seed: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn activation(mut self, activation: ActivationFunction) -> Self {
        self.activation = activation;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn weight_init(mut self, weight_init: WeightInit) -> Self {
        self.weight_init = weight_init;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_widths(&self.layer_widths)?;
        validate_learning_rate(self.learning_rate)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config written by `save_json` or by hand.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn validate_learning_rate(rate: f64) -> Result<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(NetworkError::invalid(format!("learning rate must be positive and finite, got {rate}")))
    }
}
