pub mod config;
pub mod network;

pub use config::{NetworkConfig, DEFAULT_LEARNING_RATE};
pub use network::Network;
