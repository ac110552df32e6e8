pub mod error;
pub mod activation;
pub mod graph;
pub mod forward;
pub mod backprop;
pub mod loss;
pub mod optim;
pub mod network;
pub mod data;
pub mod train;
pub mod visual;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use activation::{Activation, ActivationFunction};
pub use graph::{Edge, EdgeId, Node, NodeId, NodeKind, WeightInit};
pub use network::{Network, NetworkConfig};
pub use data::{Dataset, Gate, Sample};
pub use optim::Sgd;
pub use train::{train_loop, EpochStats, TrainConfig};
pub use visual::{render_heatmap, save_heatmap, HeatmapConfig};
