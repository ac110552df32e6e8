pub mod node;
pub mod edge;
pub mod graph;
pub mod topology;

pub use node::{Node, NodeId, NodeKind};
pub use edge::{Edge, EdgeId};
pub use graph::Graph;
pub use topology::{build, WeightInit};
