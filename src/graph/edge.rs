use std::fmt;

use crate::graph::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

/// Directed weighted connection between adjacent layers.
///
/// `layer` is the originating layer of `from`. `error` is scratch space for
/// the backward pass: it is cleared before every sample and only read after
/// it has been written for that sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub layer: usize,
    pub weight: f64,
    pub error: f64,
}

impl Edge {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId, layer: usize, weight: f64) -> Edge {
        Edge { id, from, to, layer, weight, error: 0.0 }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} (layer {}, weight={:.6})", self.from, self.to, self.layer, self.weight)
    }
}
