use std::fmt;

/// Position of a node in its network's node array.
///
/// Identifiers are handed out sequentially by the topology builder, starting
/// at zero for every network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// The four node kinds, each carrying only the state it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Settable value, no incoming edges.
    Input { value: f64 },
    /// Constant source injected into every non-output layer.
    Bias { value: f64 },
    Hidden,
    Output,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub layer: usize,
    pub kind: NodeKind,
}

impl Node {
    pub fn input(id: NodeId) -> Node {
        Node { id, layer: 0, kind: NodeKind::Input { value: 0.0 } }
    }

    pub fn bias(id: NodeId, layer: usize) -> Node {
        Node { id, layer, kind: NodeKind::Bias { value: 1.0 } }
    }

    pub fn hidden(id: NodeId, layer: usize) -> Node {
        Node { id, layer, kind: NodeKind::Hidden }
    }

    pub fn output(id: NodeId, layer: usize) -> Node {
        Node { id, layer, kind: NodeKind::Output }
    }

    pub fn is_bias(&self) -> bool {
        matches!(self.kind, NodeKind::Bias { .. })
    }

    /// Hidden and output nodes compute their value from incoming edges.
    pub fn is_computed(&self) -> bool {
        matches!(self.kind, NodeKind::Hidden | NodeKind::Output)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Input { value } => {
                write!(f, "[Input {}, layer={}, value={}]", self.id, self.layer, value)
            }
            NodeKind::Bias { value } => {
                write!(f, "[Bias {}, layer={}, value={}]", self.id, self.layer, value)
            }
            NodeKind::Hidden => write!(f, "[Hidden {}, layer={}]", self.id, self.layer),
            NodeKind::Output => write!(f, "[Output {}, layer={}]", self.id, self.layer),
        }
    }
}
