use crate::activation::Activation;
use crate::error::Result;
use crate::graph::{Graph, NodeId, NodeKind};

/// Read-only view used to evaluate node outputs.
///
/// The activation comes in through the context rather than being looked up
/// from the node, so nodes stay plain data.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub graph: &'a Graph,
    pub activation: &'a dyn Activation,
}

impl<'a> EvalContext<'a> {
    pub fn new(graph: &'a Graph, activation: &'a dyn Activation) -> Self {
        EvalContext { graph, activation }
    }

    /// Output of `node`, re-deriving its whole upstream subgraph.
    ///
    /// Nothing is cached, so the cost grows with the number of paths to the
    /// input layer. Use [`EvalContext::forward_pass`] to evaluate every node.
    pub fn output(&self, node: NodeId) -> Result<f64> {
        self.graph.node(node)?;
        Ok(self.eval(node))
    }

    /// Weighted sum over the incoming edges of `node`. The bias node is one
    /// of the sources, so its contribution is counted once.
    pub fn net_input(&self, node: NodeId) -> Result<f64> {
        self.graph.node(node)?;
        Ok(self.net(node))
    }

    fn eval(&self, id: NodeId) -> f64 {
        match self.graph.nodes()[id.0].kind {
            NodeKind::Input { value } | NodeKind::Bias { value } => value,
            NodeKind::Hidden | NodeKind::Output => self.activation.function(self.net(id)),
        }
    }

    fn net(&self, id: NodeId) -> f64 {
        let edges = self.graph.edges();
        self.graph
            .incoming_ids(id)
            .iter()
            .map(|e| {
                let edge = &edges[e.0];
                self.eval(edge.from) * edge.weight
            })
            .sum()
    }

    /// Evaluates every node once, layer by layer.
    ///
    /// The returned table is valid for the current input values and weights
    /// only; callers recompute it for every sample.
    pub fn forward_pass(&self) -> NodeOutputs {
        let graph = self.graph;
        let edges = graph.edges();
        let mut values = vec![0.0; graph.node_count()];

        for layer in graph.layers() {
            for &id in layer {
                values[id.0] = match graph.nodes()[id.0].kind {
                    NodeKind::Input { value } | NodeKind::Bias { value } => value,
                    NodeKind::Hidden | NodeKind::Output => {
                        let net: f64 = graph
                            .incoming_ids(id)
                            .iter()
                            .map(|e| values[edges[e.0].from.0] * edges[e.0].weight)
                            .sum();
                        self.activation.function(net)
                    }
                };
            }
        }

        NodeOutputs { values }
    }
}

/// Outputs of every node for one forward pass, indexed by node id.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOutputs {
    values: Vec<f64>,
}

impl NodeOutputs {
    pub fn get(&self, node: NodeId) -> f64 {
        self.values[node.0]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Values of the output layer in layer order.
    pub fn network_outputs(&self, graph: &Graph) -> Vec<f64> {
        graph.output_nodes().iter().map(|n| self.get(n.id)).collect()
    }
}
