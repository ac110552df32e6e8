use crate::error::{NetworkError, Result};
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId, NodeKind};

/// Node and edge storage for one layered network.
///
/// Nodes and edges live in contiguous arrays indexed by their ids. Per-layer
/// node lists, per-boundary edge lists and per-node incoming/outgoing edge
/// lists are kept alongside so every traversal is an index lookup.
#[derive(Debug, Clone)]
pub struct Graph {
    widths: Vec<usize>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    layers: Vec<Vec<NodeId>>,
    edges_by_layer: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Empty graph with room for `widths.len()` layers. Only the topology
    /// builder fills it.
    pub(crate) fn empty(widths: &[usize]) -> Graph {
        let layer_count = widths.len();
        Graph {
            widths: widths.to_vec(),
            nodes: Vec::new(),
            edges: Vec::new(),
            layers: vec![Vec::new(); layer_count],
            edges_by_layer: vec![Vec::new(); layer_count.saturating_sub(1)],
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub(crate) fn push_node<F>(&mut self, layer: usize, make: F) -> NodeId
    where
        F: FnOnce(NodeId, usize) -> Node,
    {
        let id = NodeId(self.nodes.len());
        self.nodes.push(make(id, layer));
        self.layers[layer].push(id);
        self.incoming.push(Vec::new());
        self.outgoing.push(Vec::new());
        id
    }

    pub(crate) fn push_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> EdgeId {
        let id = EdgeId(self.edges.len());
        let layer = self.nodes[from.0].layer;
        self.edges.push(Edge::new(id, from, to, layer, weight));
        self.edges_by_layer[layer].push(id);
        self.outgoing[from.0].push(id);
        self.incoming[to.0].push(id);
        id
    }

    // ── Shape ───────────────────────────────────────────────────────────

    /// Configured widths `[n0 … nL]`, bias nodes not counted.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Number of layers, `L + 1`.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Index `L` of the output layer.
    pub fn output_layer(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn input_width(&self) -> usize {
        self.widths[0]
    }

    pub fn output_width(&self) -> usize {
        self.widths[self.output_layer()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ── Nodes ───────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(NetworkError::IndexOutOfRange {
            what: "node",
            index: id.0,
            len: self.nodes.len(),
        })
    }

    /// Ids of every node at `layer`, bias included, in construction order.
    pub fn layer_ids(&self, layer: usize) -> Result<&[NodeId]> {
        self.layers
            .get(layer)
            .map(Vec::as_slice)
            .ok_or(NetworkError::IndexOutOfRange {
                what: "layer",
                index: layer,
                len: self.layers.len(),
            })
    }

    /// Every node at `layer`, bias included.
    pub fn nodes_at_layer(&self, layer: usize) -> Result<Vec<&Node>> {
        Ok(self.layer_ids(layer)?.iter().map(|id| &self.nodes[id.0]).collect())
    }

    /// Layer-0 nodes without the bias.
    pub fn input_nodes(&self) -> Vec<&Node> {
        self.non_bias_at(0)
    }

    /// Layer-L nodes, in layer order.
    pub fn output_nodes(&self) -> Vec<&Node> {
        self.non_bias_at(self.output_layer())
    }

    fn non_bias_at(&self, layer: usize) -> Vec<&Node> {
        self.layers[layer]
            .iter()
            .map(|id| &self.nodes[id.0])
            .filter(|node| !node.is_bias())
            .collect()
    }

    /// The bias node of `layer`; `None` for the output layer.
    pub fn bias_at(&self, layer: usize) -> Result<Option<&Node>> {
        Ok(self
            .layer_ids(layer)?
            .iter()
            .map(|id| &self.nodes[id.0])
            .find(|node| node.is_bias()))
    }

    /// Sets the value of an input node.
    pub fn set_input(&mut self, id: NodeId, value: f64) -> Result<()> {
        let len = self.nodes.len();
        match self.nodes.get_mut(id.0) {
            Some(Node { kind: NodeKind::Input { value: slot }, .. }) => {
                *slot = value;
                Ok(())
            }
            Some(_) => Err(NetworkError::invalid(format!("{id} is not an input node"))),
            None => Err(NetworkError::IndexOutOfRange { what: "node", index: id.0, len }),
        }
    }

    // ── Edges ───────────────────────────────────────────────────────────

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges.get(id.0).ok_or(NetworkError::IndexOutOfRange {
            what: "edge",
            index: id.0,
            len: self.edges.len(),
        })
    }

    /// Overwrites an edge weight. Meant for fixtures and tests; training goes
    /// through the optimizer.
    pub fn set_weight(&mut self, id: EdgeId, weight: f64) -> Result<()> {
        let len = self.edges.len();
        let edge = self
            .edges
            .get_mut(id.0)
            .ok_or(NetworkError::IndexOutOfRange { what: "edge", index: id.0, len })?;
        edge.weight = weight;
        Ok(())
    }

    /// Edges whose source lies at `layer` (boundary `layer → layer + 1`).
    pub fn edges_at_layer(&self, layer: usize) -> Result<Vec<&Edge>> {
        let ids = self.edges_by_layer.get(layer).ok_or(NetworkError::IndexOutOfRange {
            what: "edge layer",
            index: layer,
            len: self.edges_by_layer.len(),
        })?;
        Ok(ids.iter().map(|id| &self.edges[id.0]).collect())
    }

    /// Edges entering `node`.
    pub fn edges_incident_to(&self, node: NodeId) -> Result<Vec<&Edge>> {
        self.node(node)?;
        Ok(self.incoming[node.0].iter().map(|id| &self.edges[id.0]).collect())
    }

    /// Edges leaving `node`.
    pub fn edges_originating_from(&self, node: NodeId) -> Result<Vec<&Edge>> {
        self.node(node)?;
        Ok(self.outgoing[node.0].iter().map(|id| &self.edges[id.0]).collect())
    }

    // Unchecked variants for the evaluator, backprop and optimizer, which
    // only ever pass ids taken from this graph.

    pub(crate) fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub(crate) fn incoming_ids(&self, node: NodeId) -> &[EdgeId] {
        &self.incoming[node.0]
    }

    pub(crate) fn outgoing_ids(&self, node: NodeId) -> &[EdgeId] {
        &self.outgoing[node.0]
    }

    pub(crate) fn boundary_ids(&self, layer: usize) -> &[EdgeId] {
        &self.edges_by_layer[layer]
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub(crate) fn clear_errors(&mut self) {
        for edge in &mut self.edges {
            edge.error = 0.0;
        }
    }
}
