use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::activation::{Activation, ActivationFunction};
use crate::data::Dataset;
use crate::error::{NetworkError, Result};
use crate::forward::EvalContext;
use crate::graph::{build, Edge, EdgeId, Graph, Node, NodeId, WeightInit};
use crate::network::config::{validate_learning_rate, NetworkConfig, DEFAULT_LEARNING_RATE};
use crate::train::{train_loop, TrainConfig};

/// A layered network of explicit nodes and weighted edges.
///
/// The network owns its graph. Cloning yields an independent copy, which is
/// how an observer on another thread gets a consistent view while training
/// continues (see [`Network::snapshot`]).
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) graph: Graph,
    pub(crate) activation: Arc<dyn Activation>,
    pub(crate) learning_rate: f64,
}

impl Network {
    /// Sigmoid network with learning rate 0.1 and random weights in `[-1, 1)`.
    pub fn new(layer_widths: &[usize]) -> Result<Network> {
        Network::with_activation(layer_widths, Arc::new(ActivationFunction::Sigmoid), DEFAULT_LEARNING_RATE)
    }

    /// Network with a caller-supplied activation.
    pub fn with_activation(
        layer_widths: &[usize],
        activation: Arc<dyn Activation>,
        learning_rate: f64,
    ) -> Result<Network> {
        validate_learning_rate(learning_rate)?;
        let graph = build(layer_widths, WeightInit::default(), &mut rand::thread_rng())?;
        Ok(Network { graph, activation, learning_rate })
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Network> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let graph = build(&config.layer_widths, config.weight_init, &mut rng)?;
        debug!(name = %config.name, seed = ?config.seed, "network created from config");
        Ok(Network {
            graph,
            activation: Arc::new(config.activation),
            learning_rate: config.learning_rate,
        })
    }

    // ── Inference ───────────────────────────────────────────────────────

    /// Sets the input values and evaluates the output layer.
    pub fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.set_inputs(inputs)?;
        Ok(self.outputs())
    }

    /// Writes `inputs` into the input nodes, in layer order.
    pub fn set_inputs(&mut self, inputs: &[f64]) -> Result<()> {
        self.check_input(inputs)?;
        let ids: Vec<NodeId> = self.graph.input_nodes().iter().map(|n| n.id).collect();
        for (id, &value) in ids.into_iter().zip(inputs) {
            self.graph.set_input(id, value)?;
        }
        Ok(())
    }

    pub(crate) fn check_input(&self, inputs: &[f64]) -> Result<()> {
        if inputs.len() != self.graph.input_width() {
            return Err(NetworkError::DimensionMismatch {
                what: "input",
                expected: self.graph.input_width(),
                actual: inputs.len(),
            });
        }
        Ok(())
    }

    /// Output layer values for the current inputs.
    pub fn outputs(&self) -> Vec<f64> {
        self.context().forward_pass().network_outputs(&self.graph)
    }

    /// Output of a single node, evaluated recursively without caching.
    pub fn node_output(&self, node: NodeId) -> Result<f64> {
        self.context().output(node)
    }

    pub fn context(&self) -> EvalContext<'_> {
        EvalContext::new(&self.graph, self.activation.as_ref())
    }

    // ── Training ────────────────────────────────────────────────────────

    /// Trains for `epochs` passes over `dataset` in insertion order and
    /// returns the outputs of the last sample processed.
    pub fn train(&mut self, dataset: &Dataset, epochs: usize) -> Result<Vec<f64>> {
        train_loop(self, dataset, &TrainConfig::new(epochs))
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    pub fn activation(&self) -> &dyn Activation {
        self.activation.as_ref()
    }

    /// Independent copy of the current weights and topology.
    pub fn snapshot(&self) -> Network {
        self.clone()
    }

    // ── Introspection ───────────────────────────────────────────────────

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn widths(&self) -> &[usize] {
        self.graph.widths()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.graph.node(id)
    }

    pub fn nodes_at_layer(&self, layer: usize) -> Result<Vec<&Node>> {
        self.graph.nodes_at_layer(layer)
    }

    pub fn input_nodes(&self) -> Vec<&Node> {
        self.graph.input_nodes()
    }

    pub fn output_nodes(&self) -> Vec<&Node> {
        self.graph.output_nodes()
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.graph.edge(id)
    }

    pub fn edges_at_layer(&self, layer: usize) -> Result<Vec<&Edge>> {
        self.graph.edges_at_layer(layer)
    }

    pub fn edges_incident_to(&self, node: NodeId) -> Result<Vec<&Edge>> {
        self.graph.edges_incident_to(node)
    }

    pub fn edges_originating_from(&self, node: NodeId) -> Result<Vec<&Edge>> {
        self.graph.edges_originating_from(node)
    }

    pub fn set_weight(&mut self, edge: EdgeId, weight: f64) -> Result<()> {
        self.graph.set_weight(edge, weight)
    }

    pub fn set_input(&mut self, node: NodeId, value: f64) -> Result<()> {
        self.graph.set_input(node, value)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network {:?}, learning rate {}", self.graph.widths(), self.learning_rate)?;
        for edge in self.graph.edges() {
            let from = &self.graph.nodes()[edge.from.0];
            let to = &self.graph.nodes()[edge.to.0];
            writeln!(f, "  {from} ---> {to}, weight={:.6}", edge.weight)?;
        }
        Ok(())
    }
}
