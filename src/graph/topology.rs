use rand::Rng;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::graph::graph::Graph;
use crate::graph::node::{Node, NodeId};

/// Initial weight distribution. Both variants are symmetric around zero and
/// bounded in magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightInit {
    /// Uniform on `[-limit, limit)`.
    Uniform { limit: f64 },
    /// Glorot uniform: `limit = sqrt(6 / (fan_in + fan_out))`, where `fan_in`
    /// counts the bias source.
    Xavier,
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Uniform { limit: 1.0 }
    }
}

impl WeightInit {
    fn limit(&self, fan_in: usize, fan_out: usize) -> f64 {
        match *self {
            WeightInit::Uniform { limit } => limit,
            WeightInit::Xavier => (6.0 / (fan_in + fan_out) as f64).sqrt(),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            WeightInit::Uniform { limit } if !(limit.is_finite() && limit > 0.0) => Err(
                NetworkError::invalid(format!("uniform weight limit must be positive, got {limit}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Checks a width sequence: at least two layers, none of them empty.
pub fn validate_widths(widths: &[usize]) -> Result<()> {
    if widths.len() < 2 {
        return Err(NetworkError::invalid(format!(
            "at least an input and an output layer are required, got {} layer(s)",
            widths.len()
        )));
    }
    if let Some(layer) = widths.iter().position(|&w| w == 0) {
        return Err(NetworkError::invalid(format!("layer {layer} has width 0")));
    }
    Ok(())
}

/// Builds a fully connected layered graph for `widths = [n0 … nL]`.
///
/// Layer 0 holds `n0` input nodes followed by a bias. Layers `1..L` hold
/// hidden nodes followed by a bias, layer `L` holds output nodes only. Each
/// boundary connects every node of layer `i - 1` to every non-bias node of
/// layer `i`, iterating sources in the outer loop, and the edges are filed
/// under originating layer `i - 1`.
pub fn build<R: Rng + ?Sized>(widths: &[usize], init: WeightInit, rng: &mut R) -> Result<Graph> {
    validate_widths(widths)?;
    init.validate()?;

    let last = widths.len() - 1;
    let mut graph = Graph::empty(widths);

    let mut from: Vec<NodeId> = (0..widths[0])
        .map(|_| graph.push_node(0, |id, _| Node::input(id)))
        .collect();
    from.push(graph.push_node(0, Node::bias));

    for layer in 1..=last {
        let targets: Vec<NodeId> = (0..widths[layer])
            .map(|_| {
                if layer == last {
                    graph.push_node(layer, Node::output)
                } else {
                    graph.push_node(layer, Node::hidden)
                }
            })
            .collect();

        let limit = init.limit(from.len(), targets.len());
        for &source in &from {
            for &target in &targets {
                let weight = (rng.gen::<f64>() * 2.0 - 1.0) * limit;
                graph.push_edge(source, target, weight);
            }
        }

        from = targets;
        if layer != last {
            from.push(graph.push_node(layer, Node::bias));
        }
    }

    debug!(
        widths = ?widths,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built network topology"
    );

    Ok(graph)
}
