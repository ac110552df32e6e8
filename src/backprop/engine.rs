use tracing::trace;

use crate::activation::Activation;
use crate::error::{NetworkError, Result};
use crate::forward::NodeOutputs;
use crate::graph::{EdgeId, Graph, NodeId, NodeKind};
use crate::loss::MseLoss;

/// Local error of an output unit: `−(target − actual) · f'(actual)`.
///
/// With the sigmoid this is `−(t − a) · a · (1 − a)`, negative whenever the
/// output undershoots its target.
pub fn output_delta(target: f64, actual: f64, activation: &dyn Activation) -> f64 {
    MseLoss::unit_derivative(actual, target) * activation.derivative_from_output(actual)
}

/// Writes the error term of every edge for one sample.
///
/// `outputs` must come from a forward pass over the current inputs and
/// weights. Errors are cleared first, then resolved layer by layer from the
/// output boundary backwards: all errors of edges entering layer `k + 1` are
/// final before any edge entering layer `k` is written, so a hidden node
/// always sees the complete sum over its outgoing edges.
pub fn backpropagate(
    graph: &mut Graph,
    outputs: &NodeOutputs,
    targets: &[f64],
    activation: &dyn Activation,
) -> Result<()> {
    if targets.len() != graph.output_width() {
        return Err(NetworkError::DimensionMismatch {
            what: "target",
            expected: graph.output_width(),
            actual: targets.len(),
        });
    }

    graph.clear_errors();
    output_errors(graph, outputs, targets, activation);
    for layer in (1..graph.output_layer()).rev() {
        hidden_errors(graph, outputs, activation, layer);
    }
    Ok(())
}

/// `edge.error = δ · from.output()` for every edge entering an output node.
fn output_errors(graph: &mut Graph, outputs: &NodeOutputs, targets: &[f64], activation: &dyn Activation) {
    let output_ids: Vec<NodeId> = graph.output_nodes().iter().map(|n| n.id).collect();

    for (id, &target) in output_ids.into_iter().zip(targets) {
        let delta = output_delta(target, outputs.get(id), activation);
        trace!(node = %id, expected = target, actual = outputs.get(id), delta, "output error");
        assign_incoming(graph, outputs, id, delta);
    }
}

/// For every hidden node at `layer`:
/// `E = Σ outgoing (error · weight)`, then
/// `edge.error = E · f'(out) · from.output()` on each incoming edge.
fn hidden_errors(graph: &mut Graph, outputs: &NodeOutputs, activation: &dyn Activation, layer: usize) {
    let resolved: Vec<(NodeId, f64)> = graph.layers()[layer]
        .iter()
        .filter(|id| matches!(graph.nodes()[id.0].kind, NodeKind::Hidden))
        .map(|&id| {
            let edges = graph.edges();
            let downstream: f64 = graph
                .outgoing_ids(id)
                .iter()
                .map(|e| edges[e.0].error * edges[e.0].weight)
                .sum();
            let local = downstream * activation.derivative_from_output(outputs.get(id));
            (id, local)
        })
        .collect();

    for (id, local) in resolved {
        assign_incoming(graph, outputs, id, local);
    }
}

fn assign_incoming(graph: &mut Graph, outputs: &NodeOutputs, node: NodeId, local: f64) {
    let incoming: Vec<EdgeId> = graph.incoming_ids(node).to_vec();
    for id in incoming {
        let edge = graph.edge_mut(id);
        edge.error = local * outputs.get(edge.from);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::forward::EvalContext;
    use crate::graph::{build, WeightInit};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SIGMOID: ActivationFunction = ActivationFunction::Sigmoid;

    fn seeded(widths: &[usize], seed: u64) -> Graph {
        build(widths, WeightInit::default(), &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    fn load(graph: &mut Graph, inputs: &[f64]) -> NodeOutputs {
        let ids: Vec<NodeId> = graph.input_nodes().iter().map(|n| n.id).collect();
        for (id, &x) in ids.into_iter().zip(inputs) {
            graph.set_input(id, x).unwrap();
        }
        EvalContext::new(graph, &SIGMOID).forward_pass()
    }

    fn errors(graph: &Graph) -> Vec<f64> {
        graph.edges().iter().map(|e| e.error).collect()
    }

    #[test]
    fn undershooting_output_has_negative_delta() {
        let mut g = seeded(&[2, 1], 5);
        for e in 0..3 {
            g.set_weight(EdgeId(e), 0.4).unwrap();
        }
        let outputs = load(&mut g, &[1.0, 0.5]);
        let a = outputs.get(NodeId(3));
        assert!(a < 1.0);
        let delta = output_delta(1.0, a, &SIGMOID);
        assert_relative_eq!(delta, -(1.0 - a) * a * (1.0 - a));
        assert!(delta < 0.0);

        backpropagate(&mut g, &outputs, &[1.0], &SIGMOID).unwrap();
        assert!(g.edges().iter().all(|e| e.error < 0.0));
    }

    #[test]
    fn output_edge_errors_match_finite_differences() {
        let mut g = seeded(&[2, 3, 2], 9);
        let inputs = [0.3, 0.9];
        let targets = [1.0, 0.0];
        let outputs = load(&mut g, &inputs);
        backpropagate(&mut g, &outputs, &targets, &SIGMOID).unwrap();

        let half_sse = |g: &Graph| {
            let out = EvalContext::new(g, &SIGMOID).forward_pass().network_outputs(g);
            0.5 * MseLoss::total(&out, &targets)
        };
        let h = 1e-6;
        let boundary: Vec<EdgeId> = g.edges_at_layer(1).unwrap().iter().map(|e| e.id).collect();
        for id in boundary {
            let w = g.edge(id).unwrap().weight;
            let mut plus = g.clone();
            plus.set_weight(id, w + h).unwrap();
            let mut minus = g.clone();
            minus.set_weight(id, w - h).unwrap();
            let numeric = (half_sse(&plus) - half_sse(&minus)) / (2.0 * h);
            assert_relative_eq!(g.edge(id).unwrap().error, numeric, epsilon = 1e-7);
        }
    }

    #[test]
    fn hidden_error_sums_every_outgoing_edge() {
        // two outputs, so each hidden node fans out twice
        let mut g = seeded(&[2, 2, 2], 4);
        let outputs = load(&mut g, &[0.8, 0.1]);
        backpropagate(&mut g, &outputs, &[0.0, 1.0], &SIGMOID).unwrap();

        let hidden: Vec<NodeId> = g.nodes_at_layer(1).unwrap()
            .iter()
            .filter(|n| !n.is_bias())
            .map(|n| n.id)
            .collect();
        for id in hidden {
            let out = outputs.get(id);
            let downstream: f64 = g.edges_originating_from(id).unwrap()
                .iter()
                .map(|e| e.error * e.weight)
                .sum();
            assert_eq!(g.edges_originating_from(id).unwrap().len(), 2);
            for edge in g.edges_incident_to(id).unwrap() {
                let expected = downstream * out * (1.0 - out) * outputs.get(edge.from);
                assert_relative_eq!(edge.error, expected, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn deeper_layers_resolve_from_finished_successors() {
        let mut g = seeded(&[2, 3, 3, 1], 21);
        let outputs = load(&mut g, &[1.0, 0.0]);
        backpropagate(&mut g, &outputs, &[1.0], &SIGMOID).unwrap();

        for edge in g.edges_at_layer(0).unwrap() {
            let to = edge.to;
            let out = outputs.get(to);
            let downstream: f64 = g.edges_originating_from(to).unwrap()
                .iter()
                .map(|e| e.error * e.weight)
                .sum();
            let expected = downstream * out * (1.0 - out) * outputs.get(edge.from);
            assert_relative_eq!(edge.error, expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn errors_do_not_leak_between_samples() {
        let mut g = seeded(&[2, 2, 1], 2);
        let first = load(&mut g, &[1.0, 1.0]);
        backpropagate(&mut g, &first, &[0.0], &SIGMOID).unwrap();

        let second = load(&mut g, &[0.0, 1.0]);
        backpropagate(&mut g, &second, &[1.0], &SIGMOID).unwrap();
        let after_both = errors(&g);

        let mut fresh = seeded(&[2, 2, 1], 2);
        let only = load(&mut fresh, &[0.0, 1.0]);
        backpropagate(&mut fresh, &only, &[1.0], &SIGMOID).unwrap();
        assert_eq!(after_both, errors(&fresh));
    }

    #[test]
    fn input_edges_with_zero_input_carry_no_error() {
        let mut g = seeded(&[2, 2, 1], 8);
        let outputs = load(&mut g, &[0.0, 1.0]);
        backpropagate(&mut g, &outputs, &[1.0], &SIGMOID).unwrap();
        let from_first_input = g.edges_originating_from(NodeId(0)).unwrap();
        assert!(from_first_input.iter().all(|e| e.error == 0.0));
    }

    #[test]
    fn wrong_target_width_is_rejected() {
        let mut g = seeded(&[2, 2, 1], 0);
        let outputs = load(&mut g, &[0.0, 0.0]);
        let err = backpropagate(&mut g, &outputs, &[1.0, 0.0], &SIGMOID).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { expected: 1, actual: 2, .. }));
    }
}
