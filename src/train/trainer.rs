use tracing::trace;

use crate::backprop::backpropagate;
use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::optim::Sgd;

/// One forward / backward / update cycle for a single sample.
///
/// Errors for every output unit are accumulated before the hidden layers are
/// resolved, and the weights are updated once at the end. Widths are checked
/// before anything is written, so a rejected sample leaves the weights as
/// they were. Returns the outputs computed before the update.
pub fn train_sample(network: &mut Network, input: &[f64], target: &[f64]) -> Result<Vec<f64>> {
    network.check_input(input)?;
    if target.len() != network.graph.output_width() {
        return Err(NetworkError::DimensionMismatch {
            what: "target",
            expected: network.graph.output_width(),
            actual: target.len(),
        });
    }
    network.set_inputs(input)?;

    // Forward pass
    let outputs = network.context().forward_pass();
    let predicted = outputs.network_outputs(&network.graph);

    // Backward pass
    backpropagate(&mut network.graph, &outputs, target, network.activation.as_ref())?;

    Sgd::new(network.learning_rate).step(&mut network.graph);
    trace!(?input, ?target, ?predicted, "sample trained");

    Ok(predicted)
}
