use crate::graph::Graph;

/// Plain gradient descent over edge errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// `weight -= learning_rate * error` for every edge, last boundary first.
    ///
    /// Call only after the backward pass has finished the whole sample.
    pub fn step(&self, graph: &mut Graph) {
        for layer in (0..graph.output_layer()).rev() {
            for id in graph.boundary_ids(layer).to_vec() {
                let edge = graph.edge_mut(id);
                edge.weight -= self.learning_rate * edge.error;
            }
        }
    }
}
