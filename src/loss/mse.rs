/// Squared-error loss driving the backward pass.
pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Summed squared error: sum((predicted - expected)²)
    pub fn total(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum()
    }

    /// ∂/∂a of ½(t − a)² for one output unit: −(t − a)
    pub fn unit_derivative(predicted: f64, expected: f64) -> f64 {
        -(expected - predicted)
    }

    /// Per-output gradient: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(&a, &b)| Self::unit_derivative(a, b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn loss_and_gradient() {
        let predicted = [0.25, 0.75];
        let expected = [0.0, 1.0];
        assert_relative_eq!(MseLoss::loss(&predicted, &expected), 0.0625);
        assert_relative_eq!(MseLoss::total(&predicted, &expected), 0.125);
        assert_eq!(MseLoss::derivative(&predicted, &expected), vec![0.25, -0.25]);
        assert!(MseLoss::unit_derivative(0.3, 1.0) < 0.0);
    }
}
