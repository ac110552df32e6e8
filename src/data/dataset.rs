use crate::error::{NetworkError, Result};

/// One labeled training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

/// Ordered sample set. Training visits samples in insertion order unless
/// shuffling is requested, so runs are reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset { samples: Vec::new() }
    }

    pub fn push(&mut self, input: Vec<f64>, target: Vec<f64>) {
        self.samples.push(Sample { input, target });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Checks every sample against the network's input and output widths.
    pub fn validate(&self, input_width: usize, output_width: usize) -> Result<()> {
        for sample in &self.samples {
            if sample.input.len() != input_width {
                return Err(NetworkError::DimensionMismatch {
                    what: "input",
                    expected: input_width,
                    actual: sample.input.len(),
                });
            }
            if sample.target.len() != output_width {
                return Err(NetworkError::DimensionMismatch {
                    what: "target",
                    expected: output_width,
                    actual: sample.target.len(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(Vec<f64>, Vec<f64>)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (Vec<f64>, Vec<f64>)>>(iter: I) -> Self {
        Dataset {
            samples: iter
                .into_iter()
                .map(|(input, target)| Sample { input, target })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
