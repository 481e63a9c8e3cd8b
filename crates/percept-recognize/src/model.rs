use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::RecognizeError, shape::ShapeModel};

/// A pretrained two-class linear model with a logistic link.
///
/// The artifact is a small JSON file produced by the training pipeline:
/// the class names in training order, one weight per input feature and a
/// bias. The probability of the second class is `sigmoid(w · x + b)`; the
/// first class gets the complement, so the two always sum to 1.0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinearShapeModel {
    /// The two class names, in training order.
    pub classes: [String; 2],
    /// One weight per standardized input feature.
    pub weights: Vec<f32>,
    /// Intercept of the decision function.
    pub bias: f32,
}

impl LinearShapeModel {
    /// Load a model artifact from disk.
    ///
    /// A missing or corrupt file is a fatal startup error; the process must
    /// refuse to start without a valid model.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecognizeError> {
        let file = File::open(path.as_ref())?;
        let model: Self = serde_json::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded shape model ({} vs {}, {} features)",
            model.classes[0],
            model.classes[1],
            model.weights.len()
        );
        Ok(model)
    }
}

impl ShapeModel for LinearShapeModel {
    fn num_features(&self) -> usize {
        self.weights.len()
    }

    fn classes(&self) -> (&str, &str) {
        (&self.classes[0], &self.classes[1])
    }

    fn predict_proba(&self, features: &[f32]) -> [f32; 2] {
        let z = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.bias;

        let p1 = 1.0 / (1.0 + (-z).exp());
        [1.0 - p1, p1]
    }
}
