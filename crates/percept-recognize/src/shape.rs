use percept_image::{Image, ImageSize};
use percept_imgproc::{enhance::equalize_hist, normalize::standardize, resize::resize_bilinear};

use crate::{error::RecognizeError, Classification};

/// Canonical side length of the classifier input; crops are resized to this
/// before feature extraction.
pub const INPUT_SIZE: usize = 30;

/// Minimum class probability before the classifier commits to a label.
pub const CONFIDENCE_THRESHOLD: f32 = 0.6;

/// A pretrained two-class probabilistic model.
///
/// The trait seam lets tests inject a mock; the production model is
/// [`crate::model::LinearShapeModel`].
pub trait ShapeModel {
    /// The number of input features the model was trained on.
    fn num_features(&self) -> usize;

    /// The two class names, in training order.
    fn classes(&self) -> (&str, &str);

    /// Class probabilities for a standardized feature vector.
    ///
    /// The two probabilities sum to 1.0.
    fn predict_proba(&self, features: &[f32]) -> [f32; 2];
}

/// The label emitted by the shape classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeLabel {
    /// One of the model's two trained classes.
    Class(String),
    /// Neither class probability cleared the confidence threshold.
    Undetermined,
}

impl std::fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ShapeLabel::Class(name) => write!(f, "{name}"),
            ShapeLabel::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// Scores grayscale crops with a pretrained probabilistic model.
///
/// The model is loaded once at startup and immutable for the process
/// lifetime; an incompatible model is rejected at construction, never per
/// frame.
pub struct ShapeClassifier<M> {
    model: M,
}

impl<M: ShapeModel> ShapeClassifier<M> {
    /// Create a classifier around a loaded model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model's feature count does not match the
    /// canonical [`INPUT_SIZE`] x [`INPUT_SIZE`] input.
    pub fn new(model: M) -> Result<Self, RecognizeError> {
        let expected = INPUT_SIZE * INPUT_SIZE;
        if model.num_features() != expected {
            return Err(RecognizeError::FeatureLengthMismatch {
                expected,
                actual: model.num_features(),
            });
        }
        Ok(Self { model })
    }

    /// The wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Classify the shape in a grayscale crop.
    ///
    /// The crop is histogram-equalized to normalize lighting, resized to the
    /// canonical resolution, flattened row-major and standardized to zero
    /// mean and unit variance before querying the model. When a class
    /// probability exceeds [`CONFIDENCE_THRESHOLD`] that class is emitted;
    /// otherwise the result is [`ShapeLabel::Undetermined`] with the larger
    /// probability as confidence.
    pub fn classify(
        &self,
        crop: &Image<u8, 1>,
    ) -> Result<Classification<ShapeLabel>, RecognizeError> {
        let mut equalized = Image::<u8, 1>::from_size_val(crop.size(), 0)?;
        equalize_hist(crop, &mut equalized)?;

        let mut canonical = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: INPUT_SIZE,
                height: INPUT_SIZE,
            },
            0,
        )?;
        resize_bilinear(&equalized, &mut canonical)?;

        let mut features = canonical
            .as_slice()
            .iter()
            .map(|&px| px as f32)
            .collect::<Vec<_>>();
        standardize(&mut features);

        let probs = self.model.predict_proba(&features);
        let (class0, class1) = self.model.classes();

        let result = if probs[0] > CONFIDENCE_THRESHOLD {
            Classification {
                label: ShapeLabel::Class(class0.to_string()),
                confidence: probs[0],
            }
        } else if probs[1] > CONFIDENCE_THRESHOLD {
            Classification {
                label: ShapeLabel::Class(class1.to_string()),
                confidence: probs[1],
            }
        } else {
            Classification {
                label: ShapeLabel::Undetermined,
                confidence: probs[0].max(probs[1]),
            }
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::{ShapeClassifier, ShapeLabel, ShapeModel, INPUT_SIZE};
    use crate::error::RecognizeError;
    use percept_image::{Image, ImageSize};

    struct MockModel {
        probs: [f32; 2],
    }

    impl ShapeModel for MockModel {
        fn num_features(&self) -> usize {
            INPUT_SIZE * INPUT_SIZE
        }

        fn classes(&self) -> (&str, &str) {
            ("cube", "sphere")
        }

        fn predict_proba(&self, _features: &[f32]) -> [f32; 2] {
            self.probs
        }
    }

    fn test_crop() -> Result<Image<u8, 1>, RecognizeError> {
        let size = ImageSize {
            width: 50,
            height: 60,
        };
        let data = (0..size.width * size.height)
            .map(|i| (i % 251) as u8)
            .collect();
        Ok(Image::new(size, data)?)
    }

    #[test]
    fn confident_first_class() -> Result<(), RecognizeError> {
        let classifier = ShapeClassifier::new(MockModel { probs: [0.7, 0.3] })?;
        let result = classifier.classify(&test_crop()?)?;
        assert_eq!(result.label, ShapeLabel::Class("cube".into()));
        assert_eq!(result.confidence, 0.7);
        Ok(())
    }

    #[test]
    fn confident_second_class() -> Result<(), RecognizeError> {
        let classifier = ShapeClassifier::new(MockModel { probs: [0.2, 0.8] })?;
        let result = classifier.classify(&test_crop()?)?;
        assert_eq!(result.label, ShapeLabel::Class("sphere".into()));
        assert_eq!(result.confidence, 0.8);
        Ok(())
    }

    #[test]
    fn split_probabilities_are_undetermined() -> Result<(), RecognizeError> {
        let classifier = ShapeClassifier::new(MockModel { probs: [0.5, 0.5] })?;
        let result = classifier.classify(&test_crop()?)?;
        assert_eq!(result.label, ShapeLabel::Undetermined);
        assert_eq!(result.confidence, 0.5);
        Ok(())
    }

    #[test]
    fn threshold_is_exclusive() -> Result<(), RecognizeError> {
        let classifier = ShapeClassifier::new(MockModel { probs: [0.6, 0.4] })?;
        let result = classifier.classify(&test_crop()?)?;
        assert_eq!(result.label, ShapeLabel::Undetermined);
        assert_eq!(result.confidence, 0.6);
        Ok(())
    }

    struct TinyModel;

    impl ShapeModel for TinyModel {
        fn num_features(&self) -> usize {
            4
        }
        fn classes(&self) -> (&str, &str) {
            ("a", "b")
        }
        fn predict_proba(&self, _features: &[f32]) -> [f32; 2] {
            [1.0, 0.0]
        }
    }

    #[test]
    fn incompatible_model_is_rejected() {
        let err = ShapeClassifier::new(TinyModel).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("Classifier produces 900 features, model was trained on 4")
        );
    }
}
