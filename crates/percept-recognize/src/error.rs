/// Errors that can occur in the recognition pipeline.
///
/// Per-frame "no detection" outcomes are not errors; they surface as `None`
/// results. Only startup conditions (a missing or corrupt model artifact, a
/// model incompatible with the classifier input) are fatal.
#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    /// Error related to image operations.
    #[error(transparent)]
    Image(#[from] percept_image::ImageError),

    /// The shape model file could not be read.
    #[error("Failed to read shape model file")]
    ModelIo(#[from] std::io::Error),

    /// The shape model file could not be parsed.
    #[error("Failed to parse shape model file")]
    ModelParse(#[from] serde_json::Error),

    /// The shape model does not match the classifier's feature layout.
    #[error("Classifier produces {expected} features, model was trained on {actual}")]
    FeatureLengthMismatch {
        /// Number of features the classifier produces.
        expected: usize,
        /// Number of features the model was trained on.
        actual: usize,
    },
}
