/// An error type for the image module.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch ({0}x{1} != {2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel coordinate falls outside the image.
    #[error("Pixel index out of bounds (x: {0}, y: {1}, channel: {2})")]
    PixelIndexOutOfBounds(usize, usize, usize),

    /// Error when the image contains no pixel data.
    #[error("Image data is not initialized")]
    ImageDataNotInitialized,

    /// Error when the number of histogram bins is invalid.
    #[error("Invalid number of histogram bins ({0})")]
    InvalidHistogramBins(usize),

    /// Error when an adaptive threshold block size is invalid.
    #[error("Block size must be odd and at least 3, got {0}")]
    InvalidBlockSize(usize),
}
