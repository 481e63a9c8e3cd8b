#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// connected regions and contour extraction module.
pub mod contours;

/// image cropping module.
pub mod crop;

/// image enhancement module.
pub mod enhance;

/// compute image histogram module.
pub mod histogram;

/// morphological operations module.
pub mod morphology;

/// operations to normalize images.
pub mod normalize;

/// module containing parallelization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// operations to threshold images.
pub mod threshold;
