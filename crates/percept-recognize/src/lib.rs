#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

use std::path::Path;

use percept_image::Image;
use percept_imgproc::{color::gray_from_rgb, crop::clamp_rect, crop::crop_image};

use crate::model::LinearShapeModel;
use crate::shape::{ShapeClassifier, ShapeModel};

/// Dominant-color classification over fixed hue bands.
pub mod color;

/// Error types for the recognition pipeline.
pub mod error;

/// The pretrained shape model artifact.
pub mod model;

/// Depth-based object segmentation.
pub mod segmenter;

/// Candidate contour selection and validation.
pub mod selector;

/// Shape classification with a pretrained probabilistic model.
pub mod shape;

/// Latest-wins shared frame state.
pub mod snapshot;

pub use crate::color::ColorLabel;
pub use crate::error::RecognizeError;
pub use crate::segmenter::SegmenterConfig;
pub use crate::selector::SelectorConfig;
pub use crate::shape::ShapeLabel;
pub use crate::snapshot::Latest;

/// An axis-aligned object rectangle in full-frame coordinates.
///
/// Accepted rectangles always have positive width and height and lie within
/// the original frame bounds; rectangles from external sources may not and
/// are clamped before cropping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingRect {
    /// The x-coordinate of the top-left corner.
    pub x: i64,
    /// The y-coordinate of the top-left corner.
    pub y: i64,
    /// The width of the rectangle.
    pub width: i64,
    /// The height of the rectangle.
    pub height: i64,
}

/// A classification outcome: a label and its confidence in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification<L> {
    /// The winning label.
    pub label: L,
    /// The classifier's confidence in the label.
    pub confidence: f32,
}

/// The object recognition pipeline.
///
/// Owns the tuning configuration, the latest-wins color frame slot, the last
/// accepted object rectangle and the shape classifier with its preloaded
/// model. Processing is synchronous per triggering event: each call runs to
/// completion against the snapshot it captured, while newly arriving frames
/// atomically replace the shared state for the next cycle.
pub struct Recognizer<M = LinearShapeModel> {
    segmenter: SegmenterConfig,
    selector: SelectorConfig,
    color_frame: Latest<Image<u8, 3>>,
    object_rect: Latest<BoundingRect>,
    shape: ShapeClassifier<M>,
}

impl Recognizer<LinearShapeModel> {
    /// Create a recognizer with the shape model loaded from `path`.
    ///
    /// # Errors
    ///
    /// A missing or corrupt model file is fatal; no recognizer is
    /// constructed without a valid model.
    pub fn from_model_path(
        path: impl AsRef<Path>,
        segmenter: SegmenterConfig,
        selector: SelectorConfig,
    ) -> Result<Self, RecognizeError> {
        let model = LinearShapeModel::load(path)?;
        Self::with_model(model, segmenter, selector)
    }
}

impl<M: ShapeModel> Recognizer<M> {
    /// Create a recognizer around an already constructed model.
    pub fn with_model(
        model: M,
        segmenter: SegmenterConfig,
        selector: SelectorConfig,
    ) -> Result<Self, RecognizeError> {
        Ok(Self {
            segmenter,
            selector,
            color_frame: Latest::new(),
            object_rect: Latest::new(),
            shape: ShapeClassifier::new(model)?,
        })
    }

    /// Process a raw depth frame into an object rectangle.
    ///
    /// Runs segmentation and candidate selection; a successful detection
    /// replaces the last accepted rectangle and is returned for publication.
    /// A failed cycle leaves the previous rectangle untouched and emits
    /// nothing; that is the normal steady-state outcome, not an error.
    pub fn on_depth_frame(
        &self,
        depth: &Image<f32, 1>,
    ) -> Result<Option<BoundingRect>, RecognizeError> {
        let mask = segmenter::segment(depth, &self.segmenter)?;
        let rect = selector::select_object(
            &mask,
            &self.selector,
            (self.segmenter.pad_x, self.segmenter.pad_y),
        );

        if let Some(rect) = rect {
            self.object_rect.store(rect);
        }

        Ok(rect)
    }

    /// Store a newly arrived color frame, replacing the previous one.
    pub fn on_color_frame(&self, frame: Image<u8, 3>) {
        self.color_frame.store(frame);
    }

    /// The last accepted object rectangle, if any detection succeeded yet.
    pub fn last_object_rect(&self) -> Option<BoundingRect> {
        self.object_rect.snapshot().map(|rect| *rect)
    }

    /// Classify the color and shape of the region under `rect`.
    ///
    /// The rectangle is clamped to the frame bounds before cropping; the
    /// cycle is skipped (returning `Ok(None)`) when no color frame has
    /// arrived yet or the clamp degenerates to a zero-area region.
    #[allow(clippy::type_complexity)]
    pub fn classify(
        &self,
        rect: &BoundingRect,
    ) -> Result<Option<(Classification<ColorLabel>, Classification<ShapeLabel>)>, RecognizeError>
    {
        let Some(frame) = self.color_frame.snapshot() else {
            log::debug!("skipping classification: no color frame received yet");
            return Ok(None);
        };

        let Some((x, y, width, height)) =
            clamp_rect(rect.x, rect.y, rect.width, rect.height, frame.size())
        else {
            log::debug!("skipping classification: rectangle outside frame bounds");
            return Ok(None);
        };

        let mut crop = Image::<u8, 3>::from_size_val([width, height].into(), 0)?;
        crop_image(frame.as_ref(), &mut crop, x, y)?;

        let color = color::classify_color(&crop)?;

        let mut gray = Image::<u8, 1>::from_size_val(crop.size(), 0)?;
        gray_from_rgb(&crop, &mut gray)?;
        let shape = self.shape.classify(&gray)?;

        Ok(Some((color, shape)))
    }
}
