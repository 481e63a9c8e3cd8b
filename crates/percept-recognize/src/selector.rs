use percept_image::Image;
use percept_imgproc::contours::{find_regions, Region};

use crate::BoundingRect;

/// Configuration for [`select_object`].
///
/// The size and aspect gates describe the expected object footprint: a
/// near-square blob within a plausible pixel-area range.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorConfig {
    /// Minimum accepted bounding-rectangle area, in pixels.
    pub min_size: i64,
    /// Maximum accepted bounding-rectangle area, in pixels.
    pub max_size: i64,
    /// Minimum accepted width/height ratio.
    pub min_aspect: f64,
    /// Maximum accepted width/height ratio.
    pub max_aspect: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            min_size: 4000,
            max_size: 20000,
            min_aspect: 0.75,
            max_aspect: 1.25,
        }
    }
}

/// Select a single candidate object rectangle from a segmentation mask.
///
/// Regions are ranked by area; the candidate is the second largest, under the
/// assumption that the largest region is the scene/table boundary rather than
/// the object. Fewer than two regions, or a candidate outside the size or
/// aspect gates, yields `None`; that is the normal no-detection outcome, not
/// an error.
///
/// The accepted rectangle is translated by `(pad_x, pad_y)` so it is
/// expressed in full-frame coordinates rather than the cropped mask frame.
pub fn select_object(
    mask: &Image<u8, 1>,
    config: &SelectorConfig,
    pad: (usize, usize),
) -> Option<BoundingRect> {
    let regions = find_regions(mask);
    if regions.len() < 2 {
        log::debug!("no detection: {} region(s) in mask", regions.len());
        return None;
    }

    let candidate = second_largest(&regions);

    let width = candidate.width as i64;
    let height = candidate.height as i64;
    let size = width * height;
    let aspect = width as f64 / height as f64;

    if size < config.min_size || size > config.max_size {
        log::debug!("no detection: size {size} outside gate");
        return None;
    }
    if aspect < config.min_aspect || aspect > config.max_aspect {
        log::debug!("no detection: aspect {aspect:.2} outside gate");
        return None;
    }

    Some(BoundingRect {
        x: candidate.x as i64 + pad.0 as i64,
        y: candidate.y as i64 + pad.1 as i64,
        width,
        height,
    })
}

fn second_largest(regions: &[Region]) -> &Region {
    let mut indices = (0..regions.len()).collect::<Vec<_>>();
    // stable sort keeps scan order among equal areas deterministic
    indices.sort_by_key(|&i| regions[i].area);
    &regions[indices[indices.len() - 2]]
}
