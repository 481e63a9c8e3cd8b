use percept_image::{Image, ImageError, ImageSize};
use percept_imgproc::{
    crop::crop_image,
    morphology::{dilate, erode, Kernel, MorphShape},
    normalize::normalize_min_max,
    threshold::adaptive_threshold_gaussian,
};

use crate::error::RecognizeError;

/// Neighborhood size of the adaptive threshold.
const ADAPTIVE_BLOCK_SIZE: usize = 3;

/// Constant subtracted from the local mean by the adaptive threshold.
const ADAPTIVE_C: f32 = 2.0;

/// Configuration for [`segment`].
///
/// The pads cut away the sensor-edge noise band before thresholding; all
/// mask coordinates are therefore expressed in the cropped frame and must be
/// translated back by `(pad_x, pad_y)` when reported externally. The erosion
/// kernel is intentionally larger than the dilation kernel so isolated noise
/// speckles are removed more aggressively than blob shapes are altered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Border cut from the left and right edges, in pixels.
    pub pad_x: usize,
    /// Border cut from the top and bottom edges, in pixels.
    pub pad_y: usize,
    /// Side length of the elliptical erosion kernel.
    pub erosion_size: usize,
    /// Side length of the elliptical dilation kernel.
    pub dilation_size: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            pad_x: 80,
            pad_y: 20,
            erosion_size: 20,
            dilation_size: 1,
        }
    }
}

/// Segment candidate object regions out of a raw depth frame.
///
/// The frame is rescaled linearly into `[0, 255]` (invalid NaN readings map
/// to 0), cropped by the configured pads, adaptively thresholded to flag
/// depth discontinuities and invalid blobs, then cleaned up with an
/// erode/dilate pass.
///
/// The result is a binary mask in cropped-frame coordinates. The operation is
/// a deterministic function of the frame and configuration and never fails on
/// degenerate input: a uniform or all-invalid frame yields a mask without
/// meaningful blobs, and a frame smaller than the pads yields an empty mask.
pub fn segment(
    depth: &Image<f32, 1>,
    config: &SegmenterConfig,
) -> Result<Image<u8, 1>, RecognizeError> {
    let size = depth.size();
    if size.width <= 2 * config.pad_x || size.height <= 2 * config.pad_y {
        return Ok(Image::from_size_val(
            ImageSize {
                width: 0,
                height: 0,
            },
            0,
        )?);
    }

    // rescale the raw depth values into [0, 255]
    let mut normalized = Image::<f32, 1>::from_size_val(size, 0.0)?;
    normalize_min_max(depth, &mut normalized, 0.0, 255.0)?;
    let gray = to_u8(&normalized)?;

    // cut the sensor-edge noise band
    let cropped_size = ImageSize {
        width: size.width - 2 * config.pad_x,
        height: size.height - 2 * config.pad_y,
    };
    let mut cropped = Image::<u8, 1>::from_size_val(cropped_size, 0)?;
    crop_image(&gray, &mut cropped, config.pad_x, config.pad_y)?;

    // flag depth discontinuities and invalid regions
    let mut mask = Image::<u8, 1>::from_size_val(cropped_size, 0)?;
    adaptive_threshold_gaussian(&cropped, &mut mask, ADAPTIVE_BLOCK_SIZE, ADAPTIVE_C)?;

    // erode speckles away, then restore blob shape
    let mut eroded = Image::<u8, 1>::from_size_val(cropped_size, 0)?;
    erode(
        &mask,
        &mut eroded,
        &Kernel::new(MorphShape::Ellipse, config.erosion_size),
    )?;

    let mut dilated = Image::<u8, 1>::from_size_val(cropped_size, 0)?;
    dilate(
        &eroded,
        &mut dilated,
        &Kernel::new(MorphShape::Ellipse, config.dilation_size),
    )?;

    Ok(dilated)
}

fn to_u8(src: &Image<f32, 1>) -> Result<Image<u8, 1>, ImageError> {
    let data = src
        .as_slice()
        .iter()
        .map(|&x| x.round().clamp(0.0, 255.0) as u8)
        .collect();
    Image::new(src.size(), data)
}

#[cfg(test)]
mod tests {
    use super::{segment, SegmenterConfig};
    use percept_image::{Image, ImageSize};
    use crate::error::RecognizeError;

    fn small_config() -> SegmenterConfig {
        SegmenterConfig {
            pad_x: 2,
            pad_y: 2,
            erosion_size: 3,
            dilation_size: 1,
        }
    }

    #[test]
    fn all_zero_frame_never_fails() -> Result<(), RecognizeError> {
        let depth = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 64,
                height: 48,
            },
            0.0,
        )?;

        let mask = segment(&depth, &small_config())?;
        assert_eq!(mask.width(), 64 - 4);
        assert_eq!(mask.height(), 48 - 4);

        Ok(())
    }

    #[test]
    fn all_invalid_frame_never_fails() -> Result<(), RecognizeError> {
        let depth = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 64,
                height: 48,
            },
            f32::NAN,
        )?;

        let mask = segment(&depth, &small_config())?;
        assert_eq!(mask.width(), 64 - 4);
        assert_eq!(mask.height(), 48 - 4);

        Ok(())
    }

    #[test]
    fn segment_is_idempotent() -> Result<(), RecognizeError> {
        let size = ImageSize {
            width: 40,
            height: 30,
        };
        let data = (0..size.width * size.height)
            .map(|i| ((i * 7919) % 1000) as f32 / 10.0)
            .collect::<Vec<_>>();
        let depth = Image::<f32, 1>::new(size, data)?;

        let config = small_config();
        let first = segment(&depth, &config)?;
        let second = segment(&depth, &config)?;
        assert_eq!(first.as_slice(), second.as_slice());

        Ok(())
    }

    #[test]
    fn frame_smaller_than_pads_yields_empty_mask() -> Result<(), RecognizeError> {
        let depth = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 100,
                height: 30,
            },
            1.0,
        )?;

        let mask = segment(&depth, &SegmenterConfig::default())?;
        assert_eq!(mask.as_slice().len(), 0);

        Ok(())
    }

    #[test]
    fn nan_blob_edge_is_flagged() -> Result<(), RecognizeError> {
        let size = ImageSize {
            width: 30,
            height: 30,
        };
        // smooth depth ramp with a blob of invalid readings in the middle
        let mut data = (0..size.width * size.height)
            .map(|i| ((i % size.width) + (i / size.width)) as f32)
            .collect::<Vec<_>>();
        for y in 12..18 {
            for x in 12..18 {
                data[y * size.width + x] = f32::NAN;
            }
        }
        let depth = Image::<f32, 1>::new(size, data)?;

        let config = SegmenterConfig {
            pad_x: 2,
            pad_y: 2,
            erosion_size: 1,
            dilation_size: 1,
        };
        let mask = segment(&depth, &config)?;

        // the blob edge (NaN maps to 0, next to ramp values) falls below its
        // local mean; the blob interior and the smooth ramp threshold white,
        // so the discontinuity ring separates the two
        assert_eq!(mask.get_pixel(10, 10, 0)?, 0);
        assert_eq!(mask.get_pixel(13, 13, 0)?, 255);
        assert_eq!(mask.get_pixel(2, 2, 0)?, 255);

        Ok(())
    }
}
