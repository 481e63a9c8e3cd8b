use percept_image::{Image, ImageError};

use crate::parallel;

/// Define the RGB weights for the grayscale conversion.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
pub fn gray_from_rgb(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f32;
        let g = src_pixel[1] as f32;
        let b = src_pixel[2] as f32;
        dst_pixel[0] = (RW * r + GW * g + BW * b).round().clamp(0.0, 255.0) as u8;
    });

    Ok(())
}

/// Convert an RGB8 image to an HSV8 image.
///
/// The output follows the byte conventions common for 8-bit HSV images:
///
/// * H: the hue channel in the range [0, 179] (half degrees).
/// * S: the saturation channel in the range [0, 255].
/// * V: the value channel in the range [0, 255].
///
/// An achromatic pixel (R == G == B) has hue 0 and saturation 0.
///
/// # Example
///
/// ```
/// use percept_image::{Image, ImageSize};
/// use percept_imgproc::color::hsv_from_rgb;
///
/// // pure green
/// let image = Image::<u8, 3>::new(
///     ImageSize { width: 1, height: 1 },
///     vec![0, 255, 0],
/// ).unwrap();
///
/// let mut hsv = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// hsv_from_rgb(&image, &mut hsv).unwrap();
/// assert_eq!(hsv.as_slice(), &[60, 255, 255]);
/// ```
pub fn hsv_from_rgb(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f32 / 255.0;
        let g = src_pixel[1] as f32 / 255.0;
        let b = src_pixel[2] as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        // wrap into [0, 360) and scale to half degrees [0, 179]
        let h = if h < 0.0 { h + 360.0 } else { h };
        let h = ((h / 2.0).round() as i32).rem_euclid(180) as u8;

        let s = if max == 0.0 {
            0.0
        } else {
            (delta / max) * 255.0
        };

        dst_pixel[0] = h;
        dst_pixel[1] = s.round() as u8;
        dst_pixel[2] = (max * 255.0).round() as u8;
    });

    Ok(())
}

/// Build a binary mask of the HSV pixels inside an inclusive channel range.
///
/// A pixel is set to 255 when all three channels fall within
/// `[lower, upper]`, mirroring the range threshold stage of interactive
/// color tuning.
pub fn hsv_in_range(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 1>,
    lower: [u8; 3],
    upper: [u8; 3],
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let inside = src_pixel
            .iter()
            .zip(lower.iter().zip(upper.iter()))
            .all(|(&px, (&lo, &hi))| px >= lo && px <= hi);
        dst_pixel[0] = if inside { 255 } else { 0 };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use percept_image::{Image, ImageError, ImageSize};

    #[test]
    fn hsv_from_rgb_primaries() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                255, 0, 0, // red
                0, 255, 0, // green
                0, 0, 255, // blue
                128, 128, 128, // gray
            ],
        )?;
        let mut hsv = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        super::hsv_from_rgb(&image, &mut hsv)?;

        assert_eq!(&hsv.as_slice()[0..3], &[0, 255, 255]);
        assert_eq!(&hsv.as_slice()[3..6], &[60, 255, 255]);
        assert_eq!(&hsv.as_slice()[6..9], &[120, 255, 255]);
        assert_eq!(&hsv.as_slice()[9..12], &[0, 0, 128]);

        Ok(())
    }

    #[test]
    fn gray_from_rgb_white() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            vec![255, 255, 255],
        )?;
        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        super::gray_from_rgb(&image, &mut gray)?;
        assert_eq!(gray.as_slice(), &[255]);

        Ok(())
    }

    #[test]
    fn hsv_in_range_mask() -> Result<(), ImageError> {
        let hsv = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![50, 200, 200, 10, 200, 200],
        )?;
        let mut mask = Image::<u8, 1>::from_size_val(hsv.size(), 0)?;

        super::hsv_in_range(&hsv, &mut mask, [31, 130, 0], [70, 255, 255])?;
        assert_eq!(mask.as_slice(), &[255, 0]);

        Ok(())
    }
}
