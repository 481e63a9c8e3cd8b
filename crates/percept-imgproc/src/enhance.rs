use percept_image::{Image, ImageError};

use crate::histogram::compute_histogram;

/// Equalize the intensity histogram of a grayscale image.
///
/// Remaps intensities through the normalized cumulative distribution so the
/// output spreads over the full `[0, 255]` range, normalizing away lighting
/// differences between crops. A constant image is returned unchanged.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output equalized image.
///
/// # Example
///
/// ```
/// use percept_image::{Image, ImageSize};
/// use percept_imgproc::enhance::equalize_hist;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![52, 55, 61, 59],
/// ).unwrap();
///
/// let mut equalized = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
/// equalize_hist(&image, &mut equalized).unwrap();
///
/// // lowest intensity maps to 0, highest to 255
/// assert_eq!(equalized.as_slice()[0], 0);
/// assert_eq!(equalized.as_slice()[2], 255);
/// ```
pub fn equalize_hist(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let total = src.as_slice().len();
    if total == 0 {
        return Err(ImageError::ImageDataNotInitialized);
    }

    let mut hist = vec![0usize; 256];
    compute_histogram(src, &mut hist, 256)?;

    // cumulative distribution; the first occupied bin anchors the remap
    let mut cdf = [0usize; 256];
    let mut acc = 0usize;
    for (i, &count) in hist.iter().enumerate() {
        acc += count;
        cdf[i] = acc;
    }

    let cdf_min = cdf
        .iter()
        .find(|&&c| c > 0)
        .copied()
        .unwrap_or(0);

    if cdf_min == total {
        // single intensity, nothing to equalize
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let scale = 255.0 / (total - cdf_min) as f64;
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = ((cdf[i].saturating_sub(cdf_min)) as f64 * scale).round() as u8;
    }

    for (src_px, dst_px) in src.as_slice().iter().zip(dst.as_slice_mut().iter_mut()) {
        *dst_px = lut[*src_px as usize];
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use percept_image::{Image, ImageError, ImageSize};

    #[test]
    fn equalize_constant_image_is_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            77,
        )?;
        let mut equalized = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        super::equalize_hist(&image, &mut equalized)?;
        assert_eq!(equalized.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn equalize_spreads_range() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![100, 110, 120, 130],
        )?;
        let mut equalized = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        super::equalize_hist(&image, &mut equalized)?;
        assert_eq!(equalized.as_slice(), &[0, 85, 170, 255]);

        Ok(())
    }

    #[test]
    fn equalize_preserves_ordering() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![5, 200, 30, 30, 5, 200],
        )?;
        let mut equalized = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        super::equalize_hist(&image, &mut equalized)?;

        let e = equalized.as_slice();
        assert!(e[0] < e[2]);
        assert!(e[2] < e[1]);

        Ok(())
    }
}
