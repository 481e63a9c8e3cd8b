use percept_image::{Image, ImageError};

/// Number of buckets in a hue histogram, one per half-degree hue value.
pub const HUE_BINS: usize = 180;

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid.
///
/// # Example
///
/// ```
/// use percept_image::{Image, ImageSize};
/// use percept_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize { width: 3, height: 3 },
///     vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8, 1>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    if hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let mut bin_lut = [0usize; 256];
    for (i, bin) in bin_lut.iter_mut().enumerate() {
        *bin = (i * num_bins) >> 8;
    }

    for &px in src.as_slice() {
        hist[bin_lut[px as usize]] += 1;
    }

    Ok(())
}

/// Compute the hue histogram of an HSV8 image, restricted to hue `[1, 179)`.
///
/// The histogram has [`HUE_BINS`] buckets, one per hue value, so bucket `h`
/// counts the pixels with hue exactly `h`. Hue 0 is excluded because it
/// conflates true red with undefined (achromatic) pixels, and the open upper
/// edge mirrors the exclusive range convention of histogram computation, so
/// buckets 0 and 179 always stay empty.
///
/// # Arguments
///
/// * `src` - The input HSV image with hue in `[0, 179]`.
/// * `hist` - The output histogram of [`HUE_BINS`] buckets.
pub fn hue_histogram(src: &Image<u8, 3>, hist: &mut [usize; HUE_BINS]) -> Result<(), ImageError> {
    hist.fill(0);

    for pixel in src.as_slice().chunks_exact(3) {
        let hue = pixel[0] as usize;
        if (1..HUE_BINS - 1).contains(&hue) {
            hist[hue] += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::HUE_BINS;
    use percept_image::{Image, ImageError, ImageSize};

    #[test]
    fn compute_histogram() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
        )?;

        let mut histogram = vec![0; 3];
        super::compute_histogram(&image, &mut histogram, 3)?;
        assert_eq!(histogram, vec![3, 3, 3]);

        Ok(())
    }

    #[test]
    fn hue_histogram_excludes_edges() -> Result<(), ImageError> {
        let hsv = Image::<u8, 3>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![0, 255, 255, 1, 255, 255, 178, 255, 255, 179, 255, 255],
        )?;

        let mut hist = [0usize; HUE_BINS];
        super::hue_histogram(&hsv, &mut hist)?;

        assert_eq!(hist[0], 0);
        assert_eq!(hist[1], 1);
        assert_eq!(hist[178], 1);
        assert_eq!(hist[179], 0);
        assert_eq!(hist.iter().sum::<usize>(), 2);

        Ok(())
    }
}
