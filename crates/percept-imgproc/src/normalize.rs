use percept_image::{Image, ImageError};

use crate::parallel;

/// Find the minimum and maximum values in an image.
///
/// Non-finite values (NaN depth pixels from an invalid sensor reading) are
/// skipped, so the returned range always comes from valid data.
///
/// # Arguments
///
/// * `src` - The input image of shape (height, width, channels).
///
/// # Returns
///
/// A tuple containing the minimum and maximum finite values in the image.
///
/// # Errors
///
/// If the image contains no finite value, an error is returned.
pub fn find_min_max<const C: usize>(src: &Image<f32, C>) -> Result<(f32, f32), ImageError> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;

    for &x in src.as_slice() {
        if !x.is_finite() {
            continue;
        }
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }

    if min > max {
        return Err(ImageError::ImageDataNotInitialized);
    }

    Ok((min, max))
}

/// Normalize an image linearly into the range `[min, max]`.
///
/// The formula for normalizing an image is:
///
/// (image - min_val) * (max - min) / (max_val - min_val) + min
///
/// where `min_val` and `max_val` are the extrema found in the source image.
/// Non-finite source pixels map to `min`. A constant source image, or one
/// with no finite value at all, maps entirely to `min`.
///
/// # Arguments
///
/// * `src` - The input image of shape (height, width, channels).
/// * `dst` - The output image of shape (height, width, channels).
/// * `min` - The lower bound of the output range.
/// * `max` - The upper bound of the output range.
///
/// # Example
///
/// ```
/// use percept_image::{Image, ImageSize};
/// use percept_imgproc::normalize::normalize_min_max;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![0.0, 1.0, 2.0, 4.0],
/// ).unwrap();
///
/// let mut normalized = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// normalize_min_max(&image, &mut normalized, 0.0, 255.0).unwrap();
/// assert_eq!(normalized.as_slice(), &[0.0, 63.75, 127.5, 255.0]);
/// ```
pub fn normalize_min_max<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    min: f32,
    max: f32,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // a frame with no finite value degenerates like a constant frame
    let (min_val, max_val) = find_min_max(src).unwrap_or((0.0, 0.0));
    let range = max_val - min_val;

    parallel::par_iter_rows_val(src, dst, |&src_val, dst_val| {
        *dst_val = if !src_val.is_finite() || range == 0.0 {
            min
        } else {
            (src_val - min_val) * (max - min) / range + min
        };
    });

    Ok(())
}

/// Standardize a feature vector to zero mean and unit variance in place.
///
/// The standard deviation uses the population convention (divide by N). A
/// zero-variance vector is centered only, leaving all entries at zero.
///
/// # Example
///
/// ```
/// use percept_imgproc::normalize::standardize;
///
/// let mut features = vec![1.0f32, 3.0];
/// standardize(&mut features);
/// assert_eq!(features, vec![-1.0, 1.0]);
/// ```
pub fn standardize(features: &mut [f32]) {
    if features.is_empty() {
        return;
    }

    let n = features.len() as f32;
    let mean = features.iter().sum::<f32>() / n;
    let var = features.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / n;
    let std = var.sqrt();

    for x in features.iter_mut() {
        *x -= mean;
        if std > 0.0 {
            *x /= std;
        }
    }
}
