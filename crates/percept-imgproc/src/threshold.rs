use percept_image::{Image, ImageError};

use crate::parallel;
use rayon::prelude::*;

/// Apply a binary threshold to an image.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image of an arbitrary number of channels and type.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The maximum value to use when the input value is greater than the threshold.
///
/// # Example
///
/// ```
/// use percept_image::{Image, ImageSize};
/// use percept_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + num_traits::Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(())
}

/// Apply a local adaptive threshold to a grayscale image.
///
/// Each pixel is compared against the Gaussian-weighted mean of its
/// `block_size` x `block_size` neighborhood minus `c`; pixels above that local
/// threshold become 255, the rest 0. Borders are handled by replication.
/// This flags local discontinuities (depth gradients and invalid-reading
/// blobs) rather than a global intensity split.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output binary image (values 0 or 255).
/// * `block_size` - The neighborhood size. Must be odd and greater than 1.
/// * `c` - The constant subtracted from the weighted mean.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match or if
/// `block_size` is even or smaller than 3.
pub fn adaptive_threshold_gaussian(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    block_size: usize,
    c: f32,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if block_size < 3 || block_size % 2 == 0 {
        return Err(ImageError::InvalidBlockSize(block_size));
    }

    let kernel = gaussian_kernel_1d(block_size);
    let radius = (block_size / 2) as i64;
    let width = src.width() as i64;
    let height = src.height() as i64;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(width as usize)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y = y as i64;
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let x = x as i64;
                let mut mean = 0.0f32;
                for (ky, wy) in kernel.iter().enumerate() {
                    let sy = (y + ky as i64 - radius).clamp(0, height - 1);
                    for (kx, wx) in kernel.iter().enumerate() {
                        let sx = (x + kx as i64 - radius).clamp(0, width - 1);
                        mean += wy * wx * src_data[(sy * width + sx) as usize] as f32;
                    }
                }

                let value = src_data[(y * width + x) as usize] as f32;
                *dst_px = if value > mean - c { 255 } else { 0 };
            }
        });

    Ok(())
}

/// Separable Gaussian weights with the sigma convention used for small
/// smoothing kernels: sigma = 0.3 * ((ksize - 1) * 0.5 - 1) + 0.8.
fn gaussian_kernel_1d(ksize: usize) -> Vec<f32> {
    let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (ksize / 2) as f32;

    let mut kernel = (0..ksize)
        .map(|i| {
            let d = i as f32 - center;
            (-d * d / (2.0 * sigma * sigma)).exp()
        })
        .collect::<Vec<_>>();

    let sum = kernel.iter().sum::<f32>();
    for w in kernel.iter_mut() {
        *w /= sum;
    }

    kernel
}
