use percept_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// Crop an image to a specified region.
///
/// The region size is taken from `dst` and its top-left corner from `(x, y)`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Errors
///
/// Returns an error if the requested region does not lie inside `src`.
///
/// # Examples
///
/// ```rust
/// use percept_image::{Image, ImageSize};
/// use percept_imgproc::crop::crop_image;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0, 1, 2, 3,
///     4, 5, 6, 7,
///     8, 9, 10, 11,
///     12, 13, 14, 15,
/// ]).unwrap();
///
/// let mut cropped = Image::<u8, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if x + dst.cols() > src.cols() || y + dst.rows() > src.rows() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            x + dst.cols(),
            y + dst.rows(),
        ));
    }

    let dst_cols = dst.cols();
    let src_cols = src.cols();
    let src_slice = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            let offset = (y + i) * src_cols * C + x * C;
            dst_row.copy_from_slice(&src_slice[offset..offset + dst_cols * C]);
        });

    Ok(())
}

/// Clamp a possibly out-of-bounds rectangle to the frame bounds.
///
/// Returns the clamped `(x, y, width, height)` in frame coordinates, or
/// `None` when the clamp degenerates to a zero-area region (the caller is
/// expected to skip that cycle).
///
/// # Example
///
/// ```
/// use percept_image::ImageSize;
/// use percept_imgproc::crop::clamp_rect;
///
/// let frame = ImageSize { width: 100, height: 100 };
/// assert_eq!(clamp_rect(-10, 20, 30, 200, frame), Some((0, 20, 20, 80)));
/// assert_eq!(clamp_rect(100, 0, 10, 10, frame), None);
/// ```
pub fn clamp_rect(
    x: i64,
    y: i64,
    width: i64,
    height: i64,
    frame: ImageSize,
) -> Option<(usize, usize, usize, usize)> {
    let x0 = x.clamp(0, frame.width as i64);
    let y0 = y.clamp(0, frame.height as i64);
    let x1 = (x + width).clamp(0, frame.width as i64);
    let y1 = (y + height).clamp(0, frame.height as i64);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some((
        x0 as usize,
        y0 as usize,
        (x1 - x0) as usize,
        (y1 - y0) as usize,
    ))
}
