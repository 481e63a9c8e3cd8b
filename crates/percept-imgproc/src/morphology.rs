use percept_image::{Image, ImageError};
use rayon::prelude::*;

/// Shape of a morphological structuring element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphShape {
    /// All positions of the kernel are active.
    Rect,
    /// Only the center row and column are active.
    Cross,
    /// Positions inside the inscribed ellipse are active.
    Ellipse,
}

/// A binary structuring element for erosion and dilation.
#[derive(Clone, Debug)]
pub struct Kernel {
    data: Vec<bool>,
    size: usize,
}

impl Kernel {
    /// Create a square structuring element of the given shape and side length.
    ///
    /// A `size` of 0 or 1 yields the identity element (a single active
    /// position), so morphology with it is a no-op.
    pub fn new(shape: MorphShape, size: usize) -> Self {
        let size = size.max(1);
        let center = size / 2;
        let mut data = vec![false; size * size];

        for r in 0..size {
            for c in 0..size {
                data[r * size + c] = match shape {
                    MorphShape::Rect => true,
                    MorphShape::Cross => r == center || c == center,
                    MorphShape::Ellipse => {
                        let dy = (r as f64 - center as f64) / (size as f64 / 2.0);
                        let dx = (c as f64 - center as f64) / (size as f64 / 2.0);
                        dx * dx + dy * dy <= 1.0
                    }
                };
            }
        }

        Self { data, size }
    }

    /// The side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The active positions of the kernel in row-major order.
    pub fn data(&self) -> &[bool] {
        &self.data
    }
}

/// Erode a grayscale image with the given structuring element.
///
/// Each pixel is replaced by the minimum value over the kernel neighborhood,
/// shrinking white regions. Borders are handled by replication.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The structuring element.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn erode(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    morph_op(src, dst, kernel, |acc, px| acc.min(px))
}

/// Dilate a grayscale image with the given structuring element.
///
/// Each pixel is replaced by the maximum value over the kernel neighborhood,
/// expanding white regions. Borders are handled by replication.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The structuring element.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn dilate(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    morph_op(src, dst, kernel, |acc, px| acc.max(px))
}

fn morph_op(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel: &Kernel,
    select: impl Fn(u8, u8) -> u8 + Send + Sync,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let width = src.width() as i64;
    let height = src.height() as i64;
    let k_size = kernel.size() as i64;
    let radius = k_size / 2;
    let k_data = kernel.data();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(width as usize)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y = y as i64;
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let x = x as i64;
                let mut acc = src_data[(y * width + x) as usize];

                for kr in 0..k_size {
                    let sy = (y + kr - radius).clamp(0, height - 1);
                    for kc in 0..k_size {
                        if !k_data[(kr * k_size + kc) as usize] {
                            continue;
                        }
                        let sx = (x + kc - radius).clamp(0, width - 1);
                        acc = select(acc, src_data[(sy * width + sx) as usize]);
                    }
                }

                *dst_px = acc;
            }
        });

    Ok(())
}
