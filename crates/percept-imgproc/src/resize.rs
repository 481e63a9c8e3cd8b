use percept_image::{Image, ImageError};
use rayon::prelude::*;

/// Resize a grayscale image to the size of `dst` with bilinear interpolation.
///
/// Source coordinates are sampled on an even grid spanning the full source
/// extent, so the corner pixels of `src` and `dst` coincide.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, sized to the target resolution.
///
/// # Example
///
/// ```
/// use percept_image::{Image, ImageSize};
/// use percept_imgproc::resize::resize_bilinear;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize { width: 2, height: 1 },
///     vec![0, 100],
/// ).unwrap();
///
/// let mut resized = Image::<u8, 1>::from_size_val(
///     ImageSize { width: 3, height: 1 },
///     0,
/// ).unwrap();
///
/// resize_bilinear(&image, &mut resized).unwrap();
/// assert_eq!(resized.as_slice(), &[0, 50, 100]);
/// ```
pub fn resize_bilinear(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.as_slice().is_empty() {
        return Err(ImageError::ImageDataNotInitialized);
    }

    let src_w = src.width();
    let src_h = src.height();
    let dst_w = dst.width();
    let dst_h = dst.height();

    let scale_x = if dst_w > 1 {
        (src_w - 1) as f32 / (dst_w - 1) as f32
    } else {
        0.0
    };
    let scale_y = if dst_h > 1 {
        (src_h - 1) as f32 / (dst_h - 1) as f32
    } else {
        0.0
    };

    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_w)
        .enumerate()
        .for_each(|(dy, dst_row)| {
            let sy = dy as f32 * scale_y;
            let y0 = sy.floor() as usize;
            let y1 = (y0 + 1).min(src_h - 1);
            let fy = sy - y0 as f32;

            for (dx, dst_px) in dst_row.iter_mut().enumerate() {
                let sx = dx as f32 * scale_x;
                let x0 = sx.floor() as usize;
                let x1 = (x0 + 1).min(src_w - 1);
                let fx = sx - x0 as f32;

                let p00 = src_data[y0 * src_w + x0] as f32;
                let p01 = src_data[y0 * src_w + x1] as f32;
                let p10 = src_data[y1 * src_w + x0] as f32;
                let p11 = src_data[y1 * src_w + x1] as f32;

                let top = p00 + (p01 - p00) * fx;
                let bottom = p10 + (p11 - p10) * fx;
                let value = top + (bottom - top) * fy;

                *dst_px = value.round().clamp(0.0, 255.0) as u8;
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use percept_image::{Image, ImageError, ImageSize};

    #[test]
    fn resize_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![10, 20, 30, 40],
        )?;
        let mut resized = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        super::resize_bilinear(&image, &mut resized)?;
        assert_eq!(resized.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn resize_downscale_constant() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 60,
                height: 90,
            },
            200,
        )?;
        let mut resized = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 30,
                height: 30,
            },
            0,
        )?;

        super::resize_bilinear(&image, &mut resized)?;
        assert!(resized.as_slice().iter().all(|&px| px == 200));

        Ok(())
    }

    #[test]
    fn resize_upscale_interpolates() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 100, 100, 200],
        )?;
        let mut resized = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            0,
        )?;

        super::resize_bilinear(&image, &mut resized)?;
        assert_eq!(resized.get_pixel(1, 1, 0)?, 100);
        assert_eq!(resized.get_pixel(0, 0, 0)?, 0);
        assert_eq!(resized.get_pixel(2, 2, 0)?, 200);

        Ok(())
    }
}
