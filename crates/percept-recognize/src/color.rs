use percept_image::Image;
use percept_imgproc::{
    color::hsv_from_rgb,
    histogram::{hue_histogram, HUE_BINS},
};

use crate::{error::RecognizeError, Classification};

/// The fixed color palette, in hue-wheel order.
///
/// The order doubles as the tie-break order: the first band wins an argmax
/// tie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorLabel {
    /// Hue band [0, 12).
    Orange,
    /// Hue band [12, 31).
    Yellow,
    /// Hue band [31, 70).
    Green,
    /// Hue band [70, 120).
    Blue,
    /// Hue band [120, 162).
    Purple,
    /// Hue band [162, 179).
    Red,
}

impl std::fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ColorLabel::Orange => "orange",
            ColorLabel::Yellow => "yellow",
            ColorLabel::Green => "green",
            ColorLabel::Blue => "blue",
            ColorLabel::Purple => "purple",
            ColorLabel::Red => "red",
        };
        write!(f, "{name}")
    }
}

/// Contiguous, non-overlapping hue bands covering the color wheel.
///
/// Bounds are half-open `[start, end)`. Together with the hue histogram's
/// `[1, 179)` restriction the bands partition every counted pixel exactly
/// once.
const HUE_BANDS: [(ColorLabel, usize, usize); 6] = [
    (ColorLabel::Orange, 0, 12),
    (ColorLabel::Yellow, 12, 31),
    (ColorLabel::Green, 31, 70),
    (ColorLabel::Blue, 70, 120),
    (ColorLabel::Purple, 120, 162),
    (ColorLabel::Red, 162, 179),
];

/// Sum the hue histogram per color band.
pub fn band_totals(hist: &[usize; HUE_BINS]) -> [usize; 6] {
    let mut totals = [0usize; 6];
    for (band, &(_, start, end)) in totals.iter_mut().zip(HUE_BANDS.iter()) {
        *band = hist[start..end].iter().sum();
    }
    totals
}

/// Classify the dominant color of an RGB crop.
///
/// The crop is converted to HSV and its hue histogram (restricted to hue
/// `[1, 179)`; hue 0 conflates true red with undefined black pixels) is
/// bucketed into the six fixed bands of [`ColorLabel`]. The winning band is
/// the one with the largest pixel count, first band winning ties, and the
/// confidence is its share of all counted pixels.
///
/// Always produces a result for a non-empty crop: an achromatic crop (no
/// pixel with a defined hue) classifies as the first band with confidence
/// 0.0.
pub fn classify_color(crop: &Image<u8, 3>) -> Result<Classification<ColorLabel>, RecognizeError> {
    let mut hsv = Image::<u8, 3>::from_size_val(crop.size(), 0)?;
    hsv_from_rgb(crop, &mut hsv)?;

    let mut hist = [0usize; HUE_BINS];
    hue_histogram(&hsv, &mut hist)?;

    let totals = band_totals(&hist);
    let total: usize = totals.iter().sum();

    let mut best = 0;
    for (i, &count) in totals.iter().enumerate() {
        if count > totals[best] {
            best = i;
        }
    }

    let confidence = if total > 0 {
        totals[best] as f32 / total as f32
    } else {
        0.0
    };

    Ok(Classification {
        label: HUE_BANDS[best].0,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::{band_totals, classify_color, ColorLabel};
    use crate::error::RecognizeError;
    use percept_image::{Image, ImageSize};
    use percept_imgproc::histogram::HUE_BINS;

    /// RGB values whose 8-bit HSV hue lands exactly on `hue` (max red, no blue).
    fn rgb_for_low_hue(hue: u8) -> [u8; 3] {
        // hue = round(60 * (g / 255) / 2) for r = 255, b = 0
        let g = (hue as f32 * 2.0 / 60.0 * 255.0).round() as u8;
        [255, g, 0]
    }

    fn uniform_crop(rgb: [u8; 3]) -> Result<Image<u8, 3>, RecognizeError> {
        let size = ImageSize {
            width: 8,
            height: 8,
        };
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(size.width * size.height * 3)
            .collect();
        Ok(Image::new(size, data)?)
    }

    #[test]
    fn uniform_orange_crop() -> Result<(), RecognizeError> {
        let crop = uniform_crop(rgb_for_low_hue(5))?;
        let result = classify_color(&crop)?;
        assert_eq!(result.label, ColorLabel::Orange);
        assert_eq!(result.confidence, 1.0);
        Ok(())
    }

    #[test]
    fn band_boundary_at_hue_12() -> Result<(), RecognizeError> {
        let yellow = classify_color(&uniform_crop(rgb_for_low_hue(12))?)?;
        assert_eq!(yellow.label, ColorLabel::Yellow);

        let orange = classify_color(&uniform_crop(rgb_for_low_hue(11))?)?;
        assert_eq!(orange.label, ColorLabel::Orange);

        Ok(())
    }

    #[test]
    fn band_totals_partition_histogram() {
        let mut hist = [0usize; HUE_BINS];
        // spread 1000 counts over the whole defined hue range
        let mut remaining = 1000usize;
        let mut hue = 1usize;
        while remaining > 0 {
            let chunk = remaining.min(7);
            hist[hue] += chunk;
            remaining -= chunk;
            hue = if hue + 17 > 178 { 1 } else { hue + 17 };
        }
        assert_eq!(hist[0], 0);
        assert_eq!(hist[179], 0);

        let totals = band_totals(&hist);
        assert_eq!(totals.iter().sum::<usize>(), 1000);
    }

    #[test]
    fn achromatic_crop_has_zero_confidence() -> Result<(), RecognizeError> {
        let crop = uniform_crop([90, 90, 90])?;
        let result = classify_color(&crop)?;
        assert_eq!(result.label, ColorLabel::Orange);
        assert_eq!(result.confidence, 0.0);
        Ok(())
    }

    #[test]
    fn mixed_crop_confidence_is_band_share() -> Result<(), RecognizeError> {
        let size = ImageSize {
            width: 4,
            height: 1,
        };
        // three green pixels, one blue
        let data = vec![
            0, 255, 0, //
            0, 255, 0, //
            0, 255, 0, //
            0, 0, 255, //
        ];
        let crop = Image::new(size, data)?;

        let result = classify_color(&crop)?;
        assert_eq!(result.label, ColorLabel::Green);
        assert!((result.confidence - 0.75).abs() < 1e-6);

        Ok(())
    }
}
