use image::DynamicImage;

/// Longest edge of the sampling surface; larger images get downscaled first
const MAX_SAMPLE_DIMENSION: u32 = 100;

/// Only every n-th pixel of the downscaled surface is inspected
const SAMPLE_STRIDE: usize = 4;

/// Pixels with alpha below this are treated as transparent and skipped
const ALPHA_THRESHOLD: u8 = 200;

/// An approximate dominant color, used as a letterbox background
///
/// This is a strided average, not a perceptual dominant-color extraction;
/// the result only has to look reasonable behind an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SampledColor {
    /// Fallback when nothing could be sampled
    pub const NEUTRAL_GRAY: SampledColor = SampledColor {
        r: 128,
        g: 128,
        b: 128,
    };

    /// CSS color value, e.g. `rgb(12, 34, 56)`
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Samples the dominant color from an encoded image
///
/// Decode failures are non-fatal: the render still proceeds against the
/// neutral-gray default.
pub fn sample_bytes(bytes: &[u8]) -> SampledColor {
    match image::load_from_memory(bytes) {
        Ok(img) => sample_image(&img),
        Err(e) => {
            ::log::warn!("Failed to decode image for color sampling: {}", e);
            SampledColor::NEUTRAL_GRAY
        }
    }
}

/// Samples the dominant color from a decoded image
pub fn sample_image(img: &DynamicImage) -> SampledColor {
    let scaled = img.thumbnail(MAX_SAMPLE_DIMENSION, MAX_SAMPLE_DIMENSION);
    let rgba = scaled.to_rgba8();

    let mut sums = [0u64; 3];
    let mut count: u64 = 0;
    for pixel in rgba.pixels().step_by(SAMPLE_STRIDE) {
        let [r, g, b, a] = pixel.0;
        if a < ALPHA_THRESHOLD {
            continue;
        }
        sums[0] += u64::from(r);
        sums[1] += u64::from(g);
        sums[2] += u64::from(b);
        count += 1;
    }

    if count == 0 {
        ::log::debug!("All sampled pixels were transparent, using default color");
        return SampledColor::NEUTRAL_GRAY;
    }

    SampledColor {
        r: (sums[0] / count) as u8,
        g: (sums[1] / count) as u8,
        b: (sums[2] / count) as u8,
    }
}
