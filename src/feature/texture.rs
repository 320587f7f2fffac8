//! Gradient-magnitude texture descriptor.
//!
//! The region is reduced to a single grayscale channel, then filtered with
//! the separable Sobel approximations ([-1, 0, 1] x [1, 2, 1] and its
//! transpose) using clamped borders. Per-axis responses take absolute value
//! saturated to 255, matching the 8-bit pipeline the histogram bins over;
//! the per-pixel Euclidean magnitude is clamped to [0, 255] and counted
//! into a 256-bin histogram.

use crate::feature::hist::normalize;
use crate::image::PixelView;
use crate::util::{FeatMatchError, FeatMatchResult};

/// Magnitude histogram bin count.
pub(crate) const MAG_BINS: usize = 256;

const MIN_SUPPORT: usize = 3;

/// 256-bin normalized Sobel magnitude histogram.
pub(crate) fn extract_magnitude_hist(region: PixelView<'_>) -> FeatMatchResult<Vec<f32>> {
    let width = region.width();
    let height = region.height();
    if width < MIN_SUPPORT || height < MIN_SUPPORT {
        return Err(FeatMatchError::RegionTooSmall {
            min_width: MIN_SUPPORT,
            min_height: MIN_SUPPORT,
            width,
            height,
        });
    }

    let gray = to_gray(region);
    let sx = separable_filter(&gray, width, height, [-1.0, 0.0, 1.0], [1.0, 2.0, 1.0]);
    let sy = separable_filter(&gray, width, height, [1.0, 2.0, 1.0], [-1.0, 0.0, 1.0]);

    let mut hist = vec![0.0f32; MAG_BINS];
    for (gx, gy) in sx.iter().zip(sy.iter()) {
        let ax = gx.abs().min(255.0);
        let ay = gy.abs().min(255.0);
        let magnitude = (ax * ax + ay * ay).sqrt().min(255.0);
        let bin = (magnitude as usize).min(MAG_BINS - 1);
        hist[bin] += 1.0;
    }
    normalize(&mut hist, region.pixel_count());
    Ok(hist)
}

/// Rec. 601 luma.
fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

fn to_gray(region: PixelView<'_>) -> Vec<f32> {
    let mut gray = Vec::with_capacity(region.pixel_count());
    for y in 0..region.height() {
        let row = region.row(y).expect("gray row within bounds");
        for px in row.chunks_exact(3) {
            gray.push(luma(px[0], px[1], px[2]));
        }
    }
    gray
}

/// Applies a horizontal then a vertical 3-tap kernel with clamped borders.
fn separable_filter(
    plane: &[f32],
    width: usize,
    height: usize,
    horizontal: [f32; 3],
    vertical: [f32; 3],
) -> Vec<f32> {
    let clamp = |i: isize, max: usize| -> usize { i.clamp(0, max as isize - 1) as usize };

    let mut pass = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, coeff) in horizontal.iter().enumerate() {
                let sx = clamp(x as isize + k as isize - 1, width);
                acc += coeff * plane[y * width + sx];
            }
            pass[y * width + x] = acc;
        }
    }

    let mut out = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, coeff) in vertical.iter().enumerate() {
                let sy = clamp(y as isize + k as isize - 1, height);
                acc += coeff * pass[sy * width + x];
            }
            out[y * width + x] = acc;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::separable_filter;

    #[test]
    fn sobel_x_responds_to_vertical_edge() {
        // 4x3 plane: dark left half, bright right half.
        let plane = [
            0.0, 0.0, 255.0, 255.0, //
            0.0, 0.0, 255.0, 255.0, //
            0.0, 0.0, 255.0, 255.0,
        ];
        let sx = separable_filter(&plane, 4, 3, [-1.0, 0.0, 1.0], [1.0, 2.0, 1.0]);
        let sy = separable_filter(&plane, 4, 3, [1.0, 2.0, 1.0], [-1.0, 0.0, 1.0]);

        // Strongest horizontal response across the edge, none vertically.
        assert!(sx[1 * 4 + 1] > 0.0);
        assert!(sx[1 * 4 + 2] > 0.0);
        assert!(sy.iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn flat_plane_has_zero_response() {
        let plane = vec![40.0f32; 5 * 5];
        let sx = separable_filter(&plane, 5, 5, [-1.0, 0.0, 1.0], [1.0, 2.0, 1.0]);
        assert!(sx.iter().all(|v| v.abs() < 1e-4));
    }
}
