//! CIE Lab perceptual histogram.
//!
//! Pixels go gamma-encoded sRGB -> linear RGB -> XYZ -> D65-normalized ->
//! Lab, then quantize into a coarse 4x8x8 grid: L over [0, 100], a and b
//! over [-128, 127].

use crate::feature::hist::{for_each_rgb, normalize};
use crate::image::PixelView;
use crate::util::FeatMatchResult;

/// Bins over the L axis.
pub(crate) const L_BINS: usize = 4;
/// Bins over each of the a and b axes.
pub(crate) const AB_BINS: usize = 8;

const LAB_EPSILON: f32 = 0.008856;

/// 4x8x8 normalized CIE Lab histogram.
pub(crate) fn extract_lab_hist(region: PixelView<'_>) -> FeatMatchResult<Vec<f32>> {
    let mut hist = vec![0.0f32; L_BINS * AB_BINS * AB_BINS];
    for_each_rgb(region, |r, g, b| {
        let (l, a, bb) = rgb_to_lab(r, g, b);

        let li = ((l / 100.0) * L_BINS as f32) as isize;
        let ai = (((a + 128.0) / 255.0) * AB_BINS as f32) as isize;
        let bi = (((bb + 128.0) / 255.0) * AB_BINS as f32) as isize;

        let li = li.clamp(0, L_BINS as isize - 1) as usize;
        let ai = ai.clamp(0, AB_BINS as isize - 1) as usize;
        let bi = bi.clamp(0, AB_BINS as isize - 1) as usize;

        hist[(li * AB_BINS + ai) * AB_BINS + bi] += 1.0;
    });
    normalize(&mut hist, region.pixel_count());
    Ok(hist)
}

/// sRGB inverse transfer function.
fn srgb_to_linear(v: f32) -> f32 {
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

/// Lab cube-root/linear piecewise transform.
fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Converts one gamma-encoded sRGB pixel to CIE Lab under D65.
pub(crate) fn rgb_to_lab(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r_lin = srgb_to_linear(r as f32 / 255.0);
    let g_lin = srgb_to_linear(g as f32 / 255.0);
    let b_lin = srgb_to_linear(b as f32 / 255.0);

    // sRGB -> XYZ matrix.
    let x = r_lin * 0.4124 + g_lin * 0.3576 + b_lin * 0.1805;
    let y = r_lin * 0.2126 + g_lin * 0.7152 + b_lin * 0.0722;
    let z = r_lin * 0.0193 + g_lin * 0.1192 + b_lin * 0.9505;

    // D65 reference white.
    let fx = lab_f(x / 0.95047);
    let fy = lab_f(y / 1.0);
    let fz = lab_f(z / 1.08883);

    let l = 116.0 * fy - 16.0;
    let a = 500.0 * (fx - fy);
    let b = 200.0 * (fy - fz);
    (l, a, b)
}

#[cfg(test)]
mod tests {
    use super::rgb_to_lab;

    #[test]
    fn white_maps_to_full_lightness() {
        let (l, a, b) = rgb_to_lab(255, 255, 255);
        assert!((l - 100.0).abs() < 0.1);
        assert!(a.abs() < 0.5);
        assert!(b.abs() < 0.5);
    }

    #[test]
    fn black_maps_to_zero_lightness() {
        let (l, a, b) = rgb_to_lab(0, 0, 0);
        assert!(l.abs() < 1e-3);
        assert!(a.abs() < 1e-3);
        assert!(b.abs() < 1e-3);
    }

    #[test]
    fn red_has_positive_a() {
        let (_, a, _) = rgb_to_lab(255, 0, 0);
        assert!(a > 50.0);
    }
}
