//! Color histogram descriptors.

use crate::image::PixelView;
use crate::util::FeatMatchResult;

/// Bins per chromaticity axis for the 2D histogram.
pub(crate) const RG_BINS: usize = 16;
/// Bins per channel for the 3D joint histogram.
pub(crate) const RGB_BINS: usize = 8;

/// 16x16 normalized rg-chromaticity histogram.
///
/// r = R/(R+G+B), g = G/(R+G+B) with the denominator floored at 1 so black
/// pixels land in bin (0, 0) instead of dividing by zero. Bin index is
/// round(value * 15); r selects the row, g the column.
pub(crate) fn extract_rg_chroma(region: PixelView<'_>) -> FeatMatchResult<Vec<f32>> {
    let mut hist = vec![0.0f32; RG_BINS * RG_BINS];
    for_each_rgb(region, |r, g, b| {
        let mut divisor = r as f32 + g as f32 + b as f32;
        if divisor <= 0.0 {
            divisor = 1.0;
        }
        let rn = r as f32 / divisor;
        let gn = g as f32 / divisor;
        let ri = (rn * (RG_BINS - 1) as f32 + 0.5) as usize;
        let gi = (gn * (RG_BINS - 1) as f32 + 0.5) as usize;
        hist[ri * RG_BINS + gi] += 1.0;
    });
    normalize(&mut hist, region.pixel_count());
    Ok(hist)
}

/// 8x8x8 joint RGB histogram with truncated 8/256 binning.
pub(crate) fn extract_rgb_joint(region: PixelView<'_>) -> FeatMatchResult<Vec<f32>> {
    let mut hist = vec![0.0f32; RGB_BINS * RGB_BINS * RGB_BINS];
    let scale = RGB_BINS as f32 / 256.0;
    for_each_rgb(region, |r, g, b| {
        let ri = (r as f32 * scale) as usize;
        let gi = (g as f32 * scale) as usize;
        let bi = (b as f32 * scale) as usize;
        hist[(ri * RGB_BINS + gi) * RGB_BINS + bi] += 1.0;
    });
    normalize(&mut hist, region.pixel_count());
    Ok(hist)
}

/// Divides every bin by the pixel count so the histogram sums to 1.
pub(crate) fn normalize(hist: &mut [f32], pixels: usize) {
    let total = pixels as f32;
    for bin in hist.iter_mut() {
        *bin /= total;
    }
}

/// Walks the region row by row, handing each pixel's RGB triple to `f`.
pub(crate) fn for_each_rgb<F: FnMut(u8, u8, u8)>(region: PixelView<'_>, mut f: F) {
    for y in 0..region.height() {
        let row = region.row(y).expect("histogram row within bounds");
        for px in row.chunks_exact(3) {
            f(px[0], px[1], px[2]);
        }
    }
}
