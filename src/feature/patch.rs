//! Centered raw-patch descriptor.

use crate::image::{PixelView, CHANNELS};
use crate::util::{FeatMatchError, FeatMatchResult};

/// Patch side length in pixels.
pub(crate) const PATCH: usize = 7;

/// Extracts the centered 7x7 patch, flattened row-major across RGB and
/// normalized to [0, 1].
pub(crate) fn extract_center_patch(region: PixelView<'_>) -> FeatMatchResult<Vec<f32>> {
    if region.width() < PATCH || region.height() < PATCH {
        return Err(FeatMatchError::RegionTooSmall {
            min_width: PATCH,
            min_height: PATCH,
            width: region.width(),
            height: region.height(),
        });
    }

    let x0 = (region.width() - PATCH) / 2;
    let y0 = (region.height() - PATCH) / 2;

    let mut out = Vec::with_capacity(PATCH * PATCH * CHANNELS);
    for y in 0..PATCH {
        let row = region.row(y0 + y).expect("patch row within bounds");
        let start = x0 * CHANNELS;
        let end = (x0 + PATCH) * CHANNELS;
        for &sample in &row[start..end] {
            out.push(sample as f32 / 255.0);
        }
    }
    Ok(out)
}
