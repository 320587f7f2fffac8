//! Feature extraction: fixed-length descriptors over image regions.
//!
//! `FeatureKind` is the closed registry: a string identifier resolves to a
//! variant via `parse` and back via `as_str`. Dispatch is a match over the
//! enum rather than trait objects so the variant set stays explicit and
//! exhaustively checkable. Output length is a property of the variant, not
//! of any single image.

mod hist;
mod lab;
mod patch;
mod texture;

use crate::image::{ImageBuf, PixelView, CHANNELS};
use crate::region::Region;
use crate::util::{FeatMatchError, FeatMatchResult};
use std::fmt;

/// Closed set of feature extraction algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Centered 7x7 raw patch, flattened row-major across RGB.
    Baseline,
    /// 16x16 normalized rg-chromaticity histogram.
    RgHist2d,
    /// 8x8x8 joint RGB histogram.
    RgbHist3d,
    /// 256-bin Sobel gradient-magnitude histogram.
    Magnitude,
    /// 4x8x8 CIE Lab histogram.
    CieLab,
}

impl FeatureKind {
    /// All known feature kinds, in registry order.
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::Baseline,
        FeatureKind::RgHist2d,
        FeatureKind::RgbHist3d,
        FeatureKind::Magnitude,
        FeatureKind::CieLab,
    ];

    /// Resolves a feature identifier; `None` is the unknown sentinel.
    pub fn parse(s: &str) -> Option<FeatureKind> {
        match s {
            "baseline" => Some(FeatureKind::Baseline),
            "rghist2d" => Some(FeatureKind::RgHist2d),
            "rgbhist3d" => Some(FeatureKind::RgbHist3d),
            "magnitude" => Some(FeatureKind::Magnitude),
            "cielab" => Some(FeatureKind::CieLab),
            _ => None,
        }
    }

    /// Returns the identifier `parse` resolves; exact inverse of `parse`.
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKind::Baseline => "baseline",
            FeatureKind::RgHist2d => "rghist2d",
            FeatureKind::RgbHist3d => "rgbhist3d",
            FeatureKind::Magnitude => "magnitude",
            FeatureKind::CieLab => "cielab",
        }
    }

    /// Output vector length for this kind.
    pub fn dim(self) -> usize {
        match self {
            FeatureKind::Baseline => patch::PATCH * patch::PATCH * CHANNELS,
            FeatureKind::RgHist2d => hist::RG_BINS * hist::RG_BINS,
            FeatureKind::RgbHist3d => hist::RGB_BINS * hist::RGB_BINS * hist::RGB_BINS,
            FeatureKind::Magnitude => texture::MAG_BINS,
            FeatureKind::CieLab => lab::L_BINS * lab::AB_BINS * lab::AB_BINS,
        }
    }

    /// Extracts this feature from an already-cropped region view.
    ///
    /// Histogram kinds produce vectors summing to 1.0 for any view; views
    /// are never zero-sized by construction. Kinds with a larger minimum
    /// support fail with `RegionTooSmall`.
    pub fn extract(self, region: PixelView<'_>) -> FeatMatchResult<Vec<f32>> {
        match self {
            FeatureKind::Baseline => patch::extract_center_patch(region),
            FeatureKind::RgHist2d => hist::extract_rg_chroma(region),
            FeatureKind::RgbHist3d => hist::extract_rgb_joint(region),
            FeatureKind::Magnitude => texture::extract_magnitude_hist(region),
            FeatureKind::CieLab => lab::extract_lab_hist(region),
        }
    }

    /// Crops `region` out of `image` and extracts.
    ///
    /// Degenerate rectangles (e.g. the top half of a one-row image) fail
    /// with `RegionTooSmall` rather than a crop error, since the caller
    /// asked for a region the image cannot supply.
    pub fn extract_from(self, image: &ImageBuf, region: Region) -> FeatMatchResult<Vec<f32>> {
        let rect = region.rect(image.width(), image.height());
        if rect.width == 0 || rect.height == 0 {
            return Err(FeatMatchError::RegionTooSmall {
                min_width: 1,
                min_height: 1,
                width: rect.width,
                height: rect.height,
            });
        }
        let view = image.view().crop(rect)?;
        self.extract(view)
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
