//! Named image regions and their pixel rectangles.
//!
//! A `Region` maps an image's dimensions to a rectangle fully contained in
//! `[0, width) x [0, height)`. The Top/Bottom split uses integer division
//! with the remainder going to Bottom, so the two halves tile the image
//! exactly for odd heights.

use std::fmt;

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Named sub-area of an image used when extracting features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The entire image.
    Whole,
    /// The upper half.
    Top,
    /// The lower half, including the odd-height remainder row.
    Bottom,
    /// The full-width middle band of half the image height.
    Center,
}

impl Region {
    /// All known regions, in registry order.
    pub const ALL: [Region; 4] = [Region::Whole, Region::Top, Region::Bottom, Region::Center];

    /// Resolves a region identifier; `None` is the unknown sentinel.
    pub fn parse(s: &str) -> Option<Region> {
        match s {
            "whole" => Some(Region::Whole),
            "top" => Some(Region::Top),
            "bottom" => Some(Region::Bottom),
            "center" => Some(Region::Center),
            _ => None,
        }
    }

    /// Returns the identifier `parse` resolves; exact inverse of `parse`.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Whole => "whole",
            Region::Top => "top",
            Region::Bottom => "bottom",
            Region::Center => "center",
        }
    }

    /// Maps the region to a rectangle inside a `width x height` image.
    pub fn rect(self, width: usize, height: usize) -> Rect {
        match self {
            Region::Whole => Rect {
                x: 0,
                y: 0,
                width,
                height,
            },
            Region::Top => Rect {
                x: 0,
                y: 0,
                width,
                height: height / 2,
            },
            Region::Bottom => Rect {
                x: 0,
                y: height / 2,
                width,
                height: height - height / 2,
            },
            Region::Center => Rect {
                x: 0,
                y: height / 4,
                width,
                height: height / 2,
            },
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
