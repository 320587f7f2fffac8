//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. The core never
//! implements codecs itself; everything arrives here as interleaved RGB.

use crate::image::ImageBuf;
use crate::util::{FeatMatchError, FeatMatchResult};
use std::path::Path;

/// Creates an owned RGB buffer from a decoded dynamic image.
pub fn buf_from_dynamic_image(img: &image::DynamicImage) -> FeatMatchResult<ImageBuf> {
    let rgb = img.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    ImageBuf::new(rgb.into_raw(), width, height)
}

/// Loads an image from disk and converts it to interleaved RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> FeatMatchResult<ImageBuf> {
    let img = image::open(path).map_err(|err| FeatMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    buf_from_dynamic_image(&img)
}
