//! RGB pixel buffers and borrowed region views.
//!
//! `PixelView` is a borrowed 2D view into an interleaved RGB byte buffer
//! with an explicit row stride measured in pixels. Region crops are
//! zero-copy views into the same backing slice and retain the original
//! stride. Grayscale conversion happens inside the extractors that need
//! it; every buffer this crate handles is three-channel.

use crate::region::Rect;
use crate::util::{FeatMatchError, FeatMatchResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Interleaved channels per pixel in every buffer this crate handles.
pub const CHANNELS: usize = 3;

/// Owned contiguous interleaved RGB image buffer.
#[derive(Clone)]
pub struct ImageBuf {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl ImageBuf {
    /// Creates a buffer from raw interleaved RGB bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> FeatMatchResult<Self> {
        let needed = required_len(width, height, width)?;
        if data.len() < needed {
            return Err(FeatMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(FeatMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a buffer filled with one color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> FeatMatchResult<Self> {
        let needed = required_len(width, height, width)?;
        let mut data = Vec::with_capacity(needed);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing interleaved byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the whole image.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

/// Borrowed 2D RGB view with an explicit stride in pixels.
#[derive(Copy, Clone)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PixelView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> FeatMatchResult<Self> {
        let needed = required_len(width, height, width)?;
        if data.len() < needed {
            return Err(FeatMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride: width,
        })
    }

    /// Returns the view width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the view height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in pixels between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of pixels covered by the view.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns the interleaved bytes of row `y`, `width * CHANNELS` long.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?.checked_mul(CHANNELS)?;
        let end = start.checked_add(self.width.checked_mul(CHANNELS)?)?;
        self.data.get(start..end)
    }

    /// Returns the `[r, g, b]` triple at `(x, y)` if it is within bounds.
    pub fn rgb(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = self.row(y)?;
        let base = x * CHANNELS;
        Some([row[base], row[base + 1], row[base + 2]])
    }

    /// Returns a zero-copy crop into the same backing buffer.
    pub fn crop(&self, rect: Rect) -> FeatMatchResult<PixelView<'a>> {
        if rect.width == 0 || rect.height == 0 {
            return Err(FeatMatchError::InvalidDimensions {
                width: rect.width,
                height: rect.height,
            });
        }

        let out_of_bounds = FeatMatchError::CropOutOfBounds {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = rect.x.checked_add(rect.width).ok_or(out_of_bounds.clone())?;
        let end_y = rect.y.checked_add(rect.height).ok_or(out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = (rect.y * self.stride + rect.x) * CHANNELS;
        Ok(PixelView {
            data: &self.data[start..],
            width: rect.width,
            height: rect.height,
            stride: self.stride,
        })
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> FeatMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(FeatMatchError::InvalidDimensions { width, height });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or(FeatMatchError::InvalidDimensions { width, height })?;
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::{ImageBuf, PixelView};
    use crate::region::Rect;
    use crate::util::FeatMatchError;

    #[test]
    fn image_buf_rejects_zero_dimensions() {
        let err = ImageBuf::new(vec![0u8; 3], 0, 1).err().unwrap();
        assert_eq!(
            err,
            FeatMatchError::InvalidDimensions {
                width: 0,
                height: 1,
            }
        );
    }

    #[test]
    fn image_buf_rejects_short_buffer() {
        let err = ImageBuf::new(vec![0u8; 11], 2, 2).err().unwrap();
        assert_eq!(err, FeatMatchError::BufferTooSmall { needed: 12, got: 11 });
    }

    #[test]
    fn crop_is_zero_copy_with_original_stride() {
        let data: Vec<u8> = (0u8..48).collect();
        let buf = ImageBuf::new(data, 4, 4).unwrap();
        let view = buf.view();

        let crop = view
            .crop(Rect {
                x: 1,
                y: 1,
                width: 2,
                height: 2,
            })
            .unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.stride(), 4);
        assert_eq!(crop.rgb(0, 0), view.rgb(1, 1));
        assert_eq!(crop.rgb(1, 1), view.rgb(2, 2));
        assert!(crop.rgb(2, 0).is_none());
    }

    #[test]
    fn crop_rejects_out_of_bounds_rect() {
        let buf = ImageBuf::filled(4, 4, [1, 2, 3]).unwrap();
        let err = buf
            .view()
            .crop(Rect {
                x: 3,
                y: 3,
                width: 2,
                height: 2,
            })
            .err()
            .unwrap();
        assert!(matches!(err, FeatMatchError::CropOutOfBounds { .. }));
    }

    #[test]
    fn view_from_slice_reads_rows() {
        let data: Vec<u8> = (0u8..18).collect();
        let view = PixelView::from_slice(&data, 3, 2).unwrap();
        assert_eq!(view.row(0).unwrap(), &data[0..9]);
        assert_eq!(view.row(1).unwrap(), &data[9..18]);
        assert!(view.row(2).is_none());
        assert_eq!(view.rgb(2, 1), Some([15, 16, 17]));
    }
}
