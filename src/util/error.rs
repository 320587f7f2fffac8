//! Error types for featmatch.

use thiserror::Error;

/// Result alias for featmatch operations.
pub type FeatMatchResult<T> = std::result::Result<T, FeatMatchError>;

/// Errors that can occur when building stores, extracting features, or
/// ranking matches.
///
/// Vector-length mismatches during comparison are deliberately *not* here:
/// metrics report them as an infinite-distance sentinel so one malformed
/// database row cannot abort a whole ranking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatMatchError {
    /// An image or view was created with a zero dimension.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The backing buffer does not match the declared dimensions.
    #[error("buffer too small: needed {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A crop rectangle extends outside its source image.
    #[error("crop ({x},{y}) {width}x{height} out of bounds for {img_width}x{img_height} image")]
    CropOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The selected region is smaller than the extractor's minimum support.
    #[error("region {width}x{height} below minimum support {min_width}x{min_height}")]
    RegionTooSmall {
        min_width: usize,
        min_height: usize,
        width: usize,
        height: usize,
    },
    /// A feature identifier did not resolve against the registry.
    #[error("unknown feature type '{name}'")]
    UnknownFeature { name: String },
    /// A metric identifier did not resolve against the registry.
    #[error("unknown metric type '{name}'")]
    UnknownMetric { name: String },
    /// A region identifier did not resolve against the registry.
    #[error("unknown region '{name}'")]
    UnknownRegion { name: String },
    /// A binding spec string is structurally malformed.
    #[error("invalid binding spec '{spec}': {reason}")]
    InvalidBindingSpec { spec: String, reason: &'static str },
    /// Binding weights must be strictly positive.
    #[error("binding weight must be positive, got {weight}")]
    NonPositiveWeight { weight: f32 },
    /// The query is absent from a store and no decoded image was supplied.
    #[error("query '{id}' not in store and no query image available")]
    MissingQueryImage { id: String },
    /// A binding references a store with no records.
    #[error("store '{name}' is empty")]
    EmptyStore { name: String },
    /// A feature database could not be read.
    #[error("cannot read store '{path}': {reason}")]
    StoreRead { path: String, reason: String },
    /// A feature database could not be written.
    #[error("cannot write store '{path}': {reason}")]
    StoreWrite { path: String, reason: String },
    /// A database row failed to parse as `<id>, <float>, ...`.
    #[error("bad record at {path}:{line}: {reason}")]
    RecordParse {
        path: String,
        line: usize,
        reason: String,
    },
    /// An image file could not be decoded.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
