//! FeatMatch is a content-based image retrieval engine built on classic
//! fixed-length descriptors.
//!
//! Feature databases are flat delimited files of (identifier, vector)
//! records. A query combines one or more (feature, region, metric, weight,
//! store) bindings into a single ranked result list with deterministic
//! tie-breaking and self-match exclusion. Batch extraction can run in
//! parallel via the `rayon` feature; image decoding lives behind the
//! `image-io` feature.

pub mod batch;
pub mod feature;
pub mod image;
pub mod metric;
pub mod region;
pub mod search;
pub mod store;
pub mod util;

pub use feature::FeatureKind;
pub use image::{ImageBuf, PixelView, CHANNELS};
pub use metric::MetricKind;
pub use region::{Rect, Region};
pub use search::{Binding, BindingSpec, MatchResult, Matcher, Query, TopN};
pub use store::{FeatureRecord, FeatureStore};
pub use util::{FeatMatchError, FeatMatchResult};
