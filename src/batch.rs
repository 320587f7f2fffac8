//! Batch feature-store generation.
//!
//! Building a database is an independent map over images: each extraction
//! is pure and touches no shared state, so the `rayon` feature can fan the
//! work out across threads. Failures (region too small, undecodable file)
//! skip that image with a warning and the batch continues; each success
//! contributes exactly one record.

use crate::feature::FeatureKind;
use crate::image::ImageBuf;
use crate::region::Region;
use crate::store::FeatureRecord;
use std::path::Path;
use tracing::warn;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "image-io")]
use crate::store::FeatureStore;
#[cfg(feature = "image-io")]
use crate::util::{FeatMatchError, FeatMatchResult};

/// File extensions recognized as catalog images.
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "ppm", "tif", "tiff"];

/// Returns true for paths with a recognized image extension.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn extract_record(
    id: String,
    image: &ImageBuf,
    feature: FeatureKind,
    region: Region,
) -> Option<FeatureRecord> {
    match feature.extract_from(image, region) {
        Ok(vector) => Some(FeatureRecord { id, vector }),
        Err(err) => {
            warn!(id = %id, feature = feature.as_str(), %err, "skipping image");
            None
        }
    }
}

/// Builds records serially from (identifier, image) pairs.
pub fn build_records<I>(images: I, feature: FeatureKind, region: Region) -> Vec<FeatureRecord>
where
    I: IntoIterator<Item = (String, ImageBuf)>,
{
    images
        .into_iter()
        .filter_map(|(id, image)| extract_record(id, &image, feature, region))
        .collect()
}

/// Parallel variant of [`build_records`]; yields the same record set.
#[cfg(feature = "rayon")]
pub fn build_records_par(
    images: Vec<(String, ImageBuf)>,
    feature: FeatureKind,
    region: Region,
) -> Vec<FeatureRecord> {
    images
        .into_par_iter()
        .filter_map(|(id, image)| extract_record(id, &image, feature, region))
        .collect()
}

/// Scans a directory for catalog images and builds a store.
///
/// Identifiers are the full joined paths, sorted for a stable record
/// order. Undecodable files are skipped with a warning, like any other
/// per-image failure.
#[cfg(feature = "image-io")]
pub fn generate_from_dir(
    dir: &Path,
    feature: FeatureKind,
    region: Region,
) -> FeatMatchResult<FeatureStore> {
    let entries = std::fs::read_dir(dir).map_err(|err| FeatMatchError::StoreRead {
        path: dir.display().to_string(),
        reason: err.to_string(),
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_image_path(path))
        .collect();
    paths.sort();

    let images: Vec<(String, ImageBuf)> = paths
        .iter()
        .filter_map(|path| match crate::image::io::load_rgb_image(path) {
            Ok(image) => Some((path.to_string_lossy().into_owned(), image)),
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping file");
                None
            }
        })
        .collect();

    #[cfg(feature = "rayon")]
    let records = build_records_par(images, feature, region);
    #[cfg(not(feature = "rayon"))]
    let records = build_records(images, feature, region);

    Ok(FeatureStore::new(dir.display().to_string(), records))
}
