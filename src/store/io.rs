//! Flat-file codec for feature databases.
//!
//! One record per line: `<id>, <float>, <float>, ...`. Field count is
//! fixed per feature type but the codec itself is width-agnostic; anything
//! it writes it can read back with identical (identifier, vector) pairs.
//! Writing truncates the target, so rows from a previous, possibly
//! incompatible feature type never survive a regeneration.

use crate::store::{FeatureRecord, FeatureStore};
use crate::util::{FeatMatchError, FeatMatchResult};
use std::path::Path;

impl FeatureStore {
    /// Loads a store from a delimited feature file.
    ///
    /// The store name is the path as given, which makes it usable in
    /// diagnostics and as a stable database reference.
    pub fn load(path: &Path) -> FeatMatchResult<FeatureStore> {
        let display = path.display().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|err| FeatMatchError::StoreRead {
                path: display.clone(),
                reason: err.to_string(),
            })?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let line = idx + 1;
            let row = row.map_err(|err| FeatMatchError::StoreRead {
                path: display.clone(),
                reason: err.to_string(),
            })?;

            let mut fields = row.iter();
            let id = match fields.next() {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    return Err(FeatMatchError::RecordParse {
                        path: display,
                        line,
                        reason: "missing identifier".to_string(),
                    })
                }
            };

            let mut vector = Vec::with_capacity(row.len().saturating_sub(1));
            for field in fields {
                let value = field
                    .parse::<f32>()
                    .map_err(|err| FeatMatchError::RecordParse {
                        path: display.clone(),
                        line,
                        reason: format!("'{field}': {err}"),
                    })?;
                vector.push(value);
            }
            if vector.is_empty() {
                return Err(FeatMatchError::RecordParse {
                    path: display,
                    line,
                    reason: "record has no feature values".to_string(),
                });
            }

            records.push(FeatureRecord { id, vector });
        }

        Ok(FeatureStore::new(display, records))
    }

    /// Writes the store to `path`, truncating any existing file.
    ///
    /// Floats are written in shortest round-trip form, so a load of the
    /// written file reproduces the vectors bit for bit.
    pub fn save(&self, path: &Path) -> FeatMatchResult<()> {
        let display = path.display().to_string();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|err| FeatMatchError::StoreWrite {
                path: display.clone(),
                reason: err.to_string(),
            })?;

        for record in self.records() {
            let mut row = Vec::with_capacity(1 + record.vector.len());
            row.push(record.id.clone());
            row.extend(record.vector.iter().map(|value| value.to_string()));
            writer
                .write_record(&row)
                .map_err(|err| FeatMatchError::StoreWrite {
                    path: display.clone(),
                    reason: err.to_string(),
                })?;
        }

        writer.flush().map_err(|err| FeatMatchError::StoreWrite {
            path: display,
            reason: err.to_string(),
        })
    }
}
