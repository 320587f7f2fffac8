//! Weighted multi-source matching engine.
//!
//! A query runs one or more bindings, each an independent scoring channel
//! of (feature, region, metric, weight, store). Distances accumulate per
//! candidate across channels; candidates never scored by any channel are
//! absent from the ranking rather than treated as distance zero. Ordering
//! is ascending by accumulated distance with identifier tie-breaking, so
//! rankings are deterministic for identical inputs.

mod accum;
mod topn;

pub use topn::TopN;

use crate::feature::FeatureKind;
use crate::image::ImageBuf;
use crate::metric::MetricKind;
use crate::region::Region;
use crate::search::accum::ScoreAccumulator;
use crate::store::FeatureStore;
use crate::util::{FeatMatchError, FeatMatchResult};
use tracing::debug;

/// One scoring channel of a query.
pub struct Binding<'a> {
    pub feature: FeatureKind,
    pub region: Region,
    pub metric: MetricKind,
    pub weight: f32,
    pub store: &'a FeatureStore,
}

/// Parsed `feature:region:metric[:weight]=path` binding specification.
///
/// The spec string is the CLI-facing form of a binding; parsing resolves
/// every identifier against its registry before any I/O happens, so
/// malformed configurations fail with a specific diagnosis up front.
#[derive(Clone, Debug, PartialEq)]
pub struct BindingSpec {
    pub feature: FeatureKind,
    pub region: Region,
    pub metric: MetricKind,
    pub weight: f32,
    pub db_path: String,
}

impl BindingSpec {
    /// Parses one binding spec. Weight is optional and defaults to 1.0.
    pub fn parse(spec: &str) -> FeatMatchResult<BindingSpec> {
        let malformed = |reason: &'static str| FeatMatchError::InvalidBindingSpec {
            spec: spec.to_string(),
            reason,
        };

        let (lhs, rhs) = spec
            .split_once('=')
            .ok_or_else(|| malformed("missing '=' before database path"))?;
        let db_path = rhs.trim();
        if db_path.is_empty() {
            return Err(malformed("empty database path"));
        }

        let parts: Vec<&str> = lhs.split(':').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(malformed("expected feature:region:metric[:weight]"));
        }

        let feature =
            FeatureKind::parse(parts[0]).ok_or_else(|| FeatMatchError::UnknownFeature {
                name: parts[0].to_string(),
            })?;
        let region = Region::parse(parts[1]).ok_or_else(|| FeatMatchError::UnknownRegion {
            name: parts[1].to_string(),
        })?;
        let metric = MetricKind::parse(parts[2]).ok_or_else(|| FeatMatchError::UnknownMetric {
            name: parts[2].to_string(),
        })?;

        let weight = match parts.get(3) {
            Some(raw) => raw
                .parse::<f32>()
                .map_err(|_| malformed("weight is not a number"))?,
            None => 1.0,
        };
        if !(weight > 0.0) {
            return Err(FeatMatchError::NonPositiveWeight { weight });
        }

        Ok(BindingSpec {
            feature,
            region,
            metric,
            weight,
            db_path: db_path.to_string(),
        })
    }
}

/// Query input: the identifier plus the decoded image, when extraction may
/// be needed.
///
/// The image may be `None` when the query is known to be a catalog member
/// of every bound store; the engine then reuses stored vectors and never
/// touches pixels.
pub struct Query<'a> {
    pub id: &'a str,
    pub image: Option<&'a ImageBuf>,
}

/// Ranked candidate: identifier and accumulated weighted distance.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    pub id: String,
    pub distance: f32,
}

/// The matching engine.
pub struct Matcher;

impl Matcher {
    /// Ranks catalog images against the query across all bindings.
    ///
    /// Malformed configuration (non-positive weight, empty store) is
    /// rejected before any scoring. Per binding, the query vector is the
    /// stored one when the query identifier is present verbatim in that
    /// store, avoiding extraction drift for catalog members; otherwise it
    /// is extracted fresh from the query image. Records whose identifier
    /// equals the query's are excluded from scoring. Zero seen candidates
    /// yields an empty list, not an error.
    pub fn rank(
        query: &Query<'_>,
        bindings: &[Binding<'_>],
        top_n: usize,
    ) -> FeatMatchResult<Vec<MatchResult>> {
        for binding in bindings {
            if !(binding.weight > 0.0) {
                return Err(FeatMatchError::NonPositiveWeight {
                    weight: binding.weight,
                });
            }
            if binding.store.is_empty() {
                return Err(FeatMatchError::EmptyStore {
                    name: binding.store.name().to_string(),
                });
            }
        }

        let mut accum = ScoreAccumulator::new();
        for binding in bindings {
            let extracted: Vec<f32>;
            let query_vector: &[f32] = match binding.store.find(query.id) {
                Some(record) => {
                    debug!(
                        id = query.id,
                        store = binding.store.name(),
                        "query found in store, reusing stored vector"
                    );
                    &record.vector
                }
                None => {
                    let image =
                        query
                            .image
                            .ok_or_else(|| FeatMatchError::MissingQueryImage {
                                id: query.id.to_string(),
                            })?;
                    extracted = binding.feature.extract_from(image, binding.region)?;
                    &extracted
                }
            };

            for record in binding.store.records() {
                if record.id == query.id {
                    continue;
                }
                let distance = binding.metric.distance(query_vector, &record.vector);
                accum.add(&record.id, binding.weight * distance);
            }
        }

        debug!(candidates = accum.len(), top_n, "accumulation complete");
        let mut collector = TopN::new(top_n);
        for result in accum.into_results() {
            collector.push(result);
        }
        Ok(collector.into_sorted_asc())
    }
}
