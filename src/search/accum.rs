//! Per-candidate weighted score accumulation.

use crate::search::MatchResult;
use std::collections::HashMap;

/// Running weighted sum of distances per candidate identifier.
///
/// An identifier enters the map only when some channel scores it, so map
/// membership doubles as the "seen in at least one channel" flag: a
/// candidate no binding touched is absent from the ranking rather than
/// carried at distance zero.
#[derive(Default)]
pub(crate) struct ScoreAccumulator {
    totals: HashMap<String, f32>,
}

impl ScoreAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds one channel's weighted distance for `id`.
    pub(crate) fn add(&mut self, id: &str, weighted_distance: f32) {
        if let Some(total) = self.totals.get_mut(id) {
            *total += weighted_distance;
        } else {
            self.totals.insert(id.to_string(), weighted_distance);
        }
    }

    /// Returns the number of seen candidates.
    pub(crate) fn len(&self) -> usize {
        self.totals.len()
    }

    /// Drains the accumulator into unordered match results.
    pub(crate) fn into_results(self) -> Vec<MatchResult> {
        self.totals
            .into_iter()
            .map(|(id, distance)| MatchResult { id, distance })
            .collect()
    }
}
