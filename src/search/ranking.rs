//! Scoring, filtering and ordering of merged candidates.
//!
//! The final list has two parts. The leading "starred" window, sized at a
//! fifth of the results (capped), is in rank order: prefix before fuzzy,
//! then by usage, then by name. Everything after it is plain alphabetical.
//! If a curated-vendor match exists but ranked outside the window, it takes
//! the window's last slot.

use tracing::trace;

use crate::config::RankingConfig;
use crate::search::types::{ClassMatch, MatchKind};
use crate::search::usage::{CuratedVendorSet, UsageCatalog};

/// Ranking parameters.
#[derive(Debug, Clone)]
pub struct RankingPolicy {
    pub fuzzy_usage_floor: u64,
    pub starred_cap: usize,
    pub curated: CuratedVendorSet,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self::from_config(&RankingConfig::default())
    }
}

impl RankingPolicy {
    #[must_use]
    pub fn from_config(config: &RankingConfig) -> Self {
        Self {
            fuzzy_usage_floor: config.fuzzy_usage_floor,
            starred_cap: config.starred_cap,
            curated: CuratedVendorSet::new(config.curated_artifacts.iter().cloned()),
        }
    }

    /// `min(round(total / 5), cap)`.
    #[must_use]
    pub fn starred_size(&self, total: usize) -> usize {
        ((total + 2) / 5).min(self.starred_cap)
    }

    /// Score, filter and order `candidates`.
    pub fn rank(&self, candidates: impl IntoIterator<Item = ClassMatch>, usage: &UsageCatalog) -> Vec<ClassMatch> {
        let mut results: Vec<ClassMatch> = candidates
            .into_iter()
            .map(|mut m| {
                m.usage_score = usage.usage(&m.coordinate());
                m
            })
            .filter(|m| m.match_kind == MatchKind::Prefix || m.usage_score >= self.fuzzy_usage_floor)
            .collect();

        results.sort_by(ClassMatch::rank_cmp);

        let starred = self.starred_size(results.len());
        self.promote_curated(&mut results, starred);
        results[starred..].sort_by(ClassMatch::name_cmp);

        trace!(total = results.len(), starred, "Ranked results");
        results
    }

    /// Move the best curated match into slot `starred - 1` when it sits
    /// outside the window. `results` must already be in rank order, so the
    /// first curated entry is the best one. Only entries that passed the
    /// fuzzy usage floor are candidates.
    fn promote_curated(&self, results: &mut Vec<ClassMatch>, starred: usize) {
        if starred <= 1 {
            return;
        }
        let Some(pos) = results
            .iter()
            .position(|m| self.curated.contains(&m.artifact_id))
        else {
            return;
        };
        if pos >= starred {
            let curated = results.remove(pos);
            results.insert(starred - 1, curated);
        }
    }
}
