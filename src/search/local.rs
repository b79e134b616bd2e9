//! Local index search with a stricter client-side match predicate.
//!
//! The index lookup is deliberately loose (fuzzy prefix over any class the
//! artifact ships). Every class of every hit is re-checked here: prefix
//! matches pass outright, fuzzy matches must be at least as long as the
//! query and within edit distance 2.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::search::index::LocalIndex;
use crate::search::types::{ClassMatch, MatchKind, MatchMap, levenshtein, normalized_simple_name};

/// Maximum edit distance for a fuzzy match.
pub const MAX_FUZZY_DISTANCE: usize = 2;

/// Classify `class_name` against `query`, both compared by lower-cased
/// simple name.
#[must_use]
pub fn match_kind(class_name: &str, query: &str) -> Option<MatchKind> {
    let candidate = normalized_simple_name(class_name);
    let query = normalized_simple_name(query);

    if candidate.starts_with(&query) {
        Some(MatchKind::Prefix)
    } else if candidate.chars().count() >= query.chars().count()
        && levenshtein(&candidate, &query) <= MAX_FUZZY_DISTANCE
    {
        Some(MatchKind::Fuzzy)
    } else {
        None
    }
}

/// Searches the local artifact index.
#[derive(Clone)]
pub struct LocalSearcher {
    index: Arc<LocalIndex>,
    hit_limit: usize,
}

impl LocalSearcher {
    pub fn new(index: Arc<LocalIndex>, hit_limit: usize) -> Self {
        Self { index, hit_limit }
    }

    #[must_use]
    pub fn index(&self) -> &Arc<LocalIndex> {
        &self.index
    }

    /// Open or close the underlying index.
    pub fn enable(&self, enabled: bool) -> bool {
        self.index.enable(enabled)
    }

    /// Matches keyed by fully-qualified name. Empty if the index is closed or
    /// the lookup fails.
    pub fn search_local(&self, query: &str) -> MatchMap {
        let hits = match self.index.lookup(query, self.hit_limit) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query, error = %e, "Local index lookup failed");
                return MatchMap::new();
            }
        };

        let mut results = MatchMap::new();
        for hit in &hits {
            for class_name in &hit.class_names {
                if results.contains_key(class_name) {
                    continue;
                }
                if let Some(kind) = match_kind(class_name, query) {
                    results.insert(
                        class_name.clone(),
                        ClassMatch::new(
                            &hit.group_id,
                            &hit.artifact_id,
                            &hit.version,
                            class_name.as_str(),
                            kind,
                        ),
                    );
                }
            }
        }

        debug!(query, artifacts = hits.len(), matches = results.len(), "Local search complete");
        results
    }
}
