//! Core result types shared by the local and remote searchers.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a candidate class name matched the query.
///
/// Declaration order is rank order: `Prefix` outranks `Fuzzy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Candidate simple name starts with the query's simple name
    Prefix,
    /// Candidate simple name is within edit distance 2 of the query
    Fuzzy,
}

/// A class found in some artifact, with its ranking metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMatch {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub simple_class_name: String,
    pub fully_qualified_class_name: String,
    pub usage_score: u64,
    pub match_kind: MatchKind,
}

/// Matches keyed by fully-qualified class name.
///
/// A `BTreeMap` keeps iteration deterministic so equal-ranked entries come out
/// in the same order on every run.
pub type MatchMap = BTreeMap<String, ClassMatch>;

impl ClassMatch {
    /// Build a match from artifact coordinates and a dotted class name.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        fully_qualified_class_name: impl Into<String>,
        match_kind: MatchKind,
    ) -> Self {
        let fully_qualified_class_name = fully_qualified_class_name.into();
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            simple_class_name: simple_name(&fully_qualified_class_name).to_string(),
            fully_qualified_class_name,
            usage_score: 0,
            match_kind,
        }
    }

    /// `groupId:artifactId`, the key used by the usage catalog.
    #[must_use]
    pub fn coordinate(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Composite ranking key: kind ascending, usage descending, then the
    /// lower-cased simple name. The fully-qualified name breaks remaining ties.
    #[must_use]
    pub fn rank_key(&self) -> (MatchKind, Reverse<u64>, String, &str) {
        (
            self.match_kind,
            Reverse(self.usage_score),
            self.simple_class_name.to_lowercase(),
            &self.fully_qualified_class_name,
        )
    }

    /// Total order used for the starred window.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.rank_key().cmp(&other.rank_key())
    }

    /// Case-insensitive alphabetical order by simple name.
    #[must_use]
    pub fn name_cmp(&self, other: &Self) -> Ordering {
        self.simple_class_name
            .to_lowercase()
            .cmp(&other.simple_class_name.to_lowercase())
            .then_with(|| {
                self.fully_qualified_class_name
                    .cmp(&other.fully_qualified_class_name)
            })
    }
}

/// Portion of a class name after the last `.`, or the whole name.
#[must_use]
pub fn simple_name(class_name: &str) -> &str {
    class_name
        .rfind('.')
        .map_or(class_name, |idx| &class_name[idx + 1..])
}

/// Lower-cased simple name used on both sides of every comparison.
#[must_use]
pub fn normalized_simple_name(class_name: &str) -> String {
    simple_name(class_name).to_lowercase()
}

/// Levenshtein edit distance over chars.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
