//! Merges local and remote candidates and hands them to the ranking policy.

use std::sync::Arc;

use tracing::debug;

use crate::search::local::LocalSearcher;
use crate::search::ranking::RankingPolicy;
use crate::search::remote::RemoteSearcher;
use crate::search::types::{ClassMatch, MatchMap};
use crate::search::usage::UsageCatalog;

/// A source of candidate matches keyed by fully-qualified name.
pub trait CandidateSource: Send + Sync {
    fn candidates(&self, query: &str) -> MatchMap;
}

impl CandidateSource for LocalSearcher {
    fn candidates(&self, query: &str) -> MatchMap {
        self.search_local(query)
    }
}

impl CandidateSource for RemoteSearcher {
    fn candidates(&self, query: &str) -> MatchMap {
        self.search_remote(query)
    }
}

/// Combines the local and optional remote sources into one ranked list.
pub struct ResultAggregator {
    local: Option<Arc<dyn CandidateSource>>,
    remote: Option<Arc<dyn CandidateSource>>,
    usage: Arc<UsageCatalog>,
    policy: RankingPolicy,
    remote_trigger: usize,
}

impl ResultAggregator {
    pub fn new(
        local: Option<Arc<dyn CandidateSource>>,
        remote: Option<Arc<dyn CandidateSource>>,
        usage: Arc<UsageCatalog>,
        policy: RankingPolicy,
        remote_trigger: usize,
    ) -> Self {
        Self {
            local,
            remote,
            usage,
            policy,
            remote_trigger,
        }
    }

    /// Ranked matches for `query`. Local results win on name collisions;
    /// the remote source is consulted only when local results are scarce.
    /// Without a local source every query goes remote.
    pub fn search(&self, query: &str) -> Vec<ClassMatch> {
        let local = self
            .local
            .as_ref()
            .map(|source| source.candidates(query))
            .unwrap_or_default();
        let local_count = local.len();

        let merged = match &self.remote {
            Some(remote) if local_count < self.remote_trigger => {
                let mut merged = remote.candidates(query);
                debug!(query, local = local_count, remote = merged.len(), "Merging remote results");
                merged.extend(local);
                merged
            }
            _ => local,
        };

        self.policy.rank(merged.into_values(), &self.usage)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::search::types::MatchKind;
    use crate::search::usage::CuratedVendorSet;

    struct FixedSource {
        matches: Vec<ClassMatch>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(matches: Vec<ClassMatch>) -> Arc<Self> {
            Arc::new(Self {
                matches,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl CandidateSource for FixedSource {
        fn candidates(&self, _query: &str) -> MatchMap {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.matches
                .iter()
                .map(|m| (m.fully_qualified_class_name.clone(), m.clone()))
                .collect()
        }
    }

    fn prefix(group: &str, artifact: &str, fqn: &str) -> ClassMatch {
        ClassMatch::new(group, artifact, "1", fqn, MatchKind::Prefix)
    }

    fn aggregator(
        local: Arc<FixedSource>,
        remote: Option<Arc<FixedSource>>,
        usage: UsageCatalog,
    ) -> ResultAggregator {
        ResultAggregator::new(
            Some(local as Arc<dyn CandidateSource>),
            remote.map(|r| r as Arc<dyn CandidateSource>),
            Arc::new(usage),
            RankingPolicy {
                curated: CuratedVendorSet::default(),
                ..RankingPolicy::default()
            },
            5,
        )
    }

    #[test]
    fn test_local_wins_on_collision() {
        let local = FixedSource::new(vec![prefix("local.group", "local", "com.x.Foo")]);
        let remote = FixedSource::new(vec![
            prefix("remote.group", "remote", "com.x.Foo"),
            prefix("remote.group", "remote", "com.y.FooBar"),
        ]);

        let results = aggregator(local, Some(remote), UsageCatalog::default()).search("foo");
        assert_eq!(results.len(), 2);
        let foo = results
            .iter()
            .find(|r| r.fully_qualified_class_name == "com.x.Foo")
            .unwrap();
        assert_eq!(foo.artifact_id, "local");
    }

    #[test]
    fn test_remote_skipped_when_local_is_plentiful() {
        let local = FixedSource::new(
            (0..5)
                .map(|i| prefix("g", &format!("a{i}"), &format!("p{i}.Foo{i}")))
                .collect(),
        );
        let remote = FixedSource::new(vec![prefix("g", "r", "r.FooRemote")]);

        let results = aggregator(local, Some(remote.clone()), UsageCatalog::default()).search("foo");
        assert_eq!(results.len(), 5);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remote_consulted_when_local_is_scarce() {
        let local = FixedSource::new(vec![prefix("g", "a", "p.Foo")]);
        let remote = FixedSource::new(vec![prefix("g", "r", "r.FooRemote")]);

        let results = aggregator(local, Some(remote.clone()), UsageCatalog::default()).search("foo");
        assert_eq!(results.len(), 2);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_remote_configured() {
        let local = FixedSource::new(Vec::new());
        assert!(aggregator(local, None, UsageCatalog::default()).search("foo").is_empty());
    }

    #[test]
    fn test_remote_only_without_local_source() {
        let remote = FixedSource::new(vec![prefix("com.bar", "bar", "com.bar.Foo")]);
        let aggregator = ResultAggregator::new(
            None,
            Some(remote as Arc<dyn CandidateSource>),
            Arc::new(UsageCatalog::default()),
            RankingPolicy::default(),
            5,
        );

        let results = aggregator.search("foo");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].fully_qualified_class_name, "com.bar.Foo");
        assert_eq!(results[0].match_kind, MatchKind::Prefix);
        assert_eq!(results[0].usage_score, 0);
    }

    #[test]
    fn test_usage_scores_attached_from_catalog() {
        let local = FixedSource::new(vec![prefix("java", "rt", "java.util.ArrayList")]);
        let usage: UsageCatalog = [("java:rt".to_string(), 5000)].into_iter().collect();

        let results = aggregator(local, None, usage).search("ArrayList");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].usage_score, 5000);
    }
}
