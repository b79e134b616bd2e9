//! Search facade owning the index handle, the usage catalog and both searchers.
//!
//! A service is built once with [`SearchService::initialize`] and never fails
//! to construct. Each data source degrades on its own: a missing usage catalog
//! disables local search (remote still answers), an unopenable index leaves the
//! handle closed until [`SearchService::set_enabled`] retries it, and a remote
//! client that cannot be built simply leaves remote search off.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::search::{
    CandidateSource, ClassMatch, LocalIndex, LocalSearcher, RankingPolicy, RemoteSearcher,
    ResultAggregator, UsageCatalog,
};

pub struct SearchService {
    index: Arc<LocalIndex>,
    usage_path: PathBuf,
    hit_limit: usize,
    remote_trigger: usize,
    policy: RankingPolicy,
    remote: Option<Arc<dyn CandidateSource>>,
    aggregator: RwLock<ResultAggregator>,
    local_enabled: RwLock<bool>,
}

impl SearchService {
    /// Set up the service. The index is opened immediately when the usage
    /// catalog loads.
    pub fn initialize(
        index_dir: impl Into<PathBuf>,
        usage_path: impl Into<PathBuf>,
        config: &Config,
    ) -> Self {
        let index = Arc::new(LocalIndex::new(index_dir));
        let usage_path = usage_path.into();
        let policy = RankingPolicy::from_config(&config.ranking);

        let remote: Option<Arc<dyn CandidateSource>> = if config.remote.enabled {
            match RemoteSearcher::new(&config.remote) {
                Ok(searcher) => Some(Arc::new(searcher)),
                Err(e) => {
                    warn!(error = %e, "Remote search unavailable");
                    None
                }
            }
        } else {
            debug!("Remote search disabled by config");
            None
        };

        let service = Self {
            aggregator: RwLock::new(ResultAggregator::new(
                None,
                remote.clone(),
                Arc::new(UsageCatalog::default()),
                policy.clone(),
                config.local.remote_trigger,
            )),
            index,
            usage_path,
            hit_limit: config.local.hit_limit,
            remote_trigger: config.local.remote_trigger,
            policy,
            remote,
            local_enabled: RwLock::new(false),
        };

        if service.enable_local() {
            service.index.open();
        }
        info!(
            index = %service.index.path().display(),
            local = service.is_local_enabled(),
            index_open = service.index.is_open(),
            remote = service.remote.is_some(),
            "Search service initialized"
        );
        service
    }

    /// Ranked matches for `query`. Never fails; an empty list means nothing
    /// matched or every source was unavailable.
    pub fn search(&self, query: &str) -> Vec<ClassMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.aggregator.read().search(&query)
    }

    /// Open (`true`) or close (`false`) the local index. Enabling after a
    /// failed catalog load retries the whole local setup.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        if !enabled {
            return self.index.close();
        }
        if !self.is_local_enabled() && !self.enable_local() {
            return false;
        }
        self.index.open()
    }

    /// Whether the usage catalog loaded and local search is wired in.
    #[must_use]
    pub fn is_local_enabled(&self) -> bool {
        *self.local_enabled.read()
    }

    #[must_use]
    pub fn is_index_open(&self) -> bool {
        self.index.is_open()
    }

    #[must_use]
    pub fn index_path(&self) -> &Path {
        self.index.path()
    }

    /// Load the usage catalog and swap in an aggregator with a local source.
    fn enable_local(&self) -> bool {
        let mut enabled = self.local_enabled.write();
        if *enabled {
            return true;
        }

        let usage = match UsageCatalog::load(&self.usage_path) {
            Ok(usage) => usage,
            Err(e) => {
                warn!(path = %self.usage_path.display(), error = %e, "Usage catalog unavailable; local search disabled");
                return false;
            }
        };

        let local: Arc<dyn CandidateSource> =
            Arc::new(LocalSearcher::new(Arc::clone(&self.index), self.hit_limit));
        *self.aggregator.write() = ResultAggregator::new(
            Some(local),
            self.remote.clone(),
            Arc::new(usage),
            self.policy.clone(),
            self.remote_trigger,
        );
        *enabled = true;
        true
    }
}
