use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};
use crate::search::usage::DEFAULT_CURATED_ARTIFACTS;

pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://search.maven.org/solrsearch/select";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

impl Config {
    /// Load configuration: defaults, then the global file (or the explicit
    /// one when given), then `CLASSFINDER_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("CLASSFINDER_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("classfinder/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| FinderError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| FinderError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.local {
            self.local.merge(patch);
        }
        if let Some(patch) = patch.remote {
            self.remote.merge(patch);
        }
        if let Some(patch) = patch.ranking {
            self.ranking.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("CLASSFINDER_INDEX_DIR") {
            self.paths.index_dir = PathBuf::from(value);
        }
        if let Some(value) = env_string("CLASSFINDER_USAGE_CATALOG") {
            self.paths.usage_catalog = PathBuf::from(value);
        }

        if let Some(value) = env_usize("CLASSFINDER_LOCAL_HIT_LIMIT")? {
            self.local.hit_limit = value;
        }
        if let Some(value) = env_usize("CLASSFINDER_LOCAL_REMOTE_TRIGGER")? {
            self.local.remote_trigger = value;
        }

        if let Some(value) = env_bool("CLASSFINDER_REMOTE_ENABLED") {
            self.remote.enabled = value;
        }
        if let Some(value) = env_string("CLASSFINDER_REMOTE_ENDPOINT") {
            self.remote.endpoint = value;
        }
        if let Some(value) = env_usize("CLASSFINDER_REMOTE_ROWS")? {
            self.remote.rows = value;
        }
        if let Some(value) = env_u64("CLASSFINDER_REMOTE_TIMEOUT_MS")? {
            self.remote.timeout_ms = value;
        }
        if let Some(value) = env_usize("CLASSFINDER_REMOTE_MAX_RESULTS")? {
            self.remote.max_results = value;
        }

        if let Some(value) = env_u64("CLASSFINDER_RANKING_FUZZY_USAGE_FLOOR")? {
            self.ranking.fuzzy_usage_floor = value;
        }
        if let Some(value) = env_usize("CLASSFINDER_RANKING_STARRED_CAP")? {
            self.ranking.starred_cap = value;
        }
        if let Some(values) = env_list("CLASSFINDER_RANKING_CURATED_ARTIFACTS") {
            self.ranking.curated_artifacts = dedup_in_order(values);
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.remote.enabled && self.remote.endpoint.trim().is_empty() {
            return Err(FinderError::MissingConfig("remote.endpoint".to_string()));
        }
        if self.remote.timeout_ms == 0 {
            return Err(FinderError::Config(
                "remote.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.local.hit_limit == 0 {
            return Err(FinderError::Config(
                "local.hit_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub index_dir: PathBuf,
    #[serde(default)]
    pub usage_catalog: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let root = dirs::data_dir()
            .map(|dir| dir.join("classfinder"))
            .unwrap_or_else(|| PathBuf::from(".classfinder"));
        Self {
            index_dir: root.join("index"),
            usage_catalog: root.join("ArtifactUsage.json"),
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.index_dir {
            self.index_dir = value;
        }
        if let Some(value) = patch.usage_catalog {
            self.usage_catalog = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Maximum number of artifact hits read from the local index per query.
    #[serde(default)]
    pub hit_limit: usize,
    /// Remote search runs only when local search yields fewer matches than this.
    #[serde(default)]
    pub remote_trigger: usize,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            hit_limit: 1000,
            remote_trigger: 5,
        }
    }
}

impl LocalConfig {
    fn merge(&mut self, patch: LocalPatch) {
        if let Some(value) = patch.hit_limit {
            self.hit_limit = value;
        }
        if let Some(value) = patch.remote_trigger {
            self.remote_trigger = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub rows: usize,
    #[serde(default)]
    pub timeout_ms: u64,
    #[serde(default)]
    pub max_results: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_REMOTE_ENDPOINT.to_string(),
            rows: 10,
            timeout_ms: 2000,
            max_results: 5,
        }
    }
}

impl RemoteConfig {
    fn merge(&mut self, patch: RemotePatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.endpoint {
            self.endpoint = value;
        }
        if let Some(value) = patch.rows {
            self.rows = value;
        }
        if let Some(value) = patch.timeout_ms {
            self.timeout_ms = value;
        }
        if let Some(value) = patch.max_results {
            self.max_results = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Fuzzy matches below this usage count are dropped.
    #[serde(default)]
    pub fuzzy_usage_floor: u64,
    /// Upper bound on the starred window.
    #[serde(default)]
    pub starred_cap: usize,
    #[serde(default)]
    pub curated_artifacts: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            fuzzy_usage_floor: 1000,
            starred_cap: 5,
            curated_artifacts: DEFAULT_CURATED_ARTIFACTS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl RankingConfig {
    fn merge(&mut self, patch: RankingPatch) {
        if let Some(value) = patch.fuzzy_usage_floor {
            self.fuzzy_usage_floor = value;
        }
        if let Some(value) = patch.starred_cap {
            self.starred_cap = value;
        }
        if let Some(values) = patch.curated_artifacts {
            self.curated_artifacts = dedup_in_order(values);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub local: Option<LocalPatch>,
    pub remote: Option<RemotePatch>,
    pub ranking: Option<RankingPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub index_dir: Option<PathBuf>,
    pub usage_catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LocalPatch {
    pub hit_limit: Option<usize>,
    pub remote_trigger: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RemotePatch {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub rows: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RankingPatch {
    pub fuzzy_usage_floor: Option<u64>,
    pub starred_cap: Option<usize>,
    pub curated_artifacts: Option<Vec<String>>,
}

fn dedup_in_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            FinderError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|err| {
            FinderError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(ToString::to_string)
            .collect()
    })
}
