//! Artifact popularity catalog and the curated vendor allow-list.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::error::{FinderError, Result};

/// Artifact ids of the Azure SDK family, the default curated vendor set.
pub const DEFAULT_CURATED_ARTIFACTS: &[&str] = &[
    "adal4j",
    "azure-mgmt-appservice",
    "applicationinsights-web",
    "azure-batch",
    "azure-mgmt-batchai",
    "azure-mgmt-cdn",
    "azure-mgmt-containerinstance",
    "azure-cognitiveservices-computervision",
    "azure-cognitiveservices-videosearch",
    "azure-cognitiveservices-parent",
    "azure-cognitiveservices-websearch",
    "azure-cognitiveservices-customimagesearch",
    "azure-cognitiveservices-visualsearch",
    "azure-cognitiveservices-newssearch",
    "azure-cognitiveservices-customsearch",
    "azure-cognitiveservices-autosuggest",
    "azure-cognitiveservices-spellcheck",
    "azure-cognitiveservices-faceapi",
    "azure-cognitiveservices-contentmoderator",
    "azure-computervision",
    "azure-cognitiveservices-luis-runtime",
    "azure-faceapi",
    "azure-cognitiveservices-entitysearch",
    "azure-cognitiveservices-imagesearch",
    "azure-cognitiveservices-textanalytics",
    "azure-cognitiveservices-language",
    "azure-cognitiveservices-luis-authoring",
    "azure-cognitiveservices-customvision-training",
    "azure-cognitiveservices-customvision-prediction",
    "azure-mgmt-containerregistry",
    "azure-mgmt-containerservice",
    "azure-documentdb",
    "azure-mgmt-datalake-analytics",
    "azure-data-lake-store-sdk",
    "azure-mgmt-dns",
    "azure-svc-mgmt",
    "azure-eventgrid",
    "azure-eventhubs",
    "azure-functions-java-library",
    "azure-client-authentication",
    "azure-arm-client-runtime",
    "azure-mgmt-hdinsight",
    "iot-service-client",
    "azure-keyvault",
    "azure-mgmt-mixedreality",
    "azure-mgmt-labservices",
    "azure-mgmt-monitor",
    "azure-mgmt-network",
    "azure-mgmt-privatedns",
    "azure-mgmt-redis",
    "azure-mgmt-resources",
    "azure-mgmt-resourcegraph",
    "azure-servicebus",
    "sf",
    "azure-mgmt-streamanalytics",
    "mssql-jdbc",
    "azure-storage-blob",
    "azure-storage-queue",
    "azure-mgmt-trafficmanager",
    "azure-mgmt-compute",
    "azure",
    "azure-core",
];

/// Read-only `groupId:artifactId -> popularity` mapping.
#[derive(Debug, Clone, Default)]
pub struct UsageCatalog {
    counts: HashMap<String, u64>,
}

impl UsageCatalog {
    /// Load a catalog from a JSON object file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FinderError::UsageCatalog(format!("read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json(&raw)?;
        debug!(path = %path.display(), entries = catalog.len(), "Loaded usage catalog");
        Ok(catalog)
    }

    /// Parse a catalog from JSON text. Counts must be non-negative integers.
    pub fn from_json(raw: &str) -> Result<Self> {
        let counts: HashMap<String, u64> = serde_json::from_str(raw)
            .map_err(|e| FinderError::UsageCatalog(format!("invalid catalog: {e}")))?;
        Ok(Self { counts })
    }

    /// Usage for a `groupId:artifactId` key; absent keys score zero.
    #[must_use]
    pub fn usage(&self, coordinate: &str) -> u64 {
        self.counts.get(coordinate).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for UsageCatalog {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Artifact ids that are guaranteed a visible slot when they match.
#[derive(Debug, Clone, Default)]
pub struct CuratedVendorSet {
    artifacts: HashSet<String>,
}

impl CuratedVendorSet {
    pub fn new<I, S>(artifacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            artifacts: artifacts.into_iter().map(Into::into).collect(),
        }
    }

    /// The Azure SDK family.
    #[must_use]
    pub fn azure() -> Self {
        Self::new(DEFAULT_CURATED_ARTIFACTS.iter().copied())
    }

    #[must_use]
    pub fn contains(&self, artifact_id: &str) -> bool {
        self.artifacts.contains(artifact_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
