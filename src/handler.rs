//! Typed request/response dispatch for a hosting editor process.
//!
//! Requests arrive as `{"command": "...", "arguments": {...}}` and every
//! request gets exactly one response. Dispatch never fails: a search before
//! initialization answers with an empty list and a context toggle before
//! initialization reports success since there is nothing to toggle.

use std::path::PathBuf;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::search::ClassMatch;
use crate::service::SearchService;

/// A host request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "arguments", rename_all = "snake_case")]
pub enum Command {
    InitializeSearcher {
        index_dir: PathBuf,
        usage_catalog: PathBuf,
    },
    SearchArtifact {
        class_name: String,
    },
    ControlContext {
        enabled: bool,
    },
}

/// The answer to a [`Command`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Initialized { initialized: bool },
    Results { results: Vec<ClassMatch> },
    Success { success: bool },
}

/// Owns the (optional) search service and routes commands to it.
pub struct CommandRegistry {
    config: Config,
    service: RwLock<Option<SearchService>>,
}

impl CommandRegistry {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            service: RwLock::new(None),
        }
    }

    /// Wrap an already-built service.
    pub fn with_service(config: Config, service: SearchService) -> Self {
        Self {
            config,
            service: RwLock::new(Some(service)),
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.service.read().is_some()
    }

    pub fn dispatch(&self, command: Command) -> Response {
        match command {
            Command::InitializeSearcher {
                index_dir,
                usage_catalog,
            } => Response::Initialized {
                initialized: self.initialize(index_dir, usage_catalog),
            },
            Command::SearchArtifact { class_name } => Response::Results {
                results: self.search(&class_name),
            },
            Command::ControlContext { enabled } => Response::Success {
                success: self.control(enabled),
            },
        }
    }

    /// Replace any existing service. Reports whether local search came up.
    fn initialize(&self, index_dir: PathBuf, usage_catalog: PathBuf) -> bool {
        let service = SearchService::initialize(index_dir, usage_catalog, &self.config);
        let ready = service.is_local_enabled() && service.is_index_open();
        *self.service.write() = Some(service);
        ready
    }

    fn search(&self, class_name: &str) -> Vec<ClassMatch> {
        match self.service.read().as_ref() {
            Some(service) => service.search(class_name),
            None => {
                debug!(class_name, "Search before initialization");
                Vec::new()
            }
        }
    }

    fn control(&self, enabled: bool) -> bool {
        self.service
            .read()
            .as_ref()
            .is_none_or(|service| service.set_enabled(enabled))
    }
}
