use std::path::PathBuf;

use httpmock::prelude::*;
use serde_json::json;

use classfinder::config::Config;
use classfinder::search::ArtifactRecord;
use classfinder::service::SearchService;
use classfinder::test_utils::fixtures::UnitTestFixture;

/// Assert the ranked fully-qualified names equal the expected list
#[macro_export]
macro_rules! assert_ranked {
    ($results:expr, [$($fqn:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $results
            .iter()
            .map(|r| r.fully_qualified_class_name.as_str())
            .collect();
        let expected: Vec<&str> = vec![$($fqn),*];
        assert_eq!(actual, expected, "ranked results differ");
    }};
}

/// An on-disk index, usage catalog and optional fake remote endpoint.
pub struct SearchFixture {
    pub files: UnitTestFixture,
    pub index_dir: PathBuf,
    pub usage_path: PathBuf,
    pub server: Option<MockServer>,
}

impl SearchFixture {
    pub fn new(records: &[ArtifactRecord], usage: &[(&str, u64)]) -> Self {
        let files = UnitTestFixture::new();
        let index_dir = files.build_index(records);
        let usage_path = files.create_usage_catalog(usage);
        Self {
            files,
            index_dir,
            usage_path,
            server: None,
        }
    }

    /// Serve `docs` as `(group, artifact, version, classes)` for every request.
    pub fn with_remote(mut self, docs: &[(&str, &str, &str, &[&str])]) -> Self {
        let mut highlighting = serde_json::Map::new();
        let docs: Vec<_> = docs
            .iter()
            .map(|(g, a, v, classes)| {
                let id = format!("{g}:{a}:{v}");
                highlighting.insert(id.clone(), json!({ "fch": classes }));
                json!({ "id": id, "g": g, "a": a, "v": v })
            })
            .collect();
        let body = json!({ "response": { "docs": docs }, "highlighting": highlighting });

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/solrsearch/select");
            then.status(200).json_body(body);
        });
        self.server = Some(server);
        self
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        match &self.server {
            Some(server) => {
                config.remote.endpoint = server.url("/solrsearch/select");
                config.remote.timeout_ms = 1000;
            }
            None => config.remote.enabled = false,
        }
        config
    }

    pub fn service(&self) -> SearchService {
        SearchService::initialize(&self.index_dir, &self.usage_path, &self.config())
    }
}
