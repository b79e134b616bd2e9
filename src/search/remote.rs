//! Online class search against a Solr-style Maven Central endpoint.
//!
//! Two queries go out per search: an exact one on the class-name field and
//! a trailing-wildcard prefix one. They run as two futures joined together,
//! each under its own timeout, so a slow or failing request only loses its
//! own results.
//!
//! The searcher holds no runtime. Each search drives its futures on a
//! short-lived current-thread runtime, moved to a scoped thread when the
//! caller is already inside a tokio context.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::error::{FinderError, Result};
use crate::search::types::{ClassMatch, MatchKind, MatchMap, normalized_simple_name};

/// Top-level response body.
#[derive(Debug, Default, Deserialize)]
pub struct RemoteResponse {
    #[serde(default)]
    pub response: RemoteDocs,
    #[serde(default)]
    pub highlighting: HashMap<String, Highlight>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoteDocs {
    #[serde(default)]
    pub docs: Vec<RemoteDoc>,
}

/// One artifact document: `id`, group, artifact, latest version.
#[derive(Debug, Default, Deserialize)]
pub struct RemoteDoc {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub g: String,
    #[serde(default)]
    pub a: String,
    #[serde(default)]
    pub v: String,
}

/// Highlighted fully-qualified class names for a document.
#[derive(Debug, Default, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub fch: Vec<String>,
}

/// Client for the online search endpoint.
pub struct RemoteSearcher {
    client: reqwest::Client,
    endpoint: String,
    rows: usize,
    timeout: Duration,
    max_results: usize,
}

impl std::fmt::Debug for RemoteSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSearcher")
            .field("endpoint", &self.endpoint)
            .field("rows", &self.rows)
            .field("timeout", &self.timeout)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl RemoteSearcher {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms.max(1));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| FinderError::Config(format!("HTTP client error: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            rows: config.rows,
            timeout,
            max_results: config.max_results,
        })
    }

    /// Up to `max_results` prefix matches keyed by fully-qualified name.
    /// Never fails; unreachable or broken responses contribute nothing.
    pub fn search_remote(&self, query: &str) -> MatchMap {
        if normalized_simple_name(query).is_empty() {
            return MatchMap::new();
        }

        let field = if query.contains('.') { "fc" } else { "c" };
        let exact_url = self.url(field, query);
        let prefix_url = self.url(field, &format!("{query}*"));

        let joined = block_on_isolated(async {
            tokio::join!(self.fetch(&exact_url), self.fetch(&prefix_url))
        });
        let (exact, prefix) = match joined {
            Ok(outcomes) => outcomes,
            Err(e) => {
                warn!(query, error = %e, "Remote search could not run");
                return MatchMap::new();
            }
        };

        let responses: Vec<RemoteResponse> = [("exact", exact), ("prefix", prefix)]
            .into_iter()
            .filter_map(|(kind, outcome)| match outcome {
                Ok(response) => Some(response),
                Err(e) => {
                    warn!(query, request = kind, error = %e, "Remote search request failed");
                    None
                }
            })
            .collect();

        let results = collect_matches(&responses, query, self.max_results);
        debug!(query, responses = responses.len(), matches = results.len(), "Remote search complete");
        results
    }

    fn url(&self, field: &str, term: &str) -> String {
        format!(
            "{}?q={}&rows={}&wt=json",
            self.endpoint,
            urlencoding::encode(&format!("{field}:{term}")),
            self.rows
        )
    }

    async fn fetch(&self, url: &str) -> Result<RemoteResponse> {
        let request = async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(response.json::<RemoteResponse>().await?)
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result.map_err(FinderError::from),
            Err(_) => Err(FinderError::RemoteTimeout(
                u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }
}

/// Run `future` to completion on a fresh current-thread runtime. Inside a
/// tokio context the runtime lives on a scoped thread so the caller's
/// runtime is never blocked from within.
fn block_on_isolated<F>(future: F) -> Result<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    let run = move || -> Result<F::Output> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FinderError::Runtime(format!("remote search runtime: {e}")))?;
        Ok(runtime.block_on(future))
    };

    if Handle::try_current().is_err() {
        return run();
    }
    std::thread::scope(|scope| {
        scope
            .spawn(run)
            .join()
            .unwrap_or_else(|_| Err(FinderError::Runtime("remote search thread panicked".to_string())))
    })
}

/// Walk responses in order, keeping highlighted classes whose simple name
/// starts with the query's simple name, until `max_results` distinct names
/// are collected.
pub fn collect_matches(responses: &[RemoteResponse], query: &str, max_results: usize) -> MatchMap {
    let query_name = normalized_simple_name(query);
    let mut results = MatchMap::new();

    for response in responses {
        for doc in &response.response.docs {
            let Some(highlight) = response.highlighting.get(&doc.id) else {
                continue;
            };
            for snippet in &highlight.fch {
                if results.len() >= max_results {
                    return results;
                }
                let class_name = strip_emphasis(snippet);
                if results.contains_key(&class_name)
                    || !normalized_simple_name(&class_name).starts_with(&query_name)
                {
                    continue;
                }
                results.insert(
                    class_name.clone(),
                    ClassMatch::new(&doc.g, &doc.a, &doc.v, class_name, MatchKind::Prefix),
                );
            }
        }
    }

    results
}

fn strip_emphasis(snippet: &str) -> String {
    snippet.replace("<em>", "").replace("</em>", "")
}
