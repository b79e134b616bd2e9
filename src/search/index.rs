//! On-disk artifact index backed by Tantivy.
//!
//! One document per artifact. Every class the artifact ships contributes its
//! lower-cased simple name to the multi-valued `class_name` term field, which
//! is what fuzzy-prefix lookups run against. The full class list is stored
//! newline-delimited in internal form (`/java/util/ArrayList`) so a hit can be
//! expanded back into every class it defines.
//!
//! [`LocalIndex`] owns the open/closed lifecycle. The open index lives behind
//! a read-write lock: lookups hold the read guard for their whole duration and
//! `open`/`close` take the write guard, so a lookup never sees a half-closed
//! handle.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tantivy::collector::TopDocs;
use tantivy::query::FuzzyTermQuery;
use tantivy::schema::{Field, STORED, STRING, Schema, Value};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, info, warn};

use crate::error::{FinderError, Result};
use crate::search::types::normalized_simple_name;

/// Maximum edit distance for index-level lookups.
const FUZZY_DISTANCE: u8 = 2;

/// Writer heap for index builds.
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Field handles for the artifact schema
#[derive(Clone, Copy)]
struct IndexFields {
    group_id: Field,
    artifact_id: Field,
    version: Field,
    class_name: Field,
    class_names: Field,
}

/// An artifact entry as written by [`IndexBuilder`].
///
/// The short field names match the JSON-lines listing format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    #[serde(rename = "g")]
    pub group_id: String,
    #[serde(rename = "a")]
    pub artifact_id: String,
    #[serde(rename = "v")]
    pub version: String,
    /// Dotted (`java.util.ArrayList`) or internal (`/java/util/ArrayList`) names
    #[serde(default)]
    pub classes: Vec<String>,
}

/// An artifact returned by a lookup, with its full dotted class list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHit {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub class_names: Vec<String>,
}

struct OpenIndex {
    reader: IndexReader,
    fields: IndexFields,
}

impl OpenIndex {
    fn open(path: &Path) -> Result<Self> {
        if !path.join("meta.json").exists() {
            return Err(FinderError::IndexMissing(path.display().to_string()));
        }

        let index = Index::open_in_dir(path)?;
        let fields = extract_fields(&index.schema())?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self { reader, fields })
    }

    fn lookup(&self, simple_query: &str, limit: usize) -> Result<Vec<ArtifactHit>> {
        let searcher = self.reader.searcher();
        let term = Term::from_field_text(self.fields.class_name, simple_query);
        let query = FuzzyTermQuery::new_prefix(term, FUZZY_DISTANCE, true);

        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (_score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address)?;
            let text = |field: Field| {
                doc.get_first(field)
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string()
            };

            let class_names = text(self.fields.class_names)
                .lines()
                .filter_map(to_dotted_class_name)
                .collect();

            hits.push(ArtifactHit {
                group_id: text(self.fields.group_id),
                artifact_id: text(self.fields.artifact_id),
                version: text(self.fields.version),
                class_names,
            });
        }

        Ok(hits)
    }
}

/// Shared handle to the on-disk artifact index.
pub struct LocalIndex {
    path: PathBuf,
    handle: RwLock<Option<OpenIndex>>,
}

impl LocalIndex {
    /// Create a closed handle for the index at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: RwLock::new(None),
        }
    }

    /// Open the index. Idempotent; failures are logged and leave it closed.
    pub fn open(&self) -> bool {
        let mut guard = self.handle.write();
        if guard.is_some() {
            return true;
        }

        match OpenIndex::open(&self.path) {
            Ok(open) => {
                info!(path = %self.path.display(), docs = open.reader.searcher().num_docs(), "Opened local index");
                *guard = Some(open);
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to open local index");
                false
            }
        }
    }

    /// Close the index, releasing its files. Idempotent.
    pub fn close(&self) -> bool {
        if self.handle.write().take().is_some() {
            info!(path = %self.path.display(), "Closed local index");
        }
        true
    }

    /// Open or close depending on `enabled`.
    pub fn enable(&self, enabled: bool) -> bool {
        if enabled { self.open() } else { self.close() }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.handle.read().is_some()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Artifacts defining a class whose simple name is within edit distance 2
    /// of a prefix of `query`'s simple name. Returns nothing while closed.
    pub fn lookup(&self, query: &str, limit: usize) -> Result<Vec<ArtifactHit>> {
        let simple_query = normalized_simple_name(query);
        if simple_query.is_empty() {
            return Ok(Vec::new());
        }

        let guard = self.handle.read();
        let Some(open) = guard.as_ref() else {
            debug!("Local index closed; skipping lookup");
            return Ok(Vec::new());
        };
        open.lookup(&simple_query, limit)
    }

    /// Number of artifacts in the open index, or zero when closed.
    #[must_use]
    pub fn num_docs(&self) -> u64 {
        self.handle
            .read()
            .as_ref()
            .map_or(0, |open| open.reader.searcher().num_docs())
    }
}

impl Drop for LocalIndex {
    fn drop(&mut self) {
        self.close();
    }
}

/// Writes an artifact index directory.
pub struct IndexBuilder {
    writer: IndexWriter,
    fields: IndexFields,
    count: usize,
}

impl IndexBuilder {
    /// Create a fresh index at `path`, replacing any existing index there.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;

        let index = if path.join("meta.json").exists() {
            Index::open_in_dir(path)?
        } else {
            Index::create_in_dir(path, build_schema())?
        };
        let fields = extract_fields(&index.schema())?;

        let writer: IndexWriter = index.writer_with_num_threads(1, WRITER_HEAP_BYTES)?;
        writer.delete_all_documents()?;

        Ok(Self {
            writer,
            fields,
            count: 0,
        })
    }

    /// Add one artifact.
    pub fn add(&mut self, record: &ArtifactRecord) -> Result<()> {
        let mut doc = TantivyDocument::new();
        doc.add_text(self.fields.group_id, &record.group_id);
        doc.add_text(self.fields.artifact_id, &record.artifact_id);
        doc.add_text(self.fields.version, &record.version);

        let mut internal = Vec::with_capacity(record.classes.len());
        for class in &record.classes {
            let Some(dotted) = to_dotted_class_name(class) else {
                continue;
            };
            doc.add_text(self.fields.class_name, normalized_simple_name(&dotted));
            internal.push(format!("/{}", dotted.replace('.', "/")));
        }
        doc.add_text(self.fields.class_names, internal.join("\n"));

        self.writer.add_document(doc)?;
        self.count += 1;
        Ok(())
    }

    /// Add every record from a JSON-lines listing. Blank lines are skipped.
    pub fn add_jsonl(&mut self, reader: impl BufRead) -> Result<usize> {
        let mut added = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: ArtifactRecord =
                serde_json::from_str(&line).map_err(|e| FinderError::IndexInput {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            self.add(&record)?;
            added += 1;
        }
        Ok(added)
    }

    /// Commit and return the number of artifacts written.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.commit()?;
        self.writer.wait_merging_threads()?;
        info!(artifacts = self.count, "Index build complete");
        Ok(self.count)
    }
}

/// Convert an index line to a dotted class name.
///
/// Accepts internal form (`/java/util/ArrayList`) and dotted form alike.
fn to_dotted_class_name(entry: &str) -> Option<String> {
    let entry = entry.trim();
    let entry = entry.strip_prefix('/').unwrap_or(entry);
    if entry.is_empty() {
        return None;
    }
    Some(entry.replace('/', "."))
}

/// Build the Tantivy schema for artifact indexing
fn build_schema() -> Schema {
    let mut builder = Schema::builder();

    builder.add_text_field("group_id", STRING | STORED);
    builder.add_text_field("artifact_id", STRING | STORED);
    builder.add_text_field("version", STRING | STORED);

    // Raw lower-cased simple names, one term per class
    builder.add_text_field("class_name", STRING);
    builder.add_text_field("class_names", STORED);

    builder.build()
}

/// Extract field handles from schema
fn extract_fields(schema: &Schema) -> Result<IndexFields> {
    let field = |name: &str| {
        schema.get_field(name).map_err(|_| {
            FinderError::SearchIndex(tantivy::TantivyError::SchemaError(format!(
                "missing {name} field"
            )))
        })
    };

    Ok(IndexFields {
        group_id: field("group_id")?,
        artifact_id: field("artifact_id")?,
        version: field("version")?,
        class_name: field("class_name")?,
        class_names: field("class_names")?,
    })
}
