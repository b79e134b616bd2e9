use std::path::PathBuf;

use tempfile::TempDir;

use crate::search::index::{ArtifactRecord, IndexBuilder};

/// Test fixture providing isolated filesystem environment.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl UnitTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {:?}", data_path);

        Self { temp_dir, data_path }
    }

    /// Create a test file with content.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Build an artifact index under `index/` from `records`.
    pub fn build_index(&self, records: &[ArtifactRecord]) -> PathBuf {
        let path = self.data_path.join("index");
        let mut builder = IndexBuilder::create(&path).expect("Failed to create index");
        for record in records {
            builder.add(record).expect("Failed to add artifact");
        }
        let count = builder.finish().expect("Failed to commit index");
        println!("[FIXTURE] Built index: {:?} ({} artifacts)", path, count);
        path
    }

    /// Write a usage catalog keyed by `group:artifact`.
    pub fn create_usage_catalog(&self, entries: &[(&str, u64)]) -> PathBuf {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(coord, count)| ((*coord).to_string(), serde_json::Value::from(*count)))
            .collect();
        let content = serde_json::to_string(&map).expect("Failed to serialize catalog");
        self.create_file("ArtifactUsage.json", &content)
    }
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}

/// Shorthand for an [`ArtifactRecord`].
pub fn artifact(group: &str, artifact: &str, version: &str, classes: &[&str]) -> ArtifactRecord {
    ArtifactRecord {
        group_id: group.to_string(),
        artifact_id: artifact.to_string(),
        version: version.to_string(),
        classes: classes.iter().map(|c| (*c).to_string()).collect(),
    }
}
