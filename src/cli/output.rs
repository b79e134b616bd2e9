use colored::Colorize;
use serde::Serialize;

use crate::error::{ErrorCode, FinderError, Result, StructuredError};

/// Envelope for every `--json` payload.
#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    #[serde(rename = "error")]
    StructuredError {
        /// Error code enum value (e.g., "INDEX_MISSING")
        code: ErrorCode,
        /// Numeric error code (e.g., 201)
        numeric_code: u16,
        message: String,
        suggestion: String,
        recoverable: bool,
        category: String,
    },
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

/// Create a robot error response from a [`FinderError`].
pub fn robot_error(err: &FinderError) -> RobotResponse<serde_json::Value> {
    RobotResponse {
        status: err.to_structured().into(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data: serde_json::Value::Null,
        warnings: Vec::new(),
    }
}

impl From<StructuredError> for RobotStatus {
    fn from(err: StructuredError) -> Self {
        Self::StructuredError {
            code: err.code,
            numeric_code: err.numeric_code,
            message: err.message,
            suggestion: err.suggestion,
            recoverable: err.recoverable,
            category: err.category,
        }
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 12,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(text.bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines.push(format!("{} {value}", padded.dimmed()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_ok_envelope() {
        let value = serde_json::to_value(robot_ok(serde_json::json!({ "count": 0 }))).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"]["count"], 0);
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn test_robot_error_envelope() {
        let err = FinderError::IndexMissing("/tmp/index".to_string());
        let value = serde_json::to_value(robot_error(&err)).unwrap();
        let status = &value["status"]["error"];
        assert_eq!(status["code"], "INDEX_MISSING");
        assert_eq!(status["numeric_code"], 201);
        assert_eq!(status["category"], "index");
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_human_layout_lines() {
        colored::control::set_override(false);
        let mut layout = HumanLayout::new();
        layout.title("Results").kv("count", "3").blank().push_line("done");
        let text = layout.build();
        assert!(text.starts_with("Results\n\n"));
        assert!(text.contains("count        3"));
        assert!(text.ends_with("\n\ndone"));
    }
}
