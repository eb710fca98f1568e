//! Error types for mcstats-core
//!
//! Per-file failures are collected in a [`LoadReport`] so one bad save or log never stops the report.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mcstats operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decompress {path}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing top-level \"stats\" object in {path}")]
    MissingStats { path: PathBuf },

    #[error("Non-numeric value for {key} in {category} ({path})")]
    InvalidStatValue {
        path: PathBuf,
        category: String,
        key: String,
    },

    #[error("Failed to decode NBT in {path}: {message}")]
    NbtParse { path: PathBuf, message: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Minecraft directory not found")]
    MinecraftDirNotFound,
}

impl CoreError {
    /// Path of the input file this error refers to, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            CoreError::FileRead { path, .. }
            | CoreError::Decompress { path, .. }
            | CoreError::JsonParse { path, .. }
            | CoreError::MissingStats { path }
            | CoreError::InvalidStatValue { path, .. }
            | CoreError::NbtParse { path, .. } => Some(path),
            CoreError::InvalidConfig { .. } | CoreError::MinecraftDirNotFound => None,
        }
    }
}

/// Severity level for errors during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Non-critical, report continues with less data
    Warning,
    /// A whole input file was dropped
    Error,
}

/// Individual error entry in load report
#[derive(Debug, Clone)]
pub struct LoadError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// File the error came from
    pub path: Option<PathBuf>,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl LoadError {
    /// Missing input that leaves a table empty without failing a file
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            path: None,
            suggestion: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add an actionable suggestion to this error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create user-friendly error from CoreError with context-aware suggestions
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let source = source.into();
        let suggestion = match error {
            CoreError::FileRead { path, .. } => {
                Some(format!("Check permissions: chmod +r {}", path.display()))
            }
            CoreError::JsonParse { .. } => {
                Some("Validate JSON syntax with: jq . <file>".to_string())
            }
            CoreError::MissingStats { .. } => Some(
                "Open the world once in a recent Minecraft version to rewrite its stats".to_string(),
            ),
            CoreError::Decompress { .. } | CoreError::NbtParse { .. } => {
                Some("The file may be truncated; restore it from a backup".to_string())
            }
            _ => None,
        };

        Self {
            source,
            message: error.to_string(),
            severity: ErrorSeverity::Error,
            path: error.path().cloned(),
            suggestion,
        }
    }
}

/// Report of errors encountered during data loading
///
/// Enables graceful degradation by tracking partial failures
/// instead of failing completely on any error.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub stat_files_scanned: usize,
    pub stat_files_failed: usize,
    pub level_files_scanned: usize,
    pub level_files_failed: usize,
    pub logs_scanned: usize,
    /// Undated or unreadable logs; skipped without an error entry
    pub logs_skipped: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    /// Returns true if there are any errors (including warnings)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Paths of every input file that failed to load
    pub fn failed_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Error)
            .filter_map(|e| e.path.as_ref())
    }

    /// Returns count by severity
    pub fn error_count(&self) -> (usize, usize) {
        let warnings = self
            .errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Warning)
            .count();
        let errors = self
            .errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Error)
            .count();
        (warnings, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_report_severity_counting() {
        let mut report = LoadReport::new();
        report.add_error(
            LoadError::warning("logs", "No logs directory at /mc/logs")
                .with_suggestion("Pass --minecraft-dir"),
        );
        report.add_error(LoadError::from_core_error(
            "stats",
            &CoreError::MissingStats {
                path: PathBuf::from("/saves/World/stats/abc.json"),
            },
        ));

        let (warnings, errors) = report.error_count();
        assert_eq!(warnings, 1);
        assert_eq!(errors, 1);
        assert!(report.has_errors());
        assert_eq!(report.errors[0].suggestion.as_deref(), Some("Pass --minecraft-dir"));
    }

    #[test]
    fn test_failed_paths_skip_warnings() {
        let mut report = LoadReport::new();
        report.add_error(LoadError::warning("stats", "No saves directory").with_path("/mc/saves"));

        assert_eq!(report.failed_paths().count(), 0);
    }

    #[test]
    fn test_from_core_error_keeps_path() {
        let err = CoreError::MissingStats {
            path: PathBuf::from("/saves/World/stats/abc.json"),
        };
        let load_error = LoadError::from_core_error("stats", &err);

        assert_eq!(
            load_error.path,
            Some(PathBuf::from("/saves/World/stats/abc.json"))
        );
        assert!(load_error.message.contains("abc.json"));
        assert!(load_error.suggestion.is_some());
    }
}
