//! Error types for the diagnostics pipeline.
//!
//! Analyzers never surface these errors to the caller: a failing check is
//! folded into its own result (see [`crate::checks`]). What remains here are
//! the conditions that stop a run before any analyzer starts, plus the I/O
//! and serialization failures of the surrounding tooling.
//!
//! Errors are serializable so a frontend can show them as `{code, message}`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the diagnostics pipeline.
#[derive(Error, Debug)]
pub enum DiagnosticsError {
    /// The dataset has no columns at all.
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    /// The target column name is unusable (e.g. blank).
    #[error("Invalid target column: {0}")]
    InvalidTarget(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An individual analyzer could not complete.
    #[error("Analyzer '{analyzer}' failed: {reason}")]
    AnalyzerFailed { analyzer: String, reason: String },

    /// Report writing failed.
    #[error("Failed to write report: {0}")]
    ReportWriteFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DiagnosticsError>,
    },
}

impl DiagnosticsError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DiagnosticsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset(_) => "EMPTY_DATASET",
            Self::InvalidTarget(_) => "INVALID_TARGET",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::AnalyzerFailed { .. } => "ANALYZER_FAILED",
            Self::ReportWriteFailed(_) => "REPORT_WRITE_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the caller can fix the problem by changing its input.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::EmptyDataset(_) | Self::InvalidTarget(_) | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for DiagnosticsError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        DiagnosticsError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for DiagnosticsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DiagnosticsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for diagnostics operations.
pub type Result<T> = std::result::Result<T, DiagnosticsError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
