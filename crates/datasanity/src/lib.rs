//! DataSanity: pre-modeling diagnostics for tabular datasets.
//!
//! Given a dataset and the name of its target column, the library runs six
//! independent checks, folds their findings into a 0-100 risk score and
//! task-specific advice, ranks candidate model families and renders a
//! scikit-learn training script. It never modifies the dataset and never
//! trains a model.
//!
//! # Overview
//!
//! - **Checks** ([`checks`]): class imbalance and task inference, missing
//!   values, constant columns, ID-like columns, duplicate rows, target leakage
//! - **Synthesis** ([`synthesis`]): additive severity score and modeling advice
//! - **Model Suggestions** ([`suggest`]): ranked model families with a
//!   baseline recipe
//! - **Reporting** ([`reporting`]): training-script generation and JSON output
//! - **Progress Reporting**: stage-by-stage updates through a callback
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datasanity::run_diagnostics;
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("titanic.csv".into()))?
//!     .finish()?;
//!
//! let report = run_diagnostics(&df, "Survived")?;
//!
//! println!("Risk: {} ({})", report.severity.score, report.severity.risk_level);
//! for action in &report.advice.recommended_actions {
//!     println!("- {}", action);
//! }
//! ```
//!
//! # Configuration
//!
//! Every threshold has a default; use [`DiagnosticsConfig`] to override:
//!
//! ```rust,ignore
//! use datasanity::{DiagnosticsConfig, DiagnosticsPipeline};
//!
//! let config = DiagnosticsConfig::builder()
//!     .missing_ratio_threshold(0.5)   // Flag columns with >50% missing
//!     .leakage_correlation(0.9)
//!     .parallel_analyzers(true)
//!     .build()?;
//!
//! let report = DiagnosticsPipeline::builder()
//!     .config(config)
//!     .build()?
//!     .run(&df, "Survived")?;
//! ```

pub mod checks;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reporting;
pub mod suggest;
pub mod synthesis;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, DiagnosticsConfig, DiagnosticsConfigBuilder};
pub use error::{DiagnosticsError, Result as DiagnosticsResult, ResultExt};
pub use pipeline::{
    ClosureProgressReporter, DiagnosticStage, DiagnosticsPipeline, DiagnosticsPipelineBuilder,
    ProgressReporter, ProgressUpdate,
};
pub use reporting::{CodeTemplateGenerator, ReportEnvelope, ReportWriter};
pub use suggest::{ModelFamily, ModelSuggestionEngine};
pub use synthesis::{AdviceSynthesizer, SeveritySynthesizer};
pub use types::{
    AdviceResult, AnalyzerResults, DiagnosticReport, ModelSuggestion, ModelSuggestionSet,
    RiskColor, RiskLevel, SeverityResult, TaskHint,
};

use polars::prelude::DataFrame;

/// Diagnose `df` for predicting `target` with the default configuration.
///
/// Equivalent to building a default [`DiagnosticsPipeline`] and calling
/// [`DiagnosticsPipeline::run`].
pub fn run_diagnostics(df: &DataFrame, target: &str) -> error::Result<DiagnosticReport> {
    DiagnosticsPipeline::builder()
        .build()?
        .run(df, target)
}
