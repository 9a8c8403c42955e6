//! Progress reporting for a diagnostics run.
//!
//! # Example
//!
//! ```rust,ignore
//! use datasanity::DiagnosticsPipeline;
//!
//! let report = DiagnosticsPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()?
//!     .run(&df, "label")?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of a diagnostics run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticStage {
    /// Validating the dataset, target and configuration
    Initializing,
    /// Running the six dataset analyzers
    Analyzing,
    /// Computing the severity score
    Scoring,
    /// Synthesizing modeling advice
    Advising,
    /// Ranking candidate models
    Suggesting,
    /// Rendering the training script
    CodeGeneration,
    /// Run completed successfully
    Complete,
    /// Run aborted with an error
    Failed,
}

impl DiagnosticStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Analyzing => "Analyzing Dataset",
            Self::Scoring => "Scoring Severity",
            Self::Advising => "Synthesizing Advice",
            Self::Suggesting => "Suggesting Models",
            Self::CodeGeneration => "Generating Code",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the overall run spent in this stage (0.0 - 1.0).
    ///
    /// Weights of the working stages sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Initializing => 0.02,
            Self::Analyzing => 0.70,
            Self::Scoring => 0.02,
            Self::Advising => 0.02,
            Self::Suggesting => 0.14,
            Self::CodeGeneration => 0.10,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Initializing => 0.0,
            Self::Analyzing => 0.02,
            Self::Scoring => 0.72,
            Self::Advising => 0.74,
            Self::Suggesting => 0.76,
            Self::CodeGeneration => 0.90,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: DiagnosticStage,

    /// Optional sub-stage description (e.g., "Analyzer: leakage")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_stage: Option<String>,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_processed: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_total: Option<usize>,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage without sub-stage info.
    pub fn new(stage: DiagnosticStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            sub_stage: None,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
            items_processed: None,
            items_total: None,
        }
    }

    /// Creates a new progress update with item counts.
    pub fn with_items(
        stage: DiagnosticStage,
        sub_stage: impl Into<String>,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        let stage_progress = if total > 0 {
            current as f32 / total as f32
        } else {
            0.0
        };
        Self {
            sub_stage: Some(sub_stage.into()),
            items_processed: Some(current),
            items_total: Some(total),
            ..Self::new(stage, stage_progress, message)
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: DiagnosticStage::Complete,
            sub_stage: None,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
            items_processed: None,
            items_total: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: DiagnosticStage::Failed,
            sub_stage: None,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
            items_processed: None,
            items_total: None,
        }
    }
}

/// Receiver of progress updates during a run.
///
/// Implementations must be `Send + Sync`: with parallel analyzers enabled,
/// updates can arrive from worker threads.
///
/// # Example
///
/// ```rust,ignore
/// use datasanity::{ProgressReporter, ProgressUpdate};
///
/// struct StderrReporter;
///
/// impl ProgressReporter for StderrReporter {
///     fn report(&self, update: ProgressUpdate) {
///         eprintln!("{}: {}", update.stage.display_name(), update.message);
///     }
/// }
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Implementations should be cheap and non-blocking.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    const WORKING_STAGES: [DiagnosticStage; 6] = [
        DiagnosticStage::Initializing,
        DiagnosticStage::Analyzing,
        DiagnosticStage::Scoring,
        DiagnosticStage::Advising,
        DiagnosticStage::Suggesting,
        DiagnosticStage::CodeGeneration,
    ];

    #[test]
    fn test_stage_weights_sum_to_one() {
        let total: f32 = WORKING_STAGES.iter().map(|s| s.weight()).sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_base_progress_is_cumulative() {
        let mut expected = 0.0;
        for stage in WORKING_STAGES {
            assert!((stage.base_progress() - expected).abs() < 1e-4, "{:?}", stage);
            expected += stage.weight();
        }
    }

    #[test]
    fn test_progress_update_new() {
        let update = ProgressUpdate::new(DiagnosticStage::Analyzing, 0.5, "halfway");

        assert_eq!(update.stage, DiagnosticStage::Analyzing);
        assert!((update.progress - 0.37).abs() < 1e-4);
        assert_eq!(update.stage_progress, 0.5);
        assert!(update.sub_stage.is_none());
    }

    #[test]
    fn test_progress_update_with_items() {
        let update = ProgressUpdate::with_items(
            DiagnosticStage::Analyzing,
            "Analyzer: missing",
            3,
            6,
            "Checked missing values",
        );

        assert_eq!(update.items_processed, Some(3));
        assert_eq!(update.items_total, Some(6));
        assert_eq!(update.stage_progress, 0.5);
        assert_eq!(update.sub_stage.as_deref(), Some("Analyzer: missing"));
    }

    #[test]
    fn test_progress_clamped() {
        let update = ProgressUpdate::new(DiagnosticStage::CodeGeneration, 5.0, "over");
        assert!(update.progress <= 1.0);
        assert_eq!(update.stage_progress, 1.0);
    }

    #[test]
    fn test_terminal_updates() {
        assert_eq!(ProgressUpdate::complete("done").progress, 1.0);
        assert_eq!(
            ProgressUpdate::failed("boom").stage,
            DiagnosticStage::Failed
        );
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&DiagnosticStage::CodeGeneration).unwrap();
        assert_eq!(json, "\"code_generation\"");
    }
}
