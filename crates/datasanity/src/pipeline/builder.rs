//! Diagnostics pipeline and its builder.

use crate::checks::{
    recover, ConstantColumnAnalyzer, DuplicateRowAnalyzer, IdColumnAnalyzer, ImbalanceAnalyzer,
    LeakageAnalyzer, MissingValueAnalyzer,
};
use crate::config::{ConfigValidationError, DiagnosticsConfig};
use crate::error::{DiagnosticsError, Result};
use crate::pipeline::progress::{
    ClosureProgressReporter, DiagnosticStage, ProgressReporter, ProgressUpdate,
};
use crate::reporting::CodeTemplateGenerator;
use crate::suggest::ModelSuggestionEngine;
use crate::synthesis::{AdviceSynthesizer, SeveritySynthesizer};
use crate::types::{AnalyzerResults, DiagnosticReport};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

const ANALYZER_COUNT: usize = 6;

/// Runs every check on a dataset and assembles the [`DiagnosticReport`].
///
/// A pipeline holds no per-run state; one instance can diagnose any number
/// of datasets, from any number of threads.
///
/// # Example
///
/// ```rust,ignore
/// use datasanity::{DiagnosticsConfig, DiagnosticsPipeline};
///
/// let report = DiagnosticsPipeline::builder()
///     .config(DiagnosticsConfig::builder().parallel_analyzers(true).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run(&df, "label")?;
///
/// println!("{} ({})", report.severity.score, report.severity.risk_level);
/// ```
pub struct DiagnosticsPipeline {
    config: DiagnosticsConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(DiagnosticsPipeline: Send, Sync);

impl DiagnosticsPipeline {
    pub fn builder() -> DiagnosticsPipelineBuilder {
        DiagnosticsPipelineBuilder::default()
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Diagnose `df` for predicting `target`.
    ///
    /// # Errors
    ///
    /// Fails only when the run cannot start: a dataset without columns
    /// ([`DiagnosticsError::EmptyDataset`]) or a blank target name
    /// ([`DiagnosticsError::InvalidTarget`]). A target that names no column,
    /// and any analyzer failure, are recorded inside the report instead.
    pub fn run(&self, df: &DataFrame, target: &str) -> Result<DiagnosticReport> {
        match self.run_internal(df, target) {
            Ok(report) => {
                self.report_progress(ProgressUpdate::complete("Diagnostics completed"));
                Ok(report)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Diagnostics error: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self, df: &DataFrame, target: &str) -> Result<DiagnosticReport> {
        let start_time = Instant::now();

        info!(
            "Starting diagnostics: {} rows x {} columns, target '{}'",
            df.height(),
            df.width(),
            target
        );
        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Initializing,
            0.0,
            "Validating input...",
        ));
        Self::validate_input(df, target)?;

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Analyzing,
            0.0,
            "Running dataset checks...",
        ));
        let analyzers = if self.config.parallel_analyzers {
            debug!("Running analyzers in parallel");
            let results = self.run_analyzers_parallel(df, target);
            self.report_progress(ProgressUpdate::new(
                DiagnosticStage::Analyzing,
                1.0,
                "All checks finished",
            ));
            results
        } else {
            self.run_analyzers_sequential(df, target)
        };

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Scoring,
            0.0,
            "Scoring dataset risk...",
        ));
        let severity = SeveritySynthesizer::synthesize(&analyzers);
        info!(
            "Severity: {} ({})",
            severity.score,
            severity.risk_level.label()
        );

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Advising,
            0.0,
            "Synthesizing advice...",
        ));
        let advice = AdviceSynthesizer::synthesize(&analyzers, &self.config);

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Suggesting,
            0.0,
            "Ranking candidate models...",
        ));
        let model_suggestion = ModelSuggestionEngine::suggest(df, target, &analyzers, &self.config);
        if let Some(best) = model_suggestion.best() {
            info!("Top model suggestion: {}", best.model_name);
        }

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::CodeGeneration,
            0.0,
            "Rendering training script...",
        ));
        let code_snippet = CodeTemplateGenerator::generate(&model_suggestion, target);

        let report = DiagnosticReport {
            shape: (df.height(), df.width()),
            target: target.to_string(),
            analyzers,
            advice,
            severity,
            model_suggestion,
            code_snippet,
        };
        for (analyzer, message) in report.analyzer_errors() {
            debug!("Analyzer '{}' reported: {}", analyzer, message);
        }
        info!("Diagnostics finished in {:?}", start_time.elapsed());

        Ok(report)
    }

    fn validate_input(df: &DataFrame, target: &str) -> Result<()> {
        if df.width() == 0 {
            return Err(DiagnosticsError::EmptyDataset(
                "dataset has no columns".to_string(),
            ));
        }
        if target.trim().is_empty() {
            return Err(DiagnosticsError::InvalidTarget(
                "target column name is empty".to_string(),
            ));
        }
        Ok(())
    }

    fn run_analyzers_sequential(&self, df: &DataFrame, target: &str) -> AnalyzerResults {
        let config = &self.config;
        let step = |n: usize, name: &str| {
            self.report_progress(ProgressUpdate::with_items(
                DiagnosticStage::Analyzing,
                format!("Analyzer: {}", name),
                n,
                ANALYZER_COUNT,
                format!("Checked {}", name),
            ));
        };

        let imbalance = recover("imbalance", ImbalanceAnalyzer::analyze(df, target, config));
        step(1, "imbalance");
        let missing = recover("missing", MissingValueAnalyzer::analyze(df, config));
        step(2, "missing");
        let constants = recover("constants", ConstantColumnAnalyzer::analyze(df));
        step(3, "constants");
        let id_columns = recover("id_columns", IdColumnAnalyzer::analyze(df, config));
        step(4, "id_columns");
        let duplicates = recover("duplicates", DuplicateRowAnalyzer::analyze(df));
        step(5, "duplicates");
        let leakage = recover("leakage", LeakageAnalyzer::analyze(df, target, config));
        step(6, "leakage");

        AnalyzerResults {
            imbalance,
            missing,
            constants,
            id_columns,
            duplicates,
            leakage,
        }
    }

    fn run_analyzers_parallel(&self, df: &DataFrame, target: &str) -> AnalyzerResults {
        let config = &self.config;
        let ((imbalance, missing), ((constants, id_columns), (duplicates, leakage))) = rayon::join(
            || {
                rayon::join(
                    || recover("imbalance", ImbalanceAnalyzer::analyze(df, target, config)),
                    || recover("missing", MissingValueAnalyzer::analyze(df, config)),
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || recover("constants", ConstantColumnAnalyzer::analyze(df)),
                            || recover("id_columns", IdColumnAnalyzer::analyze(df, config)),
                        )
                    },
                    || {
                        rayon::join(
                            || recover("duplicates", DuplicateRowAnalyzer::analyze(df)),
                            || recover("leakage", LeakageAnalyzer::analyze(df, target, config)),
                        )
                    },
                )
            },
        );

        AnalyzerResults {
            imbalance,
            missing,
            constants,
            id_columns,
            duplicates,
            leakage,
        }
    }
}

/// Builder for [`DiagnosticsPipeline`].
#[derive(Default)]
pub struct DiagnosticsPipelineBuilder {
    config: Option<DiagnosticsConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(DiagnosticsPipelineBuilder: Send);

impl DiagnosticsPipelineBuilder {
    pub fn config(mut self, config: DiagnosticsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during a run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<DiagnosticsPipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(DiagnosticsPipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_df() -> DataFrame {
        df![
            "city" => ["a", "b", "c", "a", "b", "c"],
            "age" => [20, 30, 40, 20, 30, 40],
            "label" => ["x", "y", "x", "y", "x", "y"],
        ]
        .unwrap()
    }

    #[test]
    fn test_pipeline_builder_default() {
        let pipeline = DiagnosticsPipeline::builder().build().unwrap();
        assert_eq!(pipeline.config(), &DiagnosticsConfig::default());
        assert!(pipeline.progress_reporter.is_none());
    }

    #[test]
    fn test_pipeline_builder_rejects_invalid_config() {
        let mut config = DiagnosticsConfig::default();
        config.top_models = 0;

        assert!(DiagnosticsPipeline::builder().config(config).build().is_err());
    }

    #[test]
    fn test_empty_dataset_is_fatal() {
        let pipeline = DiagnosticsPipeline::builder().build().unwrap();
        let err = pipeline.run(&DataFrame::empty(), "label").unwrap_err();

        assert!(matches!(err, DiagnosticsError::EmptyDataset(_)));
    }

    #[test]
    fn test_blank_target_is_fatal() {
        let pipeline = DiagnosticsPipeline::builder().build().unwrap();
        let err = pipeline.run(&sample_df(), "  ").unwrap_err();

        assert!(matches!(err, DiagnosticsError::InvalidTarget(_)));
    }

    #[test]
    fn test_missing_target_is_soft() {
        let pipeline = DiagnosticsPipeline::builder().build().unwrap();
        let report = pipeline.run(&sample_df(), "nope").unwrap();

        assert!(report.analyzers.imbalance.error.is_some());
        assert!(report.analyzers.leakage.skipped_reason.is_some());
        assert_eq!(report.analyzer_errors().len(), 1);
        assert_eq!(report.shape, (6, 3));
    }

    #[test]
    fn test_progress_reports_every_stage_in_order() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink = stages.clone();

        let pipeline = DiagnosticsPipeline::builder()
            .on_progress(move |update| {
                sink.lock().unwrap().push(update.stage);
            })
            .build()
            .unwrap();
        pipeline.run(&sample_df(), "label").unwrap();

        let mut seen = stages.lock().unwrap().clone();
        seen.dedup();
        assert_eq!(
            seen,
            vec![
                DiagnosticStage::Initializing,
                DiagnosticStage::Analyzing,
                DiagnosticStage::Scoring,
                DiagnosticStage::Advising,
                DiagnosticStage::Suggesting,
                DiagnosticStage::CodeGeneration,
                DiagnosticStage::Complete,
            ]
        );
    }

    #[test]
    fn test_failure_is_reported() {
        let failures = Arc::new(AtomicUsize::new(0));
        let counter = failures.clone();

        let pipeline = DiagnosticsPipeline::builder()
            .on_progress(move |update| {
                if update.stage == DiagnosticStage::Failed {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            })
            .build()
            .unwrap();
        let _ = pipeline.run(&DataFrame::empty(), "label");

        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let df = sample_df();
        let sequential = DiagnosticsPipeline::builder().build().unwrap();
        let parallel = DiagnosticsPipeline::builder()
            .config(
                DiagnosticsConfig::builder()
                    .parallel_analyzers(true)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(
            sequential.run(&df, "label").unwrap(),
            parallel.run(&df, "label").unwrap()
        );
    }
}
