//! Configuration for the diagnostics pipeline.
//!
//! Every threshold used by the analyzers, the synthesizers and the model
//! ranking lives here as a named constant in [`defaults`] and as a field of
//! [`DiagnosticsConfig`]. Changing any of them changes the observable report.

use serde::{Deserialize, Serialize};

/// Default threshold values.
pub mod defaults {
    /// Columns with a null ratio strictly above this are "high missing".
    pub const MISSING_RATIO_THRESHOLD: f64 = 0.30;
    /// A numeric target with more distinct values than this is treated as regression.
    pub const REGRESSION_UNIQUE_COUNT: usize = 15;
    /// A numeric target whose distinct/rows ratio exceeds this is treated as regression.
    pub const REGRESSION_UNIQUE_RATIO: f64 = 0.05;
    /// More classes than this is flagged as high cardinality.
    pub const HIGH_CARDINALITY_CLASSES: usize = 50;
    /// Minority class share below this is flagged as severe imbalance.
    pub const MINORITY_CLASS_RATIO: f64 = 0.10;
    /// Distinct/rows ratio above which a column looks like an identifier.
    pub const ID_UNIQUE_RATIO: f64 = 0.98;
    /// Absolute correlation with the target above which a feature is a leakage suspect.
    pub const LEAKAGE_CORRELATION: f64 = 0.95;
    /// More classes than this triggers the label-grouping advice.
    pub const LABEL_GROUPING_CLASSES: usize = 15;
    /// Row count above which boosted trees get the large-dataset bonus.
    pub const LARGE_DATASET_ROWS: usize = 2000;
    /// Categorical share above which boosted trees get a bonus.
    pub const BOOSTED_CAT_RATIO: f64 = 0.25;
    /// Categorical share above which linear SVMs get a bonus.
    pub const SVM_CAT_RATIO: f64 = 0.35;
    /// Number of ranked models presented in the report.
    pub const TOP_MODELS: usize = 3;
    /// Maximum number of risks kept by the advice synthesizer.
    pub const MAX_TOP_RISKS: usize = 5;
    /// Maximum number of actions kept by the advice synthesizer.
    pub const MAX_ACTIONS: usize = 10;
}

/// Configuration for the diagnostics pipeline.
///
/// Use [`DiagnosticsConfig::builder()`] for a fluent, validated setup.
///
/// # Example
///
/// ```rust,ignore
/// use datasanity::config::DiagnosticsConfig;
///
/// let config = DiagnosticsConfig::builder()
///     .missing_ratio_threshold(0.5)
///     .parallel_analyzers(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Null ratio above which a column is reported as high missing.
    /// Default: 0.30
    pub missing_ratio_threshold: f64,

    /// Distinct count above which a numeric target is regression.
    /// Default: 15
    pub regression_unique_count: usize,

    /// Distinct/rows ratio above which a numeric target is regression.
    /// Default: 0.05
    pub regression_unique_ratio: f64,

    /// Class count above which the target is flagged as high cardinality.
    /// Default: 50
    pub high_cardinality_classes: usize,

    /// Minority class share below which the target is flagged as imbalanced.
    /// Default: 0.10
    pub minority_class_ratio: f64,

    /// Distinct/rows ratio above which a column is ID-like.
    /// Default: 0.98
    pub id_unique_ratio: f64,

    /// Absolute correlation above which a feature is a leakage suspect.
    /// Default: 0.95
    pub leakage_correlation: f64,

    /// Class count above which label grouping is advised.
    /// Default: 15
    pub label_grouping_classes: usize,

    /// Row count above which boosted trees are favoured.
    /// Default: 2000
    pub large_dataset_rows: usize,

    /// Categorical share above which boosted trees are favoured.
    /// Default: 0.25
    pub boosted_cat_ratio: f64,

    /// Categorical share above which linear SVMs are favoured.
    /// Default: 0.35
    pub svm_cat_ratio: f64,

    /// Number of ranked models presented.
    /// Default: 3
    pub top_models: usize,

    /// Maximum number of risks in the advice.
    /// Default: 5
    pub max_top_risks: usize,

    /// Maximum number of recommended actions in the advice.
    /// Default: 10
    pub max_actions: usize,

    /// Run the six analyzers concurrently.
    /// Default: false
    pub parallel_analyzers: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            missing_ratio_threshold: defaults::MISSING_RATIO_THRESHOLD,
            regression_unique_count: defaults::REGRESSION_UNIQUE_COUNT,
            regression_unique_ratio: defaults::REGRESSION_UNIQUE_RATIO,
            high_cardinality_classes: defaults::HIGH_CARDINALITY_CLASSES,
            minority_class_ratio: defaults::MINORITY_CLASS_RATIO,
            id_unique_ratio: defaults::ID_UNIQUE_RATIO,
            leakage_correlation: defaults::LEAKAGE_CORRELATION,
            label_grouping_classes: defaults::LABEL_GROUPING_CLASSES,
            large_dataset_rows: defaults::LARGE_DATASET_ROWS,
            boosted_cat_ratio: defaults::BOOSTED_CAT_RATIO,
            svm_cat_ratio: defaults::SVM_CAT_RATIO,
            top_models: defaults::TOP_MODELS,
            max_top_risks: defaults::MAX_TOP_RISKS,
            max_actions: defaults::MAX_ACTIONS,
            parallel_analyzers: false,
        }
    }
}

impl DiagnosticsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DiagnosticsConfigBuilder {
        DiagnosticsConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let ratios = [
            ("missing_ratio_threshold", self.missing_ratio_threshold),
            ("regression_unique_ratio", self.regression_unique_ratio),
            ("minority_class_ratio", self.minority_class_ratio),
            ("id_unique_ratio", self.id_unique_ratio),
            ("leakage_correlation", self.leakage_correlation),
            ("boosted_cat_ratio", self.boosted_cat_ratio),
            ("svm_cat_ratio", self.svm_cat_ratio),
        ];
        for (field, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidRatio {
                    field: field.to_string(),
                    value,
                });
            }
        }

        let limits = [
            ("top_models", self.top_models),
            ("max_top_risks", self.max_top_risks),
            ("max_actions", self.max_actions),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigValidationError::ZeroLimit(field.to_string()));
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid ratio for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidRatio { field: String, value: f64 },

    #[error("Invalid limit for '{0}': must be at least 1")]
    ZeroLimit(String),
}

/// Builder for [`DiagnosticsConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct DiagnosticsConfigBuilder {
    missing_ratio_threshold: Option<f64>,
    regression_unique_count: Option<usize>,
    regression_unique_ratio: Option<f64>,
    high_cardinality_classes: Option<usize>,
    minority_class_ratio: Option<f64>,
    id_unique_ratio: Option<f64>,
    leakage_correlation: Option<f64>,
    label_grouping_classes: Option<usize>,
    large_dataset_rows: Option<usize>,
    boosted_cat_ratio: Option<f64>,
    svm_cat_ratio: Option<f64>,
    top_models: Option<usize>,
    max_top_risks: Option<usize>,
    max_actions: Option<usize>,
    parallel_analyzers: Option<bool>,
}

impl DiagnosticsConfigBuilder {
    /// Set the null ratio above which a column is reported.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.3 = 30%)
    pub fn missing_ratio_threshold(mut self, threshold: f64) -> Self {
        self.missing_ratio_threshold = Some(threshold);
        self
    }

    /// Set the distinct count above which a numeric target is regression.
    pub fn regression_unique_count(mut self, count: usize) -> Self {
        self.regression_unique_count = Some(count);
        self
    }

    /// Set the distinct/rows ratio above which a numeric target is regression.
    pub fn regression_unique_ratio(mut self, ratio: f64) -> Self {
        self.regression_unique_ratio = Some(ratio);
        self
    }

    /// Set the class count above which the target is high cardinality.
    pub fn high_cardinality_classes(mut self, count: usize) -> Self {
        self.high_cardinality_classes = Some(count);
        self
    }

    /// Set the minority class share below which the target is imbalanced.
    pub fn minority_class_ratio(mut self, ratio: f64) -> Self {
        self.minority_class_ratio = Some(ratio);
        self
    }

    /// Set the distinct/rows ratio above which a column is ID-like.
    pub fn id_unique_ratio(mut self, ratio: f64) -> Self {
        self.id_unique_ratio = Some(ratio);
        self
    }

    /// Set the absolute correlation above which a feature is a leakage suspect.
    pub fn leakage_correlation(mut self, threshold: f64) -> Self {
        self.leakage_correlation = Some(threshold);
        self
    }

    /// Set the class count above which label grouping is advised.
    pub fn label_grouping_classes(mut self, count: usize) -> Self {
        self.label_grouping_classes = Some(count);
        self
    }

    /// Set the row count above which boosted trees get a bonus.
    pub fn large_dataset_rows(mut self, rows: usize) -> Self {
        self.large_dataset_rows = Some(rows);
        self
    }

    /// Set the categorical share above which boosted trees get a bonus.
    pub fn boosted_cat_ratio(mut self, ratio: f64) -> Self {
        self.boosted_cat_ratio = Some(ratio);
        self
    }

    /// Set the categorical share above which linear SVMs get a bonus.
    pub fn svm_cat_ratio(mut self, ratio: f64) -> Self {
        self.svm_cat_ratio = Some(ratio);
        self
    }

    /// Set how many ranked models are presented.
    pub fn top_models(mut self, n: usize) -> Self {
        self.top_models = Some(n);
        self
    }

    /// Set the maximum number of risks in the advice.
    pub fn max_top_risks(mut self, n: usize) -> Self {
        self.max_top_risks = Some(n);
        self
    }

    /// Set the maximum number of actions in the advice.
    pub fn max_actions(mut self, n: usize) -> Self {
        self.max_actions = Some(n);
        self
    }

    /// Enable or disable running the analyzers concurrently.
    pub fn parallel_analyzers(mut self, parallel: bool) -> Self {
        self.parallel_analyzers = Some(parallel);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `DiagnosticsConfig` or an error if validation fails.
    pub fn build(self) -> Result<DiagnosticsConfig, ConfigValidationError> {
        let base = DiagnosticsConfig::default();
        let config = DiagnosticsConfig {
            missing_ratio_threshold: self
                .missing_ratio_threshold
                .unwrap_or(base.missing_ratio_threshold),
            regression_unique_count: self
                .regression_unique_count
                .unwrap_or(base.regression_unique_count),
            regression_unique_ratio: self
                .regression_unique_ratio
                .unwrap_or(base.regression_unique_ratio),
            high_cardinality_classes: self
                .high_cardinality_classes
                .unwrap_or(base.high_cardinality_classes),
            minority_class_ratio: self
                .minority_class_ratio
                .unwrap_or(base.minority_class_ratio),
            id_unique_ratio: self.id_unique_ratio.unwrap_or(base.id_unique_ratio),
            leakage_correlation: self.leakage_correlation.unwrap_or(base.leakage_correlation),
            label_grouping_classes: self
                .label_grouping_classes
                .unwrap_or(base.label_grouping_classes),
            large_dataset_rows: self.large_dataset_rows.unwrap_or(base.large_dataset_rows),
            boosted_cat_ratio: self.boosted_cat_ratio.unwrap_or(base.boosted_cat_ratio),
            svm_cat_ratio: self.svm_cat_ratio.unwrap_or(base.svm_cat_ratio),
            top_models: self.top_models.unwrap_or(base.top_models),
            max_top_risks: self.max_top_risks.unwrap_or(base.max_top_risks),
            max_actions: self.max_actions.unwrap_or(base.max_actions),
            parallel_analyzers: self.parallel_analyzers.unwrap_or(base.parallel_analyzers),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiagnosticsConfig::default();
        assert_eq!(config.missing_ratio_threshold, 0.30);
        assert_eq!(config.regression_unique_count, 15);
        assert_eq!(config.regression_unique_ratio, 0.05);
        assert_eq!(config.high_cardinality_classes, 50);
        assert_eq!(config.id_unique_ratio, 0.98);
        assert_eq!(config.leakage_correlation, 0.95);
        assert_eq!(config.top_models, 3);
        assert!(!config.parallel_analyzers);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = DiagnosticsConfig::builder().build().unwrap();
        assert_eq!(config, DiagnosticsConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = DiagnosticsConfig::builder()
            .missing_ratio_threshold(0.5)
            .leakage_correlation(0.9)
            .top_models(2)
            .parallel_analyzers(true)
            .build()
            .unwrap();

        assert_eq!(config.missing_ratio_threshold, 0.5);
        assert_eq!(config.leakage_correlation, 0.9);
        assert_eq!(config.top_models, 2);
        assert!(config.parallel_analyzers);
    }

    #[test]
    fn test_validation_invalid_ratio() {
        let result = DiagnosticsConfig::builder().id_unique_ratio(1.5).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidRatio { ref field, .. } if field == "id_unique_ratio"
        ));
    }

    #[test]
    fn test_validation_zero_limit() {
        let result = DiagnosticsConfig::builder().max_actions(0).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ZeroLimit(ref field) if field == "max_actions"
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "missing_ratio_threshold": 0.5, "parallel_analyzers": true }"#;
        let config: DiagnosticsConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.missing_ratio_threshold, 0.5);
        assert!(config.parallel_analyzers);
        assert_eq!(config.leakage_correlation, defaults::LEAKAGE_CORRELATION);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = DiagnosticsConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DiagnosticsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
