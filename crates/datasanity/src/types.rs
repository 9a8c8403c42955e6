//! Data model shared by the analyzers, the synthesizers and the report.
//!
//! Every type here is plain serializable data. Field names are the wire
//! names consumed by presentation layers, so renaming one is a breaking
//! change for them.

use crate::suggest::ModelFamily;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Task Hint
// ============================================================================

/// Inferred problem type for the target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskHint {
    #[default]
    Classification,
    Regression,
}

impl TaskHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Regression => "regression",
        }
    }
}

impl fmt::Display for TaskHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Analyzer Results
// ============================================================================

/// Target distribution and task inference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceResult {
    pub n_rows: usize,
    /// Distinct target values, the null bucket counted as one.
    pub n_unique: usize,
    pub is_numeric: bool,
    pub task_hint: TaskHint,
    /// Value label -> share of rows, nulls under `"null"`.
    pub distribution: BTreeMap<String, f64>,
    /// Share of the rarest class, when the target is a classification target.
    pub minority_ratio: Option<f64>,
    pub warning: Option<String>,
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A column whose null ratio crossed the missingness threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub column: String,
    pub ratio: f64,
}

/// Columns with a high share of missing values, most-missing first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingResult {
    pub high_missing_columns: Vec<MissingColumn>,
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantsResult {
    pub constant_columns: Vec<String>,
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdColumnsResult {
    pub id_like_columns: Vec<String>,
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicatesResult {
    /// Rows repeating an earlier row; the first occurrence is not counted.
    pub num_duplicates: usize,
    pub duplicate_ratio: f64,
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Absolute correlation of one feature with the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCorrelation {
    pub feature: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeakageResult {
    /// Suspect features, strongest correlation first.
    pub suspicious_features: Vec<String>,
    pub correlations: Vec<FeatureCorrelation>,
    pub warning: Option<String>,
    /// Why the check did not look at any feature (e.g. non-numeric target).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The outputs of all six analyzers, consumed read-only by the synthesizers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerResults {
    pub imbalance: ImbalanceResult,
    pub missing: MissingResult,
    pub constants: ConstantsResult,
    pub id_columns: IdColumnsResult,
    pub duplicates: DuplicatesResult,
    pub leakage: LeakageResult,
}

// ============================================================================
// Severity
// ============================================================================

/// Discrete risk tier derived from the severity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Tier for a 0-100 score.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => Self::Low,
            30..=69 => Self::Moderate,
            _ => Self::High,
        }
    }

    /// Human-readable label, e.g. "Moderate risk".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low risk",
            Self::Moderate => "Moderate risk",
            Self::High => "High risk",
        }
    }

    pub fn color(&self) -> RiskColor {
        match self {
            Self::Low => RiskColor::Green,
            Self::Moderate => RiskColor::Yellow,
            Self::High => RiskColor::Red,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityResult {
    /// 0 (clean) to 100 (riskiest).
    pub score: u8,
    pub risk_level: RiskLevel,
    pub color: RiskColor,
    /// One entry per triggered signal, in weighting-table order.
    pub reasons: Vec<String>,
}

// ============================================================================
// Advice
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub task_hint: TaskHint,
    pub top_risks: Vec<String>,
    pub recommended_actions: Vec<String>,
}

// ============================================================================
// Model Suggestions
// ============================================================================

/// One ranked catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSuggestion {
    pub model_name: String,
    pub family: ModelFamily,
    pub score: u32,
    pub why: Vec<String>,
    pub when_to_use: Vec<String>,
    pub notes: Vec<String>,
}

/// Feature composition, target excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMix {
    pub n_numeric: usize,
    pub n_categorical: usize,
    /// `n_categorical / n_features`, rounded to 3 decimals; 0.0 without features.
    pub cat_ratio: f64,
}

/// Recommended first training recipe for the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselinePlan {
    pub split: String,
    pub metrics: Vec<String>,
    pub pipeline: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSuggestionSet {
    pub task_hint: TaskHint,
    pub n_rows: usize,
    pub n_features: usize,
    pub feature_mix: FeatureMix,
    /// The best-ranked suggestions, at most the configured `top_models`.
    pub top_models: Vec<ModelSuggestion>,
    pub baseline_plan: BaselinePlan,
    /// Every candidate considered, in ranked order.
    #[serde(skip)]
    pub(crate) ranked: Vec<ModelSuggestion>,
}

impl ModelSuggestionSet {
    /// All candidates in ranked order, including those cut from `top_models`.
    pub fn ranked_models(&self) -> &[ModelSuggestion] {
        &self.ranked
    }

    /// The best-ranked suggestion, if any candidate was considered.
    pub fn best(&self) -> Option<&ModelSuggestion> {
        self.top_models.first()
    }
}

// ============================================================================
// Report
// ============================================================================

/// Everything the pipeline learned about one (dataset, target) pair.
///
/// Built once by [`crate::pipeline::DiagnosticsPipeline`] and never mutated
/// afterwards. Analyzer results are flattened to the top level of the
/// serialized form (`imbalance`, `missing`, `constants`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub target: String,
    #[serde(flatten)]
    pub analyzers: AnalyzerResults,
    pub advice: AdviceResult,
    pub severity: SeverityResult,
    pub model_suggestion: ModelSuggestionSet,
    pub code_snippet: String,
}

impl DiagnosticReport {
    /// (analyzer, message) for every analyzer that could not complete.
    pub fn analyzer_errors(&self) -> Vec<(&'static str, &str)> {
        let a = &self.analyzers;
        [
            ("imbalance", a.imbalance.error.as_deref()),
            ("missing", a.missing.error.as_deref()),
            ("constants", a.constants.error.as_deref()),
            ("id_columns", a.id_columns.error.as_deref()),
            ("duplicates", a.duplicates.error.as_deref()),
            ("leakage", a.leakage.error.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, err)| err.map(|e| (name, e)))
        .collect()
    }

    /// Warnings raised by the analyzers, in pipeline order.
    pub fn warnings(&self) -> Vec<&str> {
        let a = &self.analyzers;
        [
            a.imbalance.warning.as_deref(),
            a.missing.warning.as_deref(),
            a.constants.warning.as_deref(),
            a.id_columns.warning.as_deref(),
            a.duplicates.warning.as_deref(),
            a.leakage.warning.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
