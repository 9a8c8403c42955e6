//! Target inspection: task inference and class balance.

use crate::config::DiagnosticsConfig;
use crate::types::{ImbalanceResult, TaskHint};
use crate::utils::{NULL_LABEL, distinct_count_with_nulls, is_numeric_dtype, text_values};
use anyhow::Result;
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const REGRESSION_RECOMMENDATION: &str = "Target looks continuous / high-cardinality. Consider regression, \
     or bin the target into fewer groups before classification.";
const REGRESSION_WARNING: &str =
    "Target likely better treated as regression (or binned classification).";
const HIGH_CARDINALITY_WARNING: &str = "High number of classes. Consider binning/label grouping.";
const HIGH_CARDINALITY_RECOMMENDATION: &str =
    "Reduce class cardinality (binning) or revisit target definition.";
const IMBALANCE_WARNING: &str = "Severe class imbalance detected.";
const IMBALANCE_RECOMMENDATION: &str =
    "Consider stratified split, class weights, resampling, and metrics like macro-F1.";
const BALANCED_RECOMMENDATION: &str = "No severe imbalance detected.";

/// Infers classification vs. regression and inspects the class distribution.
pub struct ImbalanceAnalyzer;

impl ImbalanceAnalyzer {
    pub fn analyze(
        df: &DataFrame,
        target: &str,
        config: &DiagnosticsConfig,
    ) -> Result<ImbalanceResult> {
        let Ok(column) = df.column(target) else {
            debug!("Target column '{}' not present, skipping imbalance check", target);
            return Ok(ImbalanceResult {
                error: Some(format!("Target column '{}' not found.", target)),
                ..Default::default()
            });
        };

        let series = column.as_materialized_series();
        let n_rows = series.len();
        let n_unique = distinct_count_with_nulls(series)?;
        let is_numeric = is_numeric_dtype(series.dtype());

        let unique_ratio = n_unique as f64 / n_rows.max(1) as f64;
        let likely_regression = is_numeric
            && (n_unique > config.regression_unique_count
                || unique_ratio > config.regression_unique_ratio);

        debug!(
            "Target '{}': {} rows, {} distinct, numeric={}, unique_ratio={:.3}",
            target, n_rows, n_unique, is_numeric, unique_ratio
        );

        let distribution = class_distribution(series)?;

        if likely_regression {
            return Ok(ImbalanceResult {
                n_rows,
                n_unique,
                is_numeric,
                task_hint: TaskHint::Regression,
                distribution,
                warning: Some(REGRESSION_WARNING.to_string()),
                recommendation: Some(REGRESSION_RECOMMENDATION.to_string()),
                ..Default::default()
            });
        }

        let minority_ratio = distribution.values().copied().reduce(f64::min);

        let (warning, recommendation) = if n_unique > config.high_cardinality_classes {
            (
                Some(HIGH_CARDINALITY_WARNING),
                HIGH_CARDINALITY_RECOMMENDATION,
            )
        } else if minority_ratio.is_some_and(|r| r < config.minority_class_ratio) {
            (Some(IMBALANCE_WARNING), IMBALANCE_RECOMMENDATION)
        } else {
            (None, BALANCED_RECOMMENDATION)
        };

        Ok(ImbalanceResult {
            n_rows,
            n_unique,
            is_numeric,
            task_hint: TaskHint::Classification,
            distribution,
            minority_ratio,
            warning: warning.map(String::from),
            recommendation: Some(recommendation.to_string()),
            error: None,
        })
    }
}

/// Share of rows per distinct value, nulls grouped under [`NULL_LABEL`].
fn class_distribution(series: &Series) -> Result<BTreeMap<String, f64>> {
    let n_rows = series.len();
    if n_rows == 0 {
        return Ok(BTreeMap::new());
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in text_values(series)? {
        let label = value.unwrap_or_else(|| NULL_LABEL.to_string());
        *counts.entry(label).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / n_rows as f64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(df: &DataFrame, target: &str) -> ImbalanceResult {
        ImbalanceAnalyzer::analyze(df, target, &DiagnosticsConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_target_reports_error() {
        let df = df!["a" => [1, 2, 3]].unwrap();
        let result = analyze(&df, "label");

        assert_eq!(result.error.as_deref(), Some("Target column 'label' not found."));
        assert!(result.warning.is_none());
        assert_eq!(result.n_unique, 0);
    }

    #[test]
    fn test_high_cardinality_numeric_target_is_regression() {
        let values: Vec<f64> = (0..1000).map(|i| (i % 999) as f64 * 1.5).collect();
        let df = df!["y" => values].unwrap();
        let result = analyze(&df, "y");

        assert_eq!(result.n_unique, 999);
        assert!(result.is_numeric);
        assert_eq!(result.task_hint, TaskHint::Regression);
        assert_eq!(result.warning.as_deref(), Some(REGRESSION_WARNING));
        assert!(result.recommendation.unwrap().contains("regression"));
        assert_eq!(result.distribution.len(), 999);
        assert!(result.minority_ratio.is_none());
    }

    #[test]
    fn test_regression_target_keeps_value_distribution() {
        let values: Vec<i64> = (0..100).map(|i| i % 20).collect();
        let df = df!["x" => vec![1i64; 100], "y" => values].unwrap();
        let result = analyze(&df, "y");

        assert_eq!(result.task_hint, TaskHint::Regression);
        assert_eq!(result.distribution.len(), 20);
        assert!((result.distribution["7"] - 0.05).abs() < 1e-12);
        assert_eq!(result.warning.as_deref(), Some(REGRESSION_WARNING));
    }

    #[test]
    fn test_string_categories_are_classification() {
        let labels: Vec<&str> = (0..30).map(|i| ["cat", "dog", "bird"][i % 3]).collect();
        let df = df!["animal" => labels].unwrap();
        let result = analyze(&df, "animal");

        assert_eq!(result.task_hint, TaskHint::Classification);
        assert_eq!(result.n_unique, 3);
        assert!(!result.is_numeric);
        assert_eq!(result.distribution.len(), 3);
        assert!((result.distribution["dog"] - 1.0 / 3.0).abs() < 1e-12);
        assert!(result.warning.is_none());
        assert_eq!(result.recommendation.as_deref(), Some(BALANCED_RECOMMENDATION));
    }

    #[test]
    fn test_numeric_binary_target_with_many_rows_is_classification() {
        let labels: Vec<i64> = (0..100).map(|i| i % 2).collect();
        let df = df!["label" => labels].unwrap();
        let result = analyze(&df, "label");

        assert_eq!(result.task_hint, TaskHint::Classification);
        assert_eq!(result.minority_ratio, Some(0.5));
    }

    #[test]
    fn test_unique_ratio_pushes_small_numeric_target_to_regression() {
        // 3 distinct values in 20 rows is a 15% unique ratio
        let df = df!["y" => [1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2]].unwrap();
        assert_eq!(analyze(&df, "y").task_hint, TaskHint::Regression);
    }

    #[test]
    fn test_severe_imbalance_flagged() {
        let labels: Vec<&str> = (0..100).map(|i| if i < 95 { "no" } else { "yes" }).collect();
        let df = df!["churn" => labels].unwrap();
        let result = analyze(&df, "churn");

        assert_eq!(result.warning.as_deref(), Some(IMBALANCE_WARNING));
        assert!((result.minority_ratio.unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_high_cardinality_classes_flagged() {
        let labels: Vec<String> = (0..120).map(|i| format!("class_{}", i % 60)).collect();
        let df = df!["label" => labels].unwrap();
        let result = analyze(&df, "label");

        assert_eq!(result.n_unique, 60);
        assert_eq!(result.warning.as_deref(), Some(HIGH_CARDINALITY_WARNING));
    }

    #[test]
    fn test_null_bucket_counts_as_class() {
        let df = df!["label" => [Some("a"), Some("b"), None, Some("a")]].unwrap();
        let result = analyze(&df, "label");

        assert_eq!(result.n_unique, 3);
        assert_eq!(result.distribution[NULL_LABEL], 0.25);
    }
}
