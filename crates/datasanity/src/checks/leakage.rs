//! Target leakage via correlation with a numeric target.

use crate::config::DiagnosticsConfig;
use crate::types::{FeatureCorrelation, LeakageResult};
use crate::utils::{is_numeric_dtype, numeric_values, pearson_correlation};
use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

/// Flags numeric features whose absolute Pearson correlation with a numeric
/// target is near perfect.
///
/// Categorical targets are out of scope: the result is empty and carries a
/// `skipped_reason`. Correlations that are undefined (constant columns, too
/// few complete pairs) are dropped rather than treated as zero.
pub struct LeakageAnalyzer;

impl LeakageAnalyzer {
    pub fn analyze(
        df: &DataFrame,
        target: &str,
        config: &DiagnosticsConfig,
    ) -> Result<LeakageResult> {
        let Ok(target_column) = df.column(target) else {
            return Ok(skipped(format!("Target column '{}' not found.", target)));
        };
        if !is_numeric_dtype(target_column.dtype()) {
            return Ok(skipped(
                "Target is not numeric; leakage is only checked for numeric targets.".to_string(),
            ));
        }

        let target_values = numeric_values(target_column.as_materialized_series())?;

        let features: Vec<&Column> = df
            .get_columns()
            .iter()
            .filter(|c| c.name().as_str() != target && is_numeric_dtype(c.dtype()))
            .collect();
        if features.is_empty() {
            return Ok(skipped(
                "No numeric features to compare against the target.".to_string(),
            ));
        }

        let mut correlations = Vec::new();
        for column in features {
            let values = numeric_values(column.as_materialized_series())?;
            match pearson_correlation(&values, &target_values) {
                Some(r) if r.abs() > config.leakage_correlation => {
                    correlations.push(FeatureCorrelation {
                        feature: column.name().to_string(),
                        correlation: r.abs(),
                    });
                }
                Some(_) => {}
                None => debug!("Correlation of '{}' with target is undefined", column.name()),
            }
        }

        correlations.sort_by(|a, b| b.correlation.total_cmp(&a.correlation));
        let suspicious_features: Vec<String> =
            correlations.iter().map(|c| c.feature.clone()).collect();

        let warning = (!suspicious_features.is_empty())
            .then(|| "Possible target leakage detected.".to_string());

        Ok(LeakageResult {
            suspicious_features,
            correlations,
            warning,
            skipped_reason: None,
            error: None,
        })
    }
}

fn skipped(reason: String) -> LeakageResult {
    LeakageResult {
        skipped_reason: Some(reason),
        ..Default::default()
    }
}
