//! Per-column missingness.

use crate::config::DiagnosticsConfig;
use crate::types::{MissingColumn, MissingResult};
use crate::utils::missing_count;
use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

pub struct MissingValueAnalyzer;

impl MissingValueAnalyzer {
    /// Report columns whose null ratio exceeds the configured threshold,
    /// most-missing first.
    pub fn analyze(df: &DataFrame, config: &DiagnosticsConfig) -> Result<MissingResult> {
        let n_rows = df.height();
        let mut high_missing = Vec::new();

        // an empty frame has no missing cells to speak of
        if n_rows > 0 {
            for column in df.get_columns() {
                let series = column.as_materialized_series();
                let ratio = missing_count(series)? as f64 / n_rows as f64;
                if ratio > config.missing_ratio_threshold {
                    high_missing.push(MissingColumn {
                        column: series.name().to_string(),
                        ratio,
                    });
                }
            }
        }

        // stable: equal ratios keep column order
        high_missing.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));

        debug!("{} columns above missing threshold", high_missing.len());

        let warning = (!high_missing.is_empty()).then(|| {
            format!(
                "Columns with >{:.0}% missing values detected.",
                config.missing_ratio_threshold * 100.0
            )
        });

        Ok(MissingResult {
            high_missing_columns: high_missing,
            warning,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(df: &DataFrame) -> MissingResult {
        MissingValueAnalyzer::analyze(df, &DiagnosticsConfig::default()).unwrap()
    }

    #[test]
    fn test_selects_and_sorts_high_missing_columns() {
        let df = df![
            "full" => [Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7), Some(8), Some(9), Some(10)],
            "some" => [Some(1.0), None, None, None, None, Some(6.0), Some(7.0), Some(8.0), Some(9.0), Some(10.0)],
            "most" => [None, None, None, None, None, None, None, Some("x"), Some("y"), Some("z")],
            "edge" => [None, None, None, Some(4), Some(5), Some(6), Some(7), Some(8), Some(9), Some(10)],
        ]
        .unwrap();

        let result = analyze(&df);
        let names: Vec<&str> = result
            .high_missing_columns
            .iter()
            .map(|c| c.column.as_str())
            .collect();

        // "edge" sits exactly on 0.30 and is not selected
        assert_eq!(names, vec!["most", "some"]);
        assert!((result.high_missing_columns[0].ratio - 0.7).abs() < 1e-12);
        assert!((result.high_missing_columns[1].ratio - 0.4).abs() < 1e-12);
        assert!(result.warning.unwrap().contains("30%"));
    }

    #[test]
    fn test_fully_null_column_has_ratio_one() {
        let df = df![
            "a" => [1, 2, 3],
            "empty" => [None::<i32>, None, None],
        ]
        .unwrap();

        let result = analyze(&df);
        assert_eq!(result.high_missing_columns.len(), 1);
        assert_eq!(result.high_missing_columns[0].ratio, 1.0);
    }

    #[test]
    fn test_no_missing_no_warning() {
        let df = df!["a" => [1, 2, 3], "b" => ["x", "y", "z"]].unwrap();
        let result = analyze(&df);

        assert!(result.high_missing_columns.is_empty());
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_zero_rows_is_clean() {
        let df = df!["a" => Vec::<i64>::new()].unwrap();
        let result = analyze(&df);

        assert!(result.high_missing_columns.is_empty());
        assert!(result.warning.is_none());
    }
}
