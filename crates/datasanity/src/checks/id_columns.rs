//! Identifier-like columns.

use crate::config::DiagnosticsConfig;
use crate::types::IdColumnsResult;
use crate::utils::distinct_count_with_nulls;
use anyhow::Result;
use polars::prelude::*;

/// Flags columns whose values are almost all distinct.
pub struct IdColumnAnalyzer;

impl IdColumnAnalyzer {
    /// A column is ID-like when its distinct count (nulls counted) exceeds
    /// `id_unique_ratio * rows`. An empty frame yields an empty result.
    pub fn analyze(df: &DataFrame, config: &DiagnosticsConfig) -> Result<IdColumnsResult> {
        let n_rows = df.height();
        if n_rows == 0 {
            return Ok(IdColumnsResult::default());
        }

        let limit = config.id_unique_ratio * n_rows as f64;
        let mut id_like_columns = Vec::new();
        for column in df.get_columns() {
            let series = column.as_materialized_series();
            if distinct_count_with_nulls(series)? as f64 > limit {
                id_like_columns.push(series.name().to_string());
            }
        }

        let warning =
            (!id_like_columns.is_empty()).then(|| "ID-like columns detected.".to_string());

        Ok(IdColumnsResult {
            id_like_columns,
            warning,
            error: None,
        })
    }
}
