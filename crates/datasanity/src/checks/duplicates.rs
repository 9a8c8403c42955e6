use crate::types::DuplicatesResult;
use anyhow::Result;
use polars::prelude::*;

/// Counts rows that repeat an earlier row across every column.
pub struct DuplicateRowAnalyzer;

impl DuplicateRowAnalyzer {
    pub fn analyze(df: &DataFrame) -> Result<DuplicatesResult> {
        let n_rows = df.height();
        if n_rows == 0 || df.width() == 0 {
            return Ok(DuplicatesResult::default());
        }

        let num_duplicates = n_rows
            - df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
                .height();
        let duplicate_ratio = num_duplicates as f64 / n_rows as f64;

        let warning = (num_duplicates > 0).then(|| "Duplicate rows found.".to_string());

        Ok(DuplicatesResult {
            num_duplicates,
            duplicate_ratio,
            warning,
            error: None,
        })
    }
}
