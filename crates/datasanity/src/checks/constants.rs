use crate::types::ConstantsResult;
use crate::utils::distinct_count_with_nulls;
use anyhow::Result;
use polars::prelude::*;

/// Flags columns holding at most one distinct value (null counts as a value).
pub struct ConstantColumnAnalyzer;

impl ConstantColumnAnalyzer {
    pub fn analyze(df: &DataFrame) -> Result<ConstantsResult> {
        let mut constant_columns = Vec::new();
        for column in df.get_columns() {
            let series = column.as_materialized_series();
            if distinct_count_with_nulls(series)? <= 1 {
                constant_columns.push(series.name().to_string());
            }
        }

        let warning = (!constant_columns.is_empty())
            .then(|| "Constant columns detected.".to_string());

        Ok(ConstantsResult {
            constant_columns,
            warning,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_identical_and_all_null_columns() {
        let df = df![
            "same" => ["a", "a", "a", "a"],
            "nothing" => [None::<f64>, None, None, None],
            "two" => [1, 2, 1, 2],
        ]
        .unwrap();

        let result = ConstantColumnAnalyzer::analyze(&df).unwrap();
        assert_eq!(result.constant_columns, vec!["same", "nothing"]);
        assert_eq!(result.warning.as_deref(), Some("Constant columns detected."));
    }

    #[test]
    fn test_value_plus_null_is_not_constant() {
        let df = df!["sparse" => [Some(3), None, Some(3)]].unwrap();
        let result = ConstantColumnAnalyzer::analyze(&df).unwrap();

        assert!(result.constant_columns.is_empty());
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_two_valued_column_never_constant() {
        let flags: Vec<bool> = (0..50).map(|i| i == 0).collect();
        let df = df!["flag" => flags].unwrap();

        let result = ConstantColumnAnalyzer::analyze(&df).unwrap();
        assert!(result.constant_columns.is_empty());
    }
}
