//! Additive 0-100 risk score over the analyzer flags.

use crate::types::{AnalyzerResults, RiskLevel, SeverityResult};

const IMBALANCE_WEIGHT: u32 = 30;
const ID_COLUMNS_WEIGHT: u32 = 20;
const HIGH_MISSING_WEIGHT: u32 = 30;
const LEAKAGE_WEIGHT: u32 = 40;
const DUPLICATES_WEIGHT: u32 = 10;

const MAX_SCORE: u32 = 100;

pub struct SeveritySynthesizer;

impl SeveritySynthesizer {
    /// Score the analyzer results.
    ///
    /// Each signal contributes its fixed weight when triggered; the sum is
    /// capped at 100. Errored analyzers carry no flags and add nothing.
    pub fn synthesize(results: &AnalyzerResults) -> SeverityResult {
        let signals = [
            (
                results.imbalance.warning.is_some(),
                IMBALANCE_WEIGHT,
                "Class imbalance detected",
            ),
            (
                !results.id_columns.id_like_columns.is_empty(),
                ID_COLUMNS_WEIGHT,
                "ID-like columns present",
            ),
            (
                !results.missing.high_missing_columns.is_empty(),
                HIGH_MISSING_WEIGHT,
                "Columns with high missing values",
            ),
            (
                !results.leakage.suspicious_features.is_empty(),
                LEAKAGE_WEIGHT,
                "Potential target leakage",
            ),
            (
                results.duplicates.num_duplicates > 0,
                DUPLICATES_WEIGHT,
                "Duplicate rows detected",
            ),
        ];

        let mut score = 0;
        let mut reasons = Vec::new();
        for (triggered, weight, reason) in signals {
            if triggered {
                score += weight;
                reasons.push(reason.to_string());
            }
        }

        // MAX_SCORE fits in a u8
        let score = score.min(MAX_SCORE) as u8;
        let risk_level = RiskLevel::from_score(score);

        SeverityResult {
            score,
            risk_level,
            color: risk_level.color(),
            reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeatureCorrelation, MissingColumn};

    fn all_flags() -> AnalyzerResults {
        let mut results = AnalyzerResults::default();
        results.imbalance.warning = Some("Severe class imbalance detected.".to_string());
        results.id_columns.id_like_columns = vec!["id".to_string()];
        results.missing.high_missing_columns = vec![MissingColumn {
            column: "cabin".to_string(),
            ratio: 0.77,
        }];
        results.leakage.suspicious_features = vec!["fare_x2".to_string()];
        results.leakage.correlations = vec![FeatureCorrelation {
            feature: "fare_x2".to_string(),
            correlation: 0.99,
        }];
        results.duplicates.num_duplicates = 4;
        results
    }

    #[test]
    fn test_clean_results_score_zero() {
        let severity = SeveritySynthesizer::synthesize(&AnalyzerResults::default());

        assert_eq!(severity.score, 0);
        assert_eq!(severity.risk_level, RiskLevel::Low);
        assert!(severity.reasons.is_empty());
    }

    #[test]
    fn test_all_signals_capped_at_hundred() {
        let severity = SeveritySynthesizer::synthesize(&all_flags());

        assert_eq!(severity.score, 100);
        assert_eq!(severity.risk_level, RiskLevel::High);
        assert_eq!(
            severity.reasons,
            vec![
                "Class imbalance detected",
                "ID-like columns present",
                "Columns with high missing values",
                "Potential target leakage",
                "Duplicate rows detected",
            ]
        );
    }

    #[test]
    fn test_leakage_and_id_columns_is_moderate() {
        let mut results = AnalyzerResults::default();
        results.id_columns.id_like_columns = vec!["row_id".to_string()];
        results.leakage.suspicious_features = vec!["leak".to_string()];

        let severity = SeveritySynthesizer::synthesize(&results);
        assert_eq!(severity.score, 60);
        assert_eq!(severity.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_score_never_decreases_when_adding_signals() {
        let full = all_flags();
        let mut results = AnalyzerResults::default();
        let mut previous = SeveritySynthesizer::synthesize(&results).score;

        let steps: Vec<Box<dyn Fn(&mut AnalyzerResults) + '_>> = vec![
            Box::new(|r| r.duplicates.num_duplicates = full.duplicates.num_duplicates),
            Box::new(|r| r.imbalance.warning = full.imbalance.warning.clone()),
            Box::new(|r| r.id_columns = full.id_columns.clone()),
            Box::new(|r| r.missing = full.missing.clone()),
            Box::new(|r| r.leakage = full.leakage.clone()),
        ];

        for step in steps {
            step(&mut results);
            let score = SeveritySynthesizer::synthesize(&results).score;
            assert!(score >= previous);
            assert!(score <= 100);
            previous = score;
        }
    }

    #[test]
    fn test_errored_analyzer_contributes_nothing() {
        let mut results = AnalyzerResults::default();
        results.imbalance.error = Some("Target column 'y' not found.".to_string());

        assert_eq!(SeveritySynthesizer::synthesize(&results).score, 0);
    }
}
