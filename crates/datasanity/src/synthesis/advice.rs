//! Task-specific modeling advice derived from the analyzer results.

use crate::config::DiagnosticsConfig;
use crate::types::{AdviceResult, AnalyzerResults, TaskHint};

const ID_RISK: &str = "ID-like columns can cause memorization / poor generalization.";
const ID_ACTION: &str = "Drop ID-like columns (e.g., customer_id) or use them only for grouping/splitting, not as features.";
const LEAKAGE_RISK: &str = "Possible leakage can inflate offline metrics and fail in production.";
const LEAKAGE_ACTION: &str = "Audit suspicious features and ensure they're available at prediction time (no future info).";
const DUPLICATES_RISK: &str = "Duplicate rows can bias training and evaluation.";
const DUPLICATES_ACTION: &str =
    "Remove duplicates; if time-series/user data, deduplicate per entity/time window.";
const MISSING_RISK: &str =
    "Heavily missing columns can bias imputation and hide informative patterns.";
const MISSING_ACTION: &str = "Handle missingness: impute (median/most_frequent), add missing indicators, or drop high-missing columns.";

const STRATIFY_ACTION: &str =
    "Use stratified split; consider class weights or resampling (SMOTE/undersampling).";
const IMBALANCE_METRICS_ACTION: &str = "Prefer macro-F1 / balanced accuracy for multi-class; for imbalanced binary use PR-AUC, recall/precision.";
const LABEL_GROUPING_ACTION: &str =
    "If too many classes: consider label grouping or binning to reduce class cardinality.";
const CLASSIFICATION_BASELINES_ACTION: &str =
    "Start with strong baselines: Logistic Regression / Linear SVM / LightGBM/XGBoost.";

const REGRESSION_SPLIT_ACTION: &str =
    "Use train/validation split appropriate for data (time-based if temporal).";
const REGRESSION_METRICS_ACTION: &str = "Use MAE/RMSE; check residuals and outliers; consider log-transform if target is heavy-tailed.";
const REGRESSION_BASELINES_ACTION: &str =
    "Start with baselines: Linear/Ridge, RandomForestRegressor, LightGBM/XGBoost.";

pub struct AdviceSynthesizer;

impl AdviceSynthesizer {
    /// Build the risk summary and recommended actions.
    ///
    /// Hygiene checks are evaluated first (ID-like, leakage, duplicates,
    /// missingness), then the task branch. Both lists are truncated to the
    /// configured limits in insertion order.
    pub fn synthesize(results: &AnalyzerResults, config: &DiagnosticsConfig) -> AdviceResult {
        let mut risks: Vec<&str> = Vec::new();
        let mut actions: Vec<&str> = Vec::new();

        let hygiene = [
            (
                !results.id_columns.id_like_columns.is_empty(),
                ID_RISK,
                ID_ACTION,
            ),
            (
                !results.leakage.suspicious_features.is_empty(),
                LEAKAGE_RISK,
                LEAKAGE_ACTION,
            ),
            (
                results.duplicates.num_duplicates > 0,
                DUPLICATES_RISK,
                DUPLICATES_ACTION,
            ),
            (
                !results.missing.high_missing_columns.is_empty(),
                MISSING_RISK,
                MISSING_ACTION,
            ),
        ];
        for (triggered, risk, action) in hygiene {
            if triggered {
                risks.push(risk);
                actions.push(action);
            }
        }

        let imbalance = &results.imbalance;
        let task_hint = imbalance.task_hint;
        match task_hint {
            TaskHint::Classification => {
                if imbalance.warning.is_some() {
                    actions.push(STRATIFY_ACTION);
                    actions.push(IMBALANCE_METRICS_ACTION);
                }
                if imbalance.n_unique > config.label_grouping_classes {
                    actions.push(LABEL_GROUPING_ACTION);
                }
                actions.push(CLASSIFICATION_BASELINES_ACTION);
            }
            TaskHint::Regression => {
                actions.push(REGRESSION_SPLIT_ACTION);
                actions.push(REGRESSION_METRICS_ACTION);
                actions.push(REGRESSION_BASELINES_ACTION);
            }
        }

        risks.truncate(config.max_top_risks);
        actions.truncate(config.max_actions);

        AdviceResult {
            task_hint,
            top_risks: risks.into_iter().map(String::from).collect(),
            recommended_actions: actions.into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MissingColumn;
    use pretty_assertions::assert_eq;

    fn synthesize(results: &AnalyzerResults) -> AdviceResult {
        AdviceSynthesizer::synthesize(results, &DiagnosticsConfig::default())
    }

    #[test]
    fn test_clean_classification_only_suggests_baselines() {
        let advice = synthesize(&AnalyzerResults::default());

        assert_eq!(advice.task_hint, TaskHint::Classification);
        assert!(advice.top_risks.is_empty());
        assert_eq!(
            advice.recommended_actions,
            vec![CLASSIFICATION_BASELINES_ACTION]
        );
    }

    #[test]
    fn test_hygiene_order_is_fixed() {
        let mut results = AnalyzerResults::default();
        results.missing.high_missing_columns = vec![MissingColumn {
            column: "cabin".to_string(),
            ratio: 0.8,
        }];
        results.duplicates.num_duplicates = 3;
        results.leakage.suspicious_features = vec!["leak".to_string()];
        results.id_columns.id_like_columns = vec!["id".to_string()];

        let advice = synthesize(&results);
        assert_eq!(
            advice.top_risks,
            vec![ID_RISK, LEAKAGE_RISK, DUPLICATES_RISK, MISSING_RISK]
        );
        assert_eq!(
            &advice.recommended_actions[..4],
            &[ID_ACTION, LEAKAGE_ACTION, DUPLICATES_ACTION, MISSING_ACTION]
        );
    }

    #[test]
    fn test_imbalanced_many_class_target() {
        let mut results = AnalyzerResults::default();
        results.imbalance.warning = Some("Severe class imbalance detected.".to_string());
        results.imbalance.n_unique = 20;

        let advice = synthesize(&results);
        assert_eq!(
            advice.recommended_actions,
            vec![
                STRATIFY_ACTION,
                IMBALANCE_METRICS_ACTION,
                LABEL_GROUPING_ACTION,
                CLASSIFICATION_BASELINES_ACTION,
            ]
        );
    }

    #[test]
    fn test_regression_branch() {
        let mut results = AnalyzerResults::default();
        results.imbalance.task_hint = TaskHint::Regression;
        results.imbalance.n_unique = 900;

        let advice = synthesize(&results);
        assert_eq!(advice.task_hint, TaskHint::Regression);
        assert_eq!(
            advice.recommended_actions,
            vec![
                REGRESSION_SPLIT_ACTION,
                REGRESSION_METRICS_ACTION,
                REGRESSION_BASELINES_ACTION,
            ]
        );
    }

    #[test]
    fn test_truncation_keeps_insertion_order() {
        let mut results = AnalyzerResults::default();
        results.id_columns.id_like_columns = vec!["id".to_string()];
        results.leakage.suspicious_features = vec!["leak".to_string()];
        results.duplicates.num_duplicates = 1;

        let config = DiagnosticsConfig::builder()
            .max_top_risks(2)
            .max_actions(1)
            .build()
            .unwrap();
        let advice = AdviceSynthesizer::synthesize(&results, &config);

        assert_eq!(advice.top_risks, vec![ID_RISK, LEAKAGE_RISK]);
        assert_eq!(advice.recommended_actions, vec![ID_ACTION]);
    }
}
