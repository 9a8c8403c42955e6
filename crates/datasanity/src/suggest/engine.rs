use super::catalog::ModelFamily;
use crate::config::DiagnosticsConfig;
use crate::types::{
    AnalyzerResults, BaselinePlan, FeatureMix, ModelSuggestion, ModelSuggestionSet, TaskHint,
};
use crate::utils::{DtypeCategory, get_dtype_category, round_to};
use polars::prelude::*;
use tracing::debug;

/// Ranks candidate model families for a dataset and picks a baseline recipe.
pub struct ModelSuggestionEngine;

impl ModelSuggestionEngine {
    /// Suggest models for predicting `target` from the rest of `df`.
    ///
    /// The task comes from the imbalance analyzer; when it failed the
    /// default (classification) applies. A missing target column simply
    /// means every column counts as a feature.
    pub fn suggest(
        df: &DataFrame,
        target: &str,
        results: &AnalyzerResults,
        config: &DiagnosticsConfig,
    ) -> ModelSuggestionSet {
        let feature_mix = Self::feature_mix(df, target);
        let n_features = feature_mix.n_numeric + feature_mix.n_categorical;
        let n_rows = df.height();
        let task_hint = results.imbalance.task_hint;

        let candidates = Self::candidates(task_hint, &feature_mix, results);
        let cat_ratio = feature_mix.cat_ratio;

        let mut ranked: Vec<ModelSuggestion> = candidates
            .into_iter()
            .map(|family| family.to_suggestion(family.score(n_rows, cat_ratio, config)))
            .collect();
        // Vec::sort_by is stable: equal scores keep catalog order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(
            "Ranked {} candidate models for {} task",
            ranked.len(),
            task_hint
        );

        let top_models = ranked.iter().take(config.top_models).cloned().collect();

        ModelSuggestionSet {
            task_hint,
            n_rows,
            n_features,
            feature_mix: FeatureMix {
                cat_ratio: round_to(cat_ratio, 3),
                ..feature_mix
            },
            top_models,
            baseline_plan: Self::baseline_plan(task_hint),
            ranked,
        }
    }

    /// Count numeric (integer, float, boolean) and categorical features,
    /// excluding the target. `cat_ratio` is left unrounded.
    pub fn feature_mix(df: &DataFrame, target: &str) -> FeatureMix {
        let (mut n_numeric, mut n_categorical) = (0, 0);
        for column in df.get_columns() {
            if column.name().as_str() == target {
                continue;
            }
            match get_dtype_category(column.dtype()) {
                DtypeCategory::Numeric | DtypeCategory::Boolean => n_numeric += 1,
                _ => n_categorical += 1,
            }
        }

        let n_features = n_numeric + n_categorical;
        let cat_ratio = if n_features == 0 {
            0.0
        } else {
            n_categorical as f64 / n_features as f64
        };

        FeatureMix {
            n_numeric,
            n_categorical,
            cat_ratio,
        }
    }

    fn candidates(
        task_hint: TaskHint,
        feature_mix: &FeatureMix,
        results: &AnalyzerResults,
    ) -> Vec<ModelFamily> {
        match task_hint {
            TaskHint::Classification => {
                let mut families = Vec::with_capacity(4);
                if feature_mix.n_categorical > 0 {
                    families.push(ModelFamily::GradientBoostedTrees);
                }
                families.push(ModelFamily::LogisticRegression);
                families.push(ModelFamily::LinearSvm);
                if results.imbalance.warning.is_some() {
                    families.push(ModelFamily::BalancedRandomForest);
                }
                families
            }
            TaskHint::Regression => vec![
                ModelFamily::GradientBoostedRegressor,
                ModelFamily::RidgeRegression,
                ModelFamily::RandomForestRegressor,
            ],
        }
    }

    fn baseline_plan(task_hint: TaskHint) -> BaselinePlan {
        let (split, metrics, pipeline): (&str, &[&str], &[&str]) = match task_hint {
            TaskHint::Classification => (
                "Stratified train/val split",
                &[
                    "macro-F1 (multiclass)",
                    "PR-AUC + recall (binary imbalanced)",
                ],
                &[
                    "Drop ID-like columns",
                    "Handle missing (simple impute + indicators)",
                    "Encode categoricals (OneHot or target encoding)",
                    "Train baselines: LogReg, then XGBoost/LightGBM",
                ],
            ),
            TaskHint::Regression => (
                "Train/val split (time-based if temporal)",
                &["MAE", "RMSE"],
                &[
                    "Drop ID-like columns",
                    "Handle missing (median/most_frequent + indicators)",
                    "Encode categoricals (OneHot/target encoding)",
                    "Train baselines: Ridge, RF, then XGBoost/LightGBM",
                ],
            ),
        };

        BaselinePlan {
            split: split.to_string(),
            metrics: metrics.iter().map(|s| s.to_string()).collect(),
            pipeline: pipeline.iter().map(|s| s.to_string()).collect(),
        }
    }
}
