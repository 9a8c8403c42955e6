//! Static catalog of candidate model families.

use crate::config::DiagnosticsConfig;
use crate::types::{ModelSuggestion, TaskHint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A family of models the engine can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    GradientBoostedTrees,
    LogisticRegression,
    LinearSvm,
    BalancedRandomForest,
    GradientBoostedRegressor,
    RidgeRegression,
    RandomForestRegressor,
}

impl ModelFamily {
    pub fn task(&self) -> TaskHint {
        match self {
            Self::GradientBoostedTrees
            | Self::LogisticRegression
            | Self::LinearSvm
            | Self::BalancedRandomForest => TaskHint::Classification,
            Self::GradientBoostedRegressor | Self::RidgeRegression | Self::RandomForestRegressor => {
                TaskHint::Regression
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GradientBoostedTrees => "LightGBM / XGBoost (Gradient Boosted Trees)",
            Self::LogisticRegression => "Logistic Regression (Baseline)",
            Self::LinearSvm => "Linear SVM",
            Self::BalancedRandomForest => "Class-weighted Trees / Balanced Random Forest",
            Self::GradientBoostedRegressor => "LightGBM / XGBoost Regressor",
            Self::RidgeRegression => "Ridge Regression (Baseline)",
            Self::RandomForestRegressor => "RandomForestRegressor",
        }
    }

    pub fn why(&self) -> &'static [&'static str] {
        match self {
            Self::GradientBoostedTrees => &[
                "Strong performance on tabular data with nonlinear relationships.",
                "Captures feature interactions with minimal feature engineering.",
            ],
            Self::LogisticRegression => &[
                "Fast and interpretable baseline model.",
                "Great first reference before using more complex models.",
            ],
            Self::LinearSvm => &[
                "Often outperforms logistic regression in high-dimensional feature spaces.",
                "Works well with sparse one-hot encoded data.",
            ],
            Self::BalancedRandomForest => &[
                "More robust when the target distribution is highly imbalanced.",
                "Reduces bias toward the majority class.",
            ],
            Self::GradientBoostedRegressor => &[
                "Top-performing models for tabular regression problems.",
                "Handles nonlinearities and feature interactions well.",
            ],
            Self::RidgeRegression => &[
                "Fast and stable linear baseline.",
                "Good reference before moving to nonlinear models.",
            ],
            Self::RandomForestRegressor => &[
                "A good baseline when you want nonlinearity without tuning.",
                "Less sensitive to feature scales.",
            ],
        }
    }

    pub fn when_to_use(&self) -> &'static [&'static str] {
        match self {
            Self::GradientBoostedTrees => &[
                "Mixed numerical and categorical features.",
                "Medium to large datasets (e.g., >2k rows).",
            ],
            Self::LogisticRegression => &[
                "Small to medium datasets.",
                "After encoding categorical variables.",
            ],
            Self::LinearSvm => &[
                "Large number of categorical features.",
                "Not extremely large datasets.",
            ],
            Self::BalancedRandomForest => &["Severe class imbalance detected."],
            Self::GradientBoostedRegressor => &[
                "Mixed feature types or nonlinear relationships.",
                "Medium to large datasets.",
            ],
            Self::RidgeRegression => &["Smaller datasets or mostly linear relationships."],
            Self::RandomForestRegressor => &[
                "Small/medium sized dataset.",
                "You want a fast robust check.",
            ],
        }
    }

    pub fn notes(&self) -> &'static [&'static str] {
        match self {
            Self::GradientBoostedTrees => &[
                "Use OneHotEncoder or target encoding for categorical features.",
                "For class imbalance: try class weights or scale_pos_weight.",
            ],
            Self::LogisticRegression => &[
                "Tune regularization strength (C).",
                "Use multinomial + saga solver for multi-class.",
            ],
            Self::LinearSvm => &["Use probability calibration if probabilities are required."],
            Self::BalancedRandomForest => {
                &["Evaluate with macro-F1 or PR-AUC instead of accuracy."]
            }
            Self::GradientBoostedRegressor => &[
                "Evaluate with MAE and RMSE.",
                "Consider log-transform if target has heavy tails.",
            ],
            Self::RidgeRegression => &["Standardize numerical features before training."],
            Self::RandomForestRegressor => &["Can underfit/overfit; validate with CV."],
        }
    }

    /// Ranking score for this family on a dataset of `n_rows` rows whose
    /// features are `cat_ratio` categorical.
    pub fn score(&self, n_rows: usize, cat_ratio: f64, config: &DiagnosticsConfig) -> u32 {
        match self {
            Self::GradientBoostedTrees | Self::GradientBoostedRegressor => {
                let mut score = 3;
                if n_rows > config.large_dataset_rows {
                    score += 2;
                }
                if cat_ratio > config.boosted_cat_ratio {
                    score += 1;
                }
                score
            }
            Self::LogisticRegression | Self::RidgeRegression => 2,
            Self::LinearSvm => {
                if cat_ratio > config.svm_cat_ratio {
                    2
                } else {
                    1
                }
            }
            Self::RandomForestRegressor => 1,
            Self::BalancedRandomForest => 0,
        }
    }

    /// scikit-learn import line for the estimator used in generated code.
    ///
    /// Boosted families use scikit-learn's histogram gradient boosting so the
    /// generated script only depends on scikit-learn.
    pub fn sklearn_import(&self) -> &'static str {
        match self {
            Self::GradientBoostedTrees => "from sklearn.ensemble import HistGradientBoostingClassifier",
            Self::LogisticRegression => "from sklearn.linear_model import LogisticRegression",
            Self::LinearSvm => "from sklearn.svm import LinearSVC",
            Self::BalancedRandomForest => "from sklearn.ensemble import RandomForestClassifier",
            Self::GradientBoostedRegressor => {
                "from sklearn.ensemble import HistGradientBoostingRegressor"
            }
            Self::RidgeRegression => "from sklearn.linear_model import Ridge",
            Self::RandomForestRegressor => "from sklearn.ensemble import RandomForestRegressor",
        }
    }

    /// Constructor expression for the estimator used in generated code.
    pub fn sklearn_estimator(&self) -> &'static str {
        match self {
            Self::GradientBoostedTrees => "HistGradientBoostingClassifier(random_state=42)",
            Self::LogisticRegression => "LogisticRegression(max_iter=1000)",
            Self::LinearSvm => "LinearSVC()",
            Self::BalancedRandomForest => {
                "RandomForestClassifier(n_estimators=300, class_weight=\"balanced\", random_state=42)"
            }
            Self::GradientBoostedRegressor => "HistGradientBoostingRegressor(random_state=42)",
            Self::RidgeRegression => "Ridge(alpha=1.0)",
            Self::RandomForestRegressor => {
                "RandomForestRegressor(n_estimators=300, random_state=42)"
            }
        }
    }

    /// Materialize this family as a scored suggestion.
    pub fn to_suggestion(&self, score: u32) -> ModelSuggestion {
        ModelSuggestion {
            model_name: self.display_name().to_string(),
            family: *self,
            score,
            why: to_owned(self.why()),
            when_to_use: to_owned(self.when_to_use()),
            notes: to_owned(self.notes()),
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn to_owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}
