//! Python/scikit-learn training skeleton for the top-ranked model.

use crate::suggest::ModelFamily;
use crate::types::{ModelSuggestionSet, TaskHint};

const DATA_PATH: &str = "data.csv";

/// Renders a ready-to-run training script from a suggestion set.
///
/// Output is a pure function of its inputs, so the same report always
/// carries the same snippet.
pub struct CodeTemplateGenerator;

impl CodeTemplateGenerator {
    pub fn generate(suggestions: &ModelSuggestionSet, target: &str) -> String {
        let task = suggestions.task_hint;
        // A family from the other task would emit the wrong estimator
        let family = suggestions
            .best()
            .map(|m| m.family)
            .filter(|f| f.task() == task)
            .unwrap_or_else(|| Self::fallback_family(task));

        let mut lines: Vec<String> = vec![
            "import pandas as pd".to_string(),
            "from sklearn.compose import ColumnTransformer".to_string(),
            "from sklearn.impute import SimpleImputer".to_string(),
            "from sklearn.model_selection import train_test_split".to_string(),
            "from sklearn.pipeline import Pipeline".to_string(),
            "from sklearn.preprocessing import OneHotEncoder, StandardScaler".to_string(),
        ];
        lines.push(match task {
            TaskHint::Classification => "from sklearn.metrics import classification_report",
            TaskHint::Regression => {
                "from sklearn.metrics import mean_absolute_error, mean_squared_error"
            }
        }
        .to_string());
        lines.push(family.sklearn_import().to_string());
        lines.push(String::new());

        lines.push(format!("# Suggested model: {}", family.display_name()));
        lines.push(format!("# Split: {}", suggestions.baseline_plan.split));
        lines.push(format!(
            "# Metrics: {}",
            suggestions.baseline_plan.metrics.join(", ")
        ));
        lines.push("# Plan:".to_string());
        for (i, step) in suggestions.baseline_plan.pipeline.iter().enumerate() {
            lines.push(format!("#   {}. {}", i + 1, step));
        }
        lines.push(String::new());

        lines.push(format!("df = pd.read_csv({})", python_string(DATA_PATH)));
        lines.push(format!("TARGET = {}", python_string(target)));
        lines.push(String::new());
        lines.push("X = df.drop(columns=[TARGET])".to_string());
        lines.push("y = df[TARGET]".to_string());
        lines.push(String::new());
        lines.push(
            "num_cols = X.select_dtypes(include=[\"number\", \"bool\"]).columns.tolist()"
                .to_string(),
        );
        lines.push(
            "cat_cols = X.select_dtypes(exclude=[\"number\", \"bool\"]).columns.tolist()"
                .to_string(),
        );
        lines.push(String::new());
        lines.extend(
            [
                "preprocess = ColumnTransformer([",
                "    (\"num\", Pipeline([",
                "        (\"impute\", SimpleImputer(strategy=\"median\", add_indicator=True)),",
                "        (\"scale\", StandardScaler()),",
                "    ]), num_cols),",
                "    (\"cat\", Pipeline([",
                "        (\"impute\", SimpleImputer(strategy=\"most_frequent\")),",
                "        (\"encode\", OneHotEncoder(handle_unknown=\"ignore\", sparse_output=False)),",
                "    ]), cat_cols),",
                "])",
                "",
            ]
            .map(String::from),
        );
        lines.push("model = Pipeline([".to_string());
        lines.push("    (\"preprocess\", preprocess),".to_string());
        lines.push(format!("    (\"model\", {}),", family.sklearn_estimator()));
        lines.push("])".to_string());
        lines.push(String::new());

        match task {
            TaskHint::Classification => {
                lines.push("X_train, X_val, y_train, y_val = train_test_split(".to_string());
                lines.push("    X, y, test_size=0.2, random_state=42, stratify=y".to_string());
                lines.push(")".to_string());
                lines.push("model.fit(X_train, y_train)".to_string());
                lines.push("pred = model.predict(X_val)".to_string());
                lines.push("print(classification_report(y_val, pred))".to_string());
            }
            TaskHint::Regression => {
                lines.push("X_train, X_val, y_train, y_val = train_test_split(".to_string());
                lines.push("    X, y, test_size=0.2, random_state=42".to_string());
                lines.push(")".to_string());
                lines.push("model.fit(X_train, y_train)".to_string());
                lines.push("pred = model.predict(X_val)".to_string());
                lines.push("print(\"MAE:\", mean_absolute_error(y_val, pred))".to_string());
                lines.push("print(\"RMSE:\", mean_squared_error(y_val, pred) ** 0.5)".to_string());
            }
        }

        let mut script = lines.join("\n");
        script.push('\n');
        script
    }

    fn fallback_family(task: TaskHint) -> ModelFamily {
        match task {
            TaskHint::Classification => ModelFamily::LogisticRegression,
            TaskHint::Regression => ModelFamily::RidgeRegression,
        }
    }
}

/// Double-quoted Python literal. JSON string escapes are a subset of
/// Python's, so serde_json's encoding is reused.
fn python_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value.escape_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagnosticsConfig;
    use crate::suggest::ModelSuggestionEngine;
    use crate::types::AnalyzerResults;
    use polars::prelude::*;

    fn suggestions(df: &DataFrame, target: &str, task: TaskHint) -> ModelSuggestionSet {
        let mut results = AnalyzerResults::default();
        results.imbalance.task_hint = task;
        ModelSuggestionEngine::suggest(df, target, &results, &DiagnosticsConfig::default())
    }

    #[test]
    fn test_classification_script_uses_stratified_split() {
        let df = df!["city" => ["a", "b"], "label" => ["x", "y"]].unwrap();
        let set = suggestions(&df, "label", TaskHint::Classification);
        let script = CodeTemplateGenerator::generate(&set, "label");

        assert!(script.contains("HistGradientBoostingClassifier(random_state=42)"));
        assert!(script.contains("stratify=y"));
        assert!(script.contains("classification_report"));
        assert!(script.contains("TARGET = \"label\""));
        assert!(!script.contains("mean_absolute_error"));
    }

    #[test]
    fn test_regression_script_reports_mae_and_rmse() {
        let df = df!["x" => [1.0, 2.0], "price" => [3.0, 4.0]].unwrap();
        let set = suggestions(&df, "price", TaskHint::Regression);
        let script = CodeTemplateGenerator::generate(&set, "price");

        assert!(script.contains("HistGradientBoostingRegressor"));
        assert!(script.contains("mean_absolute_error"));
        assert!(script.contains("** 0.5"));
        assert!(!script.contains("stratify=y"));
    }

    #[test]
    fn test_mismatched_best_model_falls_back_to_task_baseline() {
        let df = df!["city" => ["a", "b"], "label" => ["x", "y"]].unwrap();
        let mut set = suggestions(&df, "label", TaskHint::Classification);
        set.task_hint = TaskHint::Regression;
        let script = CodeTemplateGenerator::generate(&set, "label");

        assert!(script.contains("# Suggested model: Ridge Regression (Baseline)"));
        assert!(!script.contains("HistGradientBoostingClassifier"));
    }

    #[test]
    fn test_empty_suggestions_use_task_baseline() {
        let df = df!["x" => [1, 2], "label" => ["a", "b"]].unwrap();
        let mut set = suggestions(&df, "label", TaskHint::Classification);
        set.top_models.clear();
        let script = CodeTemplateGenerator::generate(&set, "label");

        assert!(script.contains("# Suggested model: Logistic Regression (Baseline)"));
    }

    #[test]
    fn test_target_name_is_escaped() {
        let df = df!["x" => [1, 2], "say \"hi\"" => ["a", "b"]].unwrap();
        let set = suggestions(&df, "say \"hi\"", TaskHint::Classification);
        let script = CodeTemplateGenerator::generate(&set, "say \"hi\"");

        assert!(script.contains(r#"TARGET = "say \"hi\"""#));
    }

    #[test]
    fn test_plan_steps_are_numbered_comments() {
        let df = df!["x" => [1, 2], "label" => ["a", "b"]].unwrap();
        let set = suggestions(&df, "label", TaskHint::Classification);
        let script = CodeTemplateGenerator::generate(&set, "label");

        assert!(script.contains("#   1. Drop ID-like columns"));
        assert!(script.contains("# Suggested model: Logistic Regression (Baseline)"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let df = df!["x" => [1, 2], "label" => ["a", "b"]].unwrap();
        let set = suggestions(&df, "label", TaskHint::Classification);

        assert_eq!(
            CodeTemplateGenerator::generate(&set, "label"),
            CodeTemplateGenerator::generate(&set, "label")
        );
    }
}
