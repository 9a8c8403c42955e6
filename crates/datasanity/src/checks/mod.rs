//! Dataset checks.
//!
//! Each analyzer is a pure function of the dataset (and, where relevant, the
//! target column name). None of them reads another analyzer's output, so the
//! pipeline is free to run them in any order or concurrently.
//!
//! Analyzers return `anyhow::Result` for unexpected polars failures. The
//! pipeline folds such failures into the analyzer's own result through
//! [`AnalyzerOutput::from_failure`], so one broken check never aborts a run.

mod constants;
mod duplicates;
mod id_columns;
mod imbalance;
mod leakage;
mod missing;

pub use constants::ConstantColumnAnalyzer;
pub use duplicates::DuplicateRowAnalyzer;
pub use id_columns::IdColumnAnalyzer;
pub use imbalance::ImbalanceAnalyzer;
pub use leakage::LeakageAnalyzer;
pub use missing::MissingValueAnalyzer;

use crate::error::DiagnosticsError;
use crate::types::{
    ConstantsResult, DuplicatesResult, IdColumnsResult, ImbalanceResult, LeakageResult,
    MissingResult,
};
use tracing::warn;

/// A result type that can stand in for an analyzer that failed.
pub trait AnalyzerOutput: Sized {
    /// Result carrying `reason` as its error and no signal.
    fn from_failure(reason: String) -> Self;
}

macro_rules! impl_analyzer_output {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AnalyzerOutput for $ty {
                fn from_failure(reason: String) -> Self {
                    Self {
                        error: Some(reason),
                        ..Default::default()
                    }
                }
            }
        )*
    };
}

impl_analyzer_output!(
    ImbalanceResult,
    MissingResult,
    ConstantsResult,
    IdColumnsResult,
    DuplicatesResult,
    LeakageResult,
);

/// Unwrap an analyzer result, replacing a failure with an error result.
pub fn recover<T: AnalyzerOutput>(analyzer: &str, result: anyhow::Result<T>) -> T {
    result.unwrap_or_else(|e| {
        let failure = DiagnosticsError::AnalyzerFailed {
            analyzer: analyzer.to_string(),
            reason: format!("{:#}", e),
        };
        warn!("{}", failure);
        T::from_failure(failure.to_string())
    })
}
