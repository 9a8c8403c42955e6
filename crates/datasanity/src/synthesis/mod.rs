//! Synthesis of analyzer outputs into a risk score and modeling advice.
//!
//! Both synthesizers are pure functions of [`crate::types::AnalyzerResults`]:
//! they run after every analyzer has finished and never touch the dataset.

mod advice;
mod severity;

pub use advice::AdviceSynthesizer;
pub use severity::SeveritySynthesizer;
