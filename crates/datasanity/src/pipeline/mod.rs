//! Pipeline module.
//!
//! This module provides the diagnostics pipeline and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{DiagnosticsPipeline, DiagnosticsPipelineBuilder};
pub use progress::{ClosureProgressReporter, DiagnosticStage, ProgressReporter, ProgressUpdate};
