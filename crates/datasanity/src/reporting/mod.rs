//! Report output.
//!
//! [`CodeTemplateGenerator`] renders the training script embedded in every
//! report. [`ReportWriter`] persists reports and scripts:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Training script output (`--code-out` CLI flag)
//!
//! # Example
//!
//! ```rust,ignore
//! use datasanity::reporting::{ReportEnvelope, ReportWriter};
//!
//! let report = datasanity::run_diagnostics(&df, "label")?;
//! let envelope = ReportEnvelope::new("data/train.csv", report);
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&envelope)?);
//!
//! // Or write to file
//! let writer = ReportWriter::new(PathBuf::from("outputs"));
//! writer.write_report(&envelope, "train")?;
//! ```

mod codegen;
mod writer;

pub use codegen::CodeTemplateGenerator;
pub use writer::{ReportEnvelope, ReportWriter};
