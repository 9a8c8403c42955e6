use crate::error::{DiagnosticsError, Result, ResultExt};
use crate::types::DiagnosticReport;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// A diagnostic report together with run metadata, as written to disk and
/// printed by `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEnvelope {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    pub tool_version: String,
    #[serde(flatten)]
    pub report: DiagnosticReport,
}

impl ReportEnvelope {
    pub fn new(input_file: &str, report: DiagnosticReport) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            report,
        }
    }
}

/// Writes reports and training scripts under one output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write `envelope` as pretty JSON to `<base_name>_report.json`.
    ///
    /// For example, if `base_name` is "train", the file will be
    /// "train_report.json".
    pub fn write_report(&self, envelope: &ReportEnvelope, base_name: &str) -> Result<PathBuf> {
        let report_path = self.output_dir.join(format!("{}_report.json", base_name));
        let json = serde_json::to_string_pretty(envelope)
            .map_err(DiagnosticsError::from)
            .context("Failed to serialize report")?;
        self.write_file(&report_path, json.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Write the generated training script to `path`, creating parent
    /// directories as needed. Relative paths are resolved against the
    /// current directory, not the output directory.
    pub fn write_code_snippet(&self, report: &DiagnosticReport, path: &Path) -> Result<PathBuf> {
        self.write_file(path, report.code_snippet.as_bytes())?;

        info!("Training script saved: {}", path.display());
        Ok(path.to_path_buf())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            let mut file = File::create(path)?;
            file.write_all(contents)
        };

        write().map_err(|e| {
            DiagnosticsError::ReportWriteFailed(format!("{}: {}", path.display(), e))
        })
    }
}
