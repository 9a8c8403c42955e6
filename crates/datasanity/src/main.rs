//! CLI entry point for dataset diagnostics.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use datasanity::utils::truncate_entries;
use datasanity::{
    DiagnosticReport, DiagnosticsConfig, DiagnosticsPipeline, ReportEnvelope, ReportWriter,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Distribution entries shown in the human-readable summary.
const MAX_DISPLAY_CLASSES: usize = 50;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Pre-modeling diagnostics for tabular datasets",
    long_about = "Checks a dataset for common modeling pitfalls (class imbalance, missing values,\n\
                  constant and ID-like columns, duplicate rows, target leakage), scores the\n\
                  overall risk and suggests models with a ready-to-run training script.\n\n\
                  EXAMPLES:\n  \
                  # Human-readable summary\n  \
                  datasanity -i titanic.csv -t Survived\n\n  \
                  # JSON to stdout\n  \
                  datasanity -i titanic.csv -t Survived --json | jq .severity\n\n  \
                  # Save the report and the training script\n  \
                  datasanity -i titanic.csv -t Survived --emit-report -o results/ --code-out train.py"
)]
struct Args {
    /// Path to the dataset (CSV or Parquet)
    #[arg(short, long)]
    input: String,

    /// Target column for ML prediction
    #[arg(short, long)]
    target: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// JSON file overriding diagnostic thresholds
    ///
    /// Fields that are not present keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the dataset checks in parallel
    #[arg(long)]
    parallel: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Write the generated training script to this path
    #[arg(long)]
    code_out: Option<PathBuf>,

    /// Print the generated training script in the summary
    #[arg(long)]
    show_code: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = load_config(&args)?;

    info!("Loading dataset from: {}", args.input);
    let data = load_dataset(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let mut builder = DiagnosticsPipeline::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            debug!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let pipeline = builder.build()?;

    let report = match pipeline.run(&data, &args.target) {
        Ok(report) => report,
        Err(e) => {
            error!("Diagnostics failed: {}", e);
            return Err(anyhow!("Diagnostics failed: {}", e));
        }
    };

    handle_output(report, &args)
}

/// Read the optional config file and apply command-line overrides.
fn load_config(args: &Args) -> Result<DiagnosticsConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            serde_json::from_str::<DiagnosticsConfig>(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => DiagnosticsConfig::default(),
    };

    if args.parallel {
        config.parallel_analyzers = true;
    }
    config.validate()?;
    Ok(config)
}

/// Handle the report based on CLI flags.
///
/// Output behavior:
/// - Default: Print human-readable summary to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Write JSON report to file
/// - `--code-out`: Write the training script to file
fn handle_output(report: DiagnosticReport, args: &Args) -> Result<()> {
    let writer = ReportWriter::new(PathBuf::from(&args.output));

    if let Some(path) = &args.code_out {
        writer.write_code_snippet(&report, path)?;
    }

    let envelope = ReportEnvelope::new(&args.input, report);

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let report_path = writer.write_report(&envelope, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    print_human_readable_summary(&envelope, args);
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the diagnostics.
///
/// Uses `println!` on purpose: this is the command's output, not a log line.
fn print_human_readable_summary(envelope: &ReportEnvelope, args: &Args) {
    let report = &envelope.report;
    let analyzers = &report.analyzers;

    println!();
    println!("{}", "=".repeat(80));
    println!("DATASET DIAGNOSTICS");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        envelope.input_file, report.shape.0, report.shape.1
    );
    println!("Target: {}", report.target);
    println!("Task:   {}", report.advice.task_hint);
    println!();

    println!(
        "Risk Score: {}/100 ({})",
        report.severity.score,
        report.severity.risk_level.label()
    );
    for reason in &report.severity.reasons {
        println!("  - {}", reason);
    }
    println!();

    let imbalance = &analyzers.imbalance;
    if !imbalance.distribution.is_empty() {
        println!("Target Distribution:");
        let entries: Vec<(String, f64)> = imbalance
            .distribution
            .iter()
            .map(|(label, share)| (label.clone(), *share))
            .collect();
        let (shown, marker) = truncate_entries(&entries, MAX_DISPLAY_CLASSES);
        for (label, share) in shown {
            println!("  {:<30} {:>6.1}%", truncate_str(&label, 29), share * 100.0);
        }
        if let Some(marker) = marker {
            println!("  ... {}", marker);
        }
        println!();
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        println!("Warnings:");
        for warning in warnings {
            println!("  ! {}", warning);
        }
        if !analyzers.missing.high_missing_columns.is_empty() {
            let columns: Vec<String> = analyzers
                .missing
                .high_missing_columns
                .iter()
                .map(|c| format!("{} ({:.0}%)", c.column, c.ratio * 100.0))
                .collect();
            println!("    high missing: {}", columns.join(", "));
        }
        print_column_list("constant", &analyzers.constants.constant_columns);
        print_column_list("ID-like", &analyzers.id_columns.id_like_columns);
        print_column_list("leakage suspects", &analyzers.leakage.suspicious_features);
        if analyzers.duplicates.num_duplicates > 0 {
            println!(
                "    duplicates: {} rows ({:.1}%)",
                analyzers.duplicates.num_duplicates,
                analyzers.duplicates.duplicate_ratio * 100.0
            );
        }
        println!();
    }

    let errors = report.analyzer_errors();
    if !errors.is_empty() {
        println!("Checks That Could Not Run:");
        for (analyzer, message) in errors {
            println!("  x {}: {}", analyzer, message);
        }
        println!();
    }

    if !report.advice.top_risks.is_empty() {
        println!("Top Risks:");
        for risk in &report.advice.top_risks {
            println!("  - {}", risk);
        }
        println!();
    }

    println!("Recommended Actions:");
    for (i, action) in report.advice.recommended_actions.iter().enumerate() {
        println!("  {}. {}", i + 1, action);
    }
    println!();

    let suggestion = &report.model_suggestion;
    println!(
        "Suggested Models ({} features: {} numeric, {} categorical):",
        suggestion.n_features,
        suggestion.feature_mix.n_numeric,
        suggestion.feature_mix.n_categorical
    );
    for model in &suggestion.top_models {
        println!("  [{}] {}", model.score, model.model_name);
        for why in &model.why {
            println!("      {}", why);
        }
    }
    println!();

    println!("Baseline Plan:");
    println!("  Split:   {}", suggestion.baseline_plan.split);
    println!("  Metrics: {}", suggestion.baseline_plan.metrics.join(", "));
    for step in &suggestion.baseline_plan.pipeline {
        println!("  - {}", step);
    }
    println!();

    if args.show_code {
        println!("Training Script:");
        println!("{}", "-".repeat(40));
        print!("{}", report.code_snippet);
        println!("{}", "-".repeat(40));
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON report");
    if args.code_out.is_none() && !args.show_code {
        println!("Use --code-out <file> or --show-code for the training script");
    }
    println!("{}", "=".repeat(80));
}

fn print_column_list(label: &str, columns: &[String]) {
    if !columns.is_empty() {
        println!("    {}: {}", label, columns.join(", "));
    }
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Load a dataset, picking the reader from the file extension.
fn load_dataset(path: &str) -> Result<DataFrame> {
    let is_parquet = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        let file = File::open(path).with_context(|| format!("Could not open {}", path))?;
        return ParquetReader::new(file)
            .finish()
            .map_err(|e| anyhow!("Failed to read Parquet file {}: {}", path, e));
    }

    load_csv_with_fallbacks(path)
}

/// Load CSV with multiple fallback strategies
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(10_000))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(10_000))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    let content = std::fs::read_to_string(path).map_err(|e| {
        error!("Could not read file: {}", e);
        e
    })?;
    let cursor = std::io::Cursor::new(clean_csv_content(&content));

    CsvReadOptions::default()
        .with_infer_schema_length(Some(10_000))
        .with_has_header(true)
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| anyhow!("Failed to parse CSV {}: {}", path, e))
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_csv_content_drops_blank_lines() {
        let cleaned = clean_csv_content("a,b\n\n1,\"\"x\"\"\n   \n2,y\n");
        assert_eq!(cleaned, "a,b\n1,\"x\"\n2,y");
    }

    #[test]
    fn test_extract_file_stem() {
        assert_eq!(extract_file_stem("data/train.csv"), "train");
        assert_eq!(extract_file_stem("data/sales.v2.parquet"), "sales.v2");
    }

    #[test]
    fn test_truncate_str_is_char_safe() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "datasanity",
            "-i",
            "data.csv",
            "-t",
            "label",
            "--json",
            "--parallel",
        ])
        .unwrap();

        assert_eq!(args.target, "label");
        assert!(args.json);
        assert!(args.parallel);
        assert_eq!(args.output, "./outputs");
    }

    #[test]
    fn test_load_config_applies_parallel_flag() {
        let args =
            Args::try_parse_from(["datasanity", "-i", "x.csv", "-t", "y", "--parallel"]).unwrap();
        let config = load_config(&args).unwrap();

        assert!(config.parallel_analyzers);
        assert_eq!(config.top_models, 3);
    }
}
