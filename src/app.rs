use anyhow::{Context, Result};

use logsift_logs::{FileLineSink, FileLineSource, LogFilter, ScanReport};

use crate::config::RunConfig;

/// How a run ended
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The input file was not there; nothing was read or written
    MissingInput,
    Completed(ScanReport),
}

/// Filter the configured input file into the configured output file
pub fn execute(config: &RunConfig) -> Result<Outcome> {
    if !config.input.exists() {
        tracing::warn!(path = %config.input.display(), "input file not found");
        return Ok(Outcome::MissingInput);
    }

    if config.criteria.is_empty() {
        tracing::info!("no filters given, every valid entry will be written");
    }
    tracing::info!(
        input = %config.input.display(),
        output = %config.output.display(),
        level = ?config.criteria.level,
        service = ?config.criteria.service,
        "filtering logs"
    );

    let mut source = FileLineSource::open(&config.input)
        .with_context(|| format!("failed to open {}", config.input.display()))?;
    let mut sink = FileLineSink::new(&config.output);

    let report = LogFilter::new(config.criteria.clone())
        .run(&mut source, &mut sink)
        .with_context(|| {
            format!(
                "failed to filter {} into {}",
                config.input.display(),
                config.output.display()
            )
        })?;

    Ok(Outcome::Completed(report))
}

/// Lines printed to stdout once a run finishes
pub fn summary(outcome: &Outcome, config: &RunConfig, input_name: &str) -> Vec<String> {
    match outcome {
        Outcome::MissingInput => vec![format!(
            "ERROR: Cannot find {input_name}. Put {input_name} in the working directory."
        )],
        Outcome::Completed(report) => vec![
            format!("Valid lines scanned: {}", report.total_valid_scanned),
            format!("Lines written: {}", report.lines_written),
            format!("Output file: {}", config.output_name()),
        ],
    }
}
