use std::io;

use tracing::{debug, trace};

use logsift_types::{FilterCriteria, LogLevel, SkipReason};

use crate::filter::FilterMatcher;
use crate::io::{LineSink, LineSource};
use crate::parser::LineParser;

/// Fatal pipeline failure
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read input line {line}")]
    Read {
        line: u64,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output")]
    Write(#[source] io::Error),
}

/// Counts per log level among valid scanned lines
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub info: usize,
    pub warn: usize,
    pub error: usize,
}

impl LevelCounts {
    fn record(&mut self, level: LogLevel) {
        match level {
            LogLevel::Info => self.info += 1,
            LogLevel::Warn => self.warn += 1,
            LogLevel::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.info + self.warn + self.error
    }
}

/// Counts per skip reason. Diagnostic only, never part of the report output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub blank: usize,
    pub segment_count: usize,
    pub invalid_level: usize,
}

impl SkipCounts {
    fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::Blank => self.blank += 1,
            SkipReason::SegmentCount { .. } => self.segment_count += 1,
            SkipReason::InvalidLevel { .. } => self.invalid_level += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.blank + self.segment_count + self.invalid_level
    }
}

/// Result of a completed run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Lines that parsed and carried an allowed level
    pub total_valid_scanned: usize,

    /// Lines that also passed the filters and were written
    pub lines_written: usize,

    pub levels: LevelCounts,

    pub skipped: SkipCounts,
}

/// Single-pass batch filter over a line source
pub struct LogFilter {
    matcher: FilterMatcher,
}

impl LogFilter {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            matcher: FilterMatcher::new(criteria),
        }
    }

    /// Scan every line of `source` and write the matching entries to `sink`
    ///
    /// Output is collected in input order and handed to the sink in one batch
    /// after the input is exhausted. A read error aborts before anything is
    /// written.
    pub fn run<S, W>(&self, source: &mut S, sink: &mut W) -> Result<ScanReport, PipelineError>
    where
        S: LineSource + ?Sized,
        W: LineSink + ?Sized,
    {
        let mut report = ScanReport::default();
        let mut output = Vec::new();
        let mut line_number: u64 = 0;

        loop {
            line_number += 1;
            let raw = match source.next_line() {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(err) => {
                    return Err(PipelineError::Read {
                        line: line_number,
                        source: err,
                    });
                }
            };

            let entry = match LineParser::classify(&raw) {
                Ok(entry) => entry,
                Err(reason) => {
                    trace!(line = line_number, ?reason, "skipping line");
                    report.skipped.record(&reason);
                    continue;
                }
            };

            report.total_valid_scanned += 1;
            report.levels.record(entry.level);

            if self.matcher.matches(&entry) {
                output.push(entry.format_line());
                report.lines_written += 1;
            }
        }

        sink.write_lines(&output).map_err(PipelineError::Write)?;

        debug!(
            scanned = report.total_valid_scanned,
            written = report.lines_written,
            info = report.levels.info,
            warn = report.levels.warn,
            error = report.levels.error,
            blank = report.skipped.blank,
            malformed = report.skipped.segment_count,
            invalid_level = report.skipped.invalid_level,
            "scan complete"
        );

        Ok(report)
    }
}
