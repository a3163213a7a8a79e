//! Log processing for logsift
//!
//! This crate provides line parsing, level validation, filtering, and the
//! single-pass batch pipeline that ties them to a line source and sink.

mod filter;
mod io;
mod parser;
mod pipeline;

pub use filter::{FilterMatcher, matches_filters};
pub use io::{FileLineSink, FileLineSource, LineSink, LineSource, MemorySource};
pub use parser::{LineParser, RawFields};
pub use pipeline::{LevelCounts, LogFilter, PipelineError, ScanReport, SkipCounts};

// Re-export types used in our public API
pub use logsift_types::{FilterCriteria, InvalidLevel, LogEntry, LogLevel, SkipReason};
