use logsift_types::{LogEntry, LogLevel, SkipReason};

/// Field separator on input lines
const DELIMITER: char = '|';

/// The four trimmed segments of a well-formed line, not yet validated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub timestamp: &'a str,
    pub level: &'a str,
    pub service: &'a str,
    pub message: &'a str,
}

/// Parser for pipe-delimited log lines
pub struct LineParser;

impl LineParser {
    /// Split a raw line into its four fields
    ///
    /// Returns `None` for blank lines and for lines that do not split into
    /// exactly four segments, including messages that contain a `|`.
    pub fn parse(raw: &str) -> Option<RawFields<'_>> {
        Self::split(raw).ok()
    }

    /// Turn a raw line into a validated entry, or say why it was skipped
    pub fn classify(raw: &str) -> Result<LogEntry, SkipReason> {
        let fields = Self::split(raw)?;

        let level = fields.level.to_uppercase();
        let Some(parsed) = LogLevel::parse(&level) else {
            return Err(SkipReason::InvalidLevel { level });
        };

        Ok(LogEntry::new(
            fields.timestamp.to_string(),
            parsed,
            fields.service.to_string(),
            fields.message.to_string(),
        ))
    }

    fn split(raw: &str) -> Result<RawFields<'_>, SkipReason> {
        let line = raw.trim();
        if line.is_empty() {
            return Err(SkipReason::Blank);
        }

        let parts: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
        match parts.as_slice() {
            &[timestamp, level, service, message] => Ok(RawFields {
                timestamp,
                level,
                service,
                message,
            }),
            _ => Err(SkipReason::SegmentCount { found: parts.len() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_line_and_segments() {
        let fields = LineParser::parse("  2024-01-01T10:00:00 | info | auth-svc | login ok  ").unwrap();
        assert_eq!(fields.timestamp, "2024-01-01T10:00:00");
        assert_eq!(fields.level, "info");
        assert_eq!(fields.service, "auth-svc");
        assert_eq!(fields.message, "login ok");
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(LineParser::parse(""), None);
        assert_eq!(LineParser::parse("   \t  "), None);
        assert_eq!(LineParser::classify("\n"), Err(SkipReason::Blank));
    }

    #[test]
    fn test_parse_wrong_segment_count() {
        assert_eq!(
            LineParser::classify("bad line no pipes"),
            Err(SkipReason::SegmentCount { found: 1 })
        );
        assert_eq!(
            LineParser::classify("a | INFO | svc"),
            Err(SkipReason::SegmentCount { found: 3 })
        );
    }

    #[test]
    fn test_parse_rejects_pipe_in_message() {
        let line = "2024-01-01 | INFO | svc | status a|b";
        assert_eq!(LineParser::parse(line), None);
        assert_eq!(
            LineParser::classify(line),
            Err(SkipReason::SegmentCount { found: 5 })
        );
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        // Empty fields still count as segments; content is not validated here
        let fields = LineParser::parse("|INFO||").unwrap();
        assert_eq!(fields.timestamp, "");
        assert_eq!(fields.service, "");
        assert_eq!(fields.message, "");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let line = " t | warn | svc | msg ";
        assert_eq!(LineParser::parse(line), LineParser::parse(line));
    }

    #[test]
    fn test_classify_uppercases_level() {
        let entry = LineParser::classify("  2024-01-01T10:00:00 | info | auth-svc | login ok  ").unwrap();
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(
            entry.format_line(),
            "2024-01-01T10:00:00 | INFO | auth-svc | login ok"
        );
    }

    #[test]
    fn test_classify_invalid_level() {
        assert_eq!(
            LineParser::classify("2024-01-01 | debug | svc | msg"),
            Err(SkipReason::InvalidLevel {
                level: "DEBUG".to_string()
            })
        );
    }

    #[test]
    fn test_classify_multibyte_no_panic() {
        let entry = LineParser::classify("─── | Error | ╭svc╮ | 日本語").unwrap();
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.service, "╭svc╮");
    }
}
