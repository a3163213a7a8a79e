use logsift_types::{FilterCriteria, LogEntry};

/// Check an entry's level and service against optional filters
///
/// Both checks must pass. A filter that is `None` or empty always passes;
/// otherwise the comparison is exact. Callers uppercase both levels first.
pub fn matches_filters(
    level: &str,
    service: &str,
    level_filter: Option<&str>,
    service_filter: Option<&str>,
) -> bool {
    if let Some(wanted) = level_filter.filter(|f| !f.is_empty()) {
        if level != wanted {
            return false;
        }
    }

    if let Some(wanted) = service_filter.filter(|f| !f.is_empty()) {
        if service != wanted {
            return false;
        }
    }

    true
}

/// Filter applied to every valid entry of a run
#[derive(Clone, Debug, Default)]
pub struct FilterMatcher {
    criteria: FilterCriteria,
}

impl FilterMatcher {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    /// Check if a log entry passes the level and service filters
    pub fn matches(&self, entry: &LogEntry) -> bool {
        matches_filters(
            entry.level.as_str(),
            &entry.service,
            self.criteria.level.as_deref(),
            self.criteria.service.as_deref(),
        )
    }
}
