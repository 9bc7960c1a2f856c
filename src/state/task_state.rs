/// Crawl task outcome definitions
///
/// Every task moves `Pending -> Fetching -> {Extracted | Skipped | Failed}`;
/// this module defines the terminal outcomes the coordinator records.
use std::fmt;

/// Why a task was skipped before its fetch was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The task's remaining depth budget was exhausted
    DepthExhausted,

    /// The URL was already marked in the visited set
    AlreadyVisited,

    /// The site's robots policy disallows the URL
    RobotsDenied,
}

/// Why a fetched task failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-2xx response
    Http(u16),

    /// Connection failure, timeout, or DNS failure
    Transport(String),

    /// Fetched fine but the content type is not HTML; nothing to extract.
    /// Terminal for the branch but not an error.
    NotHtml(String),
}

impl FailureKind {
    /// Returns true if the fetch itself failed (as opposed to succeeding
    /// with unusable content)
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Transport(_))
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "HTTP {}", status),
            Self::Transport(cause) => write!(f, "{}", cause),
            Self::NotHtml(content_type) => write!(f, "not HTML ({})", content_type),
        }
    }
}

/// Terminal outcome of one crawl task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Page was fetched and its links and assets extracted
    Extracted,

    /// Task was dropped before its fetch was issued
    Skipped(SkipReason),

    /// Branch terminated after the fetch was issued
    Failed(FailureKind),
}

impl TaskOutcome {
    /// Returns true if the fetcher was invoked for this task
    pub fn was_fetched(&self) -> bool {
        !matches!(self, Self::Skipped(_))
    }

    /// Returns true for successful extraction
    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted)
    }

    /// Short label for logs and the run report
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracted => "extracted",
            Self::Skipped(SkipReason::DepthExhausted) => "skipped_depth",
            Self::Skipped(SkipReason::AlreadyVisited) => "skipped_visited",
            Self::Skipped(SkipReason::RobotsDenied) => "skipped_robots",
            Self::Failed(FailureKind::Http(_)) => "failed_http",
            Self::Failed(FailureKind::Transport(_)) => "failed_transport",
            Self::Failed(FailureKind::NotHtml(_)) => "not_html",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_tasks_were_not_fetched() {
        assert!(!TaskOutcome::Skipped(SkipReason::DepthExhausted).was_fetched());
        assert!(!TaskOutcome::Skipped(SkipReason::AlreadyVisited).was_fetched());
        assert!(!TaskOutcome::Skipped(SkipReason::RobotsDenied).was_fetched());
    }

    #[test]
    fn test_failed_tasks_were_fetched() {
        assert!(TaskOutcome::Failed(FailureKind::Http(404)).was_fetched());
        assert!(TaskOutcome::Extracted.was_fetched());
    }

    #[test]
    fn test_fetch_error_classification() {
        assert!(FailureKind::Http(500).is_fetch_error());
        assert!(FailureKind::Transport("timeout".to_string()).is_fetch_error());
        assert!(!FailureKind::NotHtml("application/pdf".to_string()).is_fetch_error());
    }

    #[test]
    fn test_labels_are_distinct() {
        let outcomes = [
            TaskOutcome::Extracted,
            TaskOutcome::Skipped(SkipReason::DepthExhausted),
            TaskOutcome::Skipped(SkipReason::AlreadyVisited),
            TaskOutcome::Skipped(SkipReason::RobotsDenied),
            TaskOutcome::Failed(FailureKind::Http(404)),
            TaskOutcome::Failed(FailureKind::Transport("x".to_string())),
            TaskOutcome::Failed(FailureKind::NotHtml("image/png".to_string())),
        ];
        let labels: std::collections::HashSet<_> =
            outcomes.iter().map(|o| o.as_str()).collect();
        assert_eq!(labels.len(), outcomes.len());
    }
}
