//! Report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use crate::severity::{ComparisonOutcome, ComparisonResult, Severity};
use serde::{Deserialize, Serialize};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    /// Total number of results
    pub total: usize,

    /// Number of breaking changes
    pub breaking: usize,

    /// Number of feature changes
    pub feature: usize,
}

/// Comparison report (report.json v1)
///
/// This is the stable output format.
/// All fields are versioned and backward-compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Overall semantic-versioning impact
    pub change_type: Severity,

    /// Summary statistics
    pub summary: ReportSummary,

    /// All classified changes
    pub results: Vec<ComparisonResult>,
}

impl Report {
    /// Create a report from a comparison outcome
    pub fn from_outcome(outcome: ComparisonOutcome) -> Self {
        let summary = ReportSummary {
            total: outcome.results.len(),
            breaking: outcome.count_at(Severity::Breaking),
            feature: outcome.count_at(Severity::Feature),
        };

        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            change_type: outcome.change_type,
            summary,
            results: outcome.results,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render a markdown summary
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# API comparison report\n\n");
        out.push_str(&format!("Overall impact: **{}**\n\n", self.change_type));
        out.push_str(&format!(
            "{} change(s): {} breaking, {} feature\n\n",
            self.summary.total, self.summary.breaking, self.summary.feature
        ));

        for result in &self.results {
            out.push_str(&format!("- `{}` {}\n", result.change_type, result.message));
        }

        out
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::{ItemKind, ItemRef};

    fn sample_outcome() -> ComparisonOutcome {
        ComparisonOutcome::from_results(vec![
            ComparisonResult::removed(
                Severity::Breaking,
                ItemRef::new(ItemKind::Method, "Run", "MyLib.Runner.Run"),
                "Method MyLib.Runner.Run has been removed",
            ),
            ComparisonResult::added(
                Severity::Feature,
                ItemRef::new(ItemKind::Property, "Count", "MyLib.Runner.Count"),
                "Property MyLib.Runner.Count has been added",
            ),
        ])
    }

    #[test]
    fn summary_counts() {
        let report = Report::from_outcome(sample_outcome());
        assert_eq!(report.version, ReportVersion::CURRENT);
        assert_eq!(report.change_type, Severity::Breaking);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.breaking, 1);
        assert_eq!(report.summary.feature, 1);
    }

    #[test]
    fn report_serialization() {
        let report = Report::from_outcome(sample_outcome());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"breaking\""));
    }

    #[test]
    fn markdown_lists_every_result() {
        let report = Report::from_outcome(sample_outcome());
        let markdown = report.to_markdown();
        assert!(markdown.contains("**breaking**"));
        assert!(markdown.contains("has been removed"));
        assert!(markdown.contains("has been added"));
    }
}
