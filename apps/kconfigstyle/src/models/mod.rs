//! Shared data models for lint/format outputs and the Kconfig AST.

pub mod ast;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity attached to a lint issue. Both levels fail a lint run.
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single style violation located on a physical input line.
pub struct LintIssue {
    /// 1-based physical line number.
    pub line_number: usize,
    /// 1-based column when the violation has a precise position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub severity: Severity,
    pub message: String,
}

impl LintIssue {
    pub fn new(
        line_number: usize,
        column: Option<usize>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            column,
            severity,
            message: message.into(),
        }
    }

    /// Issue emitted when a file cannot be read at all.
    pub fn read_failure(reason: impl fmt::Display) -> Self {
        Self::new(
            1,
            None,
            Severity::Error,
            format!("Failed to read file: {}", reason),
        )
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(col) => write!(
                f,
                "Line {}:{}: [{}] {}",
                self.line_number, col, self.severity, self.message
            ),
            None => write!(
                f,
                "Line {}: [{}] {}",
                self.line_number, self.severity, self.message
            ),
        }
    }
}

#[derive(Debug, Serialize)]
/// Issues found in one file.
pub struct FileReport {
    pub file: String,
    pub issues: Vec<LintIssue>,
}

#[derive(Debug, Default, Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub files: usize,
}

#[derive(Debug, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub reports: Vec<FileReport>,
    pub summary: Summary,
}

impl LintResult {
    /// Build a result and its summary from per-file reports.
    pub fn from_reports(reports: Vec<FileReport>) -> Self {
        let mut summary = Summary {
            files: reports.len(),
            ..Summary::default()
        };
        for is in reports.iter().flat_map(|r| r.issues.iter()) {
            match is.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
        }
        LintResult { reports, summary }
    }

    pub fn issue_count(&self) -> usize {
        self.summary.errors + self.summary.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display_with_and_without_column() {
        let with_col = LintIssue::new(10, Some(5), Severity::Error, "Test message");
        assert_eq!(with_col.to_string(), "Line 10:5: [error] Test message");
        let no_col = LintIssue::new(10, None, Severity::Warning, "Test message");
        assert_eq!(no_col.to_string(), "Line 10: [warning] Test message");
    }

    #[test]
    fn test_summary_counts_by_severity() {
        let res = LintResult::from_reports(vec![
            FileReport {
                file: "a/Kconfig".into(),
                issues: vec![
                    LintIssue::new(1, None, Severity::Error, "x"),
                    LintIssue::new(2, None, Severity::Warning, "y"),
                ],
            },
            FileReport {
                file: "b/Kconfig".into(),
                issues: vec![],
            },
        ]);
        assert_eq!(res.summary.errors, 1);
        assert_eq!(res.summary.warnings, 1);
        assert_eq!(res.summary.files, 2);
        assert_eq!(res.issue_count(), 2);
    }

    #[test]
    fn test_read_failure_issue_shape() {
        let is = LintIssue::read_failure("No such file or directory");
        assert_eq!(is.line_number, 1);
        assert_eq!(is.severity, Severity::Error);
        assert!(is.message.starts_with("Failed to read file: "));
    }
}
