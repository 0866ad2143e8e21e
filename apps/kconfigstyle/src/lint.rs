//! Lint runner for Kconfig style checks.
//!
//! Produces per-file issue lists in document order and a `LintResult` with a
//! summary across files. Checks run per physical line; the structural scan
//! only decides which checks apply to a line (code, comment or help text).

use crate::checks::{
    check_comment_spacing, check_config_name, check_help_indent, check_indentation,
    check_line_length, check_trailing_whitespace, IssueCollector,
};
use crate::classify::LineKind;
use crate::config::LinterConfig;
use crate::models::{FileReport, LintIssue, LintResult};
use crate::parser::{scan, Node};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Role {
    Code { declares: Option<String> },
    Comment,
    Help { keyword_indent: String },
}

/// Assign each physical line the role the scanner gave it.
fn line_roles(content: &str, count: usize) -> Vec<Option<Role>> {
    let mut roles = vec![None; count];
    let mut set = |line: usize, role: Role| {
        if let Some(slot) = line.checked_sub(1).and_then(|i| roles.get_mut(i)) {
            *slot = Some(role);
        }
    };
    for node in scan(content).nodes {
        match node {
            Node::Blank { .. } => {}
            Node::Statement(stmt) => {
                if stmt.kind == LineKind::CommentLine {
                    set(stmt.first_line, Role::Comment);
                    continue;
                }
                let declares = matches!(stmt.kind, LineKind::Config | LineKind::Menuconfig)
                    .then(|| stmt.code.clone());
                set(stmt.first_line, Role::Code { declares });
                for line in stmt.first_line + 1..=stmt.last_line {
                    set(line, Role::Code { declares: None });
                }
            }
            Node::Help(block) => {
                for hl in block.lines.iter().filter(|l| !l.is_blank()) {
                    set(
                        hl.line,
                        Role::Help {
                            keyword_indent: block.keyword_indent.clone(),
                        },
                    );
                }
            }
        }
    }
    roles
}

#[derive(Debug, Clone, Default)]
/// Linter and formatter bound to one style profile.
pub struct Linter {
    config: LinterConfig,
}

impl Linter {
    pub fn new(config: LinterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    /// Lint a file on disk. A read failure becomes a single issue.
    pub fn lint_file(&self, path: &Path) -> Vec<LintIssue> {
        match fs::read_to_string(path) {
            Ok(content) => self.lint_str(&content),
            Err(e) => vec![LintIssue::read_failure(e)],
        }
    }

    /// Lint in-memory content, returning issues in line order.
    pub fn lint_str(&self, content: &str) -> Vec<LintIssue> {
        let lines: Vec<&str> = content.lines().collect();
        let roles = line_roles(content, lines.len());
        let mut out = IssueCollector::new();
        let mut blank_run = 0usize;
        for (idx, raw) in lines.iter().enumerate() {
            let line_no = idx + 1;
            check_trailing_whitespace(line_no, raw, &mut out);
            check_line_length(line_no, raw, self.config.max_line_length, &mut out);
            if raw.trim().is_empty() {
                blank_run += 1;
                if self.config.consolidate_empty_lines && blank_run == 2 {
                    out.warning(line_no, None, "Multiple consecutive empty lines");
                }
                continue;
            }
            blank_run = 0;
            match &roles[idx] {
                Some(Role::Help { keyword_indent }) => {
                    check_help_indent(line_no, raw, keyword_indent, &self.config, &mut out)
                }
                Some(Role::Comment) => {
                    check_indentation(line_no, raw, &self.config, &mut out);
                    check_comment_spacing(line_no, raw, &mut out);
                }
                Some(Role::Code { declares }) => {
                    check_indentation(line_no, raw, &self.config, &mut out);
                    if let Some(code) = declares {
                        check_config_name(line_no, code, &self.config, &mut out);
                    }
                }
                None => check_indentation(line_no, raw, &self.config, &mut out),
            }
        }
        out.into_issues()
    }
}

/// Lint `files` in parallel; reports keep the input order.
pub fn run_lint(files: &[PathBuf], config: &LinterConfig) -> LintResult {
    let linter = Linter::new(config.clone());
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| {
            tracing::debug!(file = %file.display(), "linting");
            FileReport {
                file: file.to_string_lossy().to_string(),
                issues: linter.lint_file(file),
            }
        })
        .collect();
    LintResult::from_reports(reports)
}
