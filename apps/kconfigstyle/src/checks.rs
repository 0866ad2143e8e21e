//! Per-line style checks and the issue collector they report into.
//!
//! Every check is infallible: when a rule does not apply to a line it simply
//! reports nothing.

use crate::classify::{comment_needs_space, leading_whitespace};
use crate::config::LinterConfig;
use crate::models::{LintIssue, Severity};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Default)]
/// Ordered accumulator of issues for one file.
pub struct IssueCollector {
    issues: Vec<LintIssue>,
}

impl IssueCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, line: usize, column: Option<usize>, message: impl Into<String>) {
        self.issues
            .push(LintIssue::new(line, column, Severity::Error, message));
    }

    pub fn warning(&mut self, line: usize, column: Option<usize>, message: impl Into<String>) {
        self.issues
            .push(LintIssue::new(line, column, Severity::Warning, message));
    }

    pub fn into_issues(self) -> Vec<LintIssue> {
        self.issues
    }
}

pub fn check_trailing_whitespace(line_no: usize, raw: &str, out: &mut IssueCollector) {
    let kept = raw.trim_end();
    if kept.len() != raw.len() {
        out.warning(
            line_no,
            Some(kept.chars().count() + 1),
            "Trailing whitespace",
        );
    }
}

pub fn check_line_length(line_no: usize, raw: &str, max: usize, out: &mut IssueCollector) {
    let len = raw.chars().count();
    if len > max {
        out.warning(
            line_no,
            None,
            format!("Line exceeds {} characters ({})", max, len),
        );
    }
}

/// Indentation character and unit of a code line. Only the first violation
/// found is reported.
pub fn check_indentation(
    line_no: usize,
    raw: &str,
    config: &LinterConfig,
    out: &mut IssueCollector,
) {
    let lead = leading_whitespace(raw);
    if lead.is_empty() {
        return;
    }
    let tabs = lead.contains('\t');
    let spaces = lead.contains(' ');
    if tabs && spaces {
        out.error(line_no, Some(1), "Mixed tabs and spaces in indentation");
    } else if config.use_spaces && tabs {
        out.error(line_no, Some(1), "Use spaces for indentation");
    } else if !config.use_spaces && spaces {
        out.error(line_no, Some(1), "Use tabs for indentation");
    } else if config.use_spaces
        && config.primary_indent_spaces > 0
        && lead.len() % config.primary_indent_spaces != 0
    {
        out.error(
            line_no,
            Some(1),
            format!(
                "Indentation should be a multiple of {} spaces",
                config.primary_indent_spaces
            ),
        );
    }
}

pub fn check_comment_spacing(line_no: usize, comment: &str, out: &mut IssueCollector) {
    if comment_needs_space(comment) {
        let col = leading_whitespace(comment).chars().count() + 1;
        out.warning(line_no, Some(col), "Comment should have a space after #");
    }
}

/// Help text must start with the `help` keyword's indentation followed by
/// `help_indent_spaces` spaces.
pub fn check_help_indent(
    line_no: usize,
    raw: &str,
    keyword_indent: &str,
    config: &LinterConfig,
    out: &mut IssueCollector,
) {
    let extra = " ".repeat(config.help_indent_spaces);
    let ok = raw
        .strip_prefix(keyword_indent)
        .is_some_and(|rest| rest.starts_with(&extra));
    if !ok {
        let base = if keyword_indent.is_empty() {
            String::new()
        } else if keyword_indent.contains('\t') {
            "the help keyword's indentation plus ".to_string()
        } else {
            format!("{} spaces plus ", keyword_indent.len())
        };
        out.error(
            line_no,
            Some(1),
            format!(
                "Help text should be indented with {}{} spaces",
                base, config.help_indent_spaces
            ),
        );
    }
}

fn config_name_re() -> Option<&'static Regex> {
    static CONFIG_NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();
    CONFIG_NAME_RE
        .get_or_init(|| Regex::new(r"^\s*(?:menu)?config\s+(\S+)").ok())
        .as_ref()
}

/// Symbol name declared by a `config`/`menuconfig` statement.
pub fn config_name(code: &str) -> Option<&str> {
    config_name_re()?
        .captures(code)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Naming rules for the identifier declared on a `config`/`menuconfig`
/// line. Lines without an identifier report nothing.
pub fn check_config_name(
    line_no: usize,
    code: &str,
    config: &LinterConfig,
    out: &mut IssueCollector,
) {
    let Some(name) = config_name(code) else {
        return;
    };
    if config.uppercase_configs && name != name.to_uppercase() {
        out.error(
            line_no,
            None,
            format!("Config name '{}' must be uppercase", name),
        );
    }
    if let Some(max) = config.max_option_name_length {
        if name.chars().count() > max {
            out.error(
                line_no,
                None,
                format!("Config name '{}' exceeds {} characters", name, max),
            );
        }
    }
    if let Some(min) = config.min_prefix_length {
        if let Some((prefix, _)) = name.split_once('_') {
            if prefix.chars().count() < min {
                out.error(
                    line_no,
                    None,
                    format!(
                        "Config prefix '{}' should be at least {} characters",
                        prefix, min
                    ),
                );
            }
        }
    }
}
