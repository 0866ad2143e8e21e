//! Kconfig formatter: re-renders the scanned node stream in the configured
//! style.
//!
//! Passes, in node order:
//! - Statements are re-indented from their placement and depth; over-long
//!   lines containing `&&`/`||` are wrapped into backslash continuations.
//! - Help blocks are re-indented relative to their owner and optionally
//!   reflowed. Blank runs inside help always collapse to one line.
//! - Blank runs between statements collapse to one when consolidation is on.
//!
//! Design notes:
//! - A closer (`endmenu`, `endchoice`, `endif`) that directly follows entry
//!   body or help text gets one blank line in front of it.
//! - Every rendered line remembers the physical line it came from so that
//!   leftover issues point back into the input.
//! - Problems the renderer cannot fix (over-long lines without a wrap point,
//!   naming rules) are returned as issues next to the rendered text.

use crate::checks::{check_config_name, IssueCollector};
use crate::classify::{fix_comment_spacing, LineKind};
use crate::config::LinterConfig;
use crate::continuation::wrap_logical;
use crate::indent::IndentStyle;
use crate::lint::Linter;
use crate::models::LintIssue;
use crate::parser::{scan, HelpBlock, HelpLine, Node, Placement, Statement};
use crate::reflow::reflow;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
/// Outcome of formatting one file.
pub struct FormatResult {
    pub file: String,
    pub changed: bool,
    pub wrote: bool,
    pub preview: Option<String>,
    pub original: Option<String>,
    /// Issues left after formatting, including read failures.
    pub issues: Vec<LintIssue>,
    /// Write-back failure for this file.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Blank,
    Body,
    Top,
}

struct Renderer<'a> {
    config: &'a LinterConfig,
    style: IndentStyle,
    lines: Vec<(String, usize)>,
    issues: IssueCollector,
    prev: Prev,
}

impl<'a> Renderer<'a> {
    fn new(config: &'a LinterConfig) -> Self {
        Self {
            config,
            style: IndentStyle::from_config(config),
            lines: Vec::new(),
            issues: IssueCollector::new(),
            prev: Prev::Start,
        }
    }

    fn emit(&mut self, text: String, source: usize) {
        let len = text.chars().count();
        if len > self.config.max_line_length {
            self.issues.warning(
                source,
                None,
                format!(
                    "Line exceeds {} characters ({})",
                    self.config.max_line_length, len
                ),
            );
        }
        self.lines.push((text, source));
    }

    fn blank(&mut self, source: usize) {
        if self.config.consolidate_empty_lines && self.prev == Prev::Blank {
            return;
        }
        self.lines.push((String::new(), source));
        self.prev = Prev::Blank;
    }

    fn statement(&mut self, stmt: &Statement) {
        if stmt.kind.is_block_end() && self.prev == Prev::Body {
            self.lines.push((String::new(), stmt.first_line));
        }
        let indent = self.style.statement(stmt.placement, stmt.depth);
        if stmt.kind == LineKind::CommentLine {
            self.emit(
                format!("{}{}", indent, fix_comment_spacing(&stmt.code)),
                stmt.first_line,
            );
        } else {
            if matches!(stmt.kind, LineKind::Config | LineKind::Menuconfig) {
                check_config_name(stmt.first_line, &stmt.code, self.config, &mut self.issues);
            }
            let mut full = format!("{}{}", indent, stmt.code);
            if let Some(comment) = &stmt.comment {
                full.push_str("  ");
                full.push_str(comment);
            }
            let wrapped = if full.chars().count() > self.config.max_line_length {
                wrap_logical(
                    &stmt.code,
                    stmt.comment.as_deref(),
                    &indent,
                    &self.style.continuation(stmt.placement, stmt.depth),
                    self.config.max_line_length,
                )
            } else {
                None
            };
            match wrapped {
                Some(parts) => {
                    tracing::debug!(line = stmt.first_line, parts = parts.len(), "wrapped");
                    for part in parts {
                        self.emit(part, stmt.first_line);
                    }
                }
                None => self.emit(full, stmt.first_line),
            }
        }
        self.prev = match stmt.placement {
            Placement::Body => Prev::Body,
            Placement::Top => Prev::Top,
        };
    }

    fn help(&mut self, block: &HelpBlock) {
        let prefix = self.style.help_text(block.depth);
        let lines = collapse_blank_runs(&block.lines);
        if self.config.reflow_help_text {
            // Indented lines (examples, lists) stay verbatim and end a paragraph.
            let mut paragraph: Vec<&HelpLine> = Vec::new();
            for hl in &lines {
                if hl.is_blank() || hl.extra > 0 {
                    self.reflow_paragraph(&paragraph, &prefix);
                    paragraph.clear();
                    self.help_line(hl, &prefix);
                } else {
                    paragraph.push(hl);
                }
            }
            self.reflow_paragraph(&paragraph, &prefix);
        } else {
            for hl in &lines {
                self.help_line(hl, &prefix);
            }
        }
        if !lines.is_empty() {
            self.prev = Prev::Body;
        }
    }

    fn help_line(&mut self, hl: &HelpLine, prefix: &str) {
        if hl.is_blank() {
            self.lines.push((String::new(), hl.line));
        } else {
            self.emit(
                format!("{}{}{}", prefix, " ".repeat(hl.extra), hl.text),
                hl.line,
            );
        }
    }

    fn reflow_paragraph(&mut self, paragraph: &[&HelpLine], prefix: &str) {
        let Some(first) = paragraph.first() else {
            return;
        };
        let texts: Vec<String> = paragraph.iter().map(|hl| hl.text.clone()).collect();
        let source = first.line;
        for out in reflow(&texts, prefix, self.config.max_line_length) {
            self.emit(format!("{}{}", prefix, out), source);
        }
    }
}

fn collapse_blank_runs(lines: &[HelpLine]) -> Vec<HelpLine> {
    let mut out: Vec<HelpLine> = Vec::with_capacity(lines.len());
    for hl in lines {
        if hl.is_blank() && out.last().is_some_and(HelpLine::is_blank) {
            continue;
        }
        out.push(hl.clone());
    }
    out
}

impl Linter {
    /// Format a file on disk. A read failure yields no lines and a single
    /// issue.
    pub fn format_file(&self, path: &Path) -> (Vec<String>, Vec<LintIssue>) {
        match fs::read_to_string(path) {
            Ok(content) => self.format_str(&content),
            Err(e) => (Vec::new(), vec![LintIssue::read_failure(e)]),
        }
    }

    /// Render `content` in the configured style. Each returned line ends
    /// with `\n`.
    pub fn format_str(&self, content: &str) -> (Vec<String>, Vec<LintIssue>) {
        let mut r = Renderer::new(self.config());
        for node in scan(content).nodes {
            match node {
                Node::Blank { line } => r.blank(line),
                Node::Statement(stmt) => r.statement(&stmt),
                Node::Help(block) => r.help(&block),
            }
        }
        let lines = r
            .lines
            .into_iter()
            .map(|(text, _)| format!("{}\n", text))
            .collect();
        let mut issues = r.issues.into_issues();
        issues.sort_by_key(|i| i.line_number);
        (lines, issues)
    }
}

/// Format `files` in parallel.
///
/// With `write`, changed files are rewritten in place keeping their line
/// endings; a failed write is recorded on that file's result only. Without
/// `write`, `capture_old` keeps the original and the rendered text for
/// previews and diffs.
pub fn run_format(
    files: &[PathBuf],
    config: &LinterConfig,
    write: bool,
    capture_old: bool,
) -> Vec<FormatResult> {
    run_format_with(files, config, write, capture_old, |path, text| {
        fs::write(path, text)
    })
}

fn run_format_with<W>(
    files: &[PathBuf],
    config: &LinterConfig,
    write: bool,
    capture_old: bool,
    write_file: W,
) -> Vec<FormatResult>
where
    W: Fn(&Path, &str) -> io::Result<()> + Sync,
{
    let linter = Linter::new(config.clone());
    files
        .par_iter()
        .map(|file| format_one(&linter, file, write, capture_old, &write_file))
        .collect()
}

fn format_one<W>(
    linter: &Linter,
    path: &Path,
    write: bool,
    capture_old: bool,
    write_file: &W,
) -> FormatResult
where
    W: Fn(&Path, &str) -> io::Result<()>,
{
    let file = path.to_string_lossy().to_string();
    tracing::debug!(file = %path.display(), "formatting");
    let original = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            return FormatResult {
                file,
                issues: vec![LintIssue::read_failure(e)],
                ..FormatResult::default()
            }
        }
    };
    let (lines, issues) = linter.format_str(&original);
    let mut rendered = lines.concat();
    if original.contains("\r\n") {
        rendered = rendered.replace('\n', "\r\n");
    }
    let changed = rendered != original;
    let mut res = FormatResult {
        file,
        changed,
        issues,
        ..FormatResult::default()
    };
    if write {
        if changed {
            match write_file(path, &rendered) {
                Ok(()) => {
                    tracing::info!(file = %path.display(), "formatted");
                    res.wrote = true;
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "write failed");
                    res.error = Some(e.to_string());
                }
            }
        }
    } else if capture_old {
        res.preview = Some(rendered);
        res.original = Some(original);
    }
    res
}
