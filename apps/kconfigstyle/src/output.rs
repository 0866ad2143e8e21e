//! Output rendering for lint and format commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-file fields and a top-level summary.

use crate::format::FormatResult;
use crate::models::{LintIssue, LintResult, Severity};
use crate::utils::{display_path, error_prefix};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn render_issue(is: &LintIssue, color: bool) -> String {
    let plain = is.to_string();
    if !color {
        return plain;
    }
    let tag = format!("[{}]", is.severity);
    let painted = match is.severity {
        Severity::Error => tag.red().bold().to_string(),
        Severity::Warning => tag.yellow().bold().to_string(),
    };
    plain.replacen(&tag, &painted, 1)
}

fn print_issues(file: &str, issues: &[LintIssue], color: bool) {
    let shown = display_path(file);
    for is in issues {
        if color {
            println!("{}: {}", shown.bold(), render_issue(is, true));
        } else {
            println!("{}: {}", shown, is);
        }
    }
}

fn pretty(value: &JsonVal) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => println!("{}", pretty(&compose_lint_json(res))),
        _ => {
            let color = use_colors(output);
            for report in &res.reports {
                print_issues(&report.file, &report.issues, color);
            }
            let with_issues = res.reports.iter().filter(|r| !r.issues.is_empty()).count();
            let summary = if res.issue_count() == 0 {
                format!("No issues found in {} file(s)", res.summary.files)
            } else {
                format!(
                    "Found {} issue(s) in {} file(s)",
                    res.issue_count(),
                    with_issues
                )
            };
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print formatting results. When `write` is false, previews and diffs
/// can be emitted; otherwise only file statuses are shown.
pub fn print_format(results: &[FormatResult], output: &str, write: bool, diff: bool, check: bool) {
    match output {
        "json" => println!("{}", pretty(&compose_format_json(results, write, diff))),
        _ => {
            let color = use_colors(output);
            for r in results {
                let file = display_path(&r.file);
                if let Some(err) = &r.error {
                    eprintln!("{} failed to write {}: {}", error_prefix(), file, err);
                }
                if write {
                    if r.wrote {
                        if color {
                            println!("{} {}", "formatted:".green().bold(), file.bold());
                        } else {
                            println!("formatted: {}", file);
                        }
                    }
                } else if r.changed {
                    if diff {
                        if let Some(d) =
                            build_line_diff(r.original.as_deref(), r.preview.as_deref())
                        {
                            if color {
                                println!("{} {}\n{}", "---".cyan().bold(), file.bold(), d);
                            } else {
                                println!("--- {}\n{}", file, d);
                            }
                        }
                    } else if check {
                        if color {
                            println!("{} {}", "would reformat:".yellow().bold(), file);
                        } else {
                            println!("would reformat: {}", file);
                        }
                    } else if let Some(prev) = &r.preview {
                        if color {
                            println!("{} {}\n{}", "---".cyan().bold(), file.bold(), prev);
                        } else {
                            println!("--- {}\n{}", file, prev);
                        }
                    }
                } else if color {
                    println!("{} {}", "no changes:".bright_black(), file);
                } else {
                    println!("no changes: {}", file);
                }
                print_issues(&r.file, &r.issues, color);
            }
            let changed = results.iter().filter(|r| r.changed).count();
            let summary = if write {
                format!(
                    "Formatted {} file(s)",
                    results.iter().filter(|r| r.wrote).count()
                )
            } else {
                format!("{} of {} file(s) would be reformatted", changed, results.len())
            };
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Line diff between `old` and `new` built from their longest common
/// subsequence. Removed lines start with `-`, added ones with `+`.
fn build_line_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old: Vec<&str> = old?.lines().collect();
    let new: Vec<&str> = new?.lines().collect();
    let (n, m) = (old.len(), new.len());
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }
    let mut out = String::new();
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && old[i] == new[j] {
            i += 1;
            j += 1;
        } else if i < n && (j == m || lcs[i + 1][j] >= lcs[i][j + 1]) {
            out.push_str(&format!("-{}\n", old[i]));
            i += 1;
        } else {
            out.push_str(&format!("+{}\n", new[j]));
            j += 1;
        }
    }
    Some(out)
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    let files: Vec<_> = res
        .reports
        .iter()
        .map(|r| json!({"file": display_path(&r.file), "issues": r.issues}))
        .collect();
    json!({"files": files, "summary": res.summary})
}

/// Compose format JSON object (pure) for testing/snapshot purposes.
pub fn compose_format_json(results: &[FormatResult], write: bool, diff: bool) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": display_path(&r.file),
                "changed": r.changed,
                "wrote": r.wrote,
                "preview": if !write { r.preview.as_ref() } else { None },
                "diff": if diff && !write { build_line_diff(r.original.as_deref(), r.preview.as_deref()) } else { None },
                "issues": r.issues,
                "error": r.error,
            })
        })
        .collect();
    let summary = json!({
        "changed": results.iter().filter(|r| r.changed).count(),
        "total": results.len(),
        "wrote": results.iter().filter(|r| r.wrote).count(),
        "issues": results.iter().map(|r| r.issues.len()).sum::<usize>(),
    });
    json!({"results": items, "summary": summary})
}
