//! Backslash continuation joining and operator-aware wrapping.

use crate::classify::split_inline_comment;

/// True when a physical line continues onto the next one.
pub fn has_continuation(line: &str) -> bool {
    line.trim_end().ends_with('\\')
}

/// Join physical lines of one logical line into a single string, dropping
/// the trailing backslashes.
///
/// When more than one piece is joined, whitespace runs in the code outside
/// quoted strings collapse to one space. An inline comment on the last piece
/// is kept as written, two spaces after the code.
pub fn join_lines(pieces: &[&str]) -> String {
    let mut joined = String::new();
    for piece in pieces {
        let text = piece.trim();
        let text = text.strip_suffix('\\').unwrap_or(text).trim_end();
        if text.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(text);
    }
    if pieces.len() < 2 {
        return joined;
    }
    let (code, comment) = split_inline_comment(&joined);
    let mut normalized = tokens(code).join(" ");
    if let Some(c) = comment {
        normalized.push_str("  ");
        normalized.push_str(c);
    }
    normalized
}

/// Whitespace-separated tokens of `code`, keeping quoted strings whole.
fn tokens(code: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, ch) in code.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if let Some(q) = quote {
            if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                out.push(&code[s..i]);
            }
            continue;
        }
        if start.is_none() {
            start = Some(i);
        }
        if ch == '"' || ch == '\'' {
            quote = Some(ch);
        }
    }
    if let Some(s) = start {
        out.push(&code[s..]);
    }
    out
}

fn is_operator(token: &str) -> bool {
    token == "&&" || token == "||"
}

/// Split `code` after each boolean operator token.
fn segments(code: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for token in tokens(code) {
        current.push(token);
        if is_operator(token) {
            out.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out
}

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Wrap a logical line at `&&`/`||` boundaries.
///
/// The first output line starts with `prefix`, later ones with
/// `cont_prefix`. Every line but the last ends with ` \`. Segments are packed
/// greedily so each line stays within `max` where possible. Returns `None`
/// when there is no operator to break on or everything fits on one line.
pub fn wrap_logical(
    code: &str,
    comment: Option<&str>,
    prefix: &str,
    cont_prefix: &str,
    max: usize,
) -> Option<Vec<String>> {
    let segs = segments(code);
    if segs.len() < 2 {
        return None;
    }
    let tail = comment.map(|c| width(c) + 2).unwrap_or(0);
    let mut lines: Vec<String> = Vec::new();
    let mut current = segs[0].clone();
    let mut lead = prefix;
    for (i, seg) in segs.iter().enumerate().skip(1) {
        let last = i == segs.len() - 1;
        let reserve = if last { tail } else { 2 };
        if width(lead) + width(&current) + 1 + width(seg) + reserve <= max {
            current.push(' ');
            current.push_str(seg);
        } else {
            lines.push(format!("{}{} \\", lead, current));
            lead = cont_prefix;
            current = seg.clone();
        }
    }
    if lines.is_empty() {
        return None;
    }
    let mut last = format!("{}{}", lead, current);
    if let Some(c) = comment {
        last.push_str("  ");
        last.push_str(c);
    }
    lines.push(last);
    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_strips_backslashes_and_indent() {
        let pieces = ["\tdepends on A && \\", "\t\t   B || \\  ", "\t\tC  # note"];
        assert!(has_continuation(pieces[0]));
        assert!(has_continuation(pieces[1]));
        assert!(!has_continuation(pieces[2]));
        assert_eq!(join_lines(&pieces), "depends on A && B || C  # note");
    }

    #[test]
    fn test_join_collapses_interior_whitespace() {
        let pieces = ["\tdepends on A   &&  \\", "\t\tB  ||   C"];
        assert_eq!(join_lines(&pieces), "depends on A && B || C");

        let pieces = ["\tprompt \"two  spaces\"   if \\", "\t\tFOO    #  keep   this"];
        assert_eq!(
            join_lines(&pieces),
            "prompt \"two  spaces\" if FOO  #  keep   this"
        );

        assert_eq!(join_lines(&["\tdefault   y"]), "default   y");
    }

    #[test]
    fn test_wrap_at_operator_boundary() {
        let code = "depends on FOO && BAR && BAZ && QUX && VERY_LONG_NAME";
        let out = wrap_logical(code, None, "\t", "\t\t", 50).unwrap();
        assert_eq!(
            out,
            vec![
                "\tdepends on FOO && BAR && BAZ && QUX && \\".to_string(),
                "\t\tVERY_LONG_NAME".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrap_keeps_token_sequence_and_width() {
        let code = "depends on ALPHA_ONE || BETA_TWO || GAMMA_THREE || DELTA_FOUR || EPSILON";
        let out = wrap_logical(code, Some("# why"), "\t", "\t\t", 40).unwrap();
        for line in &out[..out.len() - 1] {
            assert!(line.ends_with(" \\"));
            assert!(line.chars().count() <= 40);
        }
        assert!(out.last().unwrap().ends_with("  # why"));
        let joined = out
            .iter()
            .map(|l| l.trim().trim_end_matches('\\').trim())
            .collect::<Vec<_>>()
            .join(" ");
        let rebuilt: Vec<&str> = joined
            .split_whitespace()
            .filter(|t| !t.starts_with('#') && *t != "why")
            .collect();
        assert_eq!(rebuilt, code.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn test_no_operator_or_quoted_operator_is_not_wrapped() {
        assert!(wrap_logical("bool \"A very long prompt\"", None, "\t", "\t\t", 10).is_none());
        assert!(wrap_logical("prompt \"x && y\"", None, "", "\t", 5).is_none());
    }
}
