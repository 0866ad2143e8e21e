//! Context-free line classification.
//!
//! `classify` looks only at the first token of a line after leading
//! whitespace. Whether a keyword-looking line inside a help body is structure
//! or payload is decided by the parser, never here.

use serde::Serialize;

/// Visual width of a tab when comparing indentation columns.
pub const TAB_WIDTH: usize = 8;

const OPTION_KEYWORDS: &[&str] = &[
    "bool",
    "tristate",
    "int",
    "hex",
    "string",
    "def_bool",
    "def_tristate",
    "depends",
    "select",
    "imply",
    "range",
    "option",
    "prompt",
    "default",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Structural category of a single line.
pub enum LineKind {
    Config,
    Menuconfig,
    Help,
    Option,
    Menu,
    Endmenu,
    Choice,
    Endchoice,
    If,
    Endif,
    Source,
    Comment,
    CommentLine,
    Other,
}

impl LineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Config => "config",
            LineKind::Menuconfig => "menuconfig",
            LineKind::Help => "help",
            LineKind::Option => "option",
            LineKind::Menu => "menu",
            LineKind::Endmenu => "endmenu",
            LineKind::Choice => "choice",
            LineKind::Endchoice => "endchoice",
            LineKind::If => "if",
            LineKind::Endif => "endif",
            LineKind::Source => "source",
            LineKind::Comment => "comment",
            LineKind::CommentLine => "comment_line",
            LineKind::Other => "other",
        }
    }

    /// Keywords that end a help body when they sit at or left of the owning
    /// entry.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            LineKind::Config
                | LineKind::Menuconfig
                | LineKind::Menu
                | LineKind::Endmenu
                | LineKind::Choice
                | LineKind::Endchoice
                | LineKind::If
                | LineKind::Endif
                | LineKind::Source
                | LineKind::Comment
        )
    }

    pub fn is_block_end(&self) -> bool {
        matches!(self, LineKind::Endmenu | LineKind::Endchoice | LineKind::Endif)
    }
}

/// Classify a line by its leading keyword.
pub fn classify(line: &str) -> LineKind {
    let text = line.trim_start();
    if text.starts_with('#') {
        return LineKind::CommentLine;
    }
    let word = first_word(text);
    let rest = text[word.len()..].trim_start();
    match word {
        "config" => LineKind::Config,
        "menuconfig" => LineKind::Menuconfig,
        "help" | "---help---" if rest.is_empty() => LineKind::Help,
        w if OPTION_KEYWORDS.contains(&w) => LineKind::Option,
        "menu" => LineKind::Menu,
        "endmenu" => LineKind::Endmenu,
        "choice" => LineKind::Choice,
        "endchoice" => LineKind::Endchoice,
        "if" => LineKind::If,
        "endif" => LineKind::Endif,
        "source" | "rsource" | "osource" | "orsource" => LineKind::Source,
        "comment" if rest.starts_with('"') || rest.starts_with('\'') => LineKind::Comment,
        _ => LineKind::Other,
    }
}

/// Leading token of `text`, ending at whitespace or an inline `#`.
pub fn first_word(text: &str) -> &str {
    let end = text
        .find(|c: char| c.is_whitespace() || c == '#')
        .unwrap_or(text.len());
    &text[..end]
}

/// Leading whitespace of a physical line.
pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Visual column of the first non-blank character, with tab stops every
/// `TAB_WIDTH` columns.
pub fn indent_width(line: &str) -> usize {
    let mut col = 0;
    for ch in leading_whitespace(line).chars() {
        if ch == '\t' {
            col += TAB_WIDTH - col % TAB_WIDTH;
        } else {
            col += 1;
        }
    }
    col
}

/// Split `text` into code and an inline `#` comment outside quotes.
///
/// The returned code has trailing whitespace removed; the comment starts at
/// its `#`.
pub fn split_inline_comment(text: &str) -> (&str, Option<&str>) {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Some(q) => {
                if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '#' if i > 0 && text[..i].ends_with(char::is_whitespace) => {
                    return (text[..i].trim_end(), Some(text[i..].trim_end()));
                }
                _ => {}
            },
        }
    }
    (text.trim_end(), None)
}

/// True when a `#` comment has text glued to the hash.
///
/// A bare `#` and banner runs such as `####` or `## text` are accepted.
pub fn comment_needs_space(comment: &str) -> bool {
    let body = comment.trim_start();
    match body.strip_prefix('#') {
        Some(rest) => rest
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace() && c != '#'),
        None => false,
    }
}

/// Normalize a comment to carry one space after the leading `#`.
pub fn fix_comment_spacing(comment: &str) -> String {
    let body = comment.trim();
    if comment_needs_space(body) {
        format!("# {}", &body[1..])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_entries_and_help() {
        assert_eq!(classify("config TEST"), LineKind::Config);
        assert_eq!(classify("  config TEST"), LineKind::Config);
        assert_eq!(classify("menuconfig TEST"), LineKind::Menuconfig);
        assert_eq!(classify("help"), LineKind::Help);
        assert_eq!(classify("\thelp"), LineKind::Help);
        assert_eq!(classify("\t---help---"), LineKind::Help);
        assert_eq!(classify("\thelp me"), LineKind::Other);
    }

    #[test]
    fn test_detect_option_keywords() {
        for line in [
            "\tbool \"Test\"",
            "\ttristate \"Test\"",
            "\tint \"Value\"",
            "\thex \"Value\"",
            "\tstring \"Text\"",
            "\tdef_bool y",
            "\tdef_tristate y",
            "\tdepends on FOO",
            "\tselect FOO",
            "\timply BAR",
            "\trange 0 100",
            "\toption env=\"VAR\"",
            "\tprompt \"Text\"",
            "\tdefault y",
        ] {
            assert_eq!(classify(line), LineKind::Option, "{line}");
        }
    }

    #[test]
    fn test_detect_blocks_sources_and_comments() {
        assert_eq!(classify("menu \"Test\""), LineKind::Menu);
        assert_eq!(classify("endmenu"), LineKind::Endmenu);
        assert_eq!(classify("choice"), LineKind::Choice);
        assert_eq!(classify("endchoice"), LineKind::Endchoice);
        assert_eq!(classify("if FOO"), LineKind::If);
        assert_eq!(classify("endif"), LineKind::Endif);
        assert_eq!(classify("endif# FOO"), LineKind::Endif);
        assert_eq!(classify("source \"path\""), LineKind::Source);
        assert_eq!(classify("orsource \"path\""), LineKind::Source);
        assert_eq!(classify("comment \"test\""), LineKind::Comment);
        assert_eq!(classify("comment without quotes"), LineKind::Other);
        assert_eq!(classify("# Comment"), LineKind::CommentLine);
        assert_eq!(classify("  # Comment"), LineKind::CommentLine);
        assert_eq!(classify("some random text"), LineKind::Other);
        assert_eq!(classify("\tmodules"), LineKind::Other);
        assert_eq!(classify("configure the thing"), LineKind::Other);
    }

    #[test]
    fn test_indent_width_tab_stops() {
        assert_eq!(indent_width("config"), 0);
        assert_eq!(indent_width("\tbool"), 8);
        assert_eq!(indent_width("\t  text"), 10);
        assert_eq!(indent_width("  \ttext"), 8);
        assert_eq!(indent_width("    text"), 4);
    }

    #[test]
    fn test_split_inline_comment_respects_quotes() {
        assert_eq!(
            split_inline_comment("config TEST  # Test configuration"),
            ("config TEST", Some("# Test configuration"))
        );
        assert_eq!(
            split_inline_comment("bool \"Use # sign\""),
            ("bool \"Use # sign\"", None)
        );
        assert_eq!(
            split_inline_comment("default \"a\\\"#b\" # tail"),
            ("default \"a\\\"#b\"", Some("# tail"))
        );
        assert_eq!(split_inline_comment("default 0x#1"), ("default 0x#1", None));
    }

    #[test]
    fn test_comment_spacing() {
        assert!(comment_needs_space("#Bad comment"));
        assert!(!comment_needs_space("# Good comment"));
        assert!(!comment_needs_space("#"));
        assert!(!comment_needs_space("########"));
        assert_eq!(fix_comment_spacing("#Bad comment"), "# Bad comment");
        assert_eq!(fix_comment_spacing("#"), "#");
    }
}
