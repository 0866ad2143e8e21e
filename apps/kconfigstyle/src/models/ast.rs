//! Structural tree of a Kconfig file.
//!
//! Built by [`crate::parser::parse`] from the same line scan the formatter
//! uses. Only structure is modelled: symbol names, titles, conditions and
//! attribute text stay opaque strings.
//!
//! The tree is library API for callers that want the entry structure of a
//! file. Lint and format work on the scanner's node stream instead, since
//! they need physical line numbers, blank lines and comment placement that
//! the tree does not keep.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "entry", rename_all = "lowercase")]
/// A structural entry. Every consumer matches exhaustively.
pub enum Entry {
    Config(ConfigEntry),
    Menuconfig(ConfigEntry),
    Menu(Menu),
    Choice(Choice),
    If(IfBlock),
    Source(SourceDirective),
    Comment(CommentStatement),
}

impl Entry {
    /// Keyword that opens this entry in source text.
    pub fn keyword(&self) -> &'static str {
        match self {
            Entry::Config(_) => "config",
            Entry::Menuconfig(_) => "menuconfig",
            Entry::Menu(_) => "menu",
            Entry::Choice(_) => "choice",
            Entry::If(_) => "if",
            Entry::Source(s) => s.kind.keyword(),
            Entry::Comment(_) => "comment",
        }
    }

    /// Nested entries for container variants.
    pub fn children(&self) -> &[Entry] {
        match self {
            Entry::Menu(m) => &m.entries,
            Entry::Choice(c) => &c.entries,
            Entry::If(b) => &b.entries,
            Entry::Config(_) | Entry::Menuconfig(_) | Entry::Source(_) | Entry::Comment(_) => &[],
        }
    }

    pub(crate) fn options_mut(&mut self) -> Option<&mut Vec<EntryOption>> {
        match self {
            Entry::Config(c) | Entry::Menuconfig(c) => Some(&mut c.options),
            Entry::Menu(m) => Some(&mut m.options),
            Entry::Choice(c) => Some(&mut c.options),
            Entry::Comment(c) => Some(&mut c.options),
            Entry::If(_) | Entry::Source(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Entry>> {
        match self {
            Entry::Menu(m) => Some(&mut m.entries),
            Entry::Choice(c) => Some(&mut c.entries),
            Entry::If(b) => Some(&mut b.entries),
            Entry::Config(_) | Entry::Menuconfig(_) | Entry::Source(_) | Entry::Comment(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub name: String,
    pub line: usize,
    pub options: Vec<EntryOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub title: String,
    pub line: usize,
    pub options: Vec<EntryOption>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub name: Option<String>,
    pub line: usize,
    pub options: Vec<EntryOption>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IfBlock {
    pub condition: String,
    pub line: usize,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Source,
    Rsource,
    Osource,
    Orsource,
}

impl SourceKind {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "source" => Some(SourceKind::Source),
            "rsource" => Some(SourceKind::Rsource),
            "osource" => Some(SourceKind::Osource),
            "orsource" => Some(SourceKind::Orsource),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SourceKind::Source => "source",
            SourceKind::Rsource => "rsource",
            SourceKind::Osource => "osource",
            SourceKind::Orsource => "orsource",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDirective {
    pub kind: SourceKind,
    pub path: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentStatement {
    pub text: String,
    pub line: usize,
    pub options: Vec<EntryOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "option", rename_all = "lowercase")]
/// An attribute line or the help text attached to an entry.
pub enum EntryOption {
    Attribute(Attribute),
    Help(HelpText),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// An attribute such as `bool "Prompt"` or `depends on FOO`.
pub struct Attribute {
    pub keyword: String,
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Help body lines. Blank separators are kept as empty strings.
pub struct HelpText {
    pub lines: Vec<String>,
}
