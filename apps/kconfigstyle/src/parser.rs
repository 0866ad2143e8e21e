//! Line scanner, help-block state machine and AST builder.
//!
//! `scan` walks physical lines once and produces an ordered node stream:
//! blank lines, statements (one per logical line, backslash continuations
//! joined) and help blocks. Lint and format both consume this stream, and
//! `parse` folds it into the [`Entry`] tree.
//!
//! Design notes:
//! - The scanner is an explicit state machine (`TopLevel`, `InEntry`,
//!   `InHelp`) with one handler per state. Handlers either consume the line
//!   or hand it back for another pass in the state they switched to.
//! - Help bodies are delimited purely by indentation: the first text line
//!   sets the reference column, a shallower line or a structural keyword at
//!   the entry's own column ends the body. Text that merely looks like a
//!   keyword stays help text.
//! - Closers without an opener are tolerated and only logged; depth floors
//!   at zero.

use crate::classify::{
    classify, first_word, indent_width, leading_whitespace, split_inline_comment, LineKind,
};
use crate::continuation;
use crate::models::ast::{
    Attribute, Choice, CommentStatement, ConfigEntry, Entry, EntryOption, HelpText, IfBlock,
    Menu, SourceDirective, SourceKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where a statement sits relative to its owner.
pub enum Placement {
    /// Entry headers, block keywords and free lines at the current depth.
    Top,
    /// Attribute lines inside an entry (options, `help`, stray text).
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Menu,
    Choice,
    If,
}

impl BlockKind {
    fn closer(&self) -> LineKind {
        match self {
            BlockKind::Menu => LineKind::Endmenu,
            BlockKind::Choice => LineKind::Endchoice,
            BlockKind::If => LineKind::Endif,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One logical line outside help bodies.
pub struct Statement {
    pub kind: LineKind,
    pub placement: Placement,
    /// Number of open menu/choice/if frames for this line. Closers report
    /// the depth after popping, openers the depth before pushing.
    pub depth: usize,
    pub first_line: usize,
    pub last_line: usize,
    /// Code with continuations joined and surrounding whitespace trimmed.
    pub code: String,
    /// Inline `#` comment split off the code.
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    pub line: usize,
    /// Columns of indentation beyond the body's reference column.
    pub extra: usize,
    /// Trimmed text; empty for a paragraph separator.
    pub text: String,
}

impl HelpLine {
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Help body following a `help` keyword. Never starts or ends with a blank.
pub struct HelpBlock {
    /// Depth of the owning entry.
    pub depth: usize,
    /// Leading whitespace of the `help` keyword line as written.
    pub keyword_indent: String,
    pub lines: Vec<HelpLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Blank { line: usize },
    Statement(Statement),
    Help(HelpBlock),
}

#[derive(Debug, Default)]
pub struct ScanResult {
    pub nodes: Vec<Node>,
    /// Closers seen with no open block.
    pub unmatched_closers: usize,
    /// Blocks still open at end of input.
    pub unclosed_blocks: usize,
}

#[derive(Debug, Clone, Copy)]
struct EntryCtx {
    kind: LineKind,
    indent: usize,
    depth: usize,
    after_blank: bool,
}

impl EntryCtx {
    fn new(kind: LineKind, indent: usize, depth: usize) -> Self {
        Self {
            kind,
            indent,
            depth,
            after_blank: false,
        }
    }
}

#[derive(Debug)]
struct HelpCtx {
    entry: EntryCtx,
    keyword_indent: usize,
    body_indent: Option<usize>,
    block: HelpBlock,
    pending_blanks: Vec<usize>,
}

#[derive(Debug)]
enum State {
    TopLevel,
    InEntry(EntryCtx),
    InHelp(HelpCtx),
}

enum Step {
    Done,
    Retry,
}

struct Logical {
    first: usize,
    last: usize,
    indent: usize,
    lead: String,
    kind: LineKind,
    code: String,
    comment: Option<String>,
}

/// Scan `content` into a node stream.
pub fn scan(content: &str) -> ScanResult {
    Scanner::new(content).run()
}

struct Scanner<'a> {
    lines: Vec<&'a str>,
    state: State,
    frames: Vec<BlockKind>,
    out: ScanResult,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
            state: State::TopLevel,
            frames: Vec::new(),
            out: ScanResult::default(),
        }
    }

    fn run(mut self) -> ScanResult {
        let mut pos = 0;
        while pos < self.lines.len() {
            let raw = self.lines[pos];
            if raw.trim().is_empty() {
                self.on_blank(pos + 1);
                pos += 1;
                continue;
            }
            if matches!(self.state, State::InHelp(_)) {
                if let Step::Done = self.on_help_line(pos + 1, raw) {
                    pos += 1;
                    continue;
                }
            }
            let logical = self.logical_at(pos);
            pos = logical.last;
            self.dispatch(&logical);
        }
        self.finish()
    }

    fn on_blank(&mut self, line: usize) {
        match &mut self.state {
            State::InHelp(help) => help.pending_blanks.push(line),
            State::InEntry(entry) => {
                entry.after_blank = true;
                self.out.nodes.push(Node::Blank { line });
            }
            State::TopLevel => self.out.nodes.push(Node::Blank { line }),
        }
    }

    fn on_help_line(&mut self, line: usize, raw: &str) -> Step {
        let State::InHelp(help) = &mut self.state else {
            return Step::Retry;
        };
        let indent = indent_width(raw);
        let kind = classify(raw);
        let ends = match help.body_indent {
            None => {
                !matches!(kind, LineKind::Other | LineKind::CommentLine)
                    && indent <= help.keyword_indent
            }
            Some(body) => indent < body || (kind.is_structural() && indent <= help.entry.indent),
        };
        if ends {
            self.close_help();
            return Step::Retry;
        }
        let body = *help.body_indent.get_or_insert(indent);
        if help.block.lines.is_empty() {
            // blanks between `help` and the first text line carry nothing
            help.pending_blanks.clear();
        }
        for blank in help.pending_blanks.drain(..) {
            help.block.lines.push(HelpLine {
                line: blank,
                extra: 0,
                text: String::new(),
            });
        }
        help.block.lines.push(HelpLine {
            line,
            extra: indent - body,
            text: raw.trim().to_string(),
        });
        Step::Done
    }

    fn close_help(&mut self) {
        let State::InHelp(help) = std::mem::replace(&mut self.state, State::TopLevel) else {
            return;
        };
        let HelpCtx {
            mut entry,
            block,
            pending_blanks,
            ..
        } = help;
        self.out.nodes.push(Node::Help(block));
        entry.after_blank = !pending_blanks.is_empty();
        for line in pending_blanks {
            self.out.nodes.push(Node::Blank { line });
        }
        self.state = State::InEntry(entry);
    }

    /// Build the logical line starting at index `pos`, joining backslash
    /// continuations.
    fn logical_at(&self, pos: usize) -> Logical {
        let first = self.lines[pos];
        let kind = classify(first);
        let mut last = pos;
        let (code, comment) = if kind == LineKind::CommentLine {
            (first.trim().to_string(), None)
        } else {
            let mut pieces = vec![first];
            while continuation::has_continuation(pieces[pieces.len() - 1])
                && last + 1 < self.lines.len()
            {
                last += 1;
                pieces.push(self.lines[last]);
            }
            let joined = continuation::join_lines(&pieces);
            let (code, comment) = split_inline_comment(&joined);
            (code.to_string(), comment.map(str::to_string))
        };
        Logical {
            first: pos + 1,
            last: last + 1,
            indent: indent_width(first),
            lead: leading_whitespace(first).to_string(),
            kind,
            code,
            comment,
        }
    }

    fn dispatch(&mut self, line: &Logical) {
        loop {
            let step = match std::mem::replace(&mut self.state, State::TopLevel) {
                State::TopLevel => self.on_top(line),
                State::InEntry(entry) => self.on_entry(entry, line),
                State::InHelp(help) => {
                    self.state = State::InHelp(help);
                    self.close_help();
                    Step::Retry
                }
            };
            if let Step::Done = step {
                break;
            }
        }
    }

    fn on_top(&mut self, line: &Logical) -> Step {
        let depth = self.frames.len();
        match line.kind {
            LineKind::Config | LineKind::Menuconfig | LineKind::Comment => {
                self.push_statement(line, Placement::Top, depth);
                self.state = State::InEntry(EntryCtx::new(line.kind, line.indent, depth));
            }
            LineKind::Menu | LineKind::Choice => {
                self.push_statement(line, Placement::Top, depth);
                self.frames.push(if line.kind == LineKind::Menu {
                    BlockKind::Menu
                } else {
                    BlockKind::Choice
                });
                self.state = State::InEntry(EntryCtx::new(line.kind, line.indent, depth));
            }
            LineKind::If => {
                self.push_statement(line, Placement::Top, depth);
                self.frames.push(BlockKind::If);
            }
            LineKind::Endmenu | LineKind::Endchoice | LineKind::Endif => {
                self.close_block(line);
                let depth = self.frames.len();
                self.push_statement(line, Placement::Top, depth);
            }
            LineKind::Source | LineKind::CommentLine | LineKind::Other => {
                self.push_statement(line, Placement::Top, depth);
            }
            LineKind::Option => self.push_statement(line, Placement::Body, depth),
            LineKind::Help => {
                self.push_statement(line, Placement::Body, depth);
                self.open_help(EntryCtx::new(LineKind::Help, line.indent, depth), line);
            }
        }
        Step::Done
    }

    fn on_entry(&mut self, entry: EntryCtx, line: &Logical) -> Step {
        let stays = match line.kind {
            LineKind::Option | LineKind::Help => true,
            LineKind::CommentLine => {
                matches!(
                    entry.kind,
                    LineKind::Config | LineKind::Menuconfig | LineKind::Comment
                ) && (line.indent > 0 || !entry.after_blank)
            }
            LineKind::Other => line.indent > 0,
            _ => false,
        };
        if !stays {
            return Step::Retry;
        }
        self.push_statement(line, Placement::Body, entry.depth);
        if line.kind == LineKind::Help {
            self.open_help(entry, line);
        } else {
            self.state = State::InEntry(EntryCtx {
                after_blank: false,
                ..entry
            });
        }
        Step::Done
    }

    fn open_help(&mut self, entry: EntryCtx, line: &Logical) {
        self.state = State::InHelp(HelpCtx {
            entry,
            keyword_indent: line.indent,
            body_indent: None,
            block: HelpBlock {
                depth: entry.depth,
                keyword_indent: line.lead.clone(),
                lines: Vec::new(),
            },
            pending_blanks: Vec::new(),
        });
    }

    fn close_block(&mut self, line: &Logical) {
        match self.frames.pop() {
            Some(open) if open.closer() == line.kind => {}
            Some(open) => {
                tracing::debug!(
                    line = line.first,
                    open = ?open,
                    closer = line.kind.as_str(),
                    "block closed by a different keyword"
                );
            }
            None => {
                self.out.unmatched_closers += 1;
                tracing::debug!(
                    line = line.first,
                    closer = line.kind.as_str(),
                    "closer without open block"
                );
            }
        }
    }

    fn push_statement(&mut self, line: &Logical, placement: Placement, depth: usize) {
        self.out.nodes.push(Node::Statement(Statement {
            kind: line.kind,
            placement,
            depth,
            first_line: line.first,
            last_line: line.last,
            code: line.code.clone(),
            comment: line.comment.clone(),
        }));
    }

    fn finish(mut self) -> ScanResult {
        if matches!(self.state, State::InHelp(_)) {
            self.close_help();
        }
        self.out.unclosed_blocks = self.frames.len();
        if !self.frames.is_empty() {
            tracing::debug!(open = self.frames.len(), "blocks left open at end of input");
        }
        self.out
    }
}

/// Split a statement into its keyword and the remaining text.
pub fn keyword_and_rest(code: &str) -> (&str, &str) {
    let word = first_word(code);
    (word, code[word.len()..].trim())
}

fn unquote(text: &str) -> &str {
    let t = text.trim();
    if t.len() >= 2 && t.starts_with('"') && t.ends_with('"') {
        &t[1..t.len() - 1]
    } else {
        t
    }
}

/// Parse `content` into a tree of structural entries.
///
/// Blank lines, `#` comments and stray text are dropped. Unmatched closers
/// are ignored and blocks left open are closed at end of input.
pub fn parse(content: &str) -> Vec<Entry> {
    let mut builder = TreeBuilder::default();
    for node in scan(content).nodes {
        builder.push(node);
    }
    builder.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    None,
    Pending,
    OpenBlock,
}

#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Entry>,
    open: Vec<Entry>,
    pending: Option<Entry>,
    target: Option<Target>,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) {
        match node {
            Node::Blank { .. } => {}
            Node::Help(block) => {
                let lines = block
                    .lines
                    .into_iter()
                    .map(|l| {
                        if l.is_blank() {
                            String::new()
                        } else {
                            format!("{}{}", " ".repeat(l.extra), l.text)
                        }
                    })
                    .collect();
                self.attach(EntryOption::Help(HelpText { lines }));
            }
            Node::Statement(stmt) => self.statement(stmt),
        }
    }

    fn statement(&mut self, stmt: Statement) {
        let (word, rest) = keyword_and_rest(&stmt.code);
        let line = stmt.first_line;
        if stmt.placement == Placement::Body {
            if matches!(stmt.kind, LineKind::Option | LineKind::Other) {
                self.attach(EntryOption::Attribute(Attribute {
                    keyword: word.to_string(),
                    value: rest.to_string(),
                    line,
                }));
            }
            return;
        }
        match stmt.kind {
            LineKind::Config | LineKind::Menuconfig => {
                self.flush_pending();
                let entry = ConfigEntry {
                    name: first_word(rest).to_string(),
                    line,
                    options: Vec::new(),
                };
                self.pending = Some(if stmt.kind == LineKind::Config {
                    Entry::Config(entry)
                } else {
                    Entry::Menuconfig(entry)
                });
                self.target = Some(Target::Pending);
            }
            LineKind::Comment => {
                self.flush_pending();
                self.pending = Some(Entry::Comment(CommentStatement {
                    text: unquote(rest).to_string(),
                    line,
                    options: Vec::new(),
                }));
                self.target = Some(Target::Pending);
            }
            LineKind::Source => {
                self.flush_pending();
                let kind = SourceKind::from_keyword(word).unwrap_or(SourceKind::Source);
                self.place(Entry::Source(SourceDirective {
                    kind,
                    path: unquote(rest).to_string(),
                    line,
                }));
                self.target = Some(Target::None);
            }
            LineKind::Menu => {
                self.flush_pending();
                self.open.push(Entry::Menu(Menu {
                    title: unquote(rest).to_string(),
                    line,
                    options: Vec::new(),
                    entries: Vec::new(),
                }));
                self.target = Some(Target::OpenBlock);
            }
            LineKind::Choice => {
                self.flush_pending();
                self.open.push(Entry::Choice(Choice {
                    name: (!rest.is_empty()).then(|| first_word(rest).to_string()),
                    line,
                    options: Vec::new(),
                    entries: Vec::new(),
                }));
                self.target = Some(Target::OpenBlock);
            }
            LineKind::If => {
                self.flush_pending();
                self.open.push(Entry::If(IfBlock {
                    condition: rest.to_string(),
                    line,
                    entries: Vec::new(),
                }));
                self.target = Some(Target::None);
            }
            LineKind::Endmenu | LineKind::Endchoice | LineKind::Endif => {
                self.flush_pending();
                if let Some(block) = self.open.pop() {
                    self.place(block);
                }
                self.target = Some(Target::None);
            }
            LineKind::Other => {
                self.flush_pending();
                self.target = Some(Target::None);
            }
            LineKind::CommentLine | LineKind::Option | LineKind::Help => {}
        }
    }

    fn attach(&mut self, option: EntryOption) {
        let entry = match self.target.unwrap_or(Target::None) {
            Target::Pending => self.pending.as_mut(),
            Target::OpenBlock => self.open.last_mut(),
            Target::None => None,
        };
        if let Some(options) = entry.and_then(Entry::options_mut) {
            options.push(option);
        }
    }

    fn place(&mut self, entry: Entry) {
        match self.open.last_mut().and_then(Entry::children_mut) {
            Some(children) => children.push(entry),
            None => self.roots.push(entry),
        }
    }

    fn flush_pending(&mut self) {
        if let Some(entry) = self.pending.take() {
            self.place(entry);
        }
    }

    fn finish(mut self) -> Vec<Entry> {
        self.flush_pending();
        while let Some(block) = self.open.pop() {
            self.place(block);
        }
        self.roots
    }
}
