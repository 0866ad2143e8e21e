//! Indentation rendering for statements, continuations and help text.

use crate::config::LinterConfig;
use crate::parser::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentStyle {
    use_spaces: bool,
    unit: usize,
    help_extra: usize,
    hierarchical: bool,
}

impl IndentStyle {
    pub fn from_config(config: &LinterConfig) -> Self {
        Self {
            use_spaces: config.use_spaces,
            unit: config.primary_indent_spaces,
            help_extra: config.help_indent_spaces,
            hierarchical: config.indent_sub_items,
        }
    }

    fn levels(&self, placement: Placement, depth: usize) -> usize {
        let nesting = if self.hierarchical { depth } else { 0 };
        match placement {
            Placement::Top => nesting,
            Placement::Body => nesting + 1,
        }
    }

    fn render(&self, levels: usize) -> String {
        if self.use_spaces {
            " ".repeat(levels * self.unit)
        } else {
            "\t".repeat(levels)
        }
    }

    /// Indentation of a statement line.
    pub fn statement(&self, placement: Placement, depth: usize) -> String {
        self.render(self.levels(placement, depth))
    }

    /// Indentation of wrapped continuation lines, one level past the
    /// statement.
    pub fn continuation(&self, placement: Placement, depth: usize) -> String {
        self.render(self.levels(placement, depth) + 1)
    }

    /// Indentation of help text owned by an entry at `depth`.
    pub fn help_text(&self, depth: usize) -> String {
        let mut s = self.statement(Placement::Body, depth);
        s.push_str(&" ".repeat(self.help_extra));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_tabs_ignore_depth() {
        let style = IndentStyle::from_config(&LinterConfig::zephyr());
        assert_eq!(style.statement(Placement::Top, 3), "");
        assert_eq!(style.statement(Placement::Body, 3), "\t");
        assert_eq!(style.continuation(Placement::Body, 0), "\t\t");
        assert_eq!(style.continuation(Placement::Top, 2), "\t");
        assert_eq!(style.help_text(5), "\t  ");
    }

    #[test]
    fn test_hierarchical_spaces() {
        let style = IndentStyle::from_config(&LinterConfig::espidf());
        assert_eq!(style.statement(Placement::Top, 0), "");
        assert_eq!(style.statement(Placement::Top, 1), "    ");
        assert_eq!(style.statement(Placement::Body, 1), "        ");
        assert_eq!(style.help_text(1), " ".repeat(12));
        assert_eq!(style.continuation(Placement::Body, 1), " ".repeat(12));
    }

    #[test]
    fn test_hierarchical_tabs() {
        let config = LinterConfig {
            indent_sub_items: true,
            ..LinterConfig::zephyr()
        };
        let style = IndentStyle::from_config(&config);
        assert_eq!(style.statement(Placement::Top, 2), "\t\t");
        assert_eq!(style.statement(Placement::Body, 2), "\t\t\t");
        assert_eq!(style.help_text(2), "\t\t\t  ");
    }
}
