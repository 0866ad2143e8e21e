//! CLI argument parsing via `clap`.

use crate::config::StyleCfg;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kconfigstyle",
    version,
    about = "Style linter and formatter for Kconfig files",
    long_about = "kconfigstyle checks Kconfig files against a style profile (indentation, line length, naming) and can rewrite them to conform.\n\nConfiguration precedence: CLI > kconfigstyle.toml > preset.",
    after_help = "Examples:\n  kconfigstyle lint Kconfig\n  kconfigstyle lint --preset espidf components/\n  kconfigstyle format --write 'drivers/**/Kconfig*'\n  kconfigstyle format --check --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for linting and formatting.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current kconfigstyle version.")]
    Version,
    /// Lint Kconfig files
    #[command(
        about = "Run lint checks",
        long_about = "Check files against the style profile. Exits 1 when any issue is found and 2 when a file is missing.",
        after_help = "Examples:\n  kconfigstyle lint Kconfig\n  kconfigstyle lint --output json"
    )]
    Lint {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Format Kconfig files
    #[command(
        about = "Apply formatting",
        long_about = "Re-indent, wrap and normalize files. When --diff or --check is set, write is disabled.",
        after_help = "Examples:\n  kconfigstyle format --diff Kconfig\n  kconfigstyle format --write"
    )]
    Format {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        style: StyleArgs,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write changes to files")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show diffs for changed files (implies write=false)")]
        diff: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies write=false)")]
        check: bool,
    },
}

#[derive(Args, Debug, Default)]
/// Arguments shared by `lint` and `format`.
pub struct CommonArgs {
    #[arg(help = "Files, directories or glob patterns (default: config patterns)")]
    pub paths: Vec<String>,
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Print each processed file and enable debug logs")]
    pub verbose: bool,
}

#[derive(Args, Debug, Default)]
/// Style overrides applied on top of the preset and config file.
pub struct StyleArgs {
    #[arg(long, help = "Style preset: zephyr|espidf (default: zephyr)")]
    pub preset: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "use_tabs", help = "Indent with spaces")]
    pub use_spaces: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Indent with tabs")]
    pub use_tabs: bool,
    #[arg(long, value_name = "N", help = "Spaces per indentation level")]
    pub primary_indent: Option<usize>,
    #[arg(long, value_name = "N", help = "Extra spaces for help text")]
    pub help_indent: Option<usize>,
    #[arg(long, value_name = "N", help = "Maximum line length")]
    pub max_line_length: Option<usize>,
    #[arg(long, value_name = "N", help = "Maximum config name length")]
    pub max_option_length: Option<usize>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Require uppercase config names")]
    pub uppercase_configs: bool,
    #[arg(long, value_name = "N", help = "Minimum config name prefix length")]
    pub min_prefix_length: Option<usize>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Indent nested menu/choice/if content")]
    pub indent_sub_items: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Collapse runs of blank lines")]
    pub consolidate_empty_lines: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Reflow help text to the line length")]
    pub reflow_help: bool,
}

impl StyleArgs {
    /// Overrides as a style table; unset flags leave the lower layers alone.
    pub fn to_style(&self) -> StyleCfg {
        StyleCfg {
            use_spaces: if self.use_spaces {
                Some(true)
            } else if self.use_tabs {
                Some(false)
            } else {
                None
            },
            primary_indent_spaces: self.primary_indent,
            help_indent_spaces: self.help_indent,
            max_line_length: self.max_line_length,
            max_option_name_length: self.max_option_length,
            uppercase_configs: if self.uppercase_configs { Some(true) } else { None },
            min_prefix_length: self.min_prefix_length,
            indent_sub_items: if self.indent_sub_items { Some(true) } else { None },
            consolidate_empty_lines: if self.consolidate_empty_lines {
                Some(true)
            } else {
                None
            },
            reflow_help_text: if self.reflow_help { Some(true) } else { None },
        }
    }
}
