//! Style profile, presets and configuration discovery.
//!
//! kconfigstyle reads `kconfigstyle.toml|yaml|yml` from the repository root
//! (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `preset`: `zephyr`
//! - `output`: `human`
//! - `patterns`: `**/Kconfig*`
//! - `format.write|diff|check`: false
//!
//! Overrides precedence: CLI > config file > preset.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILES: [&str; 3] = ["kconfigstyle.toml", "kconfigstyle.yaml", "kconfigstyle.yml"];

/// Files searched when no path is given on the command line.
pub const DEFAULT_PATTERNS: &[&str] = &["**/Kconfig*"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("unknown preset '{0}' (expected zephyr or espidf)")]
    UnknownPreset(String),
    #[error("unknown output mode '{0}' (expected human or json)")]
    UnknownOutput(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Style profile applied to one run. Immutable once resolved.
pub struct LinterConfig {
    pub use_spaces: bool,
    /// Spaces per indentation level when `use_spaces` is set.
    pub primary_indent_spaces: usize,
    /// Extra columns of help text relative to the `help` keyword.
    pub help_indent_spaces: usize,
    pub max_line_length: usize,
    pub max_option_name_length: Option<usize>,
    pub uppercase_configs: bool,
    pub min_prefix_length: Option<usize>,
    /// Hierarchical indentation: every open menu/choice/if adds a level.
    pub indent_sub_items: bool,
    pub consolidate_empty_lines: bool,
    pub reflow_help_text: bool,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::zephyr()
    }
}

impl LinterConfig {
    /// Tabs, flat nesting, relaxed naming.
    pub fn zephyr() -> Self {
        Self {
            use_spaces: false,
            primary_indent_spaces: 4,
            help_indent_spaces: 2,
            max_line_length: 100,
            max_option_name_length: None,
            uppercase_configs: false,
            min_prefix_length: None,
            indent_sub_items: false,
            consolidate_empty_lines: false,
            reflow_help_text: false,
        }
    }

    /// Four-space indentation, hierarchical nesting, strict naming.
    pub fn espidf() -> Self {
        Self {
            use_spaces: true,
            primary_indent_spaces: 4,
            help_indent_spaces: 4,
            max_line_length: 120,
            max_option_name_length: None,
            uppercase_configs: true,
            min_prefix_length: Some(3),
            indent_sub_items: true,
            consolidate_empty_lines: false,
            reflow_help_text: false,
        }
    }

    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "zephyr" => Ok(Self::zephyr()),
            "espidf" | "esp-idf" => Ok(Self::espidf()),
            _ => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }

    /// Overlay every field set in `style`.
    pub fn apply(&mut self, style: &StyleCfg) {
        if let Some(v) = style.use_spaces {
            self.use_spaces = v;
        }
        if let Some(v) = style.primary_indent_spaces {
            self.primary_indent_spaces = v;
        }
        if let Some(v) = style.help_indent_spaces {
            self.help_indent_spaces = v;
        }
        if let Some(v) = style.max_line_length {
            self.max_line_length = v;
        }
        if let Some(v) = style.max_option_name_length {
            self.max_option_name_length = Some(v);
        }
        if let Some(v) = style.uppercase_configs {
            self.uppercase_configs = v;
        }
        if let Some(v) = style.min_prefix_length {
            self.min_prefix_length = Some(v);
        }
        if let Some(v) = style.indent_sub_items {
            self.indent_sub_items = v;
        }
        if let Some(v) = style.consolidate_empty_lines {
            self.consolidate_empty_lines = v;
        }
        if let Some(v) = style.reflow_help_text {
            self.reflow_help_text = v;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_spaces && self.primary_indent_spaces == 0 {
            return Err(ConfigError::Zero("primary_indent_spaces"));
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::Zero("max_line_length"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
/// Style overrides under `[style]`, also built from CLI flags.
pub struct StyleCfg {
    pub use_spaces: Option<bool>,
    pub primary_indent_spaces: Option<usize>,
    pub help_indent_spaces: Option<usize>,
    pub max_line_length: Option<usize>,
    pub max_option_name_length: Option<usize>,
    pub uppercase_configs: Option<bool>,
    pub min_prefix_length: Option<usize>,
    pub indent_sub_items: Option<bool>,
    pub consolidate_empty_lines: Option<bool>,
    pub reflow_help_text: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Formatting-related configuration section under `[format]`.
pub struct FormatCfg {
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `kconfigstyle.toml|yaml`.
pub struct FileConfig {
    pub preset: Option<String>,
    pub output: Option<String>,
    pub patterns: Option<Vec<String>>,
    pub style: Option<StyleCfg>,
    pub format: Option<FormatCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub linter: LinterConfig,
    pub output: String,
    pub patterns: Vec<String>,
    pub write: bool,
    pub diff: bool,
    pub check: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `kconfigstyle.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `FileConfig` from `kconfigstyle.toml` or `kconfigstyle.yaml|yml` if
/// present.
pub fn load_config(root: &Path) -> Result<Option<FileConfig>, ConfigError> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<FileConfig>(&text).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<FileConfig>(&text).map_err(|e| e.to_string())
        };
        tracing::debug!(path = %path.display(), "loaded config");
        return parsed
            .map(Some)
            .map_err(|message| ConfigError::Parse { path, message });
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and presets.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_preset: Option<&str>,
    cli_output: Option<&str>,
    cli_style: &StyleCfg,
    cli_write: Option<bool>,
    cli_diff: Option<bool>,
    cli_check: Option<bool>,
) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root)?.unwrap_or_default();

    let preset = cli_preset
        .map(|s| s.to_string())
        .or(cfg.preset)
        .unwrap_or_else(|| "zephyr".to_string());
    let mut linter = LinterConfig::preset(&preset)?;
    if let Some(style) = cfg.style.as_ref() {
        linter.apply(style);
    }
    linter.apply(cli_style);
    linter.validate()?;

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(ConfigError::UnknownOutput(output));
    }

    let patterns = cfg
        .patterns
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect());

    let write = cli_write
        .or_else(|| cfg.format.as_ref().and_then(|f| f.write))
        .unwrap_or(false);
    let diff = cli_diff
        .or_else(|| cfg.format.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);
    let check = cli_check
        .or_else(|| cfg.format.as_ref().and_then(|f| f.check))
        .unwrap_or(false);

    Ok(Effective {
        repo_root,
        linter,
        output,
        patterns,
        write,
        diff,
        check,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_presets() {
        let z = LinterConfig::zephyr();
        assert!(!z.use_spaces);
        assert_eq!(z.help_indent_spaces, 2);
        assert_eq!(z.max_line_length, 100);
        assert!(!z.indent_sub_items);
        assert_eq!(LinterConfig::default(), z);

        let e = LinterConfig::preset("espidf").unwrap();
        assert!(e.use_spaces);
        assert_eq!(e.primary_indent_spaces, 4);
        assert_eq!(e.help_indent_spaces, 4);
        assert_eq!(e.max_line_length, 120);
        assert!(e.uppercase_configs);
        assert_eq!(e.min_prefix_length, Some(3));
        assert!(e.indent_sub_items);
        assert!(!e.consolidate_empty_lines);
        assert!(!e.reflow_help_text);

        assert!(matches!(
            LinterConfig::preset("linux"),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("kconfigstyle.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
preset = "espidf"
output = "json"
patterns = ["components/**/Kconfig"]
[style]
max_line_length = 90
consolidate_empty_lines = true
[format]
write = true
    "#
        )
        .unwrap();

        let eff = resolve_effective(
            root.to_str(),
            None,
            None,
            &StyleCfg::default(),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(eff.output, "json");
        assert_eq!(eff.patterns, vec!["components/**/Kconfig".to_string()]);
        assert!(eff.linter.use_spaces);
        assert_eq!(eff.linter.max_line_length, 90);
        assert!(eff.linter.consolidate_empty_lines);
        assert!(eff.write);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("kconfigstyle.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
style:
  reflow_help_text: true
format:
  check: true
            "#
        )
        .unwrap();

        let eff = resolve_effective(
            root.to_str(),
            None,
            None,
            &StyleCfg::default(),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.patterns, vec!["**/Kconfig*".to_string()]);
        assert!(!eff.linter.use_spaces);
        assert!(eff.linter.reflow_help_text);
        assert!(eff.check);
        assert!(!eff.write);
    }

    #[test]
    fn test_cli_overrides_file_and_preset() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("kconfigstyle.toml"),
            "preset = \"espidf\"\n[style]\nmax_line_length = 90\n[format]\nwrite = true\n",
        )
        .unwrap();
        let cli = StyleCfg {
            use_spaces: Some(false),
            max_line_length: Some(80),
            ..StyleCfg::default()
        };
        let eff = resolve_effective(
            root.to_str(),
            None,
            Some("human"),
            &cli,
            Some(false),
            None,
            None,
        )
        .unwrap();
        assert!(!eff.linter.use_spaces);
        assert_eq!(eff.linter.max_line_length, 80);
        assert!(eff.linter.uppercase_configs);
        assert!(!eff.write);

        let zephyr = resolve_effective(
            root.to_str(),
            Some("zephyr"),
            None,
            &StyleCfg::default(),
            None,
            None,
            None,
        )
        .unwrap();
        assert!(!zephyr.linter.uppercase_configs);
        assert_eq!(zephyr.linter.max_line_length, 90);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("kconfigstyle.toml"), "[style]\nmax_line_length = \"x\"\n").unwrap();
        let err = resolve_effective(
            root.to_str(),
            None,
            None,
            &StyleCfg::default(),
            None,
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let zero = StyleCfg {
            use_spaces: Some(true),
            primary_indent_spaces: Some(0),
            ..StyleCfg::default()
        };
        let other = tempdir().unwrap();
        fs::create_dir(other.path().join(".git")).unwrap();
        let err = resolve_effective(
            other.path().to_str(),
            None,
            None,
            &zero,
            None,
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Zero("primary_indent_spaces")));
    }

    #[test]
    fn test_detect_repo_root_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        let nested = root.join("drivers").join("net");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root.to_path_buf());
    }
}
