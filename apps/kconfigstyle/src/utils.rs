//! Supporting helpers: message prefixes, path display and input discovery.

use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

fn colored() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colored() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colored() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colored() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// Show `path` relative to the working directory when possible.
pub fn display_path(path: &str) -> String {
    let p = Path::new(path);
    if p.is_relative() {
        return path.to_string();
    }
    std::env::current_dir()
        .ok()
        .and_then(|cwd| pathdiff::diff_paths(p, cwd))
        .filter(|rel| !rel.as_os_str().is_empty() && !rel.starts_with(".."))
        .map(|rel| rel.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

fn has_glob_chars(s: &str) -> bool {
    s.contains(|c: char| matches!(c, '*' | '?' | '['))
}

fn glob_files(pattern: &str, out: &mut Vec<PathBuf>) -> bool {
    match glob::glob(pattern) {
        Ok(paths) => {
            let before = out.len();
            out.extend(paths.flatten().filter(|p| p.is_file()));
            out.len() > before
        }
        Err(e) => {
            tracing::warn!(pattern, error = %e, "invalid glob pattern");
            false
        }
    }
}

/// Files selected by the command line.
pub struct Targets {
    pub files: Vec<PathBuf>,
    /// Inputs that matched nothing.
    pub missing: Vec<String>,
}

/// Expand CLI inputs into Kconfig files.
///
/// - A file is taken as is.
/// - A directory is searched for `Kconfig*` files recursively.
/// - Anything with glob characters is expanded with `glob`.
/// - With no inputs, `patterns` are expanded relative to `repo_root`.
///
/// Duplicates are dropped; first occurrence wins.
pub fn collect_targets(inputs: &[String], repo_root: &Path, patterns: &[String]) -> Targets {
    let mut files = Vec::new();
    let mut missing = Vec::new();
    if inputs.is_empty() {
        for pat in patterns {
            let abs = repo_root.join(pat).to_string_lossy().to_string();
            glob_files(&abs, &mut files);
        }
        files.sort();
    }
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            let pattern = path.join("**").join("Kconfig*").to_string_lossy().to_string();
            let mut found = Vec::new();
            glob_files(&pattern, &mut found);
            found.sort();
            files.extend(found);
        } else if has_glob_chars(input) {
            if !glob_files(input, &mut files) {
                missing.push(input.clone());
            }
        } else {
            missing.push(input.clone());
        }
    }
    let mut seen = HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    Targets { files, missing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_files_dirs_and_globs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("drivers/net")).unwrap();
        fs::write(root.join("Kconfig"), "").unwrap();
        fs::write(root.join("drivers/net/Kconfig.eth"), "").unwrap();
        fs::write(root.join("drivers/net/readme.txt"), "").unwrap();

        let inputs = vec![
            root.join("Kconfig").to_string_lossy().to_string(),
            root.join("drivers").to_string_lossy().to_string(),
            root.join("*/net/Kconfig*").to_string_lossy().to_string(),
            root.join("nope").to_string_lossy().to_string(),
        ];
        let t = collect_targets(&inputs, root, &[]);
        assert_eq!(
            t.files,
            vec![root.join("Kconfig"), root.join("drivers/net/Kconfig.eth")]
        );
        assert_eq!(t.missing, vec![inputs[3].clone()]);
    }

    #[test]
    fn test_collect_default_patterns() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("Kconfig"), "").unwrap();
        fs::write(root.join("sub/Kconfig.defconfig"), "").unwrap();
        let t = collect_targets(&[], root, &["**/Kconfig*".to_string()]);
        assert_eq!(t.files.len(), 2);
        assert!(t.missing.is_empty());
    }

    #[test]
    fn test_display_path_keeps_relative() {
        assert_eq!(display_path("drivers/Kconfig"), "drivers/Kconfig");
    }
}
