//! kconfigstyle CLI binary entry point.
//! Resolves configuration, expands inputs and delegates to lint/format.

use clap::Parser;
use kconfigstyle::cli::{Cli, CommonArgs, Commands, StyleArgs};
use kconfigstyle::config::{self, Effective};
use kconfigstyle::utils::{collect_targets, display_path, error_prefix, info_prefix, note_prefix};
use kconfigstyle::{format, lint, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve(
    common: &CommonArgs,
    style: &StyleArgs,
    write: Option<bool>,
    diff: Option<bool>,
    check: Option<bool>,
) -> Effective {
    let eff = match config::resolve_effective(
        common.repo_root.as_deref(),
        style.preset.as_deref(),
        common.output.as_deref(),
        &style.to_style(),
        write,
        diff,
        check,
    ) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            std::process::exit(2);
        }
    };
    // Friendly note if no config file was found
    if eff.output != "json" && matches!(config::load_config(&eff.repo_root), Ok(None)) {
        eprintln!(
            "{} No kconfigstyle.toml found; using {} preset.",
            note_prefix(),
            style.preset.as_deref().unwrap_or("zephyr")
        );
    }
    eff
}

/// Expand inputs; missing ones are reported now and turn the exit code into 2
/// once the remaining files have been processed.
fn targets(common: &CommonArgs, eff: &Effective) -> (Vec<PathBuf>, bool) {
    let t = collect_targets(&common.paths, &eff.repo_root, &eff.patterns);
    for m in &t.missing {
        eprintln!("{} File not found: {}", error_prefix(), m);
    }
    if common.paths.is_empty() && eff.output != "json" {
        eprintln!(
            "{} Using patterns: [{}]",
            info_prefix(),
            eff.patterns.join(", ")
        );
    }
    (t.files, !t.missing.is_empty())
}

fn announce(verb: &str, files: &[PathBuf], common: &CommonArgs, eff: &Effective) {
    if common.verbose && eff.output != "json" {
        for f in files {
            eprintln!("{} {}", verb, display_path(&f.to_string_lossy()));
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint { common, style } => {
            init_tracing(common.verbose);
            let eff = resolve(&common, &style, None, None, None);
            let (files, missing) = targets(&common, &eff);
            announce("Linting", &files, &common, &eff);
            let result = lint::run_lint(&files, &eff.linter);
            output::print_lint(&result, &eff.output);
            if missing {
                std::process::exit(2);
            }
            if result.issue_count() > 0 {
                std::process::exit(1);
            }
        }
        Commands::Format {
            common,
            style,
            write,
            diff,
            check,
        } => {
            init_tracing(common.verbose);
            let eff = resolve(
                &common,
                &style,
                write.then_some(true),
                diff.then_some(true),
                check.then_some(true),
            );
            let (files, missing) = targets(&common, &eff);
            announce("Formatting", &files, &common, &eff);
            // Diff and check never write
            let do_write = eff.write && !eff.diff && !eff.check;
            let results = format::run_format(&files, &eff.linter, do_write, !do_write);
            output::print_format(&results, &eff.output, do_write, eff.diff, eff.check);
            if missing {
                std::process::exit(2);
            }
            let failed = if eff.check {
                results.iter().any(|r| r.changed)
            } else if do_write {
                results
                    .iter()
                    .any(|r| !r.issues.is_empty() || r.error.is_some())
            } else {
                false
            };
            if failed {
                std::process::exit(1);
            }
        }
    }
}
