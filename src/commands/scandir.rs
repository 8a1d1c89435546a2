// src/commands/scandir.rs
use super::{emit, parse, report};
use crate::cli::ScanCli;
use crate::config::ScanConfig;
use crate::filesystem::FileSystem;
use crate::finder::RecursiveFileFinder;
use crate::system::ProcessEnvironment;
use std::path::Path;
use tracing::debug;

/// Prints every matching path under the single ROOT argument, one per line.
pub fn run_scandir<E, F>(env: &mut E, fs: F, fallback_config: Option<&Path>) -> i32
where
    E: ProcessEnvironment,
    F: FileSystem,
{
    let cli: ScanCli = match parse(env) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    let config = match ScanConfig::load(cli.config.as_deref(), fallback_config) {
        Ok(config) => cli.apply(config),
        Err(e) => return report(env, &e),
    };

    let pattern = match config.suffix_pattern() {
        Ok(pattern) => pattern,
        Err(e) => return report(env, &e),
    };

    let finder = RecursiveFileFinder::new(fs)
        .with_policy(config.on_error)
        .with_cycle_guard(config.cycle_guard);

    let mut matches = finder.matches(&cli.root, &pattern);
    for found in matches.by_ref() {
        let path = match found {
            Ok(path) => path,
            Err(e) => return report(env, &e),
        };
        if let Err(code) = emit(env, &path) {
            debug!("output closed, stopping scan");
            return code;
        }
    }

    let summary = matches.summary();
    debug!(
        matches = summary.matches,
        directories = summary.directories,
        errors = summary.errors,
        cycles = summary.cycles,
        "scan finished"
    );
    0
}
