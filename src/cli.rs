// src/cli.rs
use crate::config::ScanConfig;
use crate::finder::ErrorPolicy;
use crate::pattern::PatternKind;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// Exit status for a malformed command line.
pub const USAGE_EXIT_CODE: i32 = 255;

#[derive(Debug, Parser)]
#[command(name = "scandir", version, about = "List files under ROOT whose path matches a pattern")]
pub struct ScanCli {
    /// Directory (or file) to start from
    pub root: String,

    /// Pattern tested against each file's full path
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// How PATTERN is interpreted
    #[arg(short, long, value_enum)]
    pub kind: Option<PatternKind>,

    /// Stop at the first filesystem error instead of skipping it
    #[arg(long)]
    pub abort_on_error: bool,

    /// Descend into directories already visited through another path
    #[arg(long)]
    pub no_cycle_guard: bool,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ScanCli {
    /// Flags given on the command line win over the config file.
    pub fn apply(&self, mut config: ScanConfig) -> ScanConfig {
        if let Some(ref pattern) = self.pattern {
            config.pattern = pattern.clone();
        }
        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if self.abort_on_error {
            config.on_error = ErrorPolicy::Abort;
        }
        if self.no_cycle_guard {
            config.cycle_guard = false;
        }
        config
    }
}

#[derive(Debug, Parser)]
#[command(name = "jsondump", version, about = "Pretty-print a JSON document")]
pub struct JsonDumpCli {
    pub file: String,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 4)]
    pub indent: usize,
}

/// Outcome of a failed parse: what to show and which status to exit with.
pub struct ParseFailure {
    pub message: String,
    pub code: i32,
    pub to_stdout: bool,
}

pub fn parse_from<P: Parser>(args: Vec<String>) -> Result<P, ParseFailure> {
    P::try_parse_from(args).map_err(|err| {
        let informational = matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
        ParseFailure {
            message: err.to_string().trim_end().to_string(),
            code: if informational { 0 } else { USAGE_EXIT_CODE },
            to_stdout: informational,
        }
    })
}
