// src/commands/mod.rs
//! Entry points behind the binaries. Each takes its collaborators as arguments
//! and returns the exit status; the binary hands that status to `exit`.

pub mod args;
pub mod jsondump;
pub mod scandir;

pub use args::run_args;
pub use jsondump::run_jsondump;
pub use scandir::run_scandir;

use crate::cli::{parse_from, ParseFailure};
use crate::system::ProcessEnvironment;
use colored::Colorize;
use std::io;

/// Exit status when the work itself failed.
pub const FAILURE_EXIT_CODE: i32 = 1;

fn parse<P: clap::Parser>(env: &mut impl ProcessEnvironment) -> Result<P, i32> {
    parse_from(env.args()).map_err(|ParseFailure { message, code, to_stdout }| {
        if !to_stdout {
            env.print_err(&message);
            return code;
        }
        match emit(env, &message) {
            Ok(()) => code,
            Err(stopped) => stopped,
        }
    })
}

/// Writes one line of output. `Err` carries the status to exit with: a reader
/// that went away ends the run quietly, any other write failure is reported.
fn emit(env: &mut impl ProcessEnvironment, line: &str) -> Result<(), i32> {
    match env.print(line) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Err(0),
        Err(e) => Err(report(env, &format!("cannot write output: {}", e))),
    }
}

fn report(env: &mut impl ProcessEnvironment, err: &dyn std::fmt::Display) -> i32 {
    env.print_err(&format!("{} {}", "error:".red().bold(), err));
    FAILURE_EXIT_CODE
}
