// src/system.rs
use std::io::{self, Write};

/// Process-level collaborator: arguments, output and exit status.
pub trait ProcessEnvironment {
    /// Program name first, then the user's arguments.
    fn args(&self) -> Vec<String>;
    /// Fails once the reader has gone away (`BrokenPipe`) or the write errors.
    fn print(&mut self, line: &str) -> io::Result<()>;
    fn print_err(&mut self, line: &str);
    fn exit(&mut self, code: i32);
}

/// The running process. `exit` does not return.
#[derive(Debug, Default)]
pub struct StdEnvironment;

impl StdEnvironment {
    pub fn new() -> Self {
        StdEnvironment
    }
}

impl ProcessEnvironment for StdEnvironment {
    fn args(&self) -> Vec<String> {
        std::env::args().collect()
    }

    fn print(&mut self, line: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", line)
    }

    fn print_err(&mut self, line: &str) {
        eprintln!("{}", line);
    }

    fn exit(&mut self, code: i32) {
        let _ = io::stdout().flush();
        std::process::exit(code);
    }
}

/// Records everything instead of touching the real process.
#[derive(Debug, Default, Clone)]
pub struct CapturedEnvironment {
    pub argv: Vec<String>,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub exit_code: Option<i32>,
    /// After this many lines `print` fails with `BrokenPipe`.
    pub stdout_limit: Option<usize>,
}

impl CapturedEnvironment {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CapturedEnvironment {
            argv: argv.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_stdout_limit(mut self, limit: usize) -> Self {
        self.stdout_limit = Some(limit);
        self
    }
}

impl ProcessEnvironment for CapturedEnvironment {
    fn args(&self) -> Vec<String> {
        self.argv.clone()
    }

    fn print(&mut self, line: &str) -> io::Result<()> {
        if self.stdout_limit.is_some_and(|limit| self.stdout.len() >= limit) {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.stdout.push(line.to_string());
        Ok(())
    }

    fn print_err(&mut self, line: &str) {
        self.stderr.push(line.to_string());
    }

    fn exit(&mut self, code: i32) {
        if self.exit_code.is_none() {
            self.exit_code = Some(code);
        }
    }
}
