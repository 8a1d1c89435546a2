// src/finder.rs
//! Recursive file finder.
//!
//! Walks a tree depth-first, pre-order, children in the order `FileSystem::list`
//! returns them. Pending paths live on an explicit stack, so deep or looping
//! trees never grow the call stack. The cycle guard only refuses a directory
//! that is one of its own ancestors; aliases of a directory elsewhere in the
//! tree are walked again.

use crate::error::{FindError, FsError, Step};
use crate::filesystem::{EntryId, FileSystem};
use crate::pattern::SuffixPattern;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// What to do when a filesystem query fails mid-walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure, count it and keep walking.
    #[default]
    Skip,
    /// Stop and hand the error back to the caller.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FindSummary {
    pub matches: usize,
    pub directories: usize,
    pub errors: usize,
    pub cycles: usize,
}

pub struct RecursiveFileFinder<F: FileSystem> {
    fs: F,
    policy: ErrorPolicy,
    cycle_guard: bool,
}

impl<F: FileSystem> RecursiveFileFinder<F> {
    pub fn new(fs: F) -> Self {
        RecursiveFileFinder { fs, policy: ErrorPolicy::Skip, cycle_guard: true }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cycle_guard(mut self, enabled: bool) -> Self {
        self.cycle_guard = enabled;
        self
    }

    /// Lazily yields matches under `root`. Under `ErrorPolicy::Abort` the first
    /// failure is yielded as an `Err` and the iterator ends.
    pub fn matches<'a>(&'a self, root: &str, pattern: &'a SuffixPattern) -> Matches<'a, F> {
        Matches {
            finder: self,
            pattern,
            stack: vec![Work::Visit(root.to_string())],
            ancestors: HashSet::new(),
            summary: FindSummary::default(),
            done: false,
        }
    }

    /// Calls `emit` once per match, in traversal order.
    pub fn find(
        &self,
        root: &str,
        pattern: &SuffixPattern,
        mut emit: impl FnMut(&str),
    ) -> Result<FindSummary, FindError> {
        let mut matches = self.matches(root, pattern);
        for found in matches.by_ref() {
            emit(&found?);
        }
        Ok(matches.summary())
    }

    pub fn collect(&self, root: &str, pattern: &SuffixPattern) -> Result<Vec<String>, FindError> {
        self.matches(root, pattern).collect()
    }
}

pub struct Matches<'a, F: FileSystem> {
    finder: &'a RecursiveFileFinder<F>,
    pattern: &'a SuffixPattern,
    stack: Vec<Work>,
    ancestors: HashSet<EntryId>,
    summary: FindSummary,
    done: bool,
}

enum Work {
    Visit(String),
    /// Popped once every child of the directory has been handled.
    Leave(EntryId),
}

enum Visit {
    Match(String),
    Nothing,
}

impl<'a, F: FileSystem> Matches<'a, F> {
    pub fn summary(&self) -> FindSummary {
        self.summary
    }

    fn visit(&mut self, path: String) -> Result<Visit, FindError> {
        let fs = &self.finder.fs;

        if !fs.exists(&path) {
            debug!(path = %path, "skipping missing path");
            return Ok(Visit::Nothing);
        }

        if fs.is_file(&path).map_err(stat_error)? {
            if self.pattern.is_match(&path) {
                self.summary.matches += 1;
                return Ok(Visit::Match(path));
            }
            return Ok(Visit::Nothing);
        }

        if !fs.is_dir(&path).map_err(stat_error)? {
            debug!(path = %path, "skipping special file");
            return Ok(Visit::Nothing);
        }

        let id = if self.finder.cycle_guard {
            let id = fs
                .identity(&path)
                .map_err(|source| FindError { step: Step::Identity, source })?;
            if self.ancestors.contains(&id) {
                debug!(path = %path, "directory is its own ancestor, not descending");
                self.summary.cycles += 1;
                return Ok(Visit::Nothing);
            }
            Some(id)
        } else {
            None
        };

        let children = fs
            .list(&path)
            .map_err(|source| FindError { step: Step::List, source })?;
        self.summary.directories += 1;

        if let Some(id) = id {
            self.ancestors.insert(id.clone());
            self.stack.push(Work::Leave(id));
        }
        // reversed so the first listed child is popped first
        self.stack.extend(
            children
                .iter()
                .rev()
                .map(|child| Work::Visit(format!("{}/{}", path, child))),
        );
        Ok(Visit::Nothing)
    }
}

fn stat_error(source: FsError) -> FindError {
    FindError { step: Step::Stat, source }
}

impl<'a, F: FileSystem> Iterator for Matches<'a, F> {
    type Item = Result<String, FindError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some(work) = self.stack.pop() {
            let path = match work {
                Work::Visit(path) => path,
                Work::Leave(id) => {
                    self.ancestors.remove(&id);
                    continue;
                }
            };
            match self.visit(path) {
                Ok(Visit::Match(found)) => return Some(Ok(found)),
                Ok(Visit::Nothing) => {}
                Err(err) => {
                    self.summary.errors += 1;
                    match self.finder.policy {
                        ErrorPolicy::Skip => warn!("{}", err),
                        ErrorPolicy::Abort => {
                            self.done = true;
                            self.stack.clear();
                            return Some(Err(err));
                        }
                    }
                }
            }
        }

        self.done = true;
        None
    }
}
