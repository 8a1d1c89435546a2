// src/pattern.rs
use crate::error::PatternError;
use regex::Regex;
use serde::Deserialize;

pub const DEFAULT_SUFFIX: &str = ".js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    Literal,
    Regex,
    Glob,
}

/// Rule applied to a full path string to decide whether a file is reported.
#[derive(Debug, Clone)]
pub enum SuffixPattern {
    Literal(String),
    Regex(Regex),
    Glob(glob::Pattern),
}

impl SuffixPattern {
    pub fn parse(pattern: &str, kind: PatternKind) -> Result<Self, PatternError> {
        Ok(match kind {
            PatternKind::Literal => SuffixPattern::Literal(pattern.to_string()),
            PatternKind::Regex => SuffixPattern::Regex(Regex::new(pattern)?),
            PatternKind::Glob => SuffixPattern::Glob(glob::Pattern::new(pattern)?),
        })
    }

    pub fn literal(suffix: &str) -> Self {
        SuffixPattern::Literal(suffix.to_string())
    }

    pub fn is_match(&self, path: &str) -> bool {
        match self {
            SuffixPattern::Literal(suffix) => path.ends_with(suffix.as_str()),
            SuffixPattern::Regex(re) => re.is_match(path),
            SuffixPattern::Glob(pattern) => pattern.matches(path),
        }
    }
}

impl Default for SuffixPattern {
    fn default() -> Self {
        SuffixPattern::literal(DEFAULT_SUFFIX)
    }
}
