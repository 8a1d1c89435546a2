// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsErrorKind {
    #[error("not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("not a directory")]
    NotADirectory,
    #[error("entry name {0:?} is not valid UTF-8")]
    InvalidName(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A failed query against a `FileSystem`, tagged with the path it was about.
#[derive(Debug, Error)]
#[error("{path}: {kind}")]
pub struct FsError {
    pub path: String,
    #[source]
    pub kind: FsErrorKind,
}

impl FsError {
    pub fn new(path: impl Into<String>, kind: FsErrorKind) -> Self {
        FsError { path: path.into(), kind }
    }

    pub fn from_io(path: impl Into<String>, err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => FsErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => FsErrorKind::PermissionDenied,
            _ => FsErrorKind::Io(err),
        };
        FsError::new(path, kind)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, FsErrorKind::NotFound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Stat,
    List,
    Identity,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Stat => write!(f, "stat"),
            Step::List => write!(f, "list"),
            Step::Identity => write!(f, "identify"),
        }
    }
}

#[derive(Debug, Error)]
#[error("cannot {step} {}: {}", .source.path, .source.kind)]
pub struct FindError {
    pub step: Step,
    #[source]
    pub source: FsError,
}

impl FindError {
    pub fn path(&self) -> &str {
        &self.source.path
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_kinds() {
        let err = FsError::from_io("/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());

        let err = FsError::from_io("/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err.kind, FsErrorKind::PermissionDenied));
        assert_eq!(err.to_string(), "/x: permission denied");
    }

    #[test]
    fn test_find_error_message() {
        let err = FindError {
            step: Step::List,
            source: FsError::new("/root/secret", FsErrorKind::PermissionDenied),
        };
        assert_eq!(err.to_string(), "cannot list /root/secret: permission denied");
        assert_eq!(err.path(), "/root/secret");
    }
}
