// src/config.rs
use crate::error::{ConfigError, PatternError};
use crate::finder::ErrorPolicy;
use crate::pattern::{PatternKind, SuffixPattern, DEFAULT_SUFFIX};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Scan settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub pattern: String,
    pub kind: PatternKind,
    pub on_error: ErrorPolicy,
    pub cycle_guard: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            pattern: DEFAULT_SUFFIX.to_string(),
            kind: PatternKind::Literal,
            on_error: ErrorPolicy::Skip,
            cycle_guard: true,
        }
    }
}

/// `<config_dir>/scandir/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scandir").join("config.json"))
}

impl ScanConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// An explicit file must exist; the fallback location is only read when present.
    pub fn load(explicit: Option<&Path>, fallback: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match fallback {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(path)
            }
            _ => Ok(ScanConfig::default()),
        }
    }

    pub fn suffix_pattern(&self) -> Result<SuffixPattern, PatternError> {
        SuffixPattern::parse(&self.pattern, self.kind)
    }
}
