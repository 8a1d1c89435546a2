// src/lib.rs
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod finder;
pub mod logging;
pub mod pattern;
pub mod system;
pub mod utils;

pub use error::{FindError, FsError};
pub use filesystem::{FileSystem, LocalFileSystem, MemoryFileSystem};
pub use finder::{ErrorPolicy, FindSummary, RecursiveFileFinder};
pub use pattern::SuffixPattern;
pub use system::{ProcessEnvironment, StdEnvironment};
