// src/filesystem/mod.rs
pub mod local;
pub mod memory;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

use crate::error::{FsError, FsErrorKind};
use std::io::BufRead;

/// Identity of a directory, used to notice when a traversal loops back on itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryId {
    Device { dev: u64, ino: u64 },
    Path(String),
}

/// Filesystem queries the scanner depends on.
///
/// Paths are plain strings and are never normalized. Nothing is cached:
/// two calls for the same path may see different live state.
pub trait FileSystem {
    fn exists(&self, path: &str) -> bool;
    fn is_file(&self, path: &str) -> Result<bool, FsError>;
    fn is_dir(&self, path: &str) -> Result<bool, FsError>;
    /// Child names of `path`, without `.` and `..`, in the order the backend yields them.
    fn list(&self, path: &str) -> Result<Vec<String>, FsError>;
    fn open(&self, path: &str) -> Result<FileStream, FsError>;
    fn identity(&self, path: &str) -> Result<EntryId, FsError>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
    fn is_file(&self, path: &str) -> Result<bool, FsError> {
        (**self).is_file(path)
    }
    fn is_dir(&self, path: &str) -> Result<bool, FsError> {
        (**self).is_dir(path)
    }
    fn list(&self, path: &str) -> Result<Vec<String>, FsError> {
        (**self).list(path)
    }
    fn open(&self, path: &str) -> Result<FileStream, FsError> {
        (**self).open(path)
    }
    fn identity(&self, path: &str) -> Result<EntryId, FsError> {
        (**self).identity(path)
    }
}

/// Line reader over an opened file.
pub struct FileStream {
    name: String,
    reader: Box<dyn BufRead>,
}

impl FileStream {
    pub fn new(name: impl Into<String>, reader: Box<dyn BufRead>) -> Self {
        FileStream { name: name.into(), reader }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next line with its terminator normalized to a single `\n`, or `None` at end of file.
    pub fn read_line(&mut self) -> Result<Option<String>, FsError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| FsError::new(self.name.clone(), FsErrorKind::Io(e)))?;
        if read == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        line.push('\n');
        Ok(Some(line))
    }

    pub fn read_to_end(&mut self) -> Result<String, FsError> {
        let mut content = String::new();
        while let Some(line) = self.read_line()? {
            content.push_str(&line);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn stream(text: &'static str) -> FileStream {
        FileStream::new("mem", Box::new(Cursor::new(text.as_bytes())))
    }

    #[test]
    fn test_read_line_appends_newline() {
        let mut s = stream("one\r\ntwo");
        assert_eq!(s.read_line().unwrap().as_deref(), Some("one\n"));
        assert_eq!(s.read_line().unwrap().as_deref(), Some("two\n"));
        assert_eq!(s.read_line().unwrap(), None);
    }

    #[test]
    fn test_read_to_end_empty() {
        assert_eq!(stream("").read_to_end().unwrap(), "");
    }
}
