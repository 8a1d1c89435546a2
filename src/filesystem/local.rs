// src/filesystem/local.rs
use super::{EntryId, FileStream, FileSystem};
use crate::error::{FsError, FsErrorKind};
use std::fs;
use std::io::BufReader;
use walkdir::WalkDir;

/// The real disk. Queries follow symlinks, like `stat(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        LocalFileSystem
    }

    fn metadata(path: &str) -> Result<fs::Metadata, FsError> {
        fs::metadata(path).map_err(|e| FsError::from_io(path, e))
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &str) -> bool {
        fs::metadata(path).is_ok()
    }

    fn is_file(&self, path: &str) -> Result<bool, FsError> {
        Ok(Self::metadata(path)?.is_file())
    }

    fn is_dir(&self, path: &str) -> Result<bool, FsError> {
        Ok(Self::metadata(path)?.is_dir())
    }

    fn list(&self, path: &str) -> Result<Vec<String>, FsError> {
        if !Self::metadata(path)?.is_dir() {
            return Err(FsError::new(path, FsErrorKind::NotADirectory));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| FsError::from_io(path, e.into()))?;
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => {
                    let lossy = entry.file_name().to_string_lossy().to_string();
                    return Err(FsError::new(path, FsErrorKind::InvalidName(lossy)));
                }
            }
        }
        Ok(names)
    }

    fn open(&self, path: &str) -> Result<FileStream, FsError> {
        let file = fs::File::open(path).map_err(|e| FsError::from_io(path, e))?;
        Ok(FileStream::new(path, Box::new(BufReader::new(file))))
    }

    #[cfg(unix)]
    fn identity(&self, path: &str) -> Result<EntryId, FsError> {
        use std::os::unix::fs::MetadataExt;

        let metadata = Self::metadata(path)?;
        Ok(EntryId::Device { dev: metadata.dev(), ino: metadata.ino() })
    }

    #[cfg(not(unix))]
    fn identity(&self, path: &str) -> Result<EntryId, FsError> {
        let canonical = fs::canonicalize(path).map_err(|e| FsError::from_io(path, e))?;
        Ok(EntryId::Path(canonical.to_string_lossy().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(dir: &tempfile::TempDir, rel: &str) -> String {
        dir.path().join(rel).to_string_lossy().to_string()
    }

    #[test]
    fn test_queries_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();

        let local = LocalFileSystem::new();
        let root = dir.path().to_string_lossy().to_string();

        assert!(local.exists(&root));
        assert!(local.is_dir(&root).unwrap());
        assert!(local.is_file(&path_of(&dir, "a.js")).unwrap());
        assert!(!local.is_file(&path_of(&dir, "sub")).unwrap());

        let mut names = local.list(&root).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.js".to_string(), "sub".to_string()]);
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = path_of(&dir, "nope");
        let local = LocalFileSystem::new();

        assert!(!local.exists(&missing));
        assert!(local.is_dir(&missing).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f.txt"), "x").unwrap();

        let err = LocalFileSystem::new().list(&path_of(&dir, "f.txt")).unwrap_err();
        assert!(matches!(err.kind, FsErrorKind::NotADirectory));
    }

    #[test]
    fn test_open_reads_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("doc.json"), "{\n\"a\": 1}\n").unwrap();

        let mut stream = LocalFileSystem::new().open(&path_of(&dir, "doc.json")).unwrap();
        assert_eq!(stream.read_line().unwrap().as_deref(), Some("{\n"));
        assert_eq!(stream.read_line().unwrap().as_deref(), Some("\"a\": 1}\n"));
        assert_eq!(stream.read_line().unwrap(), None);
    }

    // some platforms refuse to create such names at all
    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_reports_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.js"), "").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"caf\xe9.js")), "").unwrap();

        let root = dir.path().to_string_lossy().to_string();
        let err = LocalFileSystem::new().list(&root).unwrap_err();
        assert_eq!(err.path, root);
        assert!(matches!(err.kind, FsErrorKind::InvalidName(ref name) if name.starts_with("caf")));
    }

    #[cfg(unix)]
    #[test]
    fn test_identity_follows_symlink() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let local = LocalFileSystem::new();
        assert_eq!(
            local.identity(&path_of(&dir, "real")).unwrap(),
            local.identity(&path_of(&dir, "link")).unwrap()
        );
    }
}
