// src/filesystem/memory.rs
use super::{EntryId, FileStream, FileSystem};
use crate::error::{FsError, FsErrorKind};
use std::collections::{HashMap, HashSet};
use std::io::{self, Cursor};

const MAX_LINK_DEPTH: usize = 40;

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Dir(Vec<String>),
    Link(String),
}

/// In-memory tree with files, directories and symlinks.
///
/// Directories list children in insertion order. Failures can be injected per path
/// with [`MemoryFileSystem::deny_list`] and [`MemoryFileSystem::break_stat`].
/// Queries and link targets understand `..`; builder paths are taken literally.
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    nodes: HashMap<String, Node>,
    denied: HashSet<String>,
    broken: HashSet<String>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|c| !c.is_empty() && *c != ".")
}

/// Lexical key: "" is the root, "/a/b" otherwise.
fn key_of(path: &str) -> String {
    components(path).fold(String::new(), |mut key, c| {
        key.push('/');
        key.push_str(c);
        key
    })
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(String::new(), Node::Dir(Vec::new()));
        MemoryFileSystem { nodes, denied: HashSet::new(), broken: HashSet::new() }
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert(path, Node::Dir(Vec::new()));
        self
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.insert(path, Node::File(content.to_string()));
        self
    }

    /// A relative `target` is resolved against the link's parent directory.
    pub fn with_symlink(mut self, path: &str, target: &str) -> Self {
        self.insert(path, Node::Link(target.to_string()));
        self
    }

    /// Listing `path` fails with permission denied.
    pub fn deny_list(mut self, path: &str) -> Self {
        self.denied.insert(key_of(path));
        self
    }

    /// `path` still exists, but asking for its kind fails.
    pub fn break_stat(mut self, path: &str) -> Self {
        self.broken.insert(key_of(path));
        self
    }

    fn insert(&mut self, path: &str, node: Node) {
        let mut parent = String::new();
        let names: Vec<&str> = components(path).collect();

        for (i, name) in names.iter().enumerate() {
            let key = format!("{}/{}", parent, name);
            let is_last = i + 1 == names.len();

            if !self.nodes.contains_key(&key) {
                if let Some(Node::Dir(children)) = self.nodes.get_mut(&parent) {
                    children.push(name.to_string());
                }
                let placeholder = if is_last { node.clone() } else { Node::Dir(Vec::new()) };
                self.nodes.insert(key.clone(), placeholder);
            } else if is_last {
                // keep existing children when a directory is declared twice
                if !matches!((&node, self.nodes.get(&key)), (Node::Dir(_), Some(Node::Dir(_)))) {
                    self.nodes.insert(key.clone(), node.clone());
                }
            }
            parent = key;
        }
    }

    fn resolve(&self, path: &str) -> Result<String, FsError> {
        self.resolve_at(path, path, 0)
    }

    fn resolve_at(&self, origin: &str, path: &str, depth: usize) -> Result<String, FsError> {
        if depth > MAX_LINK_DEPTH {
            let err = io::Error::new(io::ErrorKind::Other, "too many levels of symbolic links");
            return Err(FsError::new(origin, FsErrorKind::Io(err)));
        }

        let mut current = String::new();
        for name in components(path) {
            match self.nodes.get(&current) {
                Some(Node::Dir(_)) => {}
                Some(_) => return Err(FsError::new(origin, FsErrorKind::NotADirectory)),
                None => return Err(FsError::new(origin, FsErrorKind::NotFound)),
            }

            // physical parent, like the kernel: `current` is already link-free
            if name == ".." {
                if let Some(i) = current.rfind('/') {
                    current.truncate(i);
                }
                continue;
            }

            let candidate = format!("{}/{}", current, name);
            current = match self.nodes.get(&candidate) {
                Some(Node::Link(target)) => {
                    let target = if target.starts_with('/') {
                        target.clone()
                    } else {
                        format!("{}/{}", current, target)
                    };
                    self.resolve_at(origin, &target, depth + 1)?
                }
                Some(_) => candidate,
                None => return Err(FsError::new(origin, FsErrorKind::NotFound)),
            };
        }
        Ok(current)
    }

    fn node(&self, path: &str) -> Result<(String, &Node), FsError> {
        let resolved = self.resolve(path)?;
        match self.nodes.get(&resolved) {
            Some(node) => Ok((resolved, node)),
            None => Err(FsError::new(path, FsErrorKind::NotFound)),
        }
    }

    fn check_stat(&self, path: &str) -> Result<(), FsError> {
        if self.broken.contains(&key_of(path)) {
            let err = io::Error::new(io::ErrorKind::Other, "stale file handle");
            return Err(FsError::new(path, FsErrorKind::Io(err)));
        }
        Ok(())
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &str) -> bool {
        self.broken.contains(&key_of(path)) || self.node(path).is_ok()
    }

    fn is_file(&self, path: &str) -> Result<bool, FsError> {
        self.check_stat(path)?;
        Ok(matches!(self.node(path)?.1, Node::File(_)))
    }

    fn is_dir(&self, path: &str) -> Result<bool, FsError> {
        self.check_stat(path)?;
        Ok(matches!(self.node(path)?.1, Node::Dir(_)))
    }

    fn list(&self, path: &str) -> Result<Vec<String>, FsError> {
        let (resolved, node) = self.node(path)?;
        if self.denied.contains(&key_of(path)) || self.denied.contains(&resolved) {
            return Err(FsError::new(path, FsErrorKind::PermissionDenied));
        }
        match node {
            Node::Dir(children) => Ok(children.clone()),
            _ => Err(FsError::new(path, FsErrorKind::NotADirectory)),
        }
    }

    fn open(&self, path: &str) -> Result<FileStream, FsError> {
        match self.node(path)?.1 {
            Node::File(content) => {
                let reader = Cursor::new(content.clone().into_bytes());
                Ok(FileStream::new(path, Box::new(reader)))
            }
            _ => {
                let err = io::Error::new(io::ErrorKind::Other, "is a directory");
                Err(FsError::new(path, FsErrorKind::Io(err)))
            }
        }
    }

    fn identity(&self, path: &str) -> Result<EntryId, FsError> {
        let resolved = self.resolve(path)?;
        Ok(EntryId::Path(if resolved.is_empty() { "/".to_string() } else { resolved }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_parents_in_order() {
        let fs = MemoryFileSystem::new()
            .with_file("/a/b.js", "")
            .with_file("/a/c/d.js", "")
            .with_dir("/a/c")
            .with_file("/a/c/e.txt", "");

        assert_eq!(fs.list("/a").unwrap(), vec!["b.js", "c"]);
        assert_eq!(fs.list("/a/c").unwrap(), vec!["d.js", "e.txt"]);
        assert!(fs.is_dir("/a/c").unwrap());
        assert!(fs.is_file("/a/c/e.txt").unwrap());
    }

    #[test]
    fn test_symlinks_resolve() {
        let fs = MemoryFileSystem::new()
            .with_file("/src/lib.js", "")
            .with_symlink("/alias", "/src")
            .with_symlink("/src/self", ".");

        assert!(fs.is_dir("/alias").unwrap());
        assert!(fs.is_file("/alias/lib.js").unwrap());
        assert_eq!(fs.identity("/alias").unwrap(), fs.identity("/src/self").unwrap());
    }

    #[test]
    fn test_dot_dot_resolves_to_parent() {
        let fs = MemoryFileSystem::new()
            .with_file("/a/b/c.js", "")
            .with_symlink("/a/b/up", "..")
            .with_symlink("/a/b/top", "../../..");

        assert!(fs.is_dir("/a/b/up").unwrap());
        assert_eq!(fs.identity("/a/b/up").unwrap(), fs.identity("/a").unwrap());
        assert_eq!(fs.identity("/a/b/top").unwrap(), EntryId::Path("/".to_string()));
        assert!(fs.is_file("/a/b/up/b/c.js").unwrap());
        assert!(fs.is_file("/a/b/../b/c.js").unwrap());
    }

    #[test]
    fn test_dangling_symlink_does_not_exist() {
        let fs = MemoryFileSystem::new().with_symlink("/dangling", "/nowhere");
        assert!(!fs.exists("/dangling"));
        assert!(fs.is_file("/dangling").unwrap_err().is_not_found());
    }

    #[test]
    fn test_link_loop_is_an_error() {
        let fs = MemoryFileSystem::new()
            .with_symlink("/x", "/y")
            .with_symlink("/y", "/x");
        assert!(!fs.exists("/x"));
        assert!(matches!(fs.is_dir("/x").unwrap_err().kind, FsErrorKind::Io(_)));
    }

    #[test]
    fn test_injected_failures() {
        let fs = MemoryFileSystem::new()
            .with_dir("/locked")
            .with_file("/flaky", "")
            .deny_list("/locked")
            .break_stat("/flaky");

        assert!(fs.is_dir("/locked").unwrap());
        assert!(matches!(fs.list("/locked").unwrap_err().kind, FsErrorKind::PermissionDenied));
        assert!(fs.exists("/flaky"));
        assert!(fs.is_file("/flaky").is_err());
    }

    #[test]
    fn test_open_file() {
        let fs = MemoryFileSystem::new().with_file("/doc", "a\nb");
        assert_eq!(fs.open("/doc").unwrap().read_to_end().unwrap(), "a\nb\n");
        assert!(fs.open("/").is_err());
    }
}
