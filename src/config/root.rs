// Document root module
// The directory files are served from, fixed for the lifetime of the process

use std::io;
use std::path::{Path, PathBuf};

/// Canonical, absolute directory that every served file must live under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRoot {
    path: PathBuf,
}

impl DocumentRoot {
    /// Canonicalize `path` and make sure it is a directory
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().canonicalize()?;
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("document root is not a directory: {}", path.display()),
            ));
        }
        Ok(Self { path })
    }

    /// The directory holding the running executable
    pub fn install_dir() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("executable has no parent directory: {}", exe.display()),
            )
        })?;
        Self::new(dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Join a normalized URL path onto the root
    ///
    /// `.` and empty segments are dropped and `..` removes the previous
    /// segment, before anything touches the filesystem. `..` at the root
    /// stays at the root, so `/nope/../a.html` and `/../a.html` both map to
    /// `<root>/a.html`. Symlinks are not followed here; callers still check
    /// the canonical result with [`DocumentRoot::contains`].
    pub fn join(&self, url_path: &str) -> PathBuf {
        let mut segments: Vec<&str> = Vec::new();
        for segment in url_path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                segment => segments.push(segment),
            }
        }

        let mut path = self.path.clone();
        path.extend(segments);
        path
    }

    /// Whether an already canonical path lies inside the root
    pub fn contains(&self, canonical: &Path) -> bool {
        canonical.starts_with(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_keeps_root() {
        let root = DocumentRoot::new(std::env::temp_dir()).unwrap();
        assert_eq!(root.join("/index.html"), root.path().join("index.html"));
        assert_eq!(root.join("//a/b.png"), root.path().join("a/b.png"));
    }

    #[test]
    fn test_join_collapses_dot_segments() {
        let root = DocumentRoot::new(std::env::temp_dir()).unwrap();
        assert_eq!(root.join("/nope/../index.html"), root.path().join("index.html"));
        assert_eq!(root.join("/a/./b/../c.css"), root.path().join("a/c.css"));
        // Never climbs above the root
        assert_eq!(root.join("/../../etc/passwd"), root.path().join("etc/passwd"));
        assert_eq!(root.join("/.."), root.path().to_path_buf());
    }

    #[test]
    fn test_contains() {
        let root = DocumentRoot::new(std::env::temp_dir()).unwrap();
        assert!(root.contains(&root.path().join("x")));
        assert!(!root.contains(Path::new("/definitely/elsewhere")));
    }

    #[test]
    fn test_rejects_missing_and_file_roots() {
        assert!(DocumentRoot::new("/definitely/not/here").is_err());

        let file = std::env::temp_dir().join(format!("static-server-root-{}", std::process::id()));
        std::fs::write(&file, b"x").unwrap();
        assert!(DocumentRoot::new(&file).is_err());
        std::fs::remove_file(&file).unwrap();
    }

    #[test]
    fn test_install_dir_exists() {
        let root = DocumentRoot::install_dir().unwrap();
        assert!(root.path().is_absolute());
    }
}
