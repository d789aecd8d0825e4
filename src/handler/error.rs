//! Serving error types
//!
//! Every way a request can fail to produce file contents, and the
//! POSIX-style code reported to the client on a server error.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while serving a single file.
///
/// The `Display` text is the line written to the error log.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Nothing exists at the resolved path.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Resolved path lies outside the document root.
    #[error("Path traversal attempt blocked: {}", .0.display())]
    OutsideRoot(PathBuf),

    /// Any other filesystem failure.
    #[error("Server error: {}", error_code(.source))]
    Io {
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    /// Classify an I/O error raised while resolving or reading `path`
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { source }
        }
    }
}

/// POSIX-style identifier for an I/O error, e.g. `EACCES`
pub fn error_code(err: &io::Error) -> String {
    if let Some(name) = err.raw_os_error().and_then(errno_name) {
        return name.to_string();
    }

    let name = match err.kind() {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::IsADirectory => "EISDIR",
        io::ErrorKind::NotADirectory => "ENOTDIR",
        io::ErrorKind::InvalidInput => "EINVAL",
        io::ErrorKind::Interrupted => "EINTR",
        kind => return format!("{kind:?}"),
    };
    name.to_string()
}

#[cfg(unix)]
const fn errno_name(errno: i32) -> Option<&'static str> {
    // Values below 35 are shared by Linux and the BSDs
    match errno {
        1 => Some("EPERM"),
        2 => Some("ENOENT"),
        5 => Some("EIO"),
        6 => Some("ENXIO"),
        9 => Some("EBADF"),
        12 => Some("ENOMEM"),
        13 => Some("EACCES"),
        16 => Some("EBUSY"),
        20 => Some("ENOTDIR"),
        21 => Some("EISDIR"),
        22 => Some("EINVAL"),
        23 => Some("ENFILE"),
        24 => Some("EMFILE"),
        #[cfg(target_os = "linux")]
        36 => Some("ENAMETOOLONG"),
        #[cfg(target_os = "linux")]
        40 => Some("ELOOP"),
        #[cfg(target_os = "macos")]
        62 => Some("ELOOP"),
        #[cfg(target_os = "macos")]
        63 => Some("ENAMETOOLONG"),
        _ => None,
    }
}

#[cfg(not(unix))]
const fn errno_name(_errno: i32) -> Option<&'static str> {
    None
}
