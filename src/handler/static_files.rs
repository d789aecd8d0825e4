//! Static file serving module
//!
//! Handles URL normalization, containment inside the document root,
//! file loading and MIME type detection.

use crate::config::DocumentRoot;
use crate::handler::error::{error_code, ServeError};
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::PathBuf;
use tokio::fs;

/// Served when the request targets `/`
pub const DEFAULT_DOCUMENT: &str = "/index.html";

/// A file read from under the document root
#[derive(Debug)]
pub struct StaticFile {
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

/// Reduce a raw request target to the path looked up on disk
///
/// Drops the query string and one trailing slash, and maps `/` to the
/// default document.
pub fn normalize_url(raw: &str) -> &str {
    let path = raw.split_once('?').map_or(raw, |(path, _)| path);
    let path = if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    };

    if path == "/" {
        DEFAULT_DOCUMENT
    } else {
        path
    }
}

/// Resolve a normalized URL path to a canonical file path inside the root
///
/// Dot segments are collapsed lexically first, so a missing directory
/// before `..` does not fail the lookup. The canonical result must still lie
/// under the root, which catches symlinks pointing elsewhere.
pub async fn resolve(root: &DocumentRoot, url_path: &str) -> Result<PathBuf, ServeError> {
    let candidate = root.join(url_path);
    let canonical = fs::canonicalize(&candidate)
        .await
        .map_err(|e| ServeError::from_io(candidate.clone(), e))?;

    if !root.contains(&canonical) {
        return Err(ServeError::OutsideRoot(canonical));
    }
    Ok(canonical)
}

/// Load a file for a normalized URL path
pub async fn load(root: &DocumentRoot, url_path: &str) -> Result<StaticFile, ServeError> {
    let path = resolve(root, url_path).await?;
    let content = fs::read(&path)
        .await
        .map_err(|e| ServeError::from_io(path.clone(), e))?;

    Ok(StaticFile {
        content,
        content_type: mime::content_type_for(url_path),
    })
}

/// Serve the file a raw request target points at
///
/// Always yields a response: 200 with the file, 404 when missing or outside
/// the root, 500 with the error code otherwise.
pub async fn serve(root: &DocumentRoot, raw_url: &str) -> Response<Full<Bytes>> {
    let url_path = normalize_url(raw_url);

    match load(root, url_path).await {
        Ok(file) => http::build_file_response(file.content, file.content_type),
        Err(err) => {
            logger::log_serve_error(&err);
            match err {
                ServeError::NotFound(_) | ServeError::OutsideRoot(_) => http::build_404_response(),
                ServeError::Io { source } => http::build_500_response(&error_code(&source)),
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scratch directory removed on drop
    pub struct Fixture {
        base: PathBuf,
        pub root: DocumentRoot,
    }

    impl Fixture {
        /// `<base>/www` is the document root; `<base>` holds files outside it
        pub fn new() -> Self {
            static COUNTER: AtomicUsize = AtomicUsize::new(0);
            let base = std::env::temp_dir().join(format!(
                "static-server-test-{}-{}",
                std::process::id(),
                COUNTER.fetch_add(1, Ordering::SeqCst)
            ));
            std::fs::create_dir_all(base.join("www")).unwrap();
            let root = DocumentRoot::new(base.join("www")).unwrap();
            Self { base, root }
        }

        pub fn write(&self, relative: &str, content: &[u8]) {
            let path = self.root.path().join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }

        pub fn mkdir(&self, relative: &str) {
            std::fs::create_dir_all(self.root.path().join(relative)).unwrap();
        }

        pub fn write_outside(&self, name: &str, content: &[u8]) -> PathBuf {
            let path = self.base.join(name);
            std::fs::write(&path, content).unwrap();
            path
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.base);
        }
    }

    async fn get(root: &DocumentRoot, url: &str) -> (StatusCode, Option<String>, Bytes) {
        let resp = serve(root, url).await;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap().to_string());
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, body)
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/"), "/index.html");
        assert_eq!(normalize_url("/?x=1"), "/index.html");
        assert_eq!(normalize_url("/foo/"), "/foo");
        assert_eq!(normalize_url("/a/b.png?x=1"), "/a/b.png");
        assert_eq!(normalize_url("/a/b.png?x=1?y=2"), "/a/b.png");
        assert_eq!(normalize_url("/foo//"), "/foo/");
        assert_eq!(normalize_url("/index.html"), "/index.html");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let fx = Fixture::new();
        fx.write("index.html", b"<h1>home</h1>");

        let (status, content_type, body) = get(&fx.root, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/html"));
        assert_eq!(body, Bytes::from_static(b"<h1>home</h1>"));

        assert_eq!(get(&fx.root, "/index.html").await, (status, content_type, body));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let fx = Fixture::new();
        let (status, _, body) = get(&fx.root, "/missing.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Bytes::from_static(b"404 Not Found"));
    }

    #[tokio::test]
    async fn test_content_types() {
        let fx = Fixture::new();
        fx.write("style.css", b"body{}");
        fx.write("data.bin", &[0, 159, 146, 150]);
        fx.write("img/logo.PNG", b"\x89PNG");

        let (status, content_type, _) = get(&fx.root, "/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/css"));

        let (status, content_type, body) = get(&fx.root, "/data.bin").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/octet-stream"));
        // Binary content passes through untouched
        assert_eq!(body, Bytes::from_static(&[0, 159, 146, 150]));

        let (_, content_type, _) = get(&fx.root, "/img/logo.PNG").await;
        assert_eq!(content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_query_and_trailing_slash_are_ignored() {
        let fx = Fixture::new();
        fx.write("index.html", b"home");
        fx.write("sub", b"plain file named sub");

        assert_eq!(
            get(&fx.root, "/index.html?x=1").await,
            get(&fx.root, "/index.html").await
        );

        let (status, content_type, body) = get(&fx.root, "/sub/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/octet-stream"));
        assert_eq!(body, Bytes::from_static(b"plain file named sub"));
    }

    #[tokio::test]
    async fn test_directory_is_server_error() {
        let fx = Fixture::new();
        fx.mkdir("sub");

        let (status, _, body) = get(&fx.root, "/sub/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with(b"Server Error: "));
        #[cfg(target_os = "linux")]
        assert_eq!(body, Bytes::from_static(b"Server Error: EISDIR"));
    }

    #[tokio::test]
    async fn test_traversal_is_404() {
        let fx = Fixture::new();
        fx.write_outside("secret.txt", b"top secret");

        let (status, _, body) = get(&fx.root, "/../secret.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Bytes::from_static(b"404 Not Found"));

        // `..` is clamped at the root, so this looks for `<root>/secret.txt`
        match resolve(&fx.root, "/../secret.txt").await {
            Err(ServeError::NotFound(path)) => {
                assert_eq!(path, fx.root.path().join("secret.txt"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dot_segments_collapse_before_lookup() {
        let fx = Fixture::new();
        fx.write("index.html", b"home");
        fx.write("css/site.css", b"body{}");

        let (status, content_type, body) = get(&fx.root, "/nope/../index.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/html"));
        assert_eq!(body, Bytes::from_static(b"home"));

        let (status, content_type, _) = get(&fx.root, "/js/../css/./site.css?v=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/css"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_is_404() {
        let fx = Fixture::new();
        let outside = fx.write_outside("secret.txt", b"top secret");
        std::os::unix::fs::symlink(&outside, fx.root.path().join("link.txt")).unwrap();

        let (status, _, body) = get(&fx.root, "/link.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Bytes::from_static(b"404 Not Found"));

        assert!(matches!(
            resolve(&fx.root, "/link.txt").await,
            Err(ServeError::OutsideRoot(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_and_load() {
        let fx = Fixture::new();
        fx.write("a/b.json", b"{}");

        let path = resolve(&fx.root, "/a/./b.json").await.unwrap();
        assert_eq!(path, fx.root.path().join("a/b.json"));
        assert!(Path::new(&path).is_absolute());

        let file = load(&fx.root, "/a/b.json").await.unwrap();
        assert_eq!(file.content_type, "application/json");
        assert_eq!(file.content, b"{}");
    }
}
