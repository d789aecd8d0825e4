//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

/// Content type for anything not in the table
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Get MIME Content-Type from a lowercase extension including the leading dot
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some(".html") => "text/html",
        Some(".js") => "text/javascript",
        Some(".css") => "text/css",
        Some(".json") => "application/json",
        Some(".png") => "image/png",
        Some(".jpg") => "image/jpg",
        Some(".gif") => "image/gif",
        Some(".svg") => "image/svg+xml",
        Some(".ico") => "image/x-icon",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Extension of the final path segment, lowercased, dot included
///
/// A segment whose only dot is the leading one (`.env`) has no extension.
pub fn extension_of(path: &str) -> Option<String> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(segment[idx..].to_ascii_lowercase()),
    }
}

/// Content type for a normalized URL path
pub fn content_type_for(path: &str) -> &'static str {
    get_content_type(extension_of(path).as_deref())
}
