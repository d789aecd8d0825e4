//! Logger module
//!
//! Provides logging utilities for the file server including:
//! - Startup banner and shutdown notice
//! - Per-request, not-found and server-error lines
//! - Optional access logging with multiple formats
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::handler::error::ServeError;
use hyper::Method;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Startup lines, in print order
pub fn server_start_messages(addr: &SocketAddr, root: &Path) -> Vec<String> {
    let port = addr.port();
    vec![
        format!("Serving files from: {}", root.display()),
        format!("Server running at http://localhost:{port}/"),
        format!("MetaMask test page: http://localhost:{port}/metamask-test.html"),
        format!("Main application: http://localhost:{port}/index.html"),
        "Press Ctrl+C to stop the server".to_string(),
    ]
}

/// Console hints printed once the listener is bound
pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    for line in server_start_messages(addr, root) {
        write_info(&line);
    }
}

pub fn log_server_stop() {
    write_info("Shutdown signal received, server stopped");
}

pub fn request_message(method: &Method, url: &str) -> String {
    format!("Request: {method} {url}")
}

pub fn log_request(method: &Method, url: &str) {
    write_info(&request_message(method, url));
}

/// Log a failed lookup; escapes from the root are warnings
pub fn log_serve_error(err: &ServeError) {
    match err {
        ServeError::OutsideRoot(_) => log_warning(&err.to_string()),
        ServeError::NotFound(_) | ServeError::Io { .. } => write_error(&err.to_string()),
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
