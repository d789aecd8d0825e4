//! Request handler module
//!
//! Maps request targets onto files under the document root.

pub mod error;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
