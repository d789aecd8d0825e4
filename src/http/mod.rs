//! HTTP protocol layer module
//!
//! Content-type lookup and response construction, independent of the filesystem.

pub mod mime;
pub mod response;

// Re-export commonly used items
pub use response::{build_404_response, build_500_response, build_file_response};
