//! Utility functions for common operations.
//!
//! - **Link validation**: only http(s) catalog links are handed to the opener
//! - **Text processing**: Unicode-aware truncation and control-char cleanup

mod link;
mod text;

pub use link::{validate_link, LinkError};
pub use text::{display_width, sanitize_line, truncate_to_width};
