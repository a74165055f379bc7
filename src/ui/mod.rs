//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - View rendering dispatch and the notice overlay
//! - `helpers` - Page request spawning and opening books
//! - `genres` - Genre selector screen
//! - `books` - Book list screen
//! - `status` - Status bar widget

mod books;
mod events;
mod genres;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::{run, Action};
