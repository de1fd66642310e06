//! Flash-message and Markdown renderers for htmx-driven pages.
//!
//! Loaded as a WebAssembly module, the crate listens for the `messages` event
//! (flash notifications delivered through `HX-Trigger`) and for
//! `htmx:afterSwap`, converting every `.markdown-needed` element to sanitized
//! HTML exactly once.

pub mod app;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use app::{create_message, render_markdown, start};
