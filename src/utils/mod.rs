//! Browser-side utilities.
//!
//! Provides:
//! - [`WebPage`] - `web_sys` implementation of the renderer host traits
//! - [`listen`] - Event subscription helpers

pub mod dom;

pub use dom::{WebPage, document, js_error, listen, window};
