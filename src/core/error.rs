//! Error types for the renderers.
//!
//! - [`RenderError`] - DOM lookups and payload decoding during a render pass
//! - [`UrlError`] - href canonicalization failures

use thiserror::Error;

/// Errors that abort a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Browser document not available
    #[error("document not available")]
    NoDocument,
    /// The notification template was not found or is not a `<template>`
    #[error("notification template '{0}' not found")]
    TemplateMissing(String),
    /// A required element was not found
    #[error("element '{0}' not found")]
    ElementMissing(String),
    /// Event payload could not be decoded
    #[error("invalid event payload: {0}")]
    InvalidPayload(String),
    /// A DOM call threw
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Errors from [`encode_uri`](crate::core::url::encode_uri).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UrlError {
    /// An unpaired UTF-16 surrogate cannot be percent-encoded
    #[error("lone surrogate 0x{0:04X} in URI")]
    LoneSurrogate(u16),
}

/// Errors building an `HX-Trigger` header value.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Header used object syntax but was not a JSON object
    #[error("malformed HX-Trigger header: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<RenderError> for wasm_bindgen::JsValue {
    fn from(err: RenderError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
