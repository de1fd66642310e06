//! Renderer configuration.
//!
//! Centralizes the DOM contract (selectors, marker class, event names) shared
//! with the server-rendered page markup.

use crate::core::ScanScope;

// =============================================================================
// Flash Messages
// =============================================================================

/// Selectors locating the notification template and its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSelectors {
    /// `<template>` holding one notification.
    pub template: &'static str,
    /// Element inside the clone that receives the `alert-*` class.
    pub wrapper: &'static str,
    /// Element inside the clone that receives the message text.
    pub body: &'static str,
    /// Element the populated clones are appended to.
    pub container: &'static str,
}

/// Default selectors, matching the `data-msg-*` attributes in the page markup.
pub const MESSAGE_SELECTORS: MessageSelectors = MessageSelectors {
    template: "[data-msg-template]",
    wrapper: "[data-msg-wrapper]",
    body: "[data-msg-body]",
    container: "[data-msg-container]",
};

/// Prefix joined to a message's tags to form its wrapper class.
pub const ALERT_CLASS_PREFIX: &str = "alert-";

// =============================================================================
// Markdown
// =============================================================================

/// Class flagging an element whose content still needs Markdown conversion.
pub const MARKDOWN_PENDING_CLASS: &str = "markdown-needed";

/// Scope of the Markdown pass that follows a partial page update.
pub const SWAP_SCAN_SCOPE: ScanScope = ScanScope::Document;

/// Hrefs starting with this prefix open in a new tab.
pub const EXTERNAL_HREF_PREFIX: &str = "http";

/// `target` value for external links.
pub const EXTERNAL_LINK_TARGET: &str = "_blank";

/// `rel` value for external links (tab-nabbing protection).
pub const EXTERNAL_LINK_REL: &str = "noopener noreferrer";

// =============================================================================
// Events
// =============================================================================

/// Event fired by htmx when the `HX-Trigger` header carries messages.
pub const MESSAGES_EVENT: &str = "messages";

/// Event fired by htmx after swapping new content into the page.
pub const AFTER_SWAP_EVENT: &str = "htmx:afterSwap";

/// `HX-Trigger` key under which the server places flash messages.
pub const MESSAGES_TRIGGER_KEY: &str = "messages";
