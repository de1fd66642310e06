//! Rendering logic independent of the browser.
//!
//! - [`notify`] - Flash notifications cloned from a page template
//! - [`markdown`], [`link`], [`url`] - Markdown to sanitized HTML
//! - [`pending`] - One-shot conversion of Markdown-pending elements
//! - [`trigger`] - `HX-Trigger` values carrying flash messages
//! - [`page`] - DOM seams implemented by the browser host

pub mod error;
pub mod link;
pub mod markdown;
pub mod notify;
pub mod page;
pub mod pending;
pub mod trigger;
pub mod url;

pub use error::{RenderError, TriggerError, UrlError};
pub use link::{ExternalLinkRenderer, LinkRenderer};
pub use markdown::{MarkdownRenderer, RenderMode};
pub use notify::{render_message, render_messages};
pub use page::{MarkdownHost, NotificationHost, ScanScope};
pub use pending::render_pending;
pub use trigger::with_messages;
