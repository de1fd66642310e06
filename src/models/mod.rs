//! Data models exchanged with the page and the server.
//!
//! - [`Message`] - One flash message
//! - [`MessagesDetail`] - Payload of the `messages` event

mod message;

pub use message::{Message, MessagesDetail};
