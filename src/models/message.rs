//! Flash message payloads.

use serde::{Deserialize, Serialize};

use crate::config::ALERT_CLASS_PREFIX;

/// One flash message as sent by the server.
///
/// `tags` is the server's message level (`"success"`, `"error"`, ...), possibly
/// with extra tags. It is trusted as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub tags: String,
    pub message: String,
}

impl Message {
    pub fn new(tags: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tags: tags.into(),
            message: message.into(),
        }
    }

    /// CSS class appended to the notification wrapper.
    pub fn alert_class(&self) -> String {
        format!("{}{}", ALERT_CLASS_PREFIX, self.tags)
    }
}

/// `detail` of the `messages` event: htmx wraps non-object trigger values in
/// `{ value: ... }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessagesDetail {
    #[serde(default)]
    pub value: Vec<Message>,
}
