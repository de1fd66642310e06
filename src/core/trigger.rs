//! `HX-Trigger` header values carrying flash messages.
//!
//! The server attaches pending messages to htmx responses so the client fires
//! a `messages` event. Any trigger already set on the response is kept.
//!
//! This is the server half of the `messages` contract: it is meant for native
//! Rust backends linking the `rlib`, and is not exported to JavaScript.

use serde_json::{Map, Value};

use crate::config::MESSAGES_TRIGGER_KEY;
use crate::core::error::TriggerError;
use crate::models::Message;

/// Merge `messages` into an existing `HX-Trigger` value.
///
/// Returns `Ok(None)` when there is nothing to add, meaning the header should
/// be left as it is.
pub fn with_messages(
    existing: Option<&str>,
    messages: &[Message],
) -> Result<Option<String>, TriggerError> {
    if messages.is_empty() {
        return Ok(None);
    }

    let mut trigger = initial_trigger(existing)?;
    trigger.insert(
        MESSAGES_TRIGGER_KEY.to_string(),
        serde_json::to_value(messages)?,
    );
    Ok(Some(serde_json::to_string(&trigger)?))
}

/// Parse an `HX-Trigger` value in either object or event-name syntax.
fn initial_trigger(existing: Option<&str>) -> Result<Map<String, Value>, TriggerError> {
    match existing {
        None => Ok(Map::new()),
        Some(header) if header.starts_with('{') => Ok(serde_json::from_str(header)?),
        Some(header) => {
            let mut trigger = Map::new();
            trigger.insert(header.to_string(), Value::Bool(true));
            Ok(trigger)
        }
    }
}
