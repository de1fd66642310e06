//! Flash notification rendering.

use crate::config::MessageSelectors;
use crate::core::error::RenderError;
use crate::core::page::NotificationHost;
use crate::models::Message;

/// Clone the template, fill it from `message`, and append it to the container.
pub fn render_message<H: NotificationHost>(
    host: &H,
    selectors: &MessageSelectors,
    message: &Message,
) -> Result<(), RenderError> {
    let fragment = host.clone_template(selectors.template)?;
    host.append_class(&fragment, selectors.wrapper, &message.alert_class())?;
    host.set_text(&fragment, selectors.body, &message.message)?;
    host.append_to_container(fragment, selectors.container)
}

/// Render `messages` in order. Stops at the first failure; messages already
/// appended stay on the page.
pub fn render_messages<H: NotificationHost>(
    host: &H,
    selectors: &MessageSelectors,
    messages: &[Message],
) -> Result<usize, RenderError> {
    for message in messages {
        render_message(host, selectors, message)?;
    }
    Ok(messages.len())
}
