//! Event wiring between htmx and the renderers.
//!
//! Both handlers run synchronously inside the event callback. Errors are
//! reported on the console and abort only the current pass.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, Element, Event, console};

use crate::config::{
    AFTER_SWAP_EVENT, MARKDOWN_PENDING_CLASS, MESSAGE_SELECTORS, MESSAGES_EVENT, SWAP_SCAN_SCOPE,
};
use crate::core::{
    MarkdownRenderer, RenderError, render_message, render_messages, render_pending,
};
use crate::models::{Message, MessagesDetail};
use crate::utils::{WebPage, listen};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(err) = install() {
        console::error_1(&format!("hxrender: {err}").into());
    }
}

/// Convert pending Markdown elements under `root` (the whole document if
/// omitted). Returns the number of converted elements.
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown(root: Option<Element>) -> Result<usize, JsValue> {
    let page = WebPage::current()?;
    let count = render_pending(
        &page,
        &MarkdownRenderer::default(),
        root.as_ref(),
        MARKDOWN_PENDING_CLASS,
    )?;
    Ok(count)
}

/// Render one `{ tags, message }` object into the notification container.
#[wasm_bindgen(js_name = createMessage)]
pub fn create_message(message: JsValue) -> Result<(), JsValue> {
    let message: Message = serde_wasm_bindgen::from_value(message)
        .map_err(|e| RenderError::InvalidPayload(e.to_string()))?;
    render_message(&WebPage::current()?, &MESSAGE_SELECTORS, &message)?;
    Ok(())
}

thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Subscribe both renderers and run the initial Markdown pass.
///
/// Only the first call subscribes; later calls return immediately.
pub fn install() -> Result<(), RenderError> {
    if INSTALLED.with(Cell::get) {
        return Ok(());
    }
    let page = Rc::new(WebPage::current()?);
    let renderer = Rc::new(MarkdownRenderer::default());

    listen(page.document(), MESSAGES_EVENT, {
        let page = Rc::clone(&page);
        move |event| on_messages(&page, &event)
    })?;

    listen(page.document(), AFTER_SWAP_EVENT, {
        let page = Rc::clone(&page);
        let renderer = Rc::clone(&renderer);
        move |event| {
            let scope = SWAP_SCAN_SCOPE.resolve(swap_target(&event), |t| t.is_connected());
            run_markdown_pass(&page, &renderer, scope.as_ref());
        }
    })?;

    INSTALLED.with(|installed| installed.set(true));

    if defers_initial_pass(&page.document().ready_state()) {
        listen(page.document(), "DOMContentLoaded", {
            let page = Rc::clone(&page);
            move |_| run_markdown_pass(&page, &renderer, None)
        })?;
    } else {
        run_markdown_pass(&page, &renderer, None);
    }

    Ok(())
}

fn on_messages(page: &WebPage, event: &Event) {
    let result = messages_detail(event)
        .and_then(|detail| render_messages(page, &MESSAGE_SELECTORS, &detail.value));
    if let Err(err) = result {
        console::error_1(&format!("messages: {err}").into());
    }
}

/// Decode the `messages` event payload.
fn messages_detail(event: &Event) -> Result<MessagesDetail, RenderError> {
    let event = event
        .dyn_ref::<CustomEvent>()
        .ok_or_else(|| RenderError::InvalidPayload("not a CustomEvent".to_string()))?;
    serde_wasm_bindgen::from_value(event.detail())
        .map_err(|e| RenderError::InvalidPayload(e.to_string()))
}

/// Whether the first Markdown pass has to wait for `DOMContentLoaded`.
fn defers_initial_pass(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Swapped subtree reported in `detail.target`, if any.
pub fn swap_target(event: &Event) -> Option<Element> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    Reflect::get(&detail, &JsValue::from_str("target"))
        .ok()?
        .dyn_into::<Element>()
        .ok()
}

fn run_markdown_pass(page: &WebPage, renderer: &MarkdownRenderer, scope: Option<&Element>) {
    match render_pending(page, renderer, scope, MARKDOWN_PENDING_CLASS) {
        Ok(0) => {}
        Ok(count) => console::debug_1(&format!("markdown: rendered {count} element(s)").into()),
        Err(err) => console::error_1(&format!("markdown: {err}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_pass_waits_while_loading() {
        assert!(defers_initial_pass("loading"));
        assert!(!defers_initial_pass("interactive"));
        assert!(!defers_initial_pass("complete"));
    }
}
