//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling,
//! and the [`WebPage`] host the renderers run against.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, DocumentFragment, Element, Event, EventTarget, HtmlElement, HtmlTemplateElement,
    Window,
};

use crate::core::error::RenderError;
use crate::core::page::{MarkdownHost, NotificationHost};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the current document.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Convert a thrown JS value into a [`RenderError`].
pub fn js_error(err: JsValue) -> RenderError {
    RenderError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Subscribe `handler` to `event` on `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), RenderError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // Handlers live as long as the page.
    closure.forget();
    Ok(())
}

// =============================================================================
// Renderer Host
// =============================================================================

/// Renderer host backed by a live `web_sys::Document`.
#[derive(Debug, Clone)]
pub struct WebPage {
    document: Document,
}

impl WebPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Host for the page this module was loaded into.
    pub fn current() -> Result<Self, RenderError> {
        document().map(Self::new).ok_or(RenderError::NoDocument)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn find_in(&self, fragment: &DocumentFragment, selector: &str) -> Result<Element, RenderError> {
        fragment
            .query_selector(selector)
            .map_err(js_error)?
            .ok_or_else(|| RenderError::ElementMissing(selector.to_string()))
    }
}

impl NotificationHost for WebPage {
    type Fragment = DocumentFragment;

    fn clone_template(&self, selector: &str) -> Result<DocumentFragment, RenderError> {
        let missing = || RenderError::TemplateMissing(selector.to_string());
        let template = self
            .document
            .query_selector(selector)
            .map_err(js_error)?
            .and_then(|el| el.dyn_into::<HtmlTemplateElement>().ok())
            .ok_or_else(missing)?;

        template
            .content()
            .clone_node_with_deep(true)
            .map_err(js_error)?
            .dyn_into::<DocumentFragment>()
            .map_err(|_| missing())
    }

    fn append_class(
        &self,
        fragment: &DocumentFragment,
        selector: &str,
        class: &str,
    ) -> Result<(), RenderError> {
        let wrapper = self.find_in(fragment, selector)?;
        wrapper.set_class_name(&format!("{} {}", wrapper.class_name(), class));
        Ok(())
    }

    fn set_text(
        &self,
        fragment: &DocumentFragment,
        selector: &str,
        text: &str,
    ) -> Result<(), RenderError> {
        match self.find_in(fragment, selector)?.dyn_into::<HtmlElement>() {
            Ok(body) => body.set_inner_text(text),
            Err(body) => body.set_text_content(Some(text)),
        }
        Ok(())
    }

    fn append_to_container(
        &self,
        fragment: DocumentFragment,
        selector: &str,
    ) -> Result<(), RenderError> {
        let container = self
            .document
            .query_selector(selector)
            .map_err(js_error)?
            .ok_or_else(|| RenderError::ElementMissing(selector.to_string()))?;
        container.append_child(&fragment).map_err(js_error)?;
        Ok(())
    }
}

impl MarkdownHost for WebPage {
    type Element = Element;

    fn find_marked(
        &self,
        scope: Option<&Element>,
        class: &str,
    ) -> Result<Vec<Element>, RenderError> {
        let selector = format!(".{class}");
        let mut found = Vec::new();

        let nodes = match scope {
            Some(root) => {
                // querySelectorAll only sees descendants.
                if root.matches(&selector).map_err(js_error)? {
                    found.push(root.clone());
                }
                root.query_selector_all(&selector)
            }
            None => self.document.query_selector_all(&selector),
        }
        .map_err(js_error)?;

        found.extend(
            (0..nodes.length())
                .filter_map(|i| nodes.get(i))
                .filter_map(|node| node.dyn_into::<Element>().ok()),
        );
        Ok(found)
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn remove_class(&self, element: &Element, class: &str) -> Result<(), RenderError> {
        element.class_list().remove_1(class).map_err(js_error)
    }
}
