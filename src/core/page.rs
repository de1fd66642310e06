//! DOM seams used by the renderers.
//!
//! The browser implementation lives in [`crate::utils::dom::WebPage`]; tests
//! use in-memory hosts.

use crate::core::error::RenderError;

/// Which elements the Markdown pass inspects after a partial page update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanScope {
    /// Always scan the whole document.
    #[default]
    Document,
    /// Scan only the swapped subtree (the target included), falling back to
    /// the document when no target is reported.
    SwapTarget,
}

impl ScanScope {
    /// Root for the pass that follows a swap; `None` scans the whole document.
    ///
    /// A reported target that is no longer attached to the page is ignored.
    pub fn resolve<T>(
        self,
        target: Option<T>,
        is_connected: impl FnOnce(&T) -> bool,
    ) -> Option<T> {
        match self {
            Self::Document => None,
            Self::SwapTarget => target.filter(is_connected),
        }
    }
}

/// Page operations needed to render notifications.
pub trait NotificationHost {
    /// A detached clone of the notification template.
    type Fragment;

    /// Deep-clone the content of the template matching `selector`.
    fn clone_template(&self, selector: &str) -> Result<Self::Fragment, RenderError>;

    /// Append `class` to the class string of the first element in `fragment`
    /// matching `selector`.
    fn append_class(
        &self,
        fragment: &Self::Fragment,
        selector: &str,
        class: &str,
    ) -> Result<(), RenderError>;

    /// Set the text (not markup) of the first element in `fragment` matching
    /// `selector`.
    fn set_text(
        &self,
        fragment: &Self::Fragment,
        selector: &str,
        text: &str,
    ) -> Result<(), RenderError>;

    /// Move `fragment` to the end of the container matching `selector`.
    fn append_to_container(
        &self,
        fragment: Self::Fragment,
        selector: &str,
    ) -> Result<(), RenderError>;
}

/// Page operations needed to convert Markdown-pending elements.
pub trait MarkdownHost {
    type Element;

    /// Elements carrying `class` within `scope`, the scope element included
    /// (the whole document if `None`), in document order.
    fn find_marked(
        &self,
        scope: Option<&Self::Element>,
        class: &str,
    ) -> Result<Vec<Self::Element>, RenderError>;

    fn inner_html(&self, element: &Self::Element) -> String;

    fn set_inner_html(&self, element: &Self::Element, html: &str);

    fn remove_class(&self, element: &Self::Element, class: &str) -> Result<(), RenderError>;
}
