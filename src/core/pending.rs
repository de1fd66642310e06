//! Markdown pass over pending elements.
//!
//! An element is pending while it carries the marker class. Converting it
//! removes the class, so a later pass never renders the same content twice.

use crate::core::error::RenderError;
use crate::core::link::LinkRenderer;
use crate::core::markdown::MarkdownRenderer;
use crate::core::page::MarkdownHost;

/// Convert every pending element under `scope` (the whole document if
/// `None`). Returns the number of converted elements.
pub fn render_pending<H, L>(
    host: &H,
    renderer: &MarkdownRenderer<L>,
    scope: Option<&H::Element>,
    class: &str,
) -> Result<usize, RenderError>
where
    H: MarkdownHost,
    L: LinkRenderer,
{
    let elements = host.find_marked(scope, class)?;
    for element in &elements {
        let html = renderer.render(&host.inner_html(element));
        host.set_inner_html(element, &html);
        host.remove_class(element, class)?;
    }
    Ok(elements.len())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::MARKDOWN_PENDING_CLASS;
    use crate::core::markdown::RenderMode;

    struct Node {
        parent: Option<usize>,
        classes: Vec<String>,
        html: String,
    }

    /// Flat element tree; element handles are indices.
    #[derive(Default)]
    struct FakeTree {
        nodes: RefCell<Vec<Node>>,
    }

    impl FakeTree {
        fn add(&self, parent: Option<usize>, classes: &[&str], html: &str) -> usize {
            let mut nodes = self.nodes.borrow_mut();
            nodes.push(Node {
                parent,
                classes: classes.iter().map(|c| c.to_string()).collect(),
                html: html.to_string(),
            });
            nodes.len() - 1
        }

        fn html(&self, id: usize) -> String {
            self.nodes.borrow()[id].html.clone()
        }

        fn has_class(&self, id: usize, class: &str) -> bool {
            self.nodes.borrow()[id].classes.iter().any(|c| c == class)
        }

        fn is_descendant(&self, mut id: usize, ancestor: usize) -> bool {
            let nodes = self.nodes.borrow();
            while let Some(parent) = nodes[id].parent {
                if parent == ancestor {
                    return true;
                }
                id = parent;
            }
            false
        }
    }

    impl MarkdownHost for FakeTree {
        type Element = usize;

        fn find_marked(
            &self,
            scope: Option<&usize>,
            class: &str,
        ) -> Result<Vec<usize>, RenderError> {
            let count = self.nodes.borrow().len();
            Ok((0..count)
                .filter(|&id| self.has_class(id, class))
                .filter(|&id| scope.is_none_or(|&root| id == root || self.is_descendant(id, root)))
                .collect())
        }

        fn inner_html(&self, element: &usize) -> String {
            self.html(*element)
        }

        fn set_inner_html(&self, element: &usize, html: &str) {
            self.nodes.borrow_mut()[*element].html = html.to_string();
        }

        fn remove_class(&self, element: &usize, class: &str) -> Result<(), RenderError> {
            self.nodes.borrow_mut()[*element]
                .classes
                .retain(|c| c != class);
            Ok(())
        }
    }

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new(RenderMode::Inline)
    }

    #[test]
    fn test_pending_element_is_converted() {
        let tree = FakeTree::default();
        let body = tree.add(None, &[], "");
        let el = tree.add(Some(body), &["question", MARKDOWN_PENDING_CLASS], "**bold**");

        let count = render_pending(&tree, &renderer(), None, MARKDOWN_PENDING_CLASS).unwrap();

        assert_eq!(count, 1);
        assert_eq!(tree.html(el), "<strong>bold</strong>");
        assert!(!tree.has_class(el, MARKDOWN_PENDING_CLASS));
        assert!(tree.has_class(el, "question"));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let tree = FakeTree::default();
        let el = tree.add(None, &[MARKDOWN_PENDING_CLASS], "*a* \\*b\\*");

        assert_eq!(
            render_pending(&tree, &renderer(), None, MARKDOWN_PENDING_CLASS).unwrap(),
            1
        );
        let first = tree.html(el);
        assert_eq!(first, "<em>a</em> *b*");

        assert_eq!(
            render_pending(&tree, &renderer(), None, MARKDOWN_PENDING_CLASS).unwrap(),
            0
        );
        assert_eq!(tree.html(el), first);
    }

    #[test]
    fn test_unmarked_elements_untouched() {
        let tree = FakeTree::default();
        let el = tree.add(None, &["plain"], "**raw**");
        render_pending(&tree, &renderer(), None, MARKDOWN_PENDING_CLASS).unwrap();
        assert_eq!(tree.html(el), "**raw**");
    }

    #[test]
    fn test_scoped_pass() {
        let tree = FakeTree::default();
        let left = tree.add(None, &[], "");
        let right = tree.add(None, &[], "");
        let inside = tree.add(Some(left), &[MARKDOWN_PENDING_CLASS], "_x_");
        let outside = tree.add(Some(right), &[MARKDOWN_PENDING_CLASS], "_y_");

        let count =
            render_pending(&tree, &renderer(), Some(&left), MARKDOWN_PENDING_CLASS).unwrap();

        assert_eq!(count, 1);
        assert_eq!(tree.html(inside), "<em>x</em>");
        assert_eq!(tree.html(outside), "_y_");
        assert!(tree.has_class(outside, MARKDOWN_PENDING_CLASS));
    }

    #[test]
    fn test_scope_root_itself_is_converted() {
        let tree = FakeTree::default();
        let root = tree.add(None, &[MARKDOWN_PENDING_CLASS], "`code`");
        let count =
            render_pending(&tree, &renderer(), Some(&root), MARKDOWN_PENDING_CLASS).unwrap();
        assert_eq!(count, 1);
        assert_eq!(tree.html(root), "<code>code</code>");
    }

    #[test]
    fn test_adversarial_content_is_sanitized() {
        let tree = FakeTree::default();
        let el = tree.add(
            None,
            &[MARKDOWN_PENDING_CLASS],
            "**bold** <script>alert(1)</script>",
        );
        render_pending(&tree, &renderer(), None, MARKDOWN_PENDING_CLASS).unwrap();

        let html = tree.html(el);
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<script"));
        assert!(!tree.has_class(el, MARKDOWN_PENDING_CLASS));
    }
}
