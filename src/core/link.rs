//! Link rendering strategy used by the Markdown renderer.

use crate::config::{EXTERNAL_HREF_PREFIX, EXTERNAL_LINK_REL, EXTERNAL_LINK_TARGET};
use crate::core::url::clean_url;

/// Renders a Markdown link to HTML.
///
/// `label_html` is the already-rendered inline content of the link; `href` is
/// the raw destination as UTF-16 code units.
pub trait LinkRenderer {
    fn render_link(&self, href: &[u16], title: &str, label_html: &str) -> String;
}

/// Canonicalizes hrefs and opens `http*` links in a new tab.
///
/// An href that cannot be encoded degrades to the bare label, never to a
/// broken anchor. Titles are written as-is; the sanitizer runs afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalLinkRenderer;

impl LinkRenderer for ExternalLinkRenderer {
    fn render_link(&self, href: &[u16], title: &str, label_html: &str) -> String {
        let Ok(href) = clean_url(href.iter().copied()) else {
            return label_html.to_string();
        };

        let mut out = format!("<a href=\"{href}\"");
        if href.starts_with(EXTERNAL_HREF_PREFIX) {
            out.push_str(&format!(
                " target=\"{EXTERNAL_LINK_TARGET}\" rel=\"{EXTERNAL_LINK_REL}\""
            ));
        }
        if !title.is_empty() {
            out.push_str(&format!(" title=\"{title}\""));
        }
        out.push('>');
        out.push_str(label_html);
        out.push_str("</a>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(href: &str, title: &str, label: &str) -> String {
        let href: Vec<u16> = href.encode_utf16().collect();
        ExternalLinkRenderer.render_link(&href, title, label)
    }

    #[test]
    fn test_external_link_opens_new_tab() {
        assert_eq!(
            render("http://example.com", "", "site"),
            r#"<a href="http://example.com" target="_blank" rel="noopener noreferrer">site</a>"#
        );
        assert!(render("https://example.com", "", "x").contains(r#"target="_blank""#));
    }

    #[test]
    fn test_local_link_stays_in_tab() {
        let html = render("/local/path", "", "here");
        assert_eq!(html, r#"<a href="/local/path">here</a>"#);
        assert!(!html.contains("target="));
        assert!(!html.contains("rel="));
    }

    #[test]
    fn test_prefix_check_is_literal() {
        // Only the four characters "http" count, not the scheme.
        assert!(render("httpfoo", "", "x").contains("target="));
        assert!(!render("HTTP://example.com", "", "x").contains("target="));
        assert!(!render("ftp://example.com", "", "x").contains("target="));
    }

    #[test]
    fn test_title_is_included() {
        assert_eq!(
            render("/a", "Read more", "<em>a</em>"),
            r#"<a href="/a" title="Read more"><em>a</em></a>"#
        );
    }

    #[test]
    fn test_href_is_canonicalized() {
        assert_eq!(render("/a b", "", "x"), r#"<a href="/a%20b">x</a>"#);
    }

    #[test]
    fn test_unencodable_href_falls_back_to_label() {
        let href = [0x002F, 0xD83D];
        assert_eq!(
            ExternalLinkRenderer.render_link(&href, "t", "<strong>label</strong>"),
            "<strong>label</strong>"
        );
    }
}
