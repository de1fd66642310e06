//! Markdown rendering.
//!
//! Converts Markdown to sanitized HTML, routing every link through a
//! [`LinkRenderer`] before the output is cleaned by `ammonia`.

use std::borrow::Cow;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd, html};

use crate::core::link::{ExternalLinkRenderer, LinkRenderer};

/// How block structure is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Only inline syntax is recognized and nothing is wrapped in `<p>`, so
    /// fragments can sit inside inline contexts (table cells, spans, buttons).
    /// Line starts such as `# `, `1. `, `- ` or `> ` stay literal text.
    #[default]
    Inline,
    /// Full document rendering.
    Block,
}

/// Markdown to sanitized HTML converter.
pub struct MarkdownRenderer<L = ExternalLinkRenderer> {
    links: L,
    mode: RenderMode,
    sanitizer: ammonia::Builder<'static>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(RenderMode::default())
    }
}

impl MarkdownRenderer {
    pub fn new(mode: RenderMode) -> Self {
        Self::with_links(ExternalLinkRenderer, mode)
    }
}

impl<L: LinkRenderer> MarkdownRenderer<L> {
    pub fn with_links(links: L, mode: RenderMode) -> Self {
        Self {
            links,
            mode,
            sanitizer: sanitizer(),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Render Markdown to HTML that is safe to assign to `innerHTML`.
    pub fn render(&self, markdown: &str) -> String {
        self.sanitizer.clean(&self.render_unsanitized(markdown)).to_string()
    }

    /// Render Markdown to HTML without sanitizing. Raw HTML in the source is
    /// passed through untouched.
    pub fn render_unsanitized(&self, markdown: &str) -> String {
        let source = match self.mode {
            RenderMode::Inline => Cow::Owned(escape_block_starts(markdown)),
            RenderMode::Block => Cow::Borrowed(markdown),
        };
        let events: Vec<Event<'_>> = Parser::new_ext(&source, parser_options(self.mode)).collect();
        let events = self.rewrite_links(events);
        let events = match self.mode {
            RenderMode::Inline => unwrap_paragraphs(events),
            RenderMode::Block => events,
        };

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Replace each link's events with a single raw-HTML event produced by
    /// the link renderer.
    fn rewrite_links<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut iter = events.into_iter();

        while let Some(event) = iter.next() {
            let (link_type, dest_url, title) = match event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) => (link_type, dest_url, title),
                other => {
                    out.push(other);
                    continue;
                }
            };

            let mut label = Vec::new();
            let mut depth = 0usize;
            for inner in iter.by_ref() {
                match inner {
                    Event::Start(Tag::Link { .. }) => depth += 1,
                    Event::End(TagEnd::Link) if depth == 0 => break,
                    Event::End(TagEnd::Link) => depth -= 1,
                    _ => {}
                }
                label.push(inner);
            }

            let mut label_html = String::new();
            html::push_html(&mut label_html, self.rewrite_links(label).into_iter());

            // Email autolinks carry the bare address.
            let href: Vec<u16> = match link_type {
                LinkType::Email => "mailto:"
                    .encode_utf16()
                    .chain(dest_url.encode_utf16())
                    .collect(),
                _ => dest_url.encode_utf16().collect(),
            };
            let anchor = self.links.render_link(&href, &title, &label_html);
            out.push(Event::InlineHtml(anchor.into()));
        }

        out
    }
}

fn parser_options(mode: RenderMode) -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    if mode == RenderMode::Block {
        options.insert(Options::ENABLE_TABLES);
    }
    options
}

/// Sanitizer allow-list: ammonia's defaults plus `target` everywhere and
/// `rel` on anchors, so the link renderer's new-tab attributes survive.
///
/// With `link_rel(None)` ammonia no longer rewrites `rel`, so a `rel` written
/// in raw HTML by the author is kept as-is.
fn sanitizer() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::default();
    builder
        .link_rel(None)
        .add_generic_attributes(["target"])
        .add_tag_attributes("a", ["rel"]);
    builder
}

/// Neutralize everything that would open a block so the source parses as one
/// run of inline content: leading indentation (code blocks) is dropped and
/// block markers get a backslash escape.
fn escape_block_starts(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() + 8);
    for (i, line) in markdown.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let line = line.trim_start_matches([' ', '\t']);
        match block_marker_at(line) {
            Some(at) => {
                out.push_str(&line[..at]);
                out.push('\\');
                out.push_str(&line[at..]);
            }
            None => out.push_str(line),
        }
    }
    out
}

/// Byte offset of the marker that makes `line` open a block, if any.
fn block_marker_at(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let first = *bytes.first()?;
    let ends_marker =
        |at: usize| bytes.get(at).is_none_or(|&b| matches!(b, b' ' | b'\t' | b'\r'));

    match first {
        // Quote
        b'>' => return Some(0),
        // ATX heading
        b'#' => {
            let hashes = bytes.iter().take_while(|&&b| b == b'#').count();
            if hashes <= 6 && ends_marker(hashes) {
                return Some(0);
            }
        }
        // Bullet item
        b'-' | b'+' | b'*' if ends_marker(1) => return Some(0),
        // Fenced code
        b'`' | b'~' if bytes.len() >= 3 && bytes[..3].iter().all(|&b| b == first) => {
            return Some(0);
        }
        // Ordered item
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            let delimited = matches!(bytes.get(digits), Some(b'.' | b')'));
            if digits <= 9 && delimited && ends_marker(digits + 1) {
                return Some(digits);
            }
            return None;
        }
        _ => {}
    }

    // Thematic break or setext underline: one repeated character plus blanks.
    let marks = bytes.iter().filter(|&&b| b == first).count();
    let only_marks = bytes
        .iter()
        .all(|&b| b == first || matches!(b, b' ' | b'\t' | b'\r'));
    let min_marks = match first {
        b'-' | b'=' => 1,
        b'*' | b'_' => 3,
        _ => return None,
    };
    (only_marks && marks >= min_marks).then_some(0)
}

/// Drop the `<p>` wrappers of top-level paragraphs. Nested paragraphs (list
/// items, block quotes) keep theirs.
fn unwrap_paragraphs(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut depth = 0usize;

    for event in events {
        match event {
            Event::Start(Tag::Paragraph) if depth == 0 => {
                if !out.is_empty() {
                    out.push(Event::Text("\n\n".into()));
                }
                depth += 1;
            }
            Event::End(TagEnd::Paragraph) if depth == 1 => depth -= 1,
            Event::Start(tag) => {
                depth += 1;
                out.push(Event::Start(tag));
            }
            Event::End(tag) => {
                depth = depth.saturating_sub(1);
                out.push(Event::End(tag));
            }
            other => out.push(other),
        }
    }

    out
}
