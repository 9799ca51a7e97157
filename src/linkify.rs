//! Plain-text-to-hyperlink conversion for note buffers.
//!
//! The note buffer is plain text from the editing widget; the core hands
//! back a [`RichText`] made of ordered spans so the Presentation Layer can
//! render links without the core knowing anything about rendering.
//! Already-converted ranges are kept as [`Span::Link`] values and are never
//! rescanned, so re-linkifying is structurally idempotent even when user
//! text contains something that looks like a link marker.

use once_cell::sync::Lazy;
use regex::Regex;

/// A URL runs from its scheme to the next whitespace character (or end of
/// text). No percent-decoding or normalization is applied.
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:https?|ftp)://\S+").expect("url pattern compiles"));

/// One piece of linkified note text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Ordinary text, emitted verbatim
    Text(String),
    /// A hyperlink whose visible text equals its target exactly
    Link(String),
}

/// Note text annotated with hyperlink spans, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    pub spans: Vec<Span>,
}

impl RichText {
    /// The underlying plain text, reassembled byte-for-byte.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                Span::Text(t) | Span::Link(t) => out.push_str(t),
            }
        }
        out
    }

    /// All link targets in document order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().filter_map(|s| match s {
            Span::Link(url) => Some(url.as_str()),
            Span::Text(_) => None,
        })
    }

    /// Rescan only the text spans for URLs. Existing links are untouched,
    /// which makes repeated application a fixed point: for any text `t`,
    /// `linkify(t).relinkify() == linkify(t)`.
    pub fn relinkify(&self) -> RichText {
        let mut spans = Vec::with_capacity(self.spans.len());
        for span in &self.spans {
            match span {
                Span::Link(url) => spans.push(Span::Link(url.clone())),
                Span::Text(t) => split_text(t, &mut spans),
            }
        }
        RichText { spans }
    }
}

/// Convert bare URLs in `text` into link spans.
pub fn linkify(text: &str) -> RichText {
    let mut spans = Vec::new();
    split_text(text, &mut spans);
    RichText { spans }
}

/// [`linkify`], also clamping a caret offset into the converted text so the
/// caret never points past the end: returns `min(cursor, plain len)`.
pub fn linkify_with_cursor(text: &str, cursor: usize) -> (RichText, usize) {
    let rich = linkify(text);
    let clamped = cursor.min(rich.plain_text().len());
    (rich, clamped)
}

fn split_text(text: &str, spans: &mut Vec<Span>) {
    let mut last = 0;
    for m in URL_RE.find_iter(text) {
        if m.start() > last {
            spans.push(Span::Text(text[last..m.start()].to_string()));
        }
        spans.push(Span::Link(m.as_str().to_string()));
        last = m.end();
    }
    if last < text.len() {
        spans.push(Span::Text(text[last..].to_string()));
    }
}
