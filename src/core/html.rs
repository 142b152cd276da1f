// src/core/html.rs
// Low-level marker scanning over javadoc HTML.
// Deliberately naive: markers are exact (case-sensitive) strings from the
// javadoc 8 layout, and tags are assumed not to nest inside each other.

use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("marker {0:?} not found")]
    MissingMarker(String),
}

/// Offset of the first `marker` at or after `from`.
/// `None` when absent, or when `from` is past the end / not on a char boundary.
pub fn locate(text: &str, marker: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(marker).map(|i| i + from)
}

/// A slice found between two markers, with absolute offsets into the source.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Extract<'a> {
    pub inner: &'a str,
    /// Offset of the first byte of `inner`.
    pub start: usize,
    /// Offset just past the end marker.
    pub after: usize,
}

impl fmt::Debug for Extract<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extract({}..{} {:?})", self.start, self.after, self.inner)
    }
}

/// The text strictly between the end of `start_marker` and the next `end_marker`,
/// both searched from `from`.
///
/// ```
/// use docskel::core::html::extract_between;
/// let x = extract_between("a<pre>X</pre>b", "<pre>", "</pre>", 0).unwrap();
/// assert_eq!(x.inner, "X");
/// ```
pub fn extract_between<'a>(
    text: &'a str,
    start_marker: &str,
    end_marker: &str,
    from: usize,
) -> Result<Extract<'a>, MarkupError> {
    let open = locate(text, start_marker, from)
        .ok_or_else(|| MarkupError::MissingMarker(s!(start_marker)))?;
    let start = open + start_marker.len();
    let end = locate(text, end_marker, start)
        .ok_or_else(|| MarkupError::MissingMarker(s!(end_marker)))?;
    Ok(Extract { inner: &text[start..end], start, after: end + end_marker.len() })
}

/// Next complete `open ... close` block from `from` onwards.
/// Returns (start of `open`, offset past `close`).
pub fn next_block(text: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let start = locate(text, open, from)?;
    let end = locate(text, close, start + open.len())?;
    Some((start, end + close.len()))
}

/// Remove every `<...>` span, non-greedy, left to right.
/// An unterminated `<` is kept as text. Whitespace is left alone.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(lt) = rest.find('<') {
        match rest[lt..].find('>') {
            Some(gt_rel) => {
                out.push_str(&rest[..lt]);
                rest = &rest[lt + gt_rel + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Minimal entity decoding: `&lt;`, `&gt;`, `&nbsp;` only.
/// Anything else (`&amp;`, numeric refs...) passes through untouched.
pub fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<").replace("&gt;", ">").replace("&nbsp;", " ")
}

/// Collapse every whitespace run (newlines included) into one space. No trim.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out
}

/// Strip tags, decode, collapse and trim: the "plain text of a fragment".
pub fn plain_text(s: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_tags(s))).trim().to_string()
}

/// Forward-only position over an immutable page.
/// Every stage of a page scan continues from where the previous one stopped.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self { Self { text, pos: 0 } }

    #[inline]
    pub fn pos(&self) -> usize { self.pos }

    #[inline]
    pub fn text(&self) -> &'a str { self.text }

    /// Where `marker` next occurs, without moving.
    pub fn peek(&self, marker: &str) -> Option<usize> {
        locate(self.text, marker, self.pos)
    }

    /// Move to the start of the next `marker`.
    pub fn seek(&mut self, marker: &str) -> Option<usize> {
        let at = self.peek(marker)?;
        self.pos = at;
        Some(at)
    }

    /// `extract_between` from the current position; on success the cursor
    /// moves past the end marker, on failure it stays put.
    pub fn between(&mut self, start: &str, end: &str) -> Result<Extract<'a>, MarkupError> {
        let x = extract_between(self.text, start, end, self.pos)?;
        self.pos = x.after;
        Ok(x)
    }

    /// Move forward to `pos`. Never moves backwards.
    pub fn advance_to(&mut self, pos: usize) {
        if pos > self.pos {
            self.pos = pos.min(self.text.len());
        }
    }
}
