//! Confirmed-tag highlighting
//!
//! Produces the overlay shown on top of the composer input. Only tags the
//! user picked from the suggestion list are marked; a tag-shaped word that was
//! typed by hand stays plain. The output is display-only and never feeds back
//! into the composer buffer.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// `@word` / `#word`, where word characters are ASCII `[A-Za-z0-9_]`
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[@#][A-Za-z0-9_]+").expect("tag pattern must compile"));

/// How a segment of highlighted text is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Rendered as-is
    Plain,
    /// A confirmed tag, rendered with a marker
    ConfirmedTag,
}

/// A run of text with a single display kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: SegmentKind::Plain,
        }
    }

    fn tag(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: SegmentKind::ConfirmedTag,
        }
    }
}

/// Character range of a marked tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Start position (character index)
    pub start: usize,
    /// End position (character index, exclusive)
    pub end: usize,
}

/// Text split into plain runs and marked confirmed tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlighted {
    segments: Vec<Segment>,
}

impl Highlighted {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The original text with all markers removed
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Character ranges of the marked tags, in order
    pub fn spans(&self) -> Vec<HighlightSpan> {
        self.segments
            .iter()
            .scan(0usize, |pos, seg| {
                let start = *pos;
                *pos += seg.text.chars().count();
                Some((start, *pos, seg.kind))
            })
            .filter(|(_, _, kind)| *kind == SegmentKind::ConfirmedTag)
            .map(|(start, end, _)| HighlightSpan { start, end })
            .collect()
    }

    /// Display-safe HTML: plain text is escaped, tags are wrapped in `<mark>`
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for seg in &self.segments {
            match seg.kind {
                SegmentKind::Plain => escape_html_into(&mut html, &seg.text),
                SegmentKind::ConfirmedTag => {
                    html.push_str(r#"<mark class="tag">"#);
                    escape_html_into(&mut html, &seg.text);
                    html.push_str("</mark>");
                }
            }
        }
        html
    }

    fn push_plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.kind == SegmentKind::Plain => last.text.push_str(text),
            _ => self.segments.push(Segment::plain(text)),
        }
    }
}

fn escape_html_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Mark every tag-shaped match that is an exact member of `confirmed`.
pub fn highlight(text: &str, confirmed: &HashSet<String>) -> Highlighted {
    let mut out = Highlighted::default();
    let mut last = 0;
    for m in TAG_PATTERN.find_iter(text) {
        if !confirmed.contains(m.as_str()) {
            continue;
        }
        out.push_plain(&text[last..m.start()]);
        out.segments.push(Segment::tag(m.as_str()));
        last = m.end();
    }
    out.push_plain(&text[last..]);
    out
}
