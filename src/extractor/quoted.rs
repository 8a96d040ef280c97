//! Quoted-title detection.
//!
//! Singles are usually written as `"<a title="Song">Song</a>"`: the quotes
//! live in text nodes and the link sits between them. The span opens at the
//! first `"` in any text node of the cell and closes at the next `"` in the
//! same text node or in a later text node at the same level. Elements between
//! the quotes are taken whole, so quotes nested inside them never close the
//! span early.

use crate::dom::{self, NodeRef};
use crate::links::{self, Link};

use super::candidate::CellOffset;

const QUOTE: char = '"';

/// The content between a pair of double quotes.
#[derive(Clone)]
pub struct QuotedSpan<'a> {
    text: String,
    nodes: Vec<NodeRef<'a>>,
    offset: CellOffset,
}

impl<'a> QuotedSpan<'a> {
    /// Text between the quotes, trimmed.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Elements lying entirely between the quotes.
    #[must_use]
    pub fn nodes(&self) -> &[NodeRef<'a>] {
        &self.nodes
    }

    /// Position just past the opening quote.
    #[must_use]
    pub fn offset(&self) -> CellOffset {
        self.offset
    }

    /// First page link inside the quotes.
    #[must_use]
    pub fn find_titled_link(&self) -> Option<Link<'a>> {
        self.nodes.iter().find_map(links::find_titled_link)
    }

    fn is_blank(&self) -> bool {
        self.nodes.is_empty() && self.text.trim().is_empty()
    }
}

struct Closed<'a> {
    text: String,
    nodes: Vec<NodeRef<'a>>,
    /// Byte index after the closing quote when it sits in the opening node.
    resume: Option<usize>,
}

/// Find the first non-blank quoted span among `order`, the cell's nodes in
/// document order.
#[must_use]
pub fn find_quoted_span<'a>(order: &[NodeRef<'a>]) -> Option<QuotedSpan<'a>> {
    for (index, node) in order.iter().enumerate() {
        if !node.is_text() {
            continue;
        }
        let tendril = node.text();
        let text: &str = &tendril;

        let mut from = 0;
        while let Some(rel) = text[from..].find(QUOTE) {
            let start = from + rel + QUOTE.len_utf8();
            let Some(closed) = close_quote(node, text, start) else {
                // Unbalanced at this level; later text nodes may still open one.
                break;
            };

            let span = QuotedSpan {
                text: closed.text,
                nodes: closed.nodes,
                offset: CellOffset::new(index, text[..start].chars().count()),
            };
            if !span.is_blank() {
                return Some(span);
            }
            match closed.resume {
                Some(next) => from = next,
                None => break,
            }
        }
    }
    None
}

fn close_quote<'a>(node: &NodeRef<'a>, text: &str, start: usize) -> Option<Closed<'a>> {
    if let Some(rel) = text[start..].find(QUOTE) {
        return Some(Closed {
            text: text[start..start + rel].to_string(),
            nodes: Vec::new(),
            resume: Some(start + rel + QUOTE.len_utf8()),
        });
    }

    let mut inner = text[start..].to_string();
    let mut nodes = Vec::new();
    let mut sibling = node.next_sibling();

    while let Some(sib) = sibling {
        if sib.is_text() {
            let tendril = sib.text();
            let sib_text: &str = &tendril;
            if let Some(pos) = sib_text.find(QUOTE) {
                inner.push_str(&sib_text[..pos]);
                return Some(Closed {
                    text: inner,
                    nodes,
                    resume: None,
                });
            }
            inner.push_str(sib_text);
        } else if sib.is_element() {
            inner.push_str(&dom::rendered_text(&sib));
            nodes.push(sib);
        }
        sibling = sib.next_sibling();
    }

    None
}
