//! DOM Operations Adapter
//!
//! Small helpers over the `dom_query` crate. Everything here is read-only:
//! the extraction code never mutates the parsed tree.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

use crate::{Error, Result};

// === Parsing ===

/// Parse an HTML fragment into a document.
///
/// The html5ever tree builder recovers from any tag soup, so the only input
/// rejected here is text carrying NUL bytes, which the builder would
/// silently rewrite and which rendered wiki markup never contains.
pub fn parse_fragment(html: &str) -> Result<Document> {
    if let Some(pos) = html.find('\0') {
        return Err(Error::ParseError(format!("NUL byte at offset {pos}")));
    }
    Ok(Document::from(html))
}

/// The `<html>` element of a parsed document.
#[must_use]
pub fn document_root(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("html").nodes().first().copied()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check whether the node is an element with the given tag.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

/// Check whether the node is an element with any of the given tags.
#[must_use]
pub fn is_any_tag(node: &NodeRef, tags: &[&str]) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|name| tags.iter().any(|t| name.eq_ignore_ascii_case(t)))
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    Selection::from(*node).attr(name).map(|s| s.to_string())
}

/// Check whether the whitespace-separated `class` attribute contains `class`.
#[must_use]
pub fn has_class(node: &NodeRef, class: &str) -> bool {
    Selection::from(*node)
        .attr("class")
        .is_some_and(|value| value.split_whitespace().any(|c| c == class))
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    node.text()
}

/// Text as a reader sees it: like `text_content`, but `<br>` becomes a space
/// so that `Album<br>details` reads as two words.
#[must_use]
pub fn rendered_text(node: &NodeRef) -> String {
    let mut out = String::new();
    for n in preorder(node) {
        if n.is_text() {
            out.push_str(&n.text());
        } else if is_tag(&n, "br") {
            out.push(' ');
        }
    }
    out
}

// === Tree Navigation ===

/// Element children of a node (text and comments skipped).
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// The node and all its descendants in document (pre-)order.
#[must_use]
pub fn preorder<'a>(root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children().into_iter().rev());
    }
    out
}
