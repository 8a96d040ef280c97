//! Title candidates found in a table cell.

use crate::dom::{self, NodeRef};
use crate::links::{self, Link};

use super::quoted::QuotedSpan;

/// Position of a candidate inside its cell.
///
/// `node` is the pre-order index of the node within the cell (the cell
/// itself is 0); `char_index` counts characters into that node and is 0 for
/// elements. Ordering follows document order, which is the order in which
/// the candidates start in the cell's serialized markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellOffset {
    /// Pre-order node index.
    pub node: usize,
    /// Character index within the node.
    pub char_index: usize,
}

impl CellOffset {
    /// Creates an offset.
    #[must_use]
    pub const fn new(node: usize, char_index: usize) -> Self {
        Self { node, char_index }
    }
}

/// Detector that produced a candidate. Declaration order is the tie-break
/// priority: at equal offsets a quote beats emphasis beats a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateKind {
    /// Text between double quotes.
    Quoted,
    /// First `i`, `b`, `em` or `strong` element.
    Emphasis,
    /// First anchor with a page title.
    Link,
}

/// A sub-fragment of a cell that may name the release.
#[derive(Clone)]
pub enum Candidate<'a> {
    /// Quoted span.
    Quoted(QuotedSpan<'a>),
    /// Emphasis element.
    Emphasis {
        /// The emphasis element.
        node: NodeRef<'a>,
        /// Where it starts.
        offset: CellOffset,
    },
    /// Titled anchor.
    Link {
        /// The anchor.
        link: Link<'a>,
        /// Where it starts.
        offset: CellOffset,
    },
}

impl<'a> Candidate<'a> {
    /// Which detector found this candidate.
    #[must_use]
    pub fn kind(&self) -> CandidateKind {
        match self {
            Self::Quoted(_) => CandidateKind::Quoted,
            Self::Emphasis { .. } => CandidateKind::Emphasis,
            Self::Link { .. } => CandidateKind::Link,
        }
    }

    /// Where the candidate starts in the cell.
    #[must_use]
    pub fn offset(&self) -> CellOffset {
        match self {
            Self::Quoted(span) => span.offset(),
            Self::Emphasis { offset, .. } | Self::Link { offset, .. } => *offset,
        }
    }

    /// Selection key: earliest offset, then kind priority.
    #[must_use]
    pub fn sort_key(&self) -> (CellOffset, CandidateKind) {
        (self.offset(), self.kind())
    }

    /// First titled anchor inside the candidate; a link candidate is its own.
    #[must_use]
    pub fn title_link(&self) -> Option<Link<'a>> {
        match self {
            Self::Quoted(span) => span.find_titled_link(),
            Self::Emphasis { node, .. } => links::find_titled_link(node),
            Self::Link { link, .. } => Some(link.clone()),
        }
    }

    /// Visible text of the candidate, trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Quoted(span) => span.text().to_string(),
            Self::Emphasis { node, .. } => dom::rendered_text(node).trim().to_string(),
            Self::Link { link, .. } => link.text(),
        }
    }
}
