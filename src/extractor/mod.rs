//! Title cell extraction.
//!
//! A discography cell mixes the release name with prose: a release date, a
//! B-side, a chart note. Three detectors look for the name: a quoted span,
//! the first emphasis element, and the first titled link. The candidate that
//! starts earliest in the cell wins, and its first titled link (if any, and
//! if not broken) gives the page name.

mod candidate;
mod quoted;

pub use candidate::{Candidate, CandidateKind, CellOffset};
pub use quoted::{find_quoted_span, QuotedSpan};

use crate::dom::{self, NodeRef};
use crate::links::Link;
use crate::patterns::EMPHASIS_TAGS;
use crate::Options;

/// Run all three detectors over `cell`. At most one candidate per kind, in
/// kind order.
#[must_use]
pub fn detect_candidates<'a>(cell: &NodeRef<'a>) -> Vec<Candidate<'a>> {
    let order = dom::preorder(cell);
    let mut found = Vec::with_capacity(3);

    if let Some(span) = quoted::find_quoted_span(&order) {
        found.push(Candidate::Quoted(span));
    }

    // Index 0 is the cell itself; detectors look at descendants only.
    if let Some((index, node)) = order
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, n)| dom::is_any_tag(n, EMPHASIS_TAGS))
    {
        found.push(Candidate::Emphasis {
            node: *node,
            offset: CellOffset::new(index, 0),
        });
    }

    if let Some((index, link)) = order
        .iter()
        .enumerate()
        .skip(1)
        .find_map(|(i, n)| Link::from_node(n).map(|l| (i, l)))
    {
        found.push(Candidate::Link {
            link,
            offset: CellOffset::new(index, 0),
        });
    }

    found
}

/// Pick the sub-fragment of `cell` most likely to name the release.
///
/// Returns `None` when the cell has no quoted, emphasized, or linked text.
///
/// ```rust
/// use discog_pages::dom::parse_fragment;
/// use discog_pages::extractor::{extract_album_element, CandidateKind};
///
/// let doc = parse_fragment(
///     r#"<table><tr><td>1998: <i><a title="X (album)">X</a></i> (reissued)</td></tr></table>"#,
/// )?;
/// let cell = doc.select("td").nodes()[0];
/// let element = extract_album_element(&cell);
/// assert_eq!(element.map(|c| c.kind()), Some(CandidateKind::Emphasis));
/// # Ok::<(), discog_pages::Error>(())
/// ```
#[must_use]
pub fn extract_album_element<'a>(cell: &NodeRef<'a>) -> Option<Candidate<'a>> {
    let chosen = detect_candidates(cell)
        .into_iter()
        .min_by_key(Candidate::sort_key);

    if let Some(candidate) = &chosen {
        tracing::trace!(
            kind = ?candidate.kind(),
            offset = ?candidate.offset(),
            text = %candidate.text(),
            "title candidate selected"
        );
    }
    chosen
}

/// Page name for a chosen candidate.
///
/// `None` when the candidate holds no titled link (a quoted but unlinked
/// title cannot be resolved) or when its link is broken.
#[must_use]
pub fn resolve_to_page_name(candidate: &Candidate, options: &Options) -> Option<String> {
    let link = candidate.title_link()?;
    if link.is_broken(options) {
        tracing::trace!(title = link.title(), "broken link rejected");
        return None;
    }
    Some(link.title().to_string())
}

/// `extract_album_element` followed by `resolve_to_page_name`.
#[must_use]
pub fn extract_page_name(cell: &NodeRef, options: &Options) -> Option<String> {
    let candidate = extract_album_element(cell)?;
    resolve_to_page_name(&candidate, options)
}

/// Page names of every cell that resolves, in cell order.
pub fn extract_page_names<'a, I>(cells: I, options: &Options) -> Vec<String>
where
    I: IntoIterator<Item = NodeRef<'a>>,
{
    cells
        .into_iter()
        .filter_map(|cell| extract_page_name(&cell, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_fragment, Document};

    fn parse_cell(inner: &str) -> Document {
        match parse_fragment(&format!("<table><tr><td>{inner}</td></tr></table>")) {
            Ok(doc) => doc,
            Err(err) => panic!("parse failed: {err}"),
        }
    }

    fn cell(doc: &Document) -> NodeRef<'_> {
        match doc.select("td").nodes().first() {
            Some(node) => *node,
            None => panic!("no cell"),
        }
    }

    fn chosen_kind(inner: &str) -> Option<CandidateKind> {
        let doc = parse_cell(inner);
        extract_album_element(&cell(&doc)).map(|c| c.kind())
    }

    fn page_name(inner: &str) -> Option<String> {
        let doc = parse_cell(inner);
        extract_page_name(&cell(&doc), &Options::default())
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(chosen_kind("1998 (reissued)"), None);
        assert_eq!(page_name(""), None);
    }

    #[test]
    fn test_emphasis_around_link() {
        let inner = r#"1998: <i><a title="X (album)">X</a></i> (reissued)"#;
        assert_eq!(chosen_kind(inner), Some(CandidateKind::Emphasis));
        assert_eq!(page_name(inner), Some("X (album)".to_string()));
    }

    #[test]
    fn test_link_around_emphasis() {
        let inner = r#"<a title="Y (album)"><i>Y</i></a>"#;
        assert_eq!(chosen_kind(inner), Some(CandidateKind::Link));
        assert_eq!(page_name(inner), Some("Y (album)".to_string()));
    }

    #[test]
    fn test_quote_wins_over_link_inside_it() {
        let inner = r#""<a title="Z (song)">Z</a>""#;
        assert_eq!(chosen_kind(inner), Some(CandidateKind::Quoted));
        assert_eq!(page_name(inner), Some("Z (song)".to_string()));
    }

    #[test]
    fn test_earliest_candidate_wins() {
        // The italic note comes first, so it is chosen and has no link.
        let inner = r#"<i>Remastered</i> "<a title="Song">Song</a>""#;
        assert_eq!(chosen_kind(inner), Some(CandidateKind::Emphasis));
        assert_eq!(page_name(inner), None);

        let inner = r#"<a title="Lead">Lead</a> featuring <i>Guest</i>"#;
        assert_eq!(page_name(inner), Some("Lead".to_string()));
    }

    #[test]
    fn test_quoted_unlinked_title_yields_nothing() {
        let inner = r#""Unlinked" from <a title="Parent album">Parent album</a>"#;
        assert_eq!(chosen_kind(inner), Some(CandidateKind::Quoted));
        assert_eq!(page_name(inner), None);
    }

    #[test]
    fn test_broken_only_link() {
        assert_eq!(page_name(r#"<a class="new" title="Gone">Gone</a>"#), None);
        assert_eq!(
            page_name(r#"<i><a href="/w/index.php?title=Gone&amp;action=edit&amp;redlink=1" title="Gone (page does not exist)">Gone</a></i>"#),
            None
        );
    }

    #[test]
    fn test_anchor_without_title_is_not_a_link() {
        let inner = r#"<a href="/wiki/NoTitle">NoTitle</a>"#;
        assert_eq!(chosen_kind(inner), None);
    }

    #[test]
    fn test_bold_and_strong_count_as_emphasis() {
        assert_eq!(chosen_kind("<b>B</b>"), Some(CandidateKind::Emphasis));
        assert_eq!(chosen_kind("<strong>S</strong>"), Some(CandidateKind::Emphasis));
        assert_eq!(chosen_kind("<em>E</em>"), Some(CandidateKind::Emphasis));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = parse_cell(r#"2003 "<a title="Twice">Twice</a>" <i>note</i>"#);
        let td = cell(&doc);
        let opts = Options::default();

        let first = extract_album_element(&td).map(|c| (c.sort_key(), c.text()));
        let second = extract_album_element(&td).map(|c| (c.sort_key(), c.text()));
        assert_eq!(first, second);
        assert_eq!(extract_page_name(&td, &opts), extract_page_name(&td, &opts));
        assert_eq!(extract_page_name(&td, &opts), Some("Twice".to_string()));
    }

    #[test]
    fn test_detect_candidates_reports_each_kind_once() {
        let doc = parse_cell(r#""<a title="A">A</a>" <i>x</i> <i>y</i> <a title="B">B</a>"#);
        let kinds: Vec<CandidateKind> = detect_candidates(&cell(&doc)).iter().map(Candidate::kind).collect();

        assert_eq!(
            kinds,
            vec![CandidateKind::Quoted, CandidateKind::Emphasis, CandidateKind::Link]
        );
    }

    #[test]
    fn test_extract_page_names_skips_unresolved_cells() {
        let Ok(doc) = parse_fragment(
            r#"<table><tr><td><i><a title="One">One</a></i></td><td>none</td><td>"<a title="Two">Two</a>"</td></tr></table>"#,
        ) else {
            panic!("parse failed");
        };
        let cells: Vec<NodeRef> = doc.select("td").nodes().to_vec();
        let names = extract_page_names(cells, &Options::default());

        assert_eq!(names, vec!["One", "Two"]);
    }
}
