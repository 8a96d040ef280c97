//! Title column lookup.

use crate::patterns;

/// Index of the title column among `headers`, using the default synonyms
/// (`title`, `song`, `album details`, `single/ep`).
///
/// Synonym priority decides, not column position: a table with both `Song`
/// and `Title` columns yields the `Title` index.
///
/// ```rust
/// use discog_pages::locate_title_column;
///
/// assert_eq!(locate_title_column(&["Year", "Song", "Title"]), Some(2));
/// assert_eq!(locate_title_column(&["Year", "Single"]), None);
/// ```
#[must_use]
pub fn locate_title_column<S: AsRef<str>>(headers: &[S]) -> Option<usize> {
    locate_title_column_with(headers, patterns::TITLE_COLUMNS)
}

/// Like `locate_title_column` with a caller-supplied synonym list.
///
/// Labels match exactly after normalization (case, whitespace, footnote
/// markers), never by substring, so `Album` does not match `album details`.
/// When a synonym labels several columns, the leftmost wins.
#[must_use]
pub fn locate_title_column_with<S: AsRef<str>, T: AsRef<str>>(
    headers: &[S],
    synonyms: &[T],
) -> Option<usize> {
    let labels: Vec<String> = headers
        .iter()
        .map(|h| patterns::normalize_label(h.as_ref()))
        .collect();

    synonyms.iter().find_map(|synonym| {
        let wanted = patterns::normalize_label(synonym.as_ref());
        labels.iter().position(|label| *label == wanted)
    })
}
