//! Compiled regex patterns and label constants.
//!
//! Patterns are compiled once on first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Label Constants
// =============================================================================

/// Logical sections of a dedicated discography page.
pub const SECTION_NAMES: &[&str] = &["albums", "singles"];

/// Sub-headings whose tables never name releases.
pub const SUB_SECTIONS_EXCLUDE: &[&str] = &["video albums"];

/// Title column header synonyms, highest priority first.
pub const TITLE_COLUMNS: &[&str] = &["title", "song", "album details", "single/ep"];

/// Anchor texts of editorial and meta links.
pub const SPECIAL_MARKERS: &[&str] = &["edit", "help page", "citation needed"];

/// Class the wiki puts on links to pages that do not exist.
pub const BROKEN_LINK_CLASS: &str = "new";

/// Suffix the wiki appends to the `title` of a red link.
pub const NONEXISTENT_TITLE_SUFFIX: &str = " (page does not exist)";

/// Heading of the discography section on an artist page.
pub const DISCOGRAPHY_SECTION: &str = "Discography";

/// Tags treated as emphasis when looking for a title.
pub const EMPHASIS_TAGS: &[&str] = &["i", "b", "em", "strong"];

/// Heading tags that can introduce a sub-section.
pub const HEADING_TAGS: &[&str] = &["h2", "h3", "h4", "h5", "h6"];

// =============================================================================
// Text Cleanup Patterns
// =============================================================================

/// Footnote markers inside header labels: `[1]`, `[a]`, `[note 2]`.
pub static FOOTNOTE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*(?:note\s+)?[0-9a-z]{1,3}\s*\]").expect("FOOTNOTE_MARKER regex")
});

/// Trailing edit-section link text on headings: `[edit]`, `[ edit | edit source ]`.
pub static EDIT_SECTION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\[\s*edit(?:\s*\|\s*edit source)?\s*\]\s*$").expect("EDIT_SECTION_SUFFIX regex")
});

/// Runs of whitespace, collapsed to a single space in labels.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Normalizes a header label or heading: collapses whitespace, lowercases,
/// trims, and drops footnote markers.
#[must_use]
pub fn normalize_label(text: &str) -> String {
    let lower = text.to_lowercase();
    let without_notes = FOOTNOTE_MARKER.replace_all(&lower, "");
    WHITESPACE_RUN
        .replace_all(&without_notes, " ")
        .trim()
        .to_string()
}

/// Normalizes a section heading: `normalize_label` after removing an
/// `[edit]` suffix.
#[must_use]
pub fn normalize_heading(text: &str) -> String {
    let stripped = EDIT_SECTION_SUFFIX.replace(text, "");
    normalize_label(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Title "), "title");
        assert_eq!(normalize_label("Album\n  details"), "album details");
        assert_eq!(normalize_label("Single/EP"), "single/ep");
        assert_eq!(normalize_label("Title[1]"), "title");
        assert_eq!(normalize_label("Certifications [note 3]"), "certifications");
    }

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading("Video albums[edit]"), "video albums");
        assert_eq!(normalize_heading("Studio albums [ edit | edit source ]"), "studio albums");
        assert_eq!(normalize_heading("Singles"), "singles");
    }

    #[test]
    fn test_footnote_marker_keeps_long_brackets() {
        assert_eq!(normalize_label("Peak [chart] positions"), "peak [chart] positions");
    }
}
