//! Configuration options for page-name collection.
//!
//! The `Options` struct holds the label lists the heuristics match against.
//! Defaults reproduce the English-language wiki conventions.

use serde::Deserialize;

use crate::patterns;
use crate::Result;

/// Configuration options for page-name collection.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use discog_pages::Options;
///
/// let options = Options {
///     section_names: vec!["albums".to_string(), "extended plays".to_string()],
///     ..Options::default()
/// };
/// assert_eq!(options.broken_link_class, "new");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Logical section names collected from a dedicated discography page.
    ///
    /// Matched against the lowercase keys of the provider's section mapping.
    ///
    /// Default: `["albums", "singles"]`
    pub section_names: Vec<String>,

    /// Sub-headings whose tables are skipped.
    ///
    /// Compared against the normalized heading text (lowercase, `[edit]`
    /// removed).
    ///
    /// Default: `["video albums"]`
    pub excluded_subsections: Vec<String>,

    /// Header labels that identify the title column, in priority order.
    ///
    /// Default: `["title", "song", "album details", "single/ep"]`
    pub title_columns: Vec<String>,

    /// Anchor texts that mark editorial links rather than releases.
    ///
    /// Default: `["edit", "help page", "citation needed"]`
    pub special_markers: Vec<String>,

    /// Class attribute value marking a link to a nonexistent page.
    ///
    /// Default: `"new"`
    pub broken_link_class: String,

    /// Section heading read by the artist-page path before falling back to
    /// a flat link scan.
    ///
    /// Default: `"Discography"`
    pub fallback_section: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            section_names: to_owned_list(patterns::SECTION_NAMES),
            excluded_subsections: to_owned_list(patterns::SUB_SECTIONS_EXCLUDE),
            title_columns: to_owned_list(patterns::TITLE_COLUMNS),
            special_markers: to_owned_list(patterns::SPECIAL_MARKERS),
            broken_link_class: patterns::BROKEN_LINK_CLASS.to_string(),
            fallback_section: patterns::DISCOGRAPHY_SECTION.to_string(),
        }
    }
}

impl Options {
    /// Loads options from a JSON object. Missing fields keep their defaults.
    ///
    /// ```rust
    /// use discog_pages::Options;
    ///
    /// let options = Options::from_json(r#"{"broken_link_class": "redlink"}"#)?;
    /// assert_eq!(options.broken_link_class, "redlink");
    /// assert_eq!(options.title_columns[0], "title");
    /// # Ok::<(), discog_pages::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True if `heading` (already normalized) is an excluded sub-section.
    #[must_use]
    pub fn is_excluded_subsection(&self, heading: &str) -> bool {
        self.excluded_subsections.iter().any(|h| h == heading)
    }

    /// True if `text` is one of the special marker texts.
    #[must_use]
    pub fn is_special_marker(&self, text: &str) -> bool {
        self.special_markers.iter().any(|m| m == text)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
