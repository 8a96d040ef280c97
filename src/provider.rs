//! Section source access.
//!
//! Fetching articles, slicing them into sections and rendering wiki markup
//! happen outside this crate. The collectors talk to that layer through
//! `SectionProvider`; `MemoryProvider` serves canned HTML for tests and
//! offline use.

use std::collections::HashMap;

use crate::{Error, Result};

/// Supplies rendered section HTML for wiki pages.
pub trait SectionProvider {
    /// Rendered HTML of one section of one page.
    ///
    /// `expand_templates` asks the provider to expand templates before
    /// rendering; the collectors always pass `false`.
    fn get_section(&self, page_name: &str, section_name: &str, expand_templates: bool) -> Result<String>;

    /// Lowercase section name to on-page heading, for every section of a page.
    fn map_section_names(&self, page_name: &str) -> Result<HashMap<String, String>>;

    /// Render a fragment of wiki markup to HTML.
    fn parse_text(&self, markup: &str, expand_templates: bool) -> Result<String>;
}

impl<P: SectionProvider + ?Sized> SectionProvider for &P {
    fn get_section(&self, page_name: &str, section_name: &str, expand_templates: bool) -> Result<String> {
        (**self).get_section(page_name, section_name, expand_templates)
    }

    fn map_section_names(&self, page_name: &str) -> Result<HashMap<String, String>> {
        (**self).map_section_names(page_name)
    }

    fn parse_text(&self, markup: &str, expand_templates: bool) -> Result<String> {
        (**self).parse_text(markup, expand_templates)
    }
}

/// In-memory provider keyed by page and section heading.
///
/// `parse_text` returns the registered rendering of a markup fragment, or the
/// fragment itself when none is registered (treating it as already-rendered
/// HTML).
///
/// ```rust
/// use discog_pages::{MemoryProvider, SectionProvider};
///
/// let provider = MemoryProvider::new()
///     .with_section("Artist discography", "Studio albums", "<table></table>");
/// let names = provider.map_section_names("Artist discography")?;
/// assert_eq!(names.get("studio albums").map(String::as_str), Some("Studio albums"));
/// # Ok::<(), discog_pages::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    sections: HashMap<String, Vec<(String, String)>>,
    rendered: HashMap<String, String>,
}

impl MemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the HTML of section `heading` on `page`. Re-registering a
    /// heading replaces its HTML.
    #[must_use]
    pub fn with_section(mut self, page: &str, heading: &str, html: &str) -> Self {
        let sections = self.sections.entry(page.to_string()).or_default();
        match sections.iter_mut().find(|(h, _)| h == heading) {
            Some(entry) => entry.1 = html.to_string(),
            None => sections.push((heading.to_string(), html.to_string())),
        }
        self
    }

    /// Registers the rendering of a markup fragment.
    #[must_use]
    pub fn with_rendered(mut self, markup: &str, html: &str) -> Self {
        self.rendered.insert(markup.to_string(), html.to_string());
        self
    }
}

impl SectionProvider for MemoryProvider {
    fn get_section(&self, page_name: &str, section_name: &str, _expand_templates: bool) -> Result<String> {
        self.sections
            .get(page_name)
            .and_then(|sections| sections.iter().find(|(h, _)| h == section_name))
            .map(|(_, html)| html.clone())
            .ok_or_else(|| Error::MissingSection {
                page: page_name.to_string(),
                section: section_name.to_string(),
            })
    }

    fn map_section_names(&self, page_name: &str) -> Result<HashMap<String, String>> {
        Ok(self
            .sections
            .get(page_name)
            .map(|sections| {
                sections
                    .iter()
                    .map(|(heading, _)| (heading.to_lowercase(), heading.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn parse_text(&self, markup: &str, _expand_templates: bool) -> Result<String> {
        Ok(self
            .rendered
            .get(markup)
            .cloned()
            .unwrap_or_else(|| markup.to_string()))
    }
}
