//! Section page collection.
//!
//! Ties the pieces together: every table in a section is normalized, its
//! title column located, and each title cell resolved to a page name. When a
//! section yields nothing from tables, the artist-page path falls back to a
//! flat scan over every link in the prose.

use std::collections::BTreeSet;

use crate::dom::{self, NodeRef};
use crate::extractor;
use crate::links;
use crate::patterns;
use crate::provider::SectionProvider;
use crate::table;
use crate::title_column;
use crate::{Error, Options, Result};

/// Deduplicated page names. Ordering is incidental.
pub type PageNames = BTreeSet<String>;

// =============================================================================
// HTML-level collection
// =============================================================================

/// Page names from every table in a section's HTML.
///
/// Tables under an excluded sub-heading (see `Options::excluded_subsections`)
/// and tables without a title column contribute nothing.
pub fn collect_from_html(html: &str, options: &Options) -> Result<PageNames> {
    let doc = dom::parse_fragment(html)?;
    let Some(root) = dom::document_root(&doc) else {
        return Ok(PageNames::new());
    };

    let tables = section_tables(&root, options);
    tracing::debug!(tables = tables.len(), "collecting from section tables");

    let mut names = PageNames::new();
    for table in &tables {
        names.extend(collect_from_table(table, options));
    }
    Ok(names)
}

/// Page names from one `<table>` element.
#[must_use]
pub fn collect_from_table(table: &NodeRef, options: &Options) -> Vec<String> {
    let model = table::normalize_table(table);
    let Some(index) = title_column::locate_title_column_with(&model.headers, &options.title_columns) else {
        tracing::debug!(headers = ?model.headers, "no title column, table skipped");
        return Vec::new();
    };

    let names = extractor::extract_page_names(model.column(index), options);
    tracing::debug!(
        column = index,
        rows = model.rows.len(),
        found = names.len(),
        "table processed"
    );
    names
}

/// Page names from every titled link in `html`, skipping broken links and
/// editorial markers (`edit`, `help page`, `citation needed`).
pub fn flat_scan(html: &str, options: &Options) -> Result<PageNames> {
    let doc = dom::parse_fragment(html)?;
    let Some(root) = dom::document_root(&doc) else {
        return Ok(PageNames::new());
    };

    let names: PageNames = links::titled_links(&root)
        .into_iter()
        .filter(|link| {
            let keep = !link.is_broken(options) && !link.is_special(options);
            if !keep {
                tracing::trace!(title = link.title(), "link rejected by flat scan");
            }
            keep
        })
        .map(|link| link.title().to_string())
        .collect();

    tracing::debug!(found = names.len(), "flat scan finished");
    Ok(names)
}

/// Tables of a section in document order, minus those under an excluded
/// sub-heading. An excluded heading also covers the deeper headings nested
/// under it.
fn section_tables<'a>(root: &NodeRef<'a>, options: &Options) -> Vec<NodeRef<'a>> {
    // Open headings as (level, normalized text), shallowest first.
    let mut open: Vec<(usize, String)> = Vec::new();
    let mut tables = Vec::new();

    for node in dom::preorder(root) {
        if let Some(level) = heading_level(&node) {
            while open.last().is_some_and(|(l, _)| *l >= level) {
                open.pop();
            }
            open.push((level, heading_text(&node)));
        } else if dom::is_tag(&node, "table") {
            match open.iter().find(|(_, h)| options.is_excluded_subsection(h)) {
                Some((_, h)) => {
                    tracing::debug!(heading = %h, "table under excluded sub-heading skipped");
                }
                None => tables.push(node),
            }
        }
    }
    tables
}

/// Level of an `h2`..`h6` heading.
fn heading_level(node: &NodeRef) -> Option<usize> {
    if !dom::is_any_tag(node, patterns::HEADING_TAGS) {
        return None;
    }
    dom::tag_name(node)?.strip_prefix('h')?.parse().ok()
}

/// Normalized heading text, preferring the headline span when present.
fn heading_text(heading: &NodeRef) -> String {
    let headline = dom::preorder(heading)
        .into_iter()
        .find(|n| dom::has_class(n, "mw-headline"));
    let raw = match headline {
        Some(span) => dom::rendered_text(&span),
        None => dom::rendered_text(heading),
    };
    patterns::normalize_heading(&raw)
}

// =============================================================================
// Provider-level collection
// =============================================================================

/// Page names from the tables of section `section_name` on `page_name`.
pub fn collect_section_pages<P>(provider: &P, page_name: &str, section_name: &str) -> Result<PageNames>
where
    P: SectionProvider + ?Sized,
{
    collect_section_pages_with_options(provider, page_name, section_name, &Options::default())
}

/// `collect_section_pages` with custom options.
pub fn collect_section_pages_with_options<P>(
    provider: &P,
    page_name: &str,
    section_name: &str,
    options: &Options,
) -> Result<PageNames>
where
    P: SectionProvider + ?Sized,
{
    tracing::debug!(page = page_name, section = section_name, "collecting section");
    let html = provider.get_section(page_name, section_name, false)?;
    collect_from_html(&html, options)
}

/// Page names from a dedicated discography page.
///
/// Each logical section (`albums`, `singles`) is looked up in the page's
/// section mapping and collected if present.
pub fn parse_discog_page<P>(provider: &P, page_name: &str) -> Result<PageNames>
where
    P: SectionProvider + ?Sized,
{
    parse_discog_page_with_options(provider, page_name, &Options::default())
}

/// `parse_discog_page` with custom options.
pub fn parse_discog_page_with_options<P>(provider: &P, page_name: &str, options: &Options) -> Result<PageNames>
where
    P: SectionProvider + ?Sized,
{
    let sections = provider.map_section_names(page_name)?;
    let mut names = PageNames::new();

    for logical in &options.section_names {
        match sections.get(logical) {
            Some(heading) => {
                names.extend(collect_section_pages_with_options(provider, page_name, heading, options)?);
            }
            None => tracing::debug!(page = page_name, section = %logical, "section not on page"),
        }
    }
    Ok(names)
}

/// Page names from the discography section of an artist page.
///
/// Tables in the section come first. If they yield nothing (or the page has
/// no such section), `discog_section` (the section's wiki markup) is
/// rendered and every acceptable link in it is taken.
pub fn parse_discog_section<P>(provider: &P, artist_page: &str, discog_section: &str) -> Result<PageNames>
where
    P: SectionProvider + ?Sized,
{
    parse_discog_section_with_options(provider, artist_page, discog_section, &Options::default())
}

/// `parse_discog_section` with custom options.
pub fn parse_discog_section_with_options<P>(
    provider: &P,
    artist_page: &str,
    discog_section: &str,
    options: &Options,
) -> Result<PageNames>
where
    P: SectionProvider + ?Sized,
{
    let from_tables = match collect_section_pages_with_options(provider, artist_page, &options.fallback_section, options) {
        Ok(names) => names,
        Err(Error::MissingSection { .. }) => PageNames::new(),
        Err(err) => return Err(err),
    };
    if !from_tables.is_empty() {
        return Ok(from_tables);
    }

    tracing::debug!(page = artist_page, "no table results, falling back to flat link scan");
    let html = provider.parse_text(discog_section, false)?;
    flat_scan(&html, options)
}

/// Page names for an artist.
///
/// With a dedicated discography page, that page alone is read; otherwise the
/// artist page's discography section is.
///
/// ```rust
/// use discog_pages::{parse_discog, MemoryProvider};
///
/// let provider = MemoryProvider::new().with_section(
///     "Artist",
///     "Discography",
///     r#"<table><tr><th>Title</th></tr><tr><td><i><a title="First (album)">First</a></i></td></tr></table>"#,
/// );
/// let names = parse_discog(&provider, "Artist", "", None)?;
/// assert!(names.contains("First (album)"));
/// # Ok::<(), discog_pages::Error>(())
/// ```
pub fn parse_discog<P>(
    provider: &P,
    artist_page: &str,
    discog_section: &str,
    discog_page: Option<&str>,
) -> Result<PageNames>
where
    P: SectionProvider + ?Sized,
{
    parse_discog_with_options(provider, artist_page, discog_section, discog_page, &Options::default())
}

/// `parse_discog` with custom options.
pub fn parse_discog_with_options<P>(
    provider: &P,
    artist_page: &str,
    discog_section: &str,
    discog_page: Option<&str>,
    options: &Options,
) -> Result<PageNames>
where
    P: SectionProvider + ?Sized,
{
    match discog_page.filter(|p| !p.trim().is_empty()) {
        Some(page) => parse_discog_page_with_options(provider, page, options),
        None => parse_discog_section_with_options(provider, artist_page, discog_section, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_skips_tables_without_title_column() {
        let html = r#"<table><tr><th>Year</th><th>Single</th></tr>
                      <tr><td>1990</td><td><a title="Hidden">Hidden</a></td></tr></table>"#;
        assert!(matches!(collect_from_html(html, &Options::default()), Ok(n) if n.is_empty()));
    }

    #[test]
    fn test_excluded_subsection() {
        let html = r#"
            <h3><span class="mw-headline">Studio albums</span><span class="mw-editsection">[<a title="Edit section">edit</a>]</span></h3>
            <table><tr><th>Title</th></tr><tr><td><i><a title="Kept">Kept</a></i></td></tr></table>
            <h3><span class="mw-headline">Video albums</span></h3>
            <table><tr><th>Title</th></tr><tr><td><i><a title="Dropped">Dropped</a></i></td></tr></table>
        "#;
        let names = collect_from_html(html, &Options::default());

        match names {
            Ok(names) => {
                assert!(names.contains("Kept"));
                assert!(!names.contains("Dropped"));
            }
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_heading_without_headline_span() {
        let html = r#"<h4>Video albums[edit]</h4>
            <table><tr><th>Title</th></tr><tr><td><a title="V">V</a></td></tr></table>"#;
        assert!(matches!(collect_from_html(html, &Options::default()), Ok(n) if n.is_empty()));
    }

    #[test]
    fn test_excluded_heading_covers_deeper_headings() {
        let html = r#"
            <h3><span class="mw-headline">Video albums</span></h3>
            <h4>Live releases</h4>
            <table><tr><th>Title</th></tr><tr><td><i><a title="Nested">Nested</a></i></td></tr></table>
            <h3>Compilation albums</h3>
            <table><tr><th>Title</th></tr><tr><td><i><a title="Collected">Collected</a></i></td></tr></table>
        "#;

        match collect_from_html(html, &Options::default()) {
            Ok(names) => assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Collected"]),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_heading_levels() {
        let Ok(doc) = dom::parse_fragment("<h2>a</h2><h5>b</h5><p>c</p>") else {
            panic!("parse failed");
        };
        let levels: Vec<Option<usize>> = ["h2", "h5", "p"]
            .iter()
            .map(|sel| doc.select(sel).nodes().first().and_then(heading_level))
            .collect();

        assert_eq!(levels, vec![Some(2), Some(5), None]);
    }

    #[test]
    fn test_flat_scan_filters() {
        let html = r#"<ul>
            <li><i><a title="Good (album)">Good</a></i> (1999)<sup><a title="Wikipedia:Citation needed">citation needed</a></sup></li>
            <li><a class="new" title="Missing (album)">Missing</a></li>
            <li><a title="Help:IPA">help page</a> <a title="Edit">edit</a></li>
            <li><a href="/wiki/Untitled">Untitled</a></li>
        </ul>"#;
        let names = flat_scan(html, &Options::default());

        match names {
            Ok(names) => assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Good (album)"]),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_parse_failure_propagates() {
        assert!(matches!(
            collect_from_html("<table>\0</table>", &Options::default()),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(flat_scan("\0", &Options::default()), Err(Error::ParseError(_))));
    }
}
