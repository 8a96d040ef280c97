//! # discog-pages
//!
//! Finds the release pages (albums, singles, EPs) that a wiki discography
//! section links to.
//!
//! Discography sections are mostly tables. Each table is normalized, its
//! title column found by header label, and every title cell reduced to the
//! one quoted, emphasized, or linked fragment that most likely names the
//! release. That fragment's link gives the page name. Sections without
//! usable tables fall back to a scan over all links in the prose.
//!
//! ## Quick Start
//!
//! ```rust
//! use discog_pages::{collect_from_html, Options};
//!
//! let html = r#"<table>
//!   <tr><th>Year</th><th>Title</th></tr>
//!   <tr><td>1998</td><td>"<a href="/wiki/Song" title="Song (song)">Song</a>" (remix)</td></tr>
//!   <tr><td>1999</td><td><i><a class="new" title="Lost (page does not exist)">Lost</a></i></td></tr>
//! </table>"#;
//!
//! let names = collect_from_html(html, &Options::default())?;
//! assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Song (song)"]);
//! # Ok::<(), discog_pages::Error>(())
//! ```
//!
//! Fetching pages and slicing them into sections is left to an implementation
//! of [`SectionProvider`]; [`parse_discog`] drives the whole lookup through it.

mod error;
mod options;
mod patterns;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Page links and broken/special link detection.
pub mod links;

/// Table normalization (header merging, span expansion, row alignment).
pub mod table;

/// Title column lookup by header synonym.
pub mod title_column;

/// Title cell candidate detection and page name resolution.
pub mod extractor;

/// Section-level collection and the discography entry points.
pub mod collector;

/// Section source abstraction.
pub mod provider;

// Public API - re-exports
pub use collector::{
    collect_from_html, collect_section_pages, collect_section_pages_with_options, flat_scan,
    parse_discog, parse_discog_page, parse_discog_page_with_options, parse_discog_section,
    parse_discog_section_with_options, parse_discog_with_options, PageNames,
};
pub use error::{Error, Result};
pub use extractor::{extract_album_element, resolve_to_page_name, Candidate, CandidateKind, CellOffset};
pub use options::Options;
pub use provider::{MemoryProvider, SectionProvider};
pub use table::{normalize_table, TableModel};
pub use title_column::{locate_title_column, locate_title_column_with};
