//! Error types for discog-pages.
//!
//! Heuristic failures (no title column, unresolvable cells, rejected links)
//! are never errors; they contribute zero page names. Only the cases below
//! reach the caller.

/// Error type for page-name collection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML could not be turned into a tree.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// A section provider failed to deliver markup or a section mapping.
    #[error("Section provider failed: {0}")]
    Provider(String),

    /// A section provider has no section of that name for the page.
    #[error("Section '{section}' not found on page '{page}'")]
    MissingSection {
        /// Page that was queried.
        page: String,
        /// Section heading that was requested.
        section: String,
    },

    /// Configuration could not be loaded.
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Result type alias for collection operations.
pub type Result<T> = std::result::Result<T, Error>;
