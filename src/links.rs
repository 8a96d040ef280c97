//! Page links.
//!
//! A `Link` is an anchor carrying a non-empty `title` attribute; the title is
//! the canonical page name. Links are classified as broken (the page does not
//! exist) or special (editorial furniture such as `[edit]`), and both kinds
//! are rejected by the collectors.

use std::sync::LazyLock;

use url::Url;

use crate::dom::{self, NodeRef};
use crate::patterns;
use crate::Options;

/// Base used to resolve the relative hrefs the wiki renders.
static WIKI_BASE: LazyLock<Option<Url>> = LazyLock::new(|| Url::parse("https://wiki.invalid/").ok());

/// An anchor element with a page title.
#[derive(Clone)]
pub struct Link<'a> {
    node: NodeRef<'a>,
    title: String,
}

impl<'a> Link<'a> {
    /// Views `node` as a link if it is an `<a>` with a non-blank `title`.
    #[must_use]
    pub fn from_node(node: &NodeRef<'a>) -> Option<Self> {
        if !dom::is_tag(node, "a") {
            return None;
        }
        let title = dom::get_attribute(node, "title")?;
        if title.trim().is_empty() {
            return None;
        }
        Some(Self { node: *node, title })
    }

    /// The page name this link points at.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Visible text, trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        dom::text_content(&self.node).trim().to_string()
    }

    /// True if the link points at a page that does not exist.
    ///
    /// The wiki marks these three ways: the broken-link class, an
    /// `action=edit` href with `redlink=1`, and a `(page does not exist)`
    /// title suffix. Any one is enough.
    #[must_use]
    pub fn is_broken(&self, options: &Options) -> bool {
        dom::has_class(&self.node, &options.broken_link_class)
            || self.title.ends_with(patterns::NONEXISTENT_TITLE_SUFFIX)
            || dom::get_attribute(&self.node, "href").is_some_and(|href| is_redlink_href(&href))
    }

    /// True if the visible text is an editorial marker.
    #[must_use]
    pub fn is_special(&self, options: &Options) -> bool {
        options.is_special_marker(&self.text())
    }
}

/// True if `href` is an edit link for a missing page
/// (`/w/index.php?title=X&action=edit&redlink=1`).
#[must_use]
pub fn is_redlink_href(href: &str) -> bool {
    let Some(base) = WIKI_BASE.as_ref() else {
        return false;
    };
    let Ok(url) = base.join(href) else {
        return false;
    };
    let mut edit = false;
    let mut redlink = false;
    for (key, value) in url.query_pairs() {
        match (key.as_ref(), value.as_ref()) {
            ("action", "edit") => edit = true,
            ("redlink", "1") => redlink = true,
            _ => {}
        }
    }
    edit && redlink
}

/// First link at or below `root`, in document order.
#[must_use]
pub fn find_titled_link<'a>(root: &NodeRef<'a>) -> Option<Link<'a>> {
    dom::preorder(root).iter().find_map(Link::from_node)
}

/// All links at or below `root`, in document order.
#[must_use]
pub fn titled_links<'a>(root: &NodeRef<'a>) -> Vec<Link<'a>> {
    dom::preorder(root).iter().filter_map(Link::from_node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn with_link<F: FnOnce(Option<Link<'_>>)>(html: &str, check: F) {
        let Ok(doc) = parse_fragment(html) else {
            panic!("parse failed");
        };
        let node = doc.select("a").nodes().first().copied();
        check(node.and_then(|n| Link::from_node(&n)));
    }

    #[test]
    fn test_link_requires_title() {
        with_link(r#"<a href="/wiki/X">X</a>"#, |link| assert!(link.is_none()));
        with_link(r#"<a title="  ">X</a>"#, |link| assert!(link.is_none()));
        with_link(r#"<a title="X (album)">X</a>"#, |link| {
            assert_eq!(link.map(|l| l.title().to_string()), Some("X (album)".to_string()));
        });
    }

    #[test]
    fn test_broken_by_class() {
        let opts = Options::default();
        with_link(r#"<a class="new" title="Lost">Lost</a>"#, |link| {
            assert!(link.is_some_and(|l| l.is_broken(&opts)));
        });
    }

    #[test]
    fn test_broken_by_href() {
        let opts = Options::default();
        with_link(
            r#"<a href="/w/index.php?title=Lost&amp;action=edit&amp;redlink=1" title="Lost">Lost</a>"#,
            |link| assert!(link.is_some_and(|l| l.is_broken(&opts))),
        );
    }

    #[test]
    fn test_broken_by_title_suffix() {
        let opts = Options::default();
        with_link(r#"<a title="Lost (page does not exist)">Lost</a>"#, |link| {
            assert!(link.is_some_and(|l| l.is_broken(&opts)));
        });
    }

    #[test]
    fn test_ordinary_link_not_broken() {
        let opts = Options::default();
        with_link(r#"<a href="/wiki/Found" class="mw-redirect" title="Found">Found</a>"#, |link| {
            assert!(link.is_some_and(|l| !l.is_broken(&opts)));
        });
    }

    #[test]
    fn test_redlink_href() {
        assert!(is_redlink_href("/w/index.php?title=A&action=edit&redlink=1"));
        assert!(!is_redlink_href("/w/index.php?title=A&action=edit"));
        assert!(!is_redlink_href("/wiki/A"));
        assert!(!is_redlink_href("/wiki/A?redlink=1"));
        assert!(is_redlink_href("https://en.wikipedia.org/w/index.php?redlink=1&title=A&action=edit"));
    }

    #[test]
    fn test_redlink_query_without_edit_is_not_broken() {
        let opts = Options::default();
        with_link(r#"<a href="/wiki/Foo?redlink=1" title="Foo">Foo</a>"#, |link| {
            assert!(link.is_some_and(|l| !l.is_broken(&opts)));
        });
    }

    #[test]
    fn test_special_markers() {
        let opts = Options::default();
        with_link(r#"<a title="Wikipedia:Citation needed"> citation needed </a>"#, |link| {
            assert!(link.is_some_and(|l| l.is_special(&opts)));
        });
        with_link(r#"<a title="Edith (album)">Edith</a>"#, |link| {
            assert!(link.is_some_and(|l| !l.is_special(&opts)));
        });
    }
}
