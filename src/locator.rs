use std::fmt;

use crate::dom::DomNode;
use crate::profile::contains_profile_link;

/// Minimum list items, and minimum items carrying a profile link, for a
/// subtree to count as a comment thread.
pub const MIN_THREAD_ITEMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    /// A `ul` qualified.
    List,
    /// No `ul` qualified but a `div` did.
    Container,
    /// Nothing qualified; the whole document is used.
    DocumentFallback,
}

impl fmt::Display for LocateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateStrategy::List => f.write_str("list"),
            LocateStrategy::Container => f.write_str("container"),
            LocateStrategy::DocumentFallback => f.write_str("document fallback"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommentSection<N> {
    pub root: N,
    pub strategy: LocateStrategy,
}

/// Finds the subtree most likely to hold the comment thread.
///
/// The first `ul` in document order that qualifies wins; failing that the
/// first qualifying `div`; failing that `document` itself. Never fails.
pub fn locate_comment_section<'a, N: DomNode<'a>>(document: N) -> CommentSection<N> {
    let mut elements = vec![document];
    elements.extend(document.descendant_elements());

    if let Some(root) = elements.iter().copied().find(|el| el.tag_name() == "ul" && qualifies(el)) {
        return CommentSection {
            root,
            strategy: LocateStrategy::List,
        };
    }
    if let Some(root) = elements.iter().copied().find(|el| el.tag_name() == "div" && qualifies(el)) {
        return CommentSection {
            root,
            strategy: LocateStrategy::Container,
        };
    }

    log::warn!("No comment thread container found; falling back to the whole document");
    CommentSection {
        root: document,
        strategy: LocateStrategy::DocumentFallback,
    }
}

fn qualifies<'a, N: DomNode<'a>>(node: &N) -> bool {
    let items: Vec<N> = node
        .descendant_elements()
        .into_iter()
        .filter(|el| el.tag_name() == "li")
        .collect();
    if items.len() < MIN_THREAD_ITEMS {
        return false;
    }
    let with_profile = items.iter().filter(|item| contains_profile_link(*item)).count();
    with_profile >= MIN_THREAD_ITEMS
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn li(handle: &str) -> String {
        format!(r#"<li><a href="/{handle}/">{handle}</a> oi</li>"#)
    }

    #[test]
    fn picks_first_qualifying_list() {
        let body = format!(
            r#"<ul id="nav"><li><a href="/explore/">x</a></li></ul>
               <ul id="short">{}{}</ul>
               <ul id="thread">{}{}{}</ul>"#,
            li("a"),
            li("b"),
            li("c"),
            li("d"),
            li("e"),
        );
        let html = Html::parse_document(&body);
        let section = locate_comment_section(html.root_element());
        assert_eq!(section.strategy, LocateStrategy::List);
        assert_eq!(section.root.attr("id"), Some("thread"));
    }

    #[test]
    fn platform_links_do_not_count_as_profiles() {
        let body = r#"<ul><li><a href="/explore/">e</a></li><li><a href="/reel/">r</a></li>
                      <li><a href="/stories/">s</a></li></ul>"#;
        let html = Html::parse_document(body);
        let section = locate_comment_section(html.root_element());
        assert_eq!(section.strategy, LocateStrategy::DocumentFallback);
    }

    #[test]
    fn falls_back_to_container_when_no_list_qualifies() {
        // Items without a ul wrapper: html5ever keeps stray li elements.
        let body = format!(r#"<div id="outer"><div id="c">{}{}{}</div></div>"#, li("a"), li("b"), li("c"));
        let html = Html::parse_document(&body);
        let section = locate_comment_section(html.root_element());
        assert_eq!(section.strategy, LocateStrategy::Container);
        assert_eq!(section.root.attr("id"), Some("outer"));
    }

    #[test]
    fn falls_back_to_document() {
        let html = Html::parse_document("<p>no comments here</p>");
        let section = locate_comment_section(html.root_element());
        assert_eq!(section.strategy, LocateStrategy::DocumentFallback);
        assert_eq!(section.root.tag_name(), "html");
    }
}
