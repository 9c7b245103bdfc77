//! Minimal view over a parsed HTML tree.
//!
//! The locator and extractor only need four capabilities from a node: its
//! tag name, its attributes, its element children and the text beneath it.
//! [`DomNode`] captures exactly that, so the comment logic stays independent
//! of the parsing library. Traversals are explicit worklists, never
//! recursion, because saved comment pages nest replies arbitrarily deep.

use scraper::node::Node;
use scraper::ElementRef;

use crate::normalizer::collapse_whitespace;

/// Elements whose text is never part of visible content.
const SKIPPED_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

pub trait DomNode<'a>: Copy {
    /// Lowercase tag name.
    fn tag_name(&self) -> &'a str;

    fn attr(&self, name: &str) -> Option<&'a str>;

    /// Element children in document order.
    fn child_elements(&self) -> Vec<Self>;

    /// Every visible text node beneath this node, in document order.
    fn text_fragments(&self) -> Vec<&'a str>;

    fn is_any_of(&self, tags: &[&str]) -> bool {
        tags.contains(&self.tag_name())
    }

    /// All element descendants in document (pre-)order, excluding `self`.
    fn descendant_elements(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.child_elements();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut children = node.child_elements();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Trimmed text fragments joined by single spaces, whitespace collapsed.
    fn text_content(&self) -> String {
        let joined = self
            .text_fragments()
            .into_iter()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        collapse_whitespace(&joined)
    }
}

enum Pending<'a> {
    Text(&'a str),
    Element(ElementRef<'a>),
}

impl<'a> DomNode<'a> for ElementRef<'a> {
    fn tag_name(&self) -> &'a str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn child_elements(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn text_fragments(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut stack = vec![Pending::Element(*self)];
        while let Some(pending) = stack.pop() {
            match pending {
                Pending::Text(text) => out.push(text),
                Pending::Element(element) => {
                    let mut children = Vec::new();
                    for child in element.children() {
                        match child.value() {
                            Node::Text(text) => children.push(Pending::Text(&**text)),
                            Node::Element(_) => {
                                if let Some(child) = ElementRef::wrap(child) {
                                    if !child.is_any_of(SKIPPED_TEXT_TAGS) {
                                        children.push(Pending::Element(child));
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    children.reverse();
                    stack.extend(children);
                }
            }
        }
        out
    }
}
