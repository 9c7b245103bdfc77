use aho_corasick::{AhoCorasick, AhoCorasickBuilder, BuildError};

use crate::dom::DomNode;
use crate::models::CommentCandidate;
use crate::profile::{contains_profile_link, first_profile_handle};

/// Text markers of UI affordances ("X liked this", "see more", ...). A node
/// containing any of them is not a comment body.
pub const NOISE_MARKERS: &[&str] = &["curtiu", "respondeu", "ver mais", "like"];

/// Elements that may hold a single comment.
const ITEM_TAGS: &[&str] = &["li", "div"];
/// Elements that may wrap a list of replies.
const WRAPPER_TAGS: &[&str] = &["ul", "div"];

const HANDLE_SEPARATORS: &[char] = &[' ', ':', '\t', '\n'];

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub candidates: Vec<CommentCandidate>,
    pub seeds: usize,
    pub nodes_examined: usize,
}

pub struct CommentExtractor {
    noise: AhoCorasick,
}

impl CommentExtractor {
    pub fn new() -> Self {
        Self::with_noise_markers(NOISE_MARKERS).expect("built-in noise markers are valid patterns")
    }

    pub fn with_noise_markers(markers: &[&str]) -> Result<Self, BuildError> {
        let noise = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(markers)?;
        Ok(Self { noise })
    }

    /// Walks the comment section and returns one candidate per node that
    /// carries both an author handle and body text.
    pub fn extract<'a, N: DomNode<'a>>(&self, section: N) -> Extraction {
        let seeds: Vec<N> = section
            .descendant_elements()
            .into_iter()
            .filter(|el| el.is_any_of(ITEM_TAGS) && contains_profile_link(el))
            .collect();

        let mut extraction = Extraction {
            seeds: seeds.len(),
            ..Default::default()
        };
        for seed in seeds {
            for node in reply_nodes(seed) {
                extraction.nodes_examined += 1;
                if let Some(candidate) = self.extract_node(&node) {
                    extraction.candidates.push(candidate);
                }
            }
        }
        extraction
    }

    /// Handle and body of a single node, if it is a comment.
    pub fn extract_node<'a, N: DomNode<'a>>(&self, node: &N) -> Option<CommentCandidate> {
        let text = node.text_content();
        // Noise check runs before handle stripping.
        if self.is_noise(&text) {
            return None;
        }
        let handle = first_profile_handle(node)?;
        let body = strip_leading_handle(&text, handle);
        if handle.is_empty() || body.is_empty() {
            return None;
        }
        Some(CommentCandidate {
            handle: handle.to_string(),
            raw_text: body.to_string(),
        })
    }

    pub fn is_noise(&self, text: &str) -> bool {
        self.noise.is_match(&text.to_lowercase())
    }
}

impl Default for CommentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// `seed` followed by every nested reply item, flattened in document order.
///
/// Replies sit as `li`/`div` children of `ul`/`div` wrappers that are
/// themselves direct children of the comment item.
pub fn reply_nodes<'a, N: DomNode<'a>>(seed: N) -> Vec<N> {
    let mut out = Vec::new();
    let mut stack = vec![seed];
    while let Some(node) = stack.pop() {
        out.push(node);
        let mut replies: Vec<N> = node
            .child_elements()
            .into_iter()
            .filter(|child| child.is_any_of(WRAPPER_TAGS))
            .flat_map(|wrapper| wrapper.child_elements())
            .filter(|item| item.is_any_of(ITEM_TAGS))
            .collect();
        replies.reverse();
        stack.extend(replies);
    }
    out
}

/// Removes a case-insensitive leading `handle` plus the separators around
/// the remaining body. Text that does not start with the handle is returned
/// untouched.
pub fn strip_leading_handle<'t>(text: &'t str, handle: &str) -> &'t str {
    let n = handle.len();
    match text.get(..n) {
        Some(prefix) if prefix.eq_ignore_ascii_case(handle) => {
            text[n..].trim_matches(HANDLE_SEPARATORS)
        }
        _ => text,
    }
}
