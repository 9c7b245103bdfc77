use regex::Regex;
use std::sync::LazyLock;

use crate::dom::DomNode;

static PROFILE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([A-Za-z0-9._]+)/?$").expect("valid profile path regex"));

/// First path segments that look like handles but are platform pages.
pub const NON_PROFILE_SEGMENTS: &[&str] = &["explore", "reel", "p", "stories"];

/// Returns the handle if `href` is a single-segment profile path such as
/// `/maria.fernanda/`.
pub fn handle_from_href(href: &str) -> Option<&str> {
    let caps = PROFILE_PATH_RE.captures(href.trim())?;
    let handle = caps.get(1)?.as_str();
    if NON_PROFILE_SEGMENTS.contains(&handle) {
        return None;
    }
    Some(handle)
}

pub fn is_profile_link<'a, N: DomNode<'a>>(node: &N) -> bool {
    node.tag_name() == "a" && node.attr("href").and_then(handle_from_href).is_some()
}

/// Handle of the first profile link beneath `node`, in document order.
pub fn first_profile_handle<'a, N: DomNode<'a>>(node: &N) -> Option<&'a str> {
    node.descendant_elements()
        .into_iter()
        .filter(|el| el.tag_name() == "a")
        .find_map(|el| el.attr("href").and_then(handle_from_href))
}

/// True when any descendant of `node` is a profile link.
pub fn contains_profile_link<'a, N: DomNode<'a>>(node: &N) -> bool {
    node.descendant_elements().iter().any(|el| is_profile_link(el))
}
