use crate::parser::{NodeExt, NodeRef};

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Elements whose text never reaches the rendered page.
pub static NON_VISIBLE_ELEMENTS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["script", "style", "noscript", "template"]));

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// One step of a depth-first walk.  `Open` fires before a node's children,
/// `Close` after them.
pub enum Edge<'a> {
    Open(&'a NodeRef),
    Close(&'a NodeRef),
}

/// What a [`walk`] visitor wants after seeing an [`Edge::Open`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Visit the children, then emit [`Edge::Close`].
    Descend,
    /// Skip the children and the matching [`Edge::Close`].
    Skip,
}

enum Step {
    Open(NodeRef),
    Close(NodeRef),
}

/// Walk the subtree rooted at `root` (included) in document order, pre-order
/// on [`Edge::Open`] and post-order on [`Edge::Close`].
///
/// The walk keeps its own work list instead of recursing, so tree depth is
/// bounded by heap, not by the native stack.  The return value of the
/// visitor for a `Close` edge is ignored.
///
/// # Examples
///
/// ```rust
/// use html_digest::parser::{parse_html, NodeExt};
/// use html_digest::shared_utils::{walk, Edge, Visit};
///
/// let doc = parse_html("<div><p>a</p><p>b</p></div>");
/// let mut opened = vec![];
/// walk(&doc, |edge| {
///     if let Edge::Open(node) = edge {
///         if let Some(name) = node.element_name() {
///             opened.push(name.to_string());
///         }
///     }
///     Visit::Descend
/// });
/// assert_eq!(opened, ["html", "head", "body", "div", "p", "p"]);
/// ```
pub fn walk<F>(root: &NodeRef, mut visitor: F)
where
    F: FnMut(Edge<'_>) -> Visit,
{
    let mut work = vec![Step::Open(root.clone())];
    while let Some(step) = work.pop() {
        match step {
            Step::Open(node) => {
                if visitor(Edge::Open(&node)) == Visit::Skip {
                    continue;
                }
                let children = node.children().rev().map(Step::Open).collect::<Vec<_>>();
                work.push(Step::Close(node));
                work.extend(children);
            }
            Step::Close(node) => {
                visitor(Edge::Close(&node));
            }
        }
    }
}

/// Return every descendant element of `node` (excluding `node` itself) for
/// which `predicate` holds, in document order.
pub fn select_descendants_by<F>(node: &NodeRef, predicate: F) -> Vec<NodeRef>
where
    F: Fn(&NodeRef) -> bool,
{
    let mut found = vec![];
    walk(node, |edge| {
        if let Edge::Open(n) = edge {
            if n != node && n.as_element().is_some() && predicate(n) {
                found.push(n.clone());
            }
        }
        Visit::Descend
    });
    found
}

/// Return every descendant element of `node` whose tag is `tag_name`, in
/// document order.
pub fn select_descendants(node: &NodeRef, tag_name: &str) -> Vec<NodeRef> {
    select_descendants_by(node, |n| n.is_element(tag_name))
}

/// Collapse every whitespace run in `src` into a single ASCII space and trim
/// the ends.
///
/// # Examples
///
/// ```rust
/// use html_digest::shared_utils::normalize_text;
///
/// assert_eq!(normalize_text("  a \n\t b  "), "a b");
/// assert_eq!(normalize_text(" \n "), "");
/// ```
pub fn normalize_text(src: &str) -> String {
    WHITESPACE_RUN.replace_all(src, " ").trim().to_string()
}

/// Resolve a `<base href>` value against the document URI.  If
/// `base_path` is empty the document URI is returned unchanged.
pub fn resolve_base_uri(doc_uri: &str, base_path: &str) -> String {
    if base_path.is_empty() {
        return doc_uri.to_string();
    }
    if let Ok(parsed_url) = url::Url::parse(doc_uri) {
        if let Ok(base) = parsed_url.join(base_path) {
            return base.to_string();
        }
    }
    base_path.to_string()
}

/// Convert a potentially-relative URI to an absolute one using the
/// document URI and an optional `<base href>` path.  Bare hash links
/// (`#…`) are left alone when they point into the same document, and so
/// are values that cannot be joined.
pub fn to_absolute_uri(uri: &str, doc_uri: &str, base_path: &str) -> String {
    let uri = uri.trim();
    if let Ok(parsed) = url::Url::parse(uri) {
        return parsed.into();
    }
    let base_uri = resolve_base_uri(doc_uri, base_path);
    if base_uri == doc_uri && uri.starts_with('#') {
        return String::from(uri);
    }

    if let Ok(parsed_url) = url::Url::parse(base_uri.as_str()) {
        if let Ok(joined) = parsed_url.join(uri) {
            return joined.into();
        }
    }

    uri.to_string()
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_html;
    use crate::utils::*;

    fn open_names(html: &str, skip: &str) -> Vec<String> {
        let doc = parse_html(html);
        let mut names = vec![];
        walk(&doc, |edge| match edge {
            Edge::Open(n) => {
                if let Some(name) = n.element_name() {
                    names.push(format!("+{}", name));
                    if name == skip {
                        return Visit::Skip;
                    }
                }
                Visit::Descend
            }
            Edge::Close(n) => {
                if let Some(name) = n.element_name() {
                    names.push(format!("-{}", name));
                }
                Visit::Descend
            }
        });
        names
    }

    #[test]
    fn walk_emits_open_and_close_in_document_order() {
        let names = open_names("<div><p>a</p><span>b</span></div>", "");
        let body = names
            .iter()
            .skip_while(|n| *n != "+div")
            .take(6)
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(body, vec!["+div", "+p", "-p", "+span", "-span", "-div"]);
    }

    #[test]
    fn walk_skip_hides_children_and_close() {
        let names = open_names("<div><p>a</p></div><span>b</span>", "div");
        assert!(names.contains(&"+div".to_string()));
        assert!(!names.contains(&"+p".to_string()));
        assert!(!names.contains(&"-div".to_string()));
        assert!(names.contains(&"+span".to_string()));
    }

    #[test]
    fn select_descendants_excludes_root_and_keeps_order() {
        let doc = parse_html("<div id=\"outer\"><div id=\"a\"><div id=\"b\"></div></div><div id=\"c\"></div></div>");
        let outer = doc.select_first("#outer").unwrap().as_node().clone();
        let ids = select_descendants(&outer, "div")
            .iter()
            .map(|n| n.attr_value("id").unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn walk_survives_deep_nesting() {
        let depth = 10_000;
        let html = format!("{}leaf{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let doc = parse_html(&html);
        assert_eq!(select_descendants(&doc, "div").len(), depth);
    }

    #[test]
    fn normalize_text_collapses_unicode_whitespace() {
        assert_eq!(normalize_text("a\u{a0}\u{2003} b"), "a b");
        assert_eq!(normalize_text("x"), "x");
    }

    #[test]
    fn test_resolve_url_with_normal_base_and_relative_starting_with_slash() {
        let url = to_absolute_uri("/page.html", "http://fakehost/test/index.html", "");
        assert_eq!(url, "http://fakehost/page.html");
    }

    #[test]
    fn test_resolve_url_with_base_href() {
        let url = to_absolute_uri("page.html", "http://fakehost/test/index.html", "/docs/");
        assert_eq!(url, "http://fakehost/docs/page.html");
    }

    #[test]
    fn test_resolve_url_with_full_url() {
        let url = to_absolute_uri(
            "https://other.example/a?b=1",
            "http://fakehost/test/index.html",
            "",
        );
        assert_eq!(url, "https://other.example/a?b=1");
    }

    #[test]
    fn hash_links_into_same_document_stay_relative() {
        assert_eq!(
            to_absolute_uri("#top", "http://fakehost/test/index.html", ""),
            "#top"
        );
    }
}
