use crate::parser::{NodeExt, NodeRef};
use crate::utils::{Edge, NON_VISIBLE_ELEMENTS, Visit, normalize_text, walk};
use std::collections::HashMap;
use std::ops::Range;

/// Visible text nodes of a document in order, plus the range of them every
/// element covers.
///
/// [`NodeRef`] values cannot carry side-channel data, so the ranges live
/// in a map keyed by the node's address.  The index is built by a single
/// [`walk`] and is only meaningful while the indexed tree is alive.  Each
/// extraction builds its own.
///
/// # Examples
///
/// ```rust
/// use html_digest::parser::parse_html;
/// use html_digest::{NodeTextExt, TextIndex};
///
/// let doc = parse_html("<p> Hel<b>lo</b>\n world</p><script>x()</script>");
/// let index = TextIndex::build(&doc);
/// assert_eq!(index.document_text(), "Hel lo world");
/// let p = doc.select_first("p").unwrap();
/// assert_eq!(p.as_node().visible_text(&index), "Hello\n world");
/// ```
#[derive(Default, Debug, Clone)]
pub struct TextIndex {
    texts: Vec<String>,
    ranges: HashMap<usize, Range<usize>>,
}

/// Derive a stable key for a [`NodeRef`] by taking the address of the
/// inner `Node` value.
fn node_key(node: &NodeRef) -> usize {
    let ptr: *const _ = &**node;
    ptr as usize
}

impl TextIndex {
    /// Index the visible text under `root`.  Text inside `script`, `style`,
    /// `noscript` and `template` is left out, as are comments.
    pub fn build(root: &NodeRef) -> TextIndex {
        let mut texts: Vec<String> = vec![];
        let mut ranges = HashMap::new();
        let mut starts: Vec<usize> = vec![];
        walk(root, |edge| match edge {
            Edge::Open(node) => {
                if let Some(text) = node.as_text() {
                    texts.push(text.borrow().to_string());
                    return Visit::Skip;
                }
                match node.element_name() {
                    Some(name) if NON_VISIBLE_ELEMENTS.contains(name) => {
                        ranges.insert(node_key(node), texts.len()..texts.len());
                        Visit::Skip
                    }
                    Some(_) => {
                        starts.push(texts.len());
                        Visit::Descend
                    }
                    None => Visit::Descend,
                }
            }
            Edge::Close(node) => {
                if node.as_element().is_some() {
                    if let Some(start) = starts.pop() {
                        ranges.insert(node_key(node), start..texts.len());
                    }
                }
                Visit::Descend
            }
        });
        TextIndex { texts, ranges }
    }

    /// All indexed text: each text node whitespace-collapsed and trimmed,
    /// blank ones dropped, the rest joined by single spaces.
    pub fn document_text(&self) -> String {
        self.fragments().collect::<Vec<_>>().join(" ")
    }

    /// Number of text nodes in the index with visible content.
    pub fn fragment_count(&self) -> usize {
        self.fragments().count()
    }

    fn fragments(&self) -> impl Iterator<Item = String> + '_ {
        self.texts
            .iter()
            .map(|text| normalize_text(text))
            .filter(|fragment| !fragment.is_empty())
    }

    fn text_in(&self, node: &NodeRef) -> Option<String> {
        self.ranges
            .get(&node_key(node))
            .map(|range| self.texts[range.clone()].concat().trim().to_string())
    }
}

/// Extension trait that reads an element's visible text out of a
/// [`TextIndex`].
pub trait NodeTextExt {
    /// The element's visible text: its text nodes concatenated as they
    /// appear, trimmed at both ends.  Nodes the index has never seen are
    /// indexed on the spot.
    fn visible_text(&self, index: &TextIndex) -> String;
}

impl NodeTextExt for NodeRef {
    fn visible_text(&self, index: &TextIndex) -> String {
        match index.text_in(self) {
            Some(text) => text,
            None => TextIndex::build(self).text_in(self).unwrap_or_default(),
        }
    }
}
