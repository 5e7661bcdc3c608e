use crate::models::TextBlock;
use crate::node_ext::{NodeTextExt, TextIndex};
use crate::parser::{NodeExt, NodeRef};

/// Turn `<div>` or `<span>` elements into [`TextBlock`]s, dropping the ones
/// without visible text.
pub fn extract_text_blocks(nodes: &[NodeRef], text_index: &TextIndex) -> Vec<TextBlock> {
    nodes
        .iter()
        .filter_map(|node| {
            let text = node.visible_text(text_index);
            if text.is_empty() {
                return None;
            }
            Some(TextBlock {
                class: node.class_tokens(),
                text,
            })
        })
        .collect()
}
