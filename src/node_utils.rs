use crate::parser::NodeRef;

/// Element-level accessors implemented on [`NodeRef`].
///
/// This trait is in scope when you import from [`crate::parser`].
pub trait NodeExt {
    /// Return the local tag name of this node if it is an element (e.g.
    /// `"div"`, `"td"`), or `None` for text / comment / document nodes.
    fn element_name(&self) -> Option<&str>;

    /// Return `true` if this node is an element with the given local name.
    fn is_element(&self, name: &str) -> bool;

    /// Look up an attribute by name and return its value, or `None` if the
    /// attribute is absent or this is not an element node.
    fn attr_value(&self, name: &str) -> Option<String>;

    /// Collect the direct *element* children (skipping text and comment nodes)
    /// into a `Vec`.
    fn element_children(&self) -> Vec<NodeRef>;

    /// Concatenate the contents of the direct text children only.
    fn own_text(&self) -> Option<String>;

    /// Split the `class` attribute on ASCII whitespace.  `None` when the
    /// attribute is missing; an empty `Vec` when it is blank.
    fn class_tokens(&self) -> Option<Vec<String>>;
}

impl NodeExt for NodeRef {
    fn element_name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.local.as_ref())
    }

    fn is_element(&self, name: &str) -> bool {
        self.element_name() == Some(name)
    }

    fn attr_value(&self, name: &str) -> Option<String> {
        self.as_element()
            .and_then(|e| e.attributes.borrow().get(name).map(|v| v.to_string()))
    }

    fn element_children(&self) -> Vec<NodeRef> {
        self.children()
            .filter(|c| c.as_element().is_some())
            .collect()
    }

    fn own_text(&self) -> Option<String> {
        let mut out: Option<String> = None;
        for child in self.children() {
            if let Some(text) = child.as_text() {
                out.get_or_insert_with(String::new)
                    .push_str(text.borrow().as_str());
            }
        }
        out
    }

    fn class_tokens(&self) -> Option<Vec<String>> {
        self.attr_value("class").map(|class| {
            class
                .split_ascii_whitespace()
                .map(|token| token.to_string())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html;

    fn first(html: &str, tag: &str) -> NodeRef {
        parse_html(html)
            .select_first(tag)
            .unwrap()
            .as_node()
            .clone()
    }

    #[test]
    fn class_tokens_distinguish_missing_and_blank() {
        assert_eq!(first("<div>x</div>", "div").class_tokens(), None);
        assert_eq!(
            first("<div class=\"\">x</div>", "div").class_tokens(),
            Some(vec![])
        );
        assert_eq!(
            first("<div class=\"  a\tb  \">x</div>", "div").class_tokens(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn attribute_names_are_case_insensitive() {
        let a = first("<a HREF=\"/x\">x</a>", "a");
        assert_eq!(a.attr_value("href").as_deref(), Some("/x"));
    }

    #[test]
    fn own_text_ignores_nested_elements() {
        let p = first("<p>one <b>two</b> three</p>", "p");
        assert_eq!(p.own_text().as_deref(), Some("one  three"));
        let empty = first("<p><b>two</b></p>", "p");
        assert_eq!(empty.own_text(), None);
    }

    #[test]
    fn element_children_skip_text() {
        let tr = first("<table><tr><td>1</td> <th>2</th></tr></table>", "tr");
        let names = tr
            .element_children()
            .iter()
            .map(|c| c.element_name().unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["td", "th"]);
    }
}
