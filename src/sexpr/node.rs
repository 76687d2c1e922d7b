//! Tree types for the exchange format.

/// One node of an exchange-format tree.
///
/// A node owns its children, so `clone()` is a deep, independent copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `(tag child*)`
    List { id: String, children: Vec<Node> },
    /// Quoted string leaf, escapes kept verbatim
    Str(String),
    /// Integer leaf
    Int(i64),
}

/// Which `text` label of a library node to address.
///
/// Library nodes label themselves with nested `(text "..." ...)` lists.
/// The first one is the type label (symbol name, or a port's declared
/// name) and the second is the instance label that generation rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSlot {
    Type,
    Instance,
}

impl LabelSlot {
    fn index(self) -> usize {
        match self {
            LabelSlot::Type => 0,
            LabelSlot::Instance => 1,
        }
    }
}

impl Node {
    /// Create a list node.
    pub fn list(id: impl Into<String>, children: Vec<Node>) -> Self {
        Node::List {
            id: id.into(),
            children,
        }
    }

    /// The list tag, if this is a list.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::List { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List { .. })
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::List { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::List { children, .. } => children,
            _ => &mut [],
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// First child list with the given tag.
    pub fn first_list(&self, id: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.tag() == Some(id))
    }

    pub fn first_list_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.children_mut().iter_mut().find(|c| c.tag() == Some(id))
    }

    /// All child lists with the given tag, in order.
    pub fn lists<'s>(&'s self, id: &'s str) -> impl Iterator<Item = &'s Node> + 's {
        self.children().iter().filter(move |c| c.tag() == Some(id))
    }

    pub fn lists_mut<'s>(&'s mut self, id: &'s str) -> impl Iterator<Item = &'s mut Node> + 's {
        self.children_mut()
            .iter_mut()
            .filter(move |c| c.tag() == Some(id))
    }

    /// Text of the requested `text` label.
    pub fn label(&self, slot: LabelSlot) -> Option<&str> {
        self.lists("text").nth(slot.index())?.children().first()?.as_str()
    }

    /// Mutable text of the requested `text` label.
    pub fn label_mut(&mut self, slot: LabelSlot) -> Option<&mut String> {
        match self.lists_mut("text").nth(slot.index())?.children_mut().first_mut()? {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::list("text", vec![Node::Str(s.to_string())])
    }

    #[test]
    fn test_labels() {
        let mut port = Node::list(
            "port",
            vec![
                Node::list("pt", vec![Node::Int(0), Node::Int(8)]),
                text("D[3..0]"),
                text("d"),
            ],
        );
        assert_eq!(port.label(LabelSlot::Type), Some("D[3..0]"));
        assert_eq!(port.label(LabelSlot::Instance), Some("d"));

        *port.label_mut(LabelSlot::Instance).unwrap() = "q".to_string();
        assert_eq!(port.label(LabelSlot::Instance), Some("q"));
        assert_eq!(port.label(LabelSlot::Type), Some("D[3..0]"));
    }

    #[test]
    fn test_missing_label() {
        let node = Node::list("symbol", vec![text("only")]);
        assert_eq!(node.label(LabelSlot::Instance), None);
        assert_eq!(Node::Int(3).label(LabelSlot::Type), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Node::list("symbol", vec![text("and2"), text("inst")]);
        let mut copy = original.clone();
        *copy.label_mut(LabelSlot::Instance).unwrap() = "g7".to_string();
        assert_eq!(original.label(LabelSlot::Instance), Some("inst"));
        assert_eq!(copy.label(LabelSlot::Instance), Some("g7"));
    }

    #[test]
    fn test_lists_filters_by_tag() {
        let node = Node::list(
            "symbol",
            vec![
                Node::list("port", vec![]),
                Node::Str("x".to_string()),
                Node::list("parameter", vec![]),
                Node::list("port", vec![]),
            ],
        );
        assert_eq!(node.lists("port").count(), 2);
        assert!(node.first_list("rect").is_none());
    }
}
