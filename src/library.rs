//! Symbol table built from parsed library trees.
//!
//! Two top-level shapes define a [`Signature`]:
//!
//! - `(pin (input|output|bidir) ...)`: the id is the first child's tag, and
//!   a pin has no ports or parameters.
//! - `(symbol ...)`: the id is the symbol's type label. Ports come from the
//!   instance labels of its `port` children, in order, and parameters come
//!   from the names of its `parameter` children, in order.
//!
//! Both shapes must carry an instance label, because generation renames it.

use std::collections::HashMap;

use crate::error::{NetsheetError, Result};
use crate::sexpr::{LabelSlot, Node};

/// Queryable view of one library entry.
#[derive(Debug, Clone)]
pub struct Signature<'a> {
    /// Lookup key used by the netlist
    pub id: String,
    /// Port names in declaration order
    pub ports: Vec<String>,
    /// Parameter names in declaration order
    pub params: Vec<String>,
    /// The library tree this signature was extracted from
    pub definition: &'a Node,
}

impl<'a> Signature<'a> {
    /// Extract a signature from a top-level node.
    ///
    /// Returns `Ok(None)` for nodes that are neither `pin` nor `symbol`.
    pub fn from_node(node: &'a Node) -> Result<Option<Self>> {
        match node.tag() {
            Some("pin") => Self::from_pin(node).map(Some),
            Some("symbol") => Self::from_symbol(node).map(Some),
            _ => Ok(None),
        }
    }

    fn from_pin(node: &'a Node) -> Result<Self> {
        let id = node
            .children()
            .first()
            .and_then(Node::tag)
            .ok_or_else(|| NetsheetError::malformed_entry("pin", "first child must be a list"))?
            .to_string();
        require_label(node, LabelSlot::Instance, &id)?;
        Ok(Self {
            id,
            ports: Vec::new(),
            params: Vec::new(),
            definition: node,
        })
    }

    fn from_symbol(node: &'a Node) -> Result<Self> {
        let id = require_label(node, LabelSlot::Type, "symbol")?.to_string();
        require_label(node, LabelSlot::Instance, &id)?;

        let mut ports = Vec::new();
        let mut params = Vec::new();
        for child in node.children() {
            match child.tag() {
                Some("port") => {
                    require_label(child, LabelSlot::Type, &id)?;
                    let name = require_label(child, LabelSlot::Instance, &id)?;
                    push_unique(&mut ports, name, &id, "port")?;
                }
                Some("parameter") => {
                    let name = child
                        .children()
                        .first()
                        .and_then(Node::as_str)
                        .ok_or_else(|| {
                            NetsheetError::malformed_entry(&id, "parameter without a string name")
                        })?;
                    push_unique(&mut params, name, &id, "parameter")?;
                }
                _ => {}
            }
        }

        Ok(Self {
            id,
            ports,
            params,
            definition: node,
        })
    }

    /// Index of the first port with this name.
    pub fn port_index(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p == name)
    }

    /// Index of the first parameter with this name.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p == name)
    }
}

fn require_label<'n>(node: &'n Node, slot: LabelSlot, entry: &str) -> Result<&'n str> {
    node.label(slot).ok_or_else(|| {
        let what = match slot {
            LabelSlot::Type => "type label (first text block)",
            LabelSlot::Instance => "instance label (second text block)",
        };
        let owner = node.tag().unwrap_or("node");
        NetsheetError::malformed_entry(entry, format!("{} is missing its {}", owner, what))
    })
}

fn push_unique(names: &mut Vec<String>, name: &str, entry: &str, what: &str) -> Result<()> {
    if names.iter().any(|n| n == name) {
        return Err(NetsheetError::malformed_entry(
            entry,
            format!("duplicate {} name '{}'", what, name),
        ));
    }
    names.push(name.to_string());
    Ok(())
}

/// Mapping from signature id to signature.
#[derive(Debug, Default)]
pub struct SymbolTable<'a> {
    entries: HashMap<String, Signature<'a>>,
}

impl<'a> SymbolTable<'a> {
    /// Build the table from top-level library nodes, in load order.
    ///
    /// A later entry with the same id replaces an earlier one.
    pub fn build(nodes: &'a [Node]) -> Result<Self> {
        let mut entries = HashMap::new();
        for node in nodes {
            if let Some(signature) = Signature::from_node(node)? {
                if entries.contains_key(&signature.id) {
                    log::warn!("library entry '{}' redefined; using the later one", signature.id);
                }
                entries.insert(signature.id.clone(), signature);
            }
        }
        log::debug!("symbol table holds {} signatures", entries.len());
        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&Signature<'a>> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sexpr::parse_text;

    const LIB: &str = r#"
        (header "symbol" (version "1.1"))
        (pin (input) (rect 0 0 80 16) (text "INPUT" (rect 0 0 30 12)) (text "pin_name" (rect 4 0 40 12)))
        (symbol
            (rect 0 0 40 20)
            (text "mux" (rect 2 2 20 14))
            (text "inst" (rect 2 20 20 32))
            (port (pt 0 8) (input) (text "A" (rect 0 0 8 12)) (text "a" (rect 0 0 8 12)))
            (port (pt 0 16) (input) (text "B[3..0]" (rect 0 0 8 12)) (text "b" (rect 0 0 8 12)))
            (port (pt 40 8) (output) (text "Y" (rect 0 0 8 12)) (text "y" (rect 0 0 8 12)))
            (parameter "WIDTH" "8" "")
            (parameter "DEPTH" "2" "")
        )
    "#;

    #[test]
    fn test_build_table() {
        let nodes = parse_text(LIB).unwrap();
        let table = SymbolTable::build(&nodes).unwrap();
        assert_eq!(table.len(), 2);

        let mux = table.get("mux").unwrap();
        assert_eq!(mux.ports, vec!["a", "b", "y"]);
        assert_eq!(mux.params, vec!["WIDTH", "DEPTH"]);
        assert_eq!(mux.port_index("y"), Some(2));
        assert_eq!(mux.param_index("DEPTH"), Some(1));
        assert_eq!(mux.port_index("missing"), None);

        let pin = table.get("input").unwrap();
        assert!(pin.ports.is_empty());
        assert!(pin.params.is_empty());
        assert_eq!(pin.definition.tag(), Some("pin"));
    }

    #[test]
    fn test_empty_library() {
        let table = SymbolTable::build(&[]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_later_entry_wins() {
        let nodes = parse_text(
            r#"(symbol (text "inv") (text "i") (port (pt 0 0) (text "A") (text "a")))
               (symbol (text "inv") (text "i") (port (pt 0 0) (text "X") (text "x")))"#,
        )
        .unwrap();
        let table = SymbolTable::build(&nodes).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("inv").unwrap().ports, vec!["x"]);
    }

    #[test]
    fn test_missing_instance_label_is_an_error() {
        let nodes = parse_text(r#"(symbol (text "inv"))"#).unwrap();
        let err = SymbolTable::build(&nodes).unwrap_err();
        assert!(matches!(err, NetsheetError::MalformedLibraryEntry { .. }));
        assert!(err.to_string().contains("instance label"));

        let nodes = parse_text(r#"(symbol (text "inv") (text "i") (port (text "A")))"#).unwrap();
        assert!(SymbolTable::build(&nodes).is_err());

        let nodes = parse_text(r#"(pin (input) (text "INPUT"))"#).unwrap();
        assert!(SymbolTable::build(&nodes).is_err());
    }

    #[test]
    fn test_malformed_pin_and_parameter() {
        let nodes = parse_text(r#"(pin "input")"#).unwrap();
        assert!(SymbolTable::build(&nodes).is_err());

        let nodes = parse_text(r#"(symbol (text "s") (text "i") (parameter 4 "x"))"#).unwrap();
        assert!(SymbolTable::build(&nodes).is_err());
    }

    #[test]
    fn test_duplicate_port_names_rejected() {
        let nodes = parse_text(
            r#"(symbol (text "s") (text "i")
                 (port (pt 0 0) (text "A") (text "a"))
                 (port (pt 0 8) (text "A") (text "a")))"#,
        )
        .unwrap();
        let err = SymbolTable::build(&nodes).unwrap_err();
        assert!(err.to_string().contains("duplicate port name 'a'"));
    }

    #[test]
    fn test_other_top_level_lists_ignored() {
        let nodes = parse_text(r#"(header "x") (connector (pt 0 0))"#).unwrap();
        assert!(SymbolTable::build(&nodes).unwrap().is_empty());
    }
}
