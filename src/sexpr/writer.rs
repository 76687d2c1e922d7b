//! Serializer for the exchange format.
//!
//! A list at depth 0 or 1 whose first child is itself a list is written
//! multi-line: the tag on its own line, one child per line indented by one
//! more tab, and the closing paren on its own line. Everything else is
//! written inline. Leaves always carry a trailing space:
//!
//! ```text
//! (symbol
//! 	(rect 0 0 40 20 )
//! 	(text "inv" (rect 4 4 20 16 )(font "Arial" ))
//! )
//! ```

use std::fmt::{self, Write};

use super::node::Node;

const MULTILINE_MAX_DEPTH: usize = 1;

/// Serialize a node as a top-level entry.
pub fn to_string(node: &Node) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_node(&mut out, node, Some(0));
    out
}

/// Write `node`; `depth` is `None` once inside an inline list.
pub fn write_node<W: Write>(out: &mut W, node: &Node, depth: Option<usize>) -> fmt::Result {
    let (id, children) = match node {
        Node::Int(v) => return write!(out, "{} ", v),
        Node::Str(s) => return write!(out, "\"{}\" ", s),
        Node::List { id, children } => (id, children),
    };

    if let Some(d) = depth {
        write_tabs(out, d)?;
    }
    write!(out, "({}", id)?;

    let multiline = match depth {
        Some(d) => d <= MULTILINE_MAX_DEPTH && children.first().is_some_and(Node::is_list),
        None => false,
    };

    if multiline {
        let d = depth.unwrap_or_default();
        out.write_char('\n')?;
        for child in children {
            write_node(out, child, Some(d + 1))?;
        }
        write_tabs(out, d)?;
    } else {
        out.write_char(' ')?;
        for child in children {
            write_node(out, child, None)?;
        }
    }

    out.write_char(')')?;
    if depth.is_some() {
        out.write_char('\n')?;
    }
    Ok(())
}

fn write_tabs<W: Write>(out: &mut W, n: usize) -> fmt::Result {
    for _ in 0..n {
        out.write_char('\t')?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, Some(0))
    }
}
