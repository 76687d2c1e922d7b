//! The netlist language: instances of library signatures plus their port
//! and parameter overrides.
//!
//! Statements are newline-separated:
//!
//! ```text
//! statement = instance | pin | block | "next_col"
//! instance  = signature_id [instance_name]
//! pin       = ("input" | "output" | "bidir") name
//! block     = ("port" | "param") '{' { entry [':' entry] [';'] } '}'
//! entry     = adjacent tokens up to whitespace, newline, ';', ':' or '}'
//! name      = tokens up to newline, ';', ':' or '}'
//! ```
//!
//! Entries are concatenated verbatim, so `d[7..0]` and `a,b` are single
//! values. Newlines inside a block are insignificant.
//!
//! `port`/`param` blocks apply to the most recent instance. A bare entry is
//! positional and lands one slot after the previous entry; a `name: value`
//! entry targets that name and moves the positional cursor there.
//!
//! # Example
//!
//! ```text
//! input clk
//! dff r0 port { d: n1 clk }      // q follows clk positionally
//! param { WIDTH: 8 }
//! next_col
//! inv port { n1 n2 }
//! ```

mod instance;
mod lexer;
mod resolver;

pub use instance::{Instance, PlacedInstance};
pub use lexer::{Lexer, NetlistToken, TokenKind, KEYWORDS};
pub use resolver::{BlockEntry, Resolver};

use crate::error::Result;
use crate::library::SymbolTable;
use crate::source::SourceReader;

/// Tokenize the netlist and resolve it against the table.
pub fn resolve<'a>(table: &'a SymbolTable<'a>, reader: &mut SourceReader) -> Result<Vec<Instance<'a>>> {
    let tokens = Lexer::new(reader).tokenize()?;
    Resolver::new(table, &tokens).resolve()
}

/// Resolve an in-memory netlist read as `stdin`.
pub fn resolve_text<'a>(table: &'a SymbolTable<'a>, text: &str) -> Result<Vec<Instance<'a>>> {
    let mut reader = SourceReader::from_text("stdin", text);
    resolve(table, &mut reader)
}
