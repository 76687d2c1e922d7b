//! The parenthesized-list exchange format shared by symbol libraries and
//! generated schematics.
//!
//! # Grammar
//!
//! ```text
//! toplevel = { list }
//! node     = list | string | number
//! list     = '(' identifier { node } ')'
//!
//! string     = '"' { char | '\' char } '"'     (escapes kept verbatim)
//! number     = ['+' | '-' | digit] { digit }    (integers only)
//! identifier = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! `//` line comments and `/* */` block comments are skipped.

mod lexer;
mod node;
mod parser;
mod writer;

pub(crate) use lexer::{
    is_digit, is_letter, is_space, read_string, skip_block_comment, unexpected_char,
};
pub use lexer::{Lexer, SexprToken, TokenKind};
pub use node::{LabelSlot, Node};
pub use parser::Parser;
pub use writer::{to_string, write_node};

use crate::error::Result;
use crate::source::SourceReader;

/// Tokenize and parse every source in the reader into top-level lists.
pub fn parse(reader: &mut SourceReader) -> Result<Vec<Node>> {
    let tokens = Lexer::new(reader).tokenize()?;
    Parser::new(&tokens).parse()
}

/// Parse a single in-memory source.
pub fn parse_text(text: &str) -> Result<Vec<Node>> {
    let mut reader = SourceReader::from_text("<text>", text);
    parse(&mut reader)
}
