//! Recursive-descent parser for the exchange format.

use super::lexer::{SexprToken, TokenKind};
use super::node::Node;
use crate::error::{NetsheetError, Result};

/// Parser over a complete token sequence.
pub struct Parser<'t> {
    tokens: &'t [SexprToken],
    pos: usize,
}

impl<'t> Parser<'t> {
    /// Create a new parser over the given tokens.
    pub fn new(tokens: &'t [SexprToken]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse every top-level node. Only lists are allowed at the top level.
    pub fn parse(&mut self) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        while let Some(token) = self.tokens.get(self.pos) {
            let location = token.location.clone();
            let node = self.parse_node()?;
            if !node.is_list() {
                return Err(NetsheetError::NonListAtTopLevel { location });
            }
            nodes.push(node);
        }
        log::debug!("parsed {} top-level nodes", nodes.len());
        Ok(nodes)
    }

    /// Parse one node at the cursor.
    pub fn parse_node(&mut self) -> Result<Node> {
        let token = self.advance("while reading a node")?;
        match token.kind {
            TokenKind::Paren if token.lexeme == "(" => {
                let tag = self.advance("after '('")?;
                if tag.kind != TokenKind::Identifier {
                    return Err(NetsheetError::unexpected_token(&tag.location, &tag.lexeme));
                }
                let id = tag.lexeme.clone();
                let mut children = Vec::new();
                loop {
                    match self.tokens.get(self.pos) {
                        Some(t) if t.is(TokenKind::Paren, ")") => {
                            self.pos += 1;
                            break;
                        }
                        Some(_) => children.push(self.parse_node()?),
                        None => {
                            return Err(NetsheetError::unexpected_eof(format!(
                                "inside list '{}'",
                                id
                            )))
                        }
                    }
                }
                Ok(Node::List { id, children })
            }
            TokenKind::Str => Ok(Node::Str(token.lexeme.clone())),
            // Coordinates are 32-bit; layout widens them to i64.
            TokenKind::Number => token
                .lexeme
                .parse::<i32>()
                .map(|v| Node::Int(i64::from(v)))
                .map_err(|_| NetsheetError::InvalidNumber {
                    location: token.location.clone(),
                    lexeme: token.lexeme.clone(),
                }),
            _ => Err(NetsheetError::unexpected_token(
                &token.location,
                &token.lexeme,
            )),
        }
    }

    fn advance(&mut self, context: &str) -> Result<&'t SexprToken> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| NetsheetError::unexpected_eof(context))?;
        self.pos += 1;
        Ok(token)
    }
}
