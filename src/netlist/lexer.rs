//! Lexer (tokenizer) for the netlist language.

use crate::error::Result;
use crate::sexpr::{
    is_digit, is_letter, is_space, read_string, skip_block_comment, unexpected_char,
};
use crate::source::{SourceReader, Token};

/// Reserved words of the netlist language.
pub const KEYWORDS: [&str; 6] = ["port", "param", "next_col", "input", "output", "bidir"];

const PUNCTUATION: &str = "[]{}()<>,.:;-+/*^";

/// Token types in the netlist language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// One of [`KEYWORDS`]
    Keyword,
    /// Signature id, instance name or net name fragment
    Identifier,
    /// Single punctuation character
    Punctuation,
    /// Quoted string, escapes kept verbatim
    Str,
    /// Unsigned digit run
    Number,
    /// Statement boundary
    Newline,
}

/// A token of the netlist language.
pub type NetlistToken = Token<TokenKind>;

/// Lexer for tokenizing netlist input.
pub struct Lexer<'r> {
    reader: &'r mut SourceReader,
}

impl<'r> Lexer<'r> {
    /// Create a new lexer over the given reader.
    pub fn new(reader: &'r mut SourceReader) -> Self {
        Self { reader }
    }

    /// Tokenize the whole stream.
    pub fn tokenize(mut self) -> Result<Vec<NetlistToken>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        log::debug!("netlist lexer produced {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<NetlistToken>> {
        loop {
            let Some(ch) = self.reader.peek() else {
                return Ok(None);
            };
            let location = self.reader.location();

            let (kind, lexeme) = if is_digit(ch) {
                (TokenKind::Number, self.read_while(is_digit))
            } else if is_letter(ch) {
                let text = self.read_while(|c| is_letter(c) || is_digit(c));
                if KEYWORDS.contains(&text.as_str()) {
                    (TokenKind::Keyword, text)
                } else {
                    (TokenKind::Identifier, text)
                }
            } else if ch == '"' {
                (TokenKind::Str, read_string(self.reader)?)
            } else if ch == '/' {
                self.reader.read();
                match self.reader.peek() {
                    Some('*') => {
                        self.reader.read();
                        skip_block_comment(self.reader)?;
                        continue;
                    }
                    Some('/') => {
                        // The newline ends the statement, so leave it for the next token.
                        while !matches!(self.reader.peek(), Some('\n') | None) {
                            self.reader.read();
                        }
                        continue;
                    }
                    _ => (TokenKind::Punctuation, "/".to_string()),
                }
            } else if PUNCTUATION.contains(ch) {
                self.reader.read();
                (TokenKind::Punctuation, ch.to_string())
            } else if ch == '\n' {
                self.reader.read();
                (TokenKind::Newline, "\n".to_string())
            } else if is_space(ch) {
                self.reader.read();
                continue;
            } else {
                return Err(unexpected_char(location, Some(ch)));
            };

            return Ok(Some(Token {
                kind,
                lexeme,
                location,
            }));
        }
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.reader.peek() {
            if !pred(ch) {
                break;
            }
            self.reader.read();
            text.push(ch);
        }
        text
    }
}
