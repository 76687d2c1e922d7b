//! Lexer (tokenizer) for the library exchange format.

use crate::error::{NetsheetError, Result};
use crate::source::{SourceLocation, SourceReader, Token};

/// Token types in the exchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `(` or `)`
    Paren,
    /// Quoted string, stored without quotes and with escapes kept verbatim
    Str,
    /// Signed integer literal
    Number,
    /// List tag
    Identifier,
}

/// A token of the exchange format.
pub type SexprToken = Token<TokenKind>;

pub(crate) fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub(crate) fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// ASCII whitespace including vertical tab.
pub(crate) fn is_space(ch: char) -> bool {
    ch.is_ascii_whitespace() || ch == '\x0b'
}

pub(crate) fn unexpected_char(location: SourceLocation, ch: Option<char>) -> NetsheetError {
    match ch {
        Some(ch) => NetsheetError::UnexpectedChar {
            location,
            found: format!("{:?}", ch),
        },
        None => NetsheetError::UnexpectedEofInLexer { location },
    }
}

/// Read a quoted string; the opening quote is the next character.
///
/// A backslash and the character after it are copied verbatim.
pub(crate) fn read_string(reader: &mut SourceReader) -> Result<String> {
    reader.read();
    let mut text = String::new();
    loop {
        match reader.peek() {
            Some('"') => {
                reader.read();
                return Ok(text);
            }
            Some(ch) => {
                reader.read();
                text.push(ch);
                if ch == '\\' {
                    let escaped = reader.read();
                    match escaped {
                        Some(e) => text.push(e),
                        None => return Err(unexpected_char(reader.location(), None)),
                    }
                }
            }
            None => return Err(unexpected_char(reader.location(), None)),
        }
    }
}

/// Skip a block comment; `/*` has already been consumed. Not nestable.
pub(crate) fn skip_block_comment(reader: &mut SourceReader) -> Result<()> {
    let mut star = false;
    loop {
        match reader.read() {
            None => return Err(unexpected_char(reader.location(), None)),
            Some('/') if star => return Ok(()),
            Some(ch) => star = ch == '*',
        }
    }
}

/// Lexer for tokenizing exchange-format input.
pub struct Lexer<'r> {
    reader: &'r mut SourceReader,
}

impl<'r> Lexer<'r> {
    /// Create a new lexer over the given reader.
    pub fn new(reader: &'r mut SourceReader) -> Self {
        Self { reader }
    }

    /// Tokenize the whole stream.
    pub fn tokenize(mut self) -> Result<Vec<SexprToken>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        log::debug!("exchange lexer produced {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<SexprToken>> {
        loop {
            let Some(ch) = self.reader.peek() else {
                return Ok(None);
            };
            let location = self.reader.location();

            let (kind, lexeme) = if is_digit(ch) || ch == '-' || ch == '+' {
                let mut text = String::new();
                self.push_read(&mut text);
                self.read_while(&mut text, is_digit);
                (TokenKind::Number, text)
            } else if is_letter(ch) {
                let mut text = String::new();
                self.read_while(&mut text, |c| is_letter(c) || is_digit(c));
                (TokenKind::Identifier, text)
            } else if ch == '(' || ch == ')' {
                self.reader.read();
                (TokenKind::Paren, ch.to_string())
            } else if ch == '"' {
                (TokenKind::Str, read_string(self.reader)?)
            } else if ch == '/' {
                self.reader.read();
                match self.reader.peek() {
                    Some('*') => {
                        self.reader.read();
                        skip_block_comment(self.reader)?;
                    }
                    Some('/') => while !matches!(self.reader.read(), Some('\n') | None) {},
                    _ => return Err(unexpected_char(location, Some('/'))),
                }
                continue;
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

    fn push_read(&mut self, text: &mut String) {
        if let Some(ch) = self.reader.read() {
            text.push(ch);
        }
    }

    fn read_while(&mut self, text: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.reader.peek() {
            if !pred(ch) {
                break;
            }
            self.push_read(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Result<Vec<SexprToken>> {
        let mut reader = SourceReader::from_text("test", input);
        Lexer::new(&mut reader).tokenize()
    }

    fn kinds_and_text(tokens: &[SexprToken]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect()
    }

    #[test]
    fn test_lexer_basic() {
        let tokens = lex("(rect 0 -8 +40 20)").unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Paren, "("),
                (TokenKind::Identifier, "rect"),
                (TokenKind::Number, "0"),
                (TokenKind::Number, "-8"),
                (TokenKind::Number, "+40"),
                (TokenKind::Number, "20"),
                (TokenKind::Paren, ")"),
            ]
        );
    }

    #[test]
    fn test_string_escapes_are_verbatim() {
        let tokens = lex(r#"(text "a\"b\\")"#).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].lexeme, r#"a\"b\\"#);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = lex("// header\n(a /* inner * / */ 1)").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].lexeme, "a");
        assert_eq!(tokens[2].lexeme, "1");
    }

    #[test]
    fn test_token_locations() {
        let tokens = lex("(a\n  b)").unwrap();
        assert_eq!(tokens[2].location, SourceLocation::new("test", 2, 3));
    }

    #[test]
    fn test_unexpected_char() {
        let err = lex("(a #)").unwrap_err();
        assert!(matches!(err, NetsheetError::UnexpectedChar { .. }));
        assert_eq!(err.to_string(), "test:1:4: unexpected char '#'");
    }

    #[test]
    fn test_vertical_tab_is_whitespace() {
        let tokens = lex("(a\u{0b}1\x0c)").unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Paren, "("),
                (TokenKind::Identifier, "a"),
                (TokenKind::Number, "1"),
                (TokenKind::Paren, ")"),
            ]
        );
    }

    #[test]
    fn test_lone_slash_is_an_error() {
        assert!(matches!(
            lex("(a / b)").unwrap_err(),
            NetsheetError::UnexpectedChar { .. }
        ));
    }

    #[test]
    fn test_unterminated_string_and_comment() {
        assert!(matches!(
            lex("(a \"open").unwrap_err(),
            NetsheetError::UnexpectedEofInLexer { .. }
        ));
        assert!(matches!(
            lex("/* never closed").unwrap_err(),
            NetsheetError::UnexpectedEofInLexer { .. }
        ));
    }
}
