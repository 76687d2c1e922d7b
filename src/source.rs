//! Character streams with file/line/column tracking.
//!
//! A [`SourceReader`] concatenates an ordered list of sources (library files,
//! or the netlist) into one character stream with single-character
//! lookahead. Every source is terminated by a synthetic newline, so a line
//! comment or statement on the last line of a file is always closed.

use std::fmt;
use std::path::Path;

use crate::error::{NetsheetError, Result};

/// Position of a character or token in its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source name (file path, or `stdin`)
    pub file: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A token produced by either lexer; `K` is the language's kind enum.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<K> {
    /// The kind of token
    pub kind: K,
    /// The token's text (strings without their quotes)
    pub lexeme: String,
    /// Where the token starts
    pub location: SourceLocation,
}

impl<K: Copy + PartialEq> Token<K> {
    /// True if this token has the given kind and text.
    pub fn is(&self, kind: K, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }
}

struct Source {
    name: String,
    chars: Vec<char>,
}

/// Multi-source character reader.
pub struct SourceReader {
    sources: Vec<Source>,
    index: usize,
    pos: usize,
    line: usize,
    column: usize,
}

impl SourceReader {
    /// Create a reader over in-memory sources, in order.
    pub fn new<I, N, T>(sources: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let sources = sources
            .into_iter()
            .map(|(name, text)| {
                let mut chars: Vec<char> = text.as_ref().chars().collect();
                chars.push('\n');
                Source {
                    name: name.into(),
                    chars,
                }
            })
            .collect();
        Self {
            sources,
            index: 0,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Create a reader over a single in-memory source.
    pub fn from_text(name: impl Into<String>, text: impl AsRef<str>) -> Self {
        let name: String = name.into();
        Self::new([(name, text)])
    }

    /// Read every file up front and chain them in the given order.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let text =
                std::fs::read_to_string(path).map_err(|e| NetsheetError::FileReadError {
                    path: path.display().to_string(),
                    source: e,
                })?;
            log::debug!("loaded {} ({} bytes)", path.display(), text.len());
            sources.push((path.display().to_string(), text));
        }
        Ok(Self::new(sources))
    }

    /// Look at the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        loop {
            let source = self.sources.get(self.index)?;
            if let Some(&ch) = source.chars.get(self.pos) {
                return Some(ch);
            }
            self.index += 1;
            self.pos = 0;
            self.line = 1;
            self.column = 1;
        }
    }

    /// Consume the next character.
    pub fn read(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Location of the next unread character.
    pub fn location(&self) -> SourceLocation {
        let file = self
            .sources
            .get(self.index)
            .or_else(|| self.sources.last())
            .map(|s| s.name.clone())
            .unwrap_or_default();
        SourceLocation::new(file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_are_newline_terminated() {
        let mut reader = SourceReader::new([("a", "x"), ("b", "y")]);
        let mut out = String::new();
        while let Some(ch) = reader.read() {
            out.push(ch);
        }
        assert_eq!(out, "x\ny\n");
    }

    #[test]
    fn test_location_restarts_per_source() {
        let mut reader = SourceReader::new([("a", "ab\nc"), ("b", "d")]);
        for _ in 0..4 {
            reader.read();
        }
        assert_eq!(reader.location(), SourceLocation::new("a", 2, 2));
        reader.read();
        assert_eq!(reader.peek(), Some('d'));
        assert_eq!(reader.location(), SourceLocation::new("b", 1, 1));
    }

    #[test]
    fn test_empty_reader() {
        let mut reader = SourceReader::new(Vec::<(String, String)>::new());
        assert_eq!(reader.peek(), None);
        assert_eq!(reader.read(), None);
    }
}
