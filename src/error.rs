//! Error types for the netsheet generator.
//!
//! This module provides a unified error type [`NetsheetError`] that covers
//! every fatal condition of a run: lexing either language, parsing library
//! trees, building signatures, resolving the netlist and generating geometry.
//! None of them is recoverable; the driver reports the first one and exits.

use thiserror::Error;

use crate::source::SourceLocation;

/// Result type alias using [`NetsheetError`].
pub type Result<T> = std::result::Result<T, NetsheetError>;

/// Unified error type for all netsheet operations.
#[derive(Error, Debug)]
pub enum NetsheetError {
    // ============ Lexical Errors ============
    /// Unexpected character while tokenizing
    #[error("{location}: unexpected char {found}")]
    UnexpectedChar {
        location: SourceLocation,
        found: String,
    },

    /// Input ended inside a string or block comment
    #[error("{location}: unexpected eof")]
    UnexpectedEofInLexer { location: SourceLocation },

    // ============ Syntax Errors ============
    /// Token that does not fit the grammar at this point
    #[error("{location}: unexpected token {lexeme}")]
    UnexpectedToken {
        location: SourceLocation,
        lexeme: String,
    },

    /// Token stream ended while a construct was still open
    #[error("unexpected end of input {context}")]
    UnexpectedEof { context: String },

    /// Number literal that does not fit a signed integer
    #[error("{location}: invalid number {lexeme}")]
    InvalidNumber {
        location: SourceLocation,
        lexeme: String,
    },

    /// A string or number at the top level of a library file
    #[error("{location}: non-list in global scope")]
    NonListAtTopLevel { location: SourceLocation },

    // ============ Library Errors ============
    /// Library entry that breaks the label or shape conventions
    #[error("malformed library entry '{entry}': {message}")]
    MalformedLibraryEntry { entry: String, message: String },

    // ============ Resolution Errors ============
    /// Netlist references a signature id missing from the library
    #[error("{location}: {id} is undefined")]
    Undefined {
        id: String,
        location: SourceLocation,
    },

    /// Named override that matches no port or parameter
    #[error("{location}: bad port or parameter {name}")]
    BadPortOrParam {
        name: String,
        location: SourceLocation,
    },

    /// Positional override beyond the signature's arity
    #[error("{location}: unnamed port or param past the end")]
    PositionalPastEnd { location: SourceLocation },

    /// `port` or `param` block with no selected instance
    #[error("{location}: port or param used before entity")]
    PortParamBeforeInstance { location: SourceLocation },

    // ============ Generation Errors ============
    /// Cloned library geometry lacks something the layout needs
    #[error("cannot lay out instance '{instance}': {message}")]
    MalformedGeometry { instance: String, message: String },

    // ============ I/O Errors ============
    /// Error reading a library, list or netlist file
    #[error("can't open {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the generated schematic
    #[error("failed to write output: {source}")]
    OutputError {
        #[source]
        source: std::io::Error,
    },
}

impl NetsheetError {
    /// Create an unexpected-token error
    pub fn unexpected_token(location: &SourceLocation, lexeme: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            location: location.clone(),
            lexeme: lexeme.into(),
        }
    }

    /// Create an unexpected end-of-input error
    pub fn unexpected_eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
        }
    }

    /// Create a malformed library entry error
    pub fn malformed_entry(entry: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedLibraryEntry {
            entry: entry.into(),
            message: message.into(),
        }
    }

    /// Create a malformed geometry error
    pub fn malformed_geometry(instance: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            instance: instance.into(),
            message: message.into(),
        }
    }
}
