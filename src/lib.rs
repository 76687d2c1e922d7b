//! # Netsheet Core
//!
//! Generates schematic sheets from a terse netlist and a symbol library.
//!
//! This library provides:
//! - A lexer, parser and serializer for the parenthesized-list exchange
//!   format used by both symbol libraries and generated sheets
//! - A symbol table of port/parameter signatures extracted from libraries
//! - A netlist language with positional and named port/parameter overrides
//! - A column layout engine that places instances and draws connector stubs
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`source`] - Multi-file character streams with locations
//! - [`sexpr`] - Exchange-format lexer, tree, parser and writer
//! - [`library`] - Signature extraction and the symbol table
//! - [`netlist`] - Netlist lexer and resolver
//! - [`layout`] - Geometry, connectors and sheet generation
//! - [`config`] - Library list files and layout constants
//!
//! ## Usage
//!
//! ```bash
//! netsheet < design.net > design.bdf
//! ```
//!
//! `libs.txt` and `mylibs.txt` in the working directory list the library
//! files, one per line.
//!
//! ## Pipeline
//!
//! Every run is a single batch pass:
//!
//! 1. Lex and parse all library files into top-level lists
//! 2. Build the symbol table from `pin` and `symbol` entries
//! 3. Lex the netlist and resolve it into placed instances
//! 4. Lay out each instance and serialize the sheet
//!
//! The first error stops the run; nothing is written.

pub mod config;
pub mod error;
pub mod layout;
pub mod library;
pub mod netlist;
pub mod sexpr;
pub mod source;

// Re-export main types for convenience
pub use config::LayoutConfig;
pub use error::{NetsheetError, Result};
pub use library::{Signature, SymbolTable};
pub use netlist::{Instance, PlacedInstance};
pub use sexpr::Node;
pub use source::{SourceLocation, SourceReader};

/// Run the whole pipeline over a library stream and a netlist stream.
pub fn compile(
    libraries: &mut SourceReader,
    netlist: &mut SourceReader,
    config: LayoutConfig,
) -> Result<String> {
    let nodes = sexpr::parse(libraries)?;
    let table = SymbolTable::build(&nodes)?;
    let instances = netlist::resolve(&table, netlist)?;
    layout::generate(&instances, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIB: &str = r#"
        (header "symbol" (version "1.1"))
        (symbol (rect 0 0 40 20) (text "inv") (text "inst")
            (port (pt 0 8) (text "A") (text "a"))
            (port (pt 40 8) (text "Y") (text "y")))
    "#;

    #[test]
    fn test_compile() {
        let mut libraries = SourceReader::from_text("gates.bsf", LIB);
        let mut netlist = SourceReader::from_text("stdin", "inv g1 port { a: in1 y: out1 }\n");
        let out = compile(&mut libraries, &mut netlist, LayoutConfig::default()).unwrap();
        assert!(out.starts_with(layout::HEADER));
        assert_eq!(out.matches("(symbol\n").count(), 1);
        assert_eq!(out.matches("(connector\n").count(), 2);
    }

    #[test]
    fn test_unknown_identifier_fails() {
        let mut libraries = SourceReader::from_text("gates.bsf", LIB);
        let mut netlist = SourceReader::from_text("stdin", "inv\nxor2 x\n");
        let err = compile(&mut libraries, &mut netlist, LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, NetsheetError::Undefined { .. }));
    }

    #[test]
    fn test_libraries_concatenate() {
        let mut libraries = SourceReader::new([
            ("project.bsf", LIB),
            ("user.bsf", r#"(symbol (rect 0 0 8 8) (text "inv") (text "i"))"#),
        ]);
        let mut netlist = SourceReader::from_text("stdin", "inv port { a }");
        let err = compile(&mut libraries, &mut netlist, LayoutConfig::default()).unwrap_err();
        // The user library's port-less `inv` replaced the project one.
        assert!(matches!(err, NetsheetError::PositionalPastEnd { .. }));
    }

    #[test]
    fn test_oversized_coordinates_fail() {
        let mut libraries = SourceReader::from_text(
            "big.bsf",
            r#"(symbol (rect 0 0 40 9223372036854775000) (text "big") (text "i")
                (port (pt 40 8) (text "Y") (text "y")))"#,
        );
        let mut netlist = SourceReader::from_text("stdin", "big\nbig\n");
        let err = compile(&mut libraries, &mut netlist, LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, NetsheetError::InvalidNumber { .. }));
    }

    #[test]
    fn test_extreme_coordinates_place() {
        let mut libraries = SourceReader::from_text(
            "big.bsf",
            r#"(symbol (rect -2147483648 -2147483648 2147483647 2147483647)
                (text "big") (text "i")
                (port (pt 2147483647 8) (text "Y") (text "y")))"#,
        );
        let mut netlist = SourceReader::from_text("stdin", "big port { q }\nbig\nbig\n");
        let out = compile(&mut libraries, &mut netlist, LayoutConfig::default()).unwrap();
        assert_eq!(out.matches("(symbol\n").count(), 3);
    }
}
