//! Resolver turning netlist tokens into placed instances.

use std::collections::HashMap;

use super::instance::{Instance, PlacedInstance};
use super::lexer::{NetlistToken, TokenKind};
use crate::error::{NetsheetError, Result};
use crate::library::{Signature, SymbolTable};
use crate::source::SourceLocation;

/// One entry of a `port { ... }` or `param { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    /// Name for a named entry, or the value itself for a positional one
    pub name: String,
    /// Value of a named entry (`name: value`)
    pub value: Option<String>,
    pub location: SourceLocation,
}

/// The instance currently receiving `port`/`param` blocks.
struct Selection<'a> {
    instance: PlacedInstance<'a>,
    port_cursor: Option<usize>,
    param_cursor: Option<usize>,
}

/// Single-pass resolver over a netlist token stream.
pub struct Resolver<'a, 't> {
    table: &'a SymbolTable<'a>,
    tokens: &'t [NetlistToken],
    pos: usize,
    selected: Option<Selection<'a>>,
    type_counts: HashMap<String, usize>,
    output: Vec<Instance<'a>>,
}

impl<'a, 't> Resolver<'a, 't> {
    /// Create a new resolver against the given symbol table.
    pub fn new(table: &'a SymbolTable<'a>, tokens: &'t [NetlistToken]) -> Self {
        Self {
            table,
            tokens,
            pos: 0,
            selected: None,
            type_counts: HashMap::new(),
            output: Vec::new(),
        }
    }

    /// Resolve the whole token stream.
    pub fn resolve(mut self) -> Result<Vec<Instance<'a>>> {
        while let Some(token) = self.tokens.get(self.pos) {
            self.pos += 1;
            match token.kind {
                TokenKind::Newline => {}
                TokenKind::Identifier => self.select(token)?,
                TokenKind::Keyword => match token.lexeme.as_str() {
                    "input" | "output" | "bidir" => self.place_pin(token)?,
                    "port" => self.apply_block(token, true)?,
                    "param" => self.apply_block(token, false)?,
                    "next_col" => {
                        self.flush();
                        self.output.push(Instance::ColumnBreak);
                    }
                    _ => return Err(unexpected(token)),
                },
                _ => return Err(unexpected(token)),
            }
        }
        self.flush();
        log::debug!("resolved {} netlist entries", self.output.len());
        Ok(self.output)
    }

    fn flush(&mut self) {
        if let Some(selection) = self.selected.take() {
            self.output.push(Instance::Placed(selection.instance));
        }
    }

    /// `<type> [name]`: start a new instance.
    fn select(&mut self, token: &NetlistToken) -> Result<()> {
        self.flush();
        let signature = self.lookup(token)?;

        let id = match self.tokens.get(self.pos) {
            Some(next) if next.kind == TokenKind::Identifier => {
                self.pos += 1;
                next.lexeme.clone()
            }
            _ => {
                let count = self.type_counts.entry(signature.id.clone()).or_insert(0);
                let id = format!("{}_{}", signature.id, count);
                *count += 1;
                id
            }
        };

        self.selected = Some(Selection {
            instance: PlacedInstance::new(id, signature),
            port_cursor: None,
            param_cursor: None,
        });
        Ok(())
    }

    /// `input|output|bidir <name>`: placed at once, the selection is kept.
    fn place_pin(&mut self, token: &NetlistToken) -> Result<()> {
        let name = self.read_till_delim()?;
        let signature = self.lookup(token)?;
        self.output
            .push(Instance::Placed(PlacedInstance::new(name, signature)));
        Ok(())
    }

    fn apply_block(&mut self, token: &NetlistToken, ports: bool) -> Result<()> {
        let before_instance = || NetsheetError::PortParamBeforeInstance {
            location: token.location.clone(),
        };
        if self.selected.is_none() {
            return Err(before_instance());
        }
        let entries = self.read_block()?;

        let selection = self.selected.as_mut().ok_or_else(before_instance)?;
        let signature = selection.instance.signature;
        let (names, overrides, cursor) = if ports {
            (
                &signature.ports,
                &mut selection.instance.port_overrides,
                &mut selection.port_cursor,
            )
        } else {
            (
                &signature.params,
                &mut selection.instance.param_overrides,
                &mut selection.param_cursor,
            )
        };
        apply_entries(&entries, names, overrides, cursor)
    }

    fn lookup(&self, token: &NetlistToken) -> Result<&'a Signature<'a>> {
        self.table
            .get(&token.lexeme)
            .ok_or_else(|| NetsheetError::Undefined {
                id: token.lexeme.clone(),
                location: token.location.clone(),
            })
    }

    fn current(&self, context: &str) -> Result<&'t NetlistToken> {
        self.tokens
            .get(self.pos)
            .ok_or_else(|| NetsheetError::unexpected_eof(context))
    }

    fn skip_newlines(&mut self, context: &str) -> Result<()> {
        while self.current(context)?.kind == TokenKind::Newline {
            self.pos += 1;
        }
        Ok(())
    }

    /// Concatenate lexemes up to the next newline, `;`, `:` or `}`.
    fn read_till_delim(&mut self) -> Result<String> {
        self.skip_newlines("before a name")?;
        let mut text = String::new();
        loop {
            let token = self.current("inside a name")?;
            if is_delimiter(token) {
                if text.is_empty() {
                    return Err(unexpected(token));
                }
                return Ok(text);
            }
            text.push_str(&token.lexeme);
            self.pos += 1;
        }
    }

    /// `'{' ( entry (':' entry)? )* '}'`, pairs separated by whitespace,
    /// `;` or newlines.
    fn read_block(&mut self) -> Result<Vec<BlockEntry>> {
        self.skip_newlines("before '{'")?;
        let open = self.current("before '{'")?;
        if !open.is(TokenKind::Punctuation, "{") {
            return Err(unexpected(open));
        }
        self.pos += 1;

        let mut entries = Vec::new();
        let mut pending: Option<BlockEntry> = None;
        loop {
            self.skip_newlines("inside block")?;
            let token = self.current("inside block")?;
            if token.is(TokenKind::Punctuation, "}") || token.is(TokenKind::Punctuation, ";") {
                if pending.is_some() {
                    // `name:` with no value
                    return Err(unexpected(token));
                }
                self.pos += 1;
                if token.lexeme == "}" {
                    return Ok(entries);
                }
                continue;
            }

            let location = token.location.clone();
            let text = self.read_entry()?;
            let next = self.current("inside block")?;
            if next.is(TokenKind::Punctuation, ":") {
                if pending.is_some() {
                    return Err(unexpected(next));
                }
                self.pos += 1;
                pending = Some(BlockEntry {
                    name: text,
                    value: None,
                    location,
                });
                continue;
            }

            match pending.take() {
                Some(mut entry) => {
                    entry.value = Some(text);
                    entries.push(entry);
                }
                None => entries.push(BlockEntry {
                    name: text,
                    value: None,
                    location,
                }),
            }
        }
    }

    /// One block entry: adjacent tokens up to whitespace or a delimiter.
    fn read_entry(&mut self) -> Result<String> {
        let first = self.current("inside block")?;
        if is_delimiter(first) {
            return Err(unexpected(first));
        }
        self.pos += 1;

        let mut text = first.lexeme.clone();
        let mut prev = first;
        while let Some(next) = self.tokens.get(self.pos) {
            if is_delimiter(next) || !adjacent(prev, next) {
                break;
            }
            text.push_str(&next.lexeme);
            self.pos += 1;
            prev = next;
        }
        Ok(text)
    }
}

/// Apply block entries to one override vector.
///
/// A named entry moves the cursor to its index; a positional entry lands
/// one past the cursor.
fn apply_entries(
    entries: &[BlockEntry],
    names: &[String],
    overrides: &mut [Option<String>],
    cursor: &mut Option<usize>,
) -> Result<()> {
    for entry in entries {
        let index = match &entry.value {
            Some(_) => names.iter().position(|n| *n == entry.name).ok_or_else(|| {
                NetsheetError::BadPortOrParam {
                    name: entry.name.clone(),
                    location: entry.location.clone(),
                }
            })?,
            None => {
                let next = cursor.map_or(0, |c| c + 1);
                if next >= names.len() {
                    return Err(NetsheetError::PositionalPastEnd {
                        location: entry.location.clone(),
                    });
                }
                next
            }
        };
        overrides[index] = Some(entry.value.clone().unwrap_or_else(|| entry.name.clone()));
        *cursor = Some(index);
    }
    Ok(())
}

/// True if `next` starts right where `prev` ends, with no whitespace between.
fn adjacent(prev: &NetlistToken, next: &NetlistToken) -> bool {
    let quotes = if prev.kind == TokenKind::Str { 2 } else { 0 };
    let width = prev.lexeme.chars().count() + quotes;
    prev.location.file == next.location.file
        && prev.location.line == next.location.line
        && prev.location.column + width == next.location.column
}

fn is_delimiter(token: &NetlistToken) -> bool {
    token.kind == TokenKind::Newline
        || (token.kind == TokenKind::Punctuation && matches!(token.lexeme.as_str(), ";" | ":" | "}"))
}

fn unexpected(token: &NetlistToken) -> NetsheetError {
    let lexeme = if token.kind == TokenKind::Newline {
        "newline".to_string()
    } else {
        token.lexeme.clone()
    };
    NetsheetError::unexpected_token(&token.location, lexeme)
}
