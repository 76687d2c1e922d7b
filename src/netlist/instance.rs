//! Resolved netlist entries.

use crate::library::Signature;

/// One entry of the resolved netlist, in emission order.
#[derive(Debug, Clone)]
pub enum Instance<'a> {
    /// A library entry to place on the sheet
    Placed(PlacedInstance<'a>),
    /// Start a new layout column
    ColumnBreak,
}

/// A library entry with its instance name and overrides.
///
/// `port_overrides` and `param_overrides` are aligned index-for-index with
/// `signature.ports` and `signature.params`.
#[derive(Debug, Clone)]
pub struct PlacedInstance<'a> {
    pub id: String,
    pub signature: &'a Signature<'a>,
    pub port_overrides: Vec<Option<String>>,
    pub param_overrides: Vec<Option<String>>,
}

impl<'a> PlacedInstance<'a> {
    /// New instance with every override absent.
    pub fn new(id: String, signature: &'a Signature<'a>) -> Self {
        Self {
            id,
            signature,
            port_overrides: vec![None; signature.ports.len()],
            param_overrides: vec![None; signature.params.len()],
        }
    }

    /// Net label assigned to the named port, if any.
    pub fn port_override(&self, name: &str) -> Option<&str> {
        let index = self.signature.port_index(name)?;
        self.port_overrides.get(index)?.as_deref()
    }

    /// Value assigned to the named parameter, if any.
    pub fn param_override(&self, name: &str) -> Option<&str> {
        let index = self.signature.param_index(name)?;
        self.param_overrides.get(index)?.as_deref()
    }
}
