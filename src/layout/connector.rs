//! Wire stubs generated at instance ports.

use std::fmt::Write;

use super::geometry::Point;

/// An unrouted wire end: a short segment from a port outward, labeled with
/// its net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    /// Port anchor on the placed symbol
    pub from: Point,
    /// Outer end of the stub, where the label sits
    pub to: Point,
    pub label: String,
    pub is_bus: bool,
}

impl Connector {
    /// Serialize in the fixed connector layout.
    pub fn to_sexpr(&self, font: &str) -> String {
        let (from, to) = (self.from, self.to);
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "(connector\n\
             \t(text \"{}\" (rect {} {} {} {}) (font \"{}\"))\n\
             \t(pt {} {})\n\
             \t(pt {} {})\n",
            self.label, to.x, to.y, to.x, to.y, font, from.x, from.y, to.x, to.y
        );
        if self.is_bus {
            out.push_str("\t(bus)\n");
        }
        out.push_str(")\n");
        out
    }
}

/// Net names with a `.` (range) or `,` (list) denote buses.
pub fn is_bus_name(name: &str) -> bool {
    name.contains(['.', ','])
}
