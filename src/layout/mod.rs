//! Sheet layout and code generation.
//!
//! Instances are stacked top to bottom in columns. For each one the
//! library tree is cloned, its bounding rect is moved to the column cursor,
//! annotation blocks are stacked underneath, every labeled port gets a
//! connector stub, parameter overrides are written and the instance label
//! is renamed. The clone is then serialized, followed by its connectors.
//!
//! ```text
//!   x = 320              x + 400
//!   +------+ y = 320     +------+
//!   | inst |             | inst |
//!   +------+             +------+
//!      | height + 16, rounded to 8
//!   +------+
//!   | inst |
//!   +------+
//! ```

mod codegen;
mod connector;
mod geometry;

pub use codegen::{Generator, HEADER};
pub use connector::{is_bus_name, Connector};
pub use geometry::{Edge, Geometry, Point, PortSides};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::netlist::Instance;

/// Generate a sheet with the given layout constants.
pub fn generate(instances: &[Instance<'_>], config: LayoutConfig) -> Result<String> {
    Generator::new(config).generate(instances)
}
