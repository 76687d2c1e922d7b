//! Sheet generation: places each instance and serializes the result.

use super::connector::{is_bus_name, Connector};
use super::geometry::{move_rect, point, rect_coords, set_rect, Edge, Geometry, Point};
use crate::config::LayoutConfig;
use crate::error::{NetsheetError, Result};
use crate::netlist::{Instance, PlacedInstance};
use crate::sexpr::{self, LabelSlot, Node};

/// First list of every generated sheet.
pub const HEADER: &str = "(header \"graphic\" (version \"1.4\"))\n";

/// Annotation blocks grow by their own height minus this amount.
const ANNOTATION_TRIM: i64 = 8;

/// Column-layout generator.
pub struct Generator {
    config: LayoutConfig,
    x: i64,
    y: i64,
    out: String,
}

impl Generator {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            x: config.start_x,
            y: config.start_y,
            out: HEADER.to_string(),
            config,
        }
    }

    /// Current column cursor.
    pub fn cursor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Lay out every instance in order and return the sheet text.
    pub fn generate(mut self, instances: &[Instance<'_>]) -> Result<String> {
        for instance in instances {
            self.push(instance)?;
        }
        Ok(self.out)
    }

    /// Lay out one netlist entry.
    pub fn push(&mut self, instance: &Instance<'_>) -> Result<()> {
        match instance {
            Instance::ColumnBreak => {
                self.x += self.config.column_width;
                self.y = self.config.start_y;
                Ok(())
            }
            Instance::Placed(placed) => self.place(placed),
        }
    }

    fn place(&mut self, instance: &PlacedInstance<'_>) -> Result<()> {
        let id = instance.id.as_str();
        let mut node = instance.signature.definition.clone();

        let mut geo = Geometry::measure(&node, id)?;
        geo.x = self.x;
        geo.y = self.y;
        let total_height = geo.total_height(&self.config);
        self.y += total_height + self.config.spacing;

        let origin = geo.origin(&self.config);
        let rect = node
            .first_list_mut("rect")
            .ok_or_else(|| NetsheetError::malformed_geometry(id, "no bounding rect"))?;
        move_rect(rect, origin.x, origin.y, id)?;

        self.stack_annotations(&mut node, geo.x, geo.y + total_height, id)?;

        let connectors = connectors(&node, &geo, instance, &self.config)?;
        apply_params(&mut node, instance)?;
        *node.label_mut(LabelSlot::Instance).ok_or_else(|| {
            NetsheetError::malformed_geometry(id, "no instance label to rename")
        })? = instance.id.clone();

        log::trace!(
            "placed {} ({}) at ({}, {}) with {} connectors",
            id,
            instance.signature.id,
            origin.x,
            origin.y,
            connectors.len()
        );

        self.out.push_str(&sexpr::to_string(&node));
        for connector in &connectors {
            self.out.push_str(&connector.to_sexpr(&self.config.font));
        }
        Ok(())
    }

    /// Stack annotation blocks below the symbol and advance the cursor past them.
    fn stack_annotations(&mut self, node: &mut Node, x: i64, mut y: i64, id: &str) -> Result<()> {
        for block in node.lists_mut("annotation_block") {
            let rect = block.first_list_mut("rect").ok_or_else(|| {
                NetsheetError::malformed_geometry(id, "annotation block without rect")
            })?;
            let [x0, y0, x1, y1] = rect_coords(rect, id)?;
            let height = 2 * (y1 - y0) - ANNOTATION_TRIM;
            set_rect(rect, [x, y, x + (x1 - x0), y + height]);
            y += height;
            self.y += height;
        }
        let rem = self.y.rem_euclid(self.config.grid);
        if rem != 0 {
            self.y += self.config.grid - rem;
        }
        Ok(())
    }
}

/// Stubs for every port that has a net label.
fn connectors(
    node: &Node,
    geo: &Geometry,
    instance: &PlacedInstance<'_>,
    config: &LayoutConfig,
) -> Result<Vec<Connector>> {
    let id = instance.id.as_str();
    let origin = geo.origin(config);
    let mut out = Vec::new();
    for port in node.lists("port") {
        let pt = port
            .first_list("pt")
            .ok_or_else(|| NetsheetError::malformed_geometry(id, "port without pt"))?;
        let anchor = point(pt, id)?;
        let from = anchor.offset(origin.x, origin.y);
        let to = match Edge::classify(anchor, geo.width, geo.height) {
            Some(Edge::Left) => from.offset(-config.stub_horizontal, 0),
            Some(Edge::Right) => from.offset(config.stub_horizontal, 0),
            Some(Edge::Top) => from.offset(0, -config.stub_vertical),
            Some(Edge::Bottom) => from.offset(0, config.stub_vertical),
            None => from,
        };

        let name = port
            .label(LabelSlot::Instance)
            .ok_or_else(|| NetsheetError::malformed_geometry(id, "port without instance label"))?;
        let declared = port.label(LabelSlot::Type).unwrap_or_default();
        let Some(label) = instance.port_override(name).filter(|l| !l.is_empty()) else {
            continue;
        };
        out.push(Connector {
            from,
            to,
            label: label.to_string(),
            is_bus: is_bus_name(declared) || is_bus_name(label),
        });
    }
    Ok(out)
}

/// Overwrite the value of every overridden parameter.
fn apply_params(node: &mut Node, instance: &PlacedInstance<'_>) -> Result<()> {
    for param in node.lists_mut("parameter") {
        let Some(name) = param.children().first().and_then(Node::as_str) else {
            continue;
        };
        let Some(value) = instance.param_override(name).filter(|v| !v.is_empty()) else {
            continue;
        };
        let value = value.to_string();
        match param.children_mut().get_mut(1) {
            Some(Node::Str(slot)) => *slot = value,
            _ => {
                return Err(NetsheetError::malformed_geometry(
                    &instance.id,
                    "parameter without a string value",
                ))
            }
        }
    }
    Ok(())
}
