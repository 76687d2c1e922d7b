//! Bounding geometry of a library entry.

use crate::config::LayoutConfig;
use crate::error::{NetsheetError, Result};
use crate::sexpr::Node;

/// An (x, y) point in schematic units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Bounding-box edge a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Edge of a port anchor in symbol-local coordinates.
    ///
    /// Edges are tested in the order left, right, top, bottom, so a corner
    /// anchor counts as left or right.
    pub fn classify(anchor: Point, width: i64, height: i64) -> Option<Edge> {
        if anchor.x == 0 {
            Some(Edge::Left)
        } else if anchor.x == width {
            Some(Edge::Right)
        } else if anchor.y == 0 {
            Some(Edge::Top)
        } else if anchor.y == height {
            Some(Edge::Bottom)
        } else {
            None
        }
    }

    fn bit(self) -> u8 {
        match self {
            Edge::Left => 1,
            Edge::Right => 2,
            Edge::Top => 4,
            Edge::Bottom => 8,
        }
    }
}

/// Set of edges that carry at least one port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortSides(u8);

impl PortSides {
    pub fn insert(&mut self, edge: Edge) {
        self.0 |= edge.bit();
    }

    pub fn contains(self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Placement geometry of one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: i64,
    pub height: i64,
    pub port_sides: PortSides,
    /// Column cursor when the instance was placed
    pub x: i64,
    pub y: i64,
}

impl Geometry {
    /// Measure a library entry; `x` and `y` start at zero.
    pub fn measure(node: &Node, instance: &str) -> Result<Self> {
        let rect = node
            .first_list("rect")
            .ok_or_else(|| NetsheetError::malformed_geometry(instance, "no bounding rect"))?;
        let [x0, y0, x1, y1] = rect_coords(rect, instance)?;
        let (width, height) = (x1 - x0, y1 - y0);

        let mut port_sides = PortSides::default();
        for port in node.lists("port") {
            for pt in port.lists("pt") {
                let anchor = point(pt, instance)?;
                if let Some(edge) = Edge::classify(anchor, width, height) {
                    port_sides.insert(edge);
                }
            }
        }

        Ok(Self {
            width,
            height,
            port_sides,
            x: 0,
            y: 0,
        })
    }

    /// Height the instance occupies in its column, stubs and labels included.
    pub fn total_height(&self, config: &LayoutConfig) -> i64 {
        let mut total = self.height;
        if self.port_sides.contains(Edge::Top) {
            total += config.stub_vertical;
        }
        if self.port_sides.contains(Edge::Bottom) {
            total += config.stub_vertical + config.font_height;
        }
        total
    }

    /// Top-left corner of the placed symbol; top stubs push it down.
    pub fn origin(&self, config: &LayoutConfig) -> Point {
        let pad = if self.port_sides.contains(Edge::Top) {
            config.stub_vertical
        } else {
            0
        };
        Point::new(self.x, self.y + pad)
    }
}

/// The four integer coordinates of a `rect` list.
pub fn rect_coords(rect: &Node, instance: &str) -> Result<[i64; 4]> {
    let mut coords = [0; 4];
    for (i, slot) in coords.iter_mut().enumerate() {
        *slot = rect
            .children()
            .get(i)
            .and_then(Node::as_int)
            .ok_or_else(|| NetsheetError::malformed_geometry(instance, "rect needs four integers"))?;
    }
    Ok(coords)
}

/// Move a `rect` so its first corner is at (x, y), keeping its size.
pub fn move_rect(rect: &mut Node, x: i64, y: i64, instance: &str) -> Result<()> {
    let [x0, y0, x1, y1] = rect_coords(rect, instance)?;
    set_rect(rect, [x, y, x1 + x - x0, y1 + y - y0]);
    Ok(())
}

/// Overwrite the coordinates of a `rect` already checked by [`rect_coords`].
pub fn set_rect(rect: &mut Node, coords: [i64; 4]) {
    for (child, value) in rect.children_mut().iter_mut().zip(coords) {
        *child = Node::Int(value);
    }
}

/// The point of a `pt` list.
pub fn point(pt: &Node, instance: &str) -> Result<Point> {
    match pt.children() {
        [Node::Int(x), Node::Int(y), ..] => Ok(Point::new(*x, *y)),
        _ => Err(NetsheetError::malformed_geometry(instance, "pt needs two integers")),
    }
}
