//! Per-module body shapes.

use super::geometry::{Geometry, PathBuilder, Rect};
use crate::domain::entities::{BitMatrix, BodyShape};

/// Fraction of the cell trimmed on each side for [`BodyShape::Circle`].
pub const CIRCLE_INSET_RATIO: f64 = 0.15;

/// Dark/light state of the four cardinal neighbors of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub north: bool,
    pub south: bool,
    pub west: bool,
    pub east: bool,
}

impl Neighbors {
    /// Reads neighbors from the matrix; out-of-range cells count as light.
    pub fn of(matrix: &BitMatrix, x: u32, y: u32) -> Self {
        Self {
            north: y > 0 && matrix.get(x, y - 1),
            south: matrix.get(x, y + 1),
            west: x > 0 && matrix.get(x - 1, y),
            east: matrix.get(x + 1, y),
        }
    }

    pub fn is_isolated(&self) -> bool {
        !(self.north || self.south || self.west || self.east)
    }
}

/// Shape for one dark module occupying `cell`.
pub fn module_geometry(shape: BodyShape, cell: Rect, neighbors: Neighbors) -> Geometry {
    let size = cell.width;
    match shape {
        BodyShape::Square => Geometry::Rect(cell),
        BodyShape::Rounded => Geometry::RoundRect {
            rect: cell,
            arc: (size / 2.0).floor(),
        },
        BodyShape::Circle => Geometry::Ellipse(cell.inset(size * CIRCLE_INSET_RATIO)),
        BodyShape::Dot => Geometry::Ellipse(cell),
        BodyShape::Liquid => liquid(cell, neighbors),
    }
}

/// Blob outline that stays square where it touches a dark neighbor.
///
/// Each corner is rounded only when both adjoining sides face light
/// modules, so runs of dark modules fuse into a continuous shape.
fn liquid(cell: Rect, n: Neighbors) -> Geometry {
    if n.is_isolated() {
        return Geometry::Ellipse(cell);
    }

    let (x, y, s) = (cell.x, cell.y, cell.width);
    let r = (s / 2.0).floor();

    let mut path = PathBuilder::new().move_to(x, y + r);

    path = if !n.north && !n.west {
        path.quad_to(x, y, x + r, y)
    } else {
        path.line_to(x, y).line_to(x + r, y)
    };

    path = if !n.north && !n.east {
        path.line_to(x + s - r, y).quad_to(x + s, y, x + s, y + r)
    } else {
        path.line_to(x + s, y).line_to(x + s, y + r)
    };

    path = if !n.south && !n.east {
        path.line_to(x + s, y + s - r)
            .quad_to(x + s, y + s, x + s - r, y + s)
    } else {
        path.line_to(x + s, y + s).line_to(x + s - r, y + s)
    };

    path = if !n.south && !n.west {
        path.line_to(x + r, y + s).quad_to(x, y + s, x, y + s - r)
    } else {
        path.line_to(x, y + s).line_to(x, y + s - r)
    };

    path.close()
}
