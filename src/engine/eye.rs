//! Finder-pattern ("eye") shapes.

use super::geometry::{Geometry, PathBuilder, Rect};
use crate::domain::entities::EyeShape;

/// Modules from the eye corner to its inner dot.
pub const DOT_OFFSET: u32 = 2;
/// Side of the inner dot in modules.
pub const DOT_MODULES: u32 = 3;

const ROUNDED_OUTER_ARC: f64 = 0.25;
const ROUNDED_HOLE_ARC: f64 = 0.2;
const ROUNDED_DOT_ARC: f64 = 0.3;
const LEAF_RADIUS: f64 = 0.4;

/// One-module-thick ring: a 7-module outer shape minus its 5-module hole.
///
/// `outer` is the full 7×7 module box and `wall` is one module in pixels.
pub fn frame_geometry(shape: EyeShape, outer: Rect, wall: f64) -> Geometry {
    let hole = outer.inset(wall);
    let side = outer.width;

    let (outer_shape, hole_shape) = match shape {
        EyeShape::Square => (Geometry::Rect(outer), Geometry::Rect(hole)),
        EyeShape::Rounded => (
            Geometry::RoundRect {
                rect: outer,
                arc: side * ROUNDED_OUTER_ARC,
            },
            Geometry::RoundRect {
                rect: hole,
                arc: side * ROUNDED_HOLE_ARC,
            },
        ),
        EyeShape::Circle => (Geometry::Ellipse(outer), Geometry::Ellipse(hole)),
        EyeShape::Leaf => (leaf(outer), leaf(hole)),
    };

    Geometry::difference(outer_shape, hole_shape)
}

/// Solid 3×3 module center of the eye.
pub fn dot_geometry(shape: EyeShape, dot: Rect) -> Geometry {
    match shape {
        EyeShape::Square => Geometry::Rect(dot),
        EyeShape::Rounded => Geometry::RoundRect {
            rect: dot,
            arc: dot.width * ROUNDED_DOT_ARC,
        },
        EyeShape::Circle => Geometry::Ellipse(dot),
        EyeShape::Leaf => leaf(dot),
    }
}

/// Square with the top-left and bottom-right corners curved.
fn leaf(rect: Rect) -> Geometry {
    let (x, y, s) = (rect.x, rect.y, rect.width);
    let r = s * LEAF_RADIUS;

    PathBuilder::new()
        .move_to(x, y + r)
        .quad_to(x, y, x + r, y)
        .line_to(x + s, y)
        .line_to(x + s, y + s - r)
        .quad_to(x + s, y + s, x + s - r, y + s)
        .line_to(x, y + s)
        .close()
}
