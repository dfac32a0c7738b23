//! Minimal 2D shape model used by the rasterizer.
//!
//! Shapes answer a single question: does a point lie inside? The canvas
//! samples pixel centers against that test, which yields crisp, aliased
//! edges with no smoothing.

/// Number of line segments a quadratic curve is flattened into.
const QUAD_SEGMENTS: u32 = 16;

/// Axis-aligned rectangle, half-open on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn square(x: f64, y: f64, side: f64) -> Self {
        Self::new(x, y, side, side)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrinks the rectangle by `amount` on every side.
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when the two rectangles share interior area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }
}

/// A fillable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rect(Rect),
    /// Rectangle with circular corners; `arc` is the corner diameter.
    RoundRect { rect: Rect, arc: f64 },
    /// Ellipse inscribed in the rectangle.
    Ellipse(Rect),
    /// Closed polygon, filled with the even-odd rule.
    Polygon(Vec<(f64, f64)>),
    /// Points inside the first shape but outside the second.
    Difference(Box<Geometry>, Box<Geometry>),
}

impl Geometry {
    /// `outer` with `hole` cut out.
    pub fn difference(outer: Geometry, hole: Geometry) -> Self {
        Geometry::Difference(Box::new(outer), Box::new(hole))
    }

    /// Smallest rectangle enclosing the shape.
    pub fn bounds(&self) -> Rect {
        match self {
            Geometry::Rect(rect) | Geometry::Ellipse(rect) => *rect,
            Geometry::RoundRect { rect, .. } => *rect,
            Geometry::Polygon(points) => polygon_bounds(points),
            Geometry::Difference(outer, _) => outer.bounds(),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Geometry::Rect(rect) => rect.contains(x, y),
            Geometry::RoundRect { rect, arc } => round_rect_contains(rect, *arc, x, y),
            Geometry::Ellipse(rect) => ellipse_contains(rect, x, y),
            Geometry::Polygon(points) => polygon_contains(points, x, y),
            Geometry::Difference(outer, hole) => outer.contains(x, y) && !hole.contains(x, y),
        }
    }
}

fn ellipse_contains(rect: &Rect, x: f64, y: f64) -> bool {
    let rx = rect.width / 2.0;
    let ry = rect.height / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }

    let dx = (x - (rect.x + rx)) / rx;
    let dy = (y - (rect.y + ry)) / ry;
    dx * dx + dy * dy <= 1.0
}

fn round_rect_contains(rect: &Rect, arc: f64, x: f64, y: f64) -> bool {
    if !rect.contains(x, y) {
        return false;
    }

    let radius = (arc / 2.0).min(rect.width / 2.0).min(rect.height / 2.0);
    if radius <= 0.0 {
        return true;
    }

    let dx = if x < rect.x + radius {
        rect.x + radius - x
    } else if x > rect.right() - radius {
        x - (rect.right() - radius)
    } else {
        0.0
    };
    let dy = if y < rect.y + radius {
        rect.y + radius - y
    } else if y > rect.bottom() - radius {
        y - (rect.bottom() - radius)
    } else {
        0.0
    };

    // Only the four corner squares are trimmed.
    dx == 0.0 || dy == 0.0 || dx * dx + dy * dy <= radius * radius
}

fn polygon_bounds(points: &[(f64, f64)]) -> Rect {
    let Some(&(first_x, first_y)) = points.first() else {
        return Rect::new(0.0, 0.0, 0.0, 0.0);
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first_x, first_y, first_x, first_y);
    for &(x, y) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

fn polygon_contains(points: &[(f64, f64)], x: f64, y: f64) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Builds a closed [`Geometry::Polygon`] from line and quadratic segments.
#[derive(Debug, Default)]
pub struct PathBuilder {
    points: Vec<(f64, f64)>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the outline at `(x, y)`, discarding anything drawn so far.
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.points.clear();
        self.points.push((x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.points.push((x, y));
        self
    }

    /// Quadratic Bézier from the current point through control `(cx, cy)` to `(x, y)`.
    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        let (x0, y0) = self.points.last().copied().unwrap_or((cx, cy));
        for step in 1..=QUAD_SEGMENTS {
            let t = f64::from(step) / f64::from(QUAD_SEGMENTS);
            let u = 1.0 - t;
            self.points.push((
                u * u * x0 + 2.0 * u * t * cx + t * t * x,
                u * u * y0 + 2.0 * u * t * cy + t * t * y,
            ));
        }
        self
    }

    pub fn close(self) -> Geometry {
        Geometry::Polygon(self.points)
    }
}
