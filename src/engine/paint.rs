//! Solid and gradient fills.

use crate::domain::entities::{BodyConfig, Color};

/// Color source evaluated per pixel.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Projection onto `start → end`, clamped at both ends.
    Linear {
        start: (f64, f64),
        end: (f64, f64),
        from: Color,
        to: Color,
    },
    /// Distance from `center` over `radius`, clamped past the radius.
    Radial {
        center: (f64, f64),
        radius: f64,
        from: Color,
        to: Color,
    },
}

impl Paint {
    /// Body paint spanning an `image_size` square.
    ///
    /// Without `color_dark` the paint is solid. With it, the gradient runs
    /// corner to corner (linear) or from the center outwards (radial).
    pub fn for_body(body: &BodyConfig, image_size: u32) -> Self {
        let from = Color::parse_or_black(&body.color);
        let Some(dark) = body.color_dark.as_deref() else {
            return Paint::Solid(from);
        };
        let to = Color::parse_or_black(dark);
        let size = f64::from(image_size);

        if body.gradient_linear {
            Paint::Linear {
                start: (0.0, 0.0),
                end: (size, size),
                from,
                to,
            }
        } else {
            Paint::Radial {
                center: (size / 2.0, size / 2.0),
                radius: size / 2.0,
                from,
                to,
            }
        }
    }

    pub fn color_at(&self, x: f64, y: f64) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear {
                start,
                end,
                from,
                to,
            } => {
                let dx = end.0 - start.0;
                let dy = end.1 - start.1;
                let length_sq = dx * dx + dy * dy;
                let t = if length_sq == 0.0 {
                    0.0
                } else {
                    ((x - start.0) * dx + (y - start.1) * dy) / length_sq
                };
                from.lerp(*to, t)
            }
            Paint::Radial {
                center,
                radius,
                from,
                to,
            } => {
                if *radius <= 0.0 {
                    return *to;
                }
                let distance = (x - center.0).hypot(y - center.1);
                from.lerp(*to, distance / radius)
            }
        }
    }
}
