//! Centered logo overlay and the module clearance around it.

use image::DynamicImage;
use image::imageops::{self, FilterType};

use super::canvas::Canvas;
use super::geometry::{Geometry, Rect};
use super::layout::Layout;
use super::paint::Paint;
use crate::domain::entities::{Color, LogoConfig};

/// Where the logo, its background and its clearance land on the image.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoPlacement {
    /// Side of the scaled logo in pixels.
    pub logo_size: u32,
    /// Top-left corner of the logo; identical on both axes.
    pub logo_origin: i64,
    pub background: Option<(Geometry, Color)>,
    /// Area in which body modules are suppressed.
    pub clearance: Option<Rect>,
}

impl LogoPlacement {
    pub fn compute(config: &LogoConfig, layout: &Layout) -> Self {
        let image_size = i64::from(layout.image_size);
        let logo_size = (f64::from(layout.image_size) * config.size_ratio).max(0.0) as u32;
        let logo_origin = (image_size - i64::from(logo_size)) / 2;
        let padding = i64::from(config.padding);

        let background = config.background_enabled.then(|| {
            let rect = Rect::square(
                (logo_origin - padding) as f64,
                (logo_origin - padding) as f64,
                (i64::from(logo_size) + 2 * padding) as f64,
            );
            let shape = if config.background_rounded {
                Geometry::RoundRect {
                    rect,
                    arc: f64::from(config.background_corner_radius),
                }
            } else {
                Geometry::Rect(rect)
            };
            (shape, Color::parse_or_black(&config.background_color))
        });

        let clearance = config.remove_quiet_zone.then(|| {
            let inflate = padding + i64::from(config.margin_size) * i64::from(layout.module_size);
            Rect::square(
                (logo_origin - inflate) as f64,
                (logo_origin - inflate) as f64,
                (i64::from(logo_size) + 2 * inflate) as f64,
            )
        });

        Self {
            logo_size,
            logo_origin,
            background,
            clearance,
        }
    }

    /// True when a module occupying `cell` must be left out for the logo.
    pub fn clears(&self, cell: &Rect) -> bool {
        self.clearance.is_some_and(|area| area.intersects(cell))
    }

    /// Paints the optional background, then the logo scaled into its square.
    pub fn draw(&self, canvas: &mut Canvas, logo: &DynamicImage) {
        if let Some((shape, color)) = &self.background {
            canvas.fill(shape, &Paint::Solid(*color));
        }

        if self.logo_size == 0 {
            return;
        }
        let scaled = imageops::resize(
            &logo.to_rgba8(),
            self.logo_size,
            self.logo_size,
            FilterType::Triangle,
        );
        canvas.draw_image(&scaled, self.logo_origin, self.logo_origin);
    }
}
