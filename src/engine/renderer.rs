use std::sync::Arc;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, warn};

use super::body::{Neighbors, module_geometry};
use super::canvas::Canvas;
use super::error::RenderError;
use super::eye::{DOT_MODULES, DOT_OFFSET, dot_geometry, frame_geometry};
use super::geometry::{Geometry, Rect};
use super::layout::{FINDER_SIZE, Layout, finder_anchors, is_finder_pattern};
use super::logo::LogoPlacement;
use super::paint::Paint;
use crate::domain::entities::{BitMatrix, Color, QrConfig};
use crate::domain::providers::LogoSource;

/// A finished raster together with the layout it was drawn with.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    image: DynamicImage,
    layout: Layout,
}

impl RenderedImage {
    /// Side length in pixels; always the requested `size`.
    pub fn size(&self) -> u32 {
        self.layout.image_size
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// RGBA value at `(x, y)`. Opaque images report alpha 255.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

/// Draws styled QR codes.
///
/// Rendering is a fixed sequence of passes over a fresh canvas: background,
/// body modules, custom eyes, logo. Antialiasing is never applied, so the
/// same matrix and config always produce byte-identical output.
pub struct QrRenderer<L: LogoSource> {
    logo_source: Arc<L>,
}

impl<L: LogoSource> QrRenderer<L> {
    pub fn new(logo_source: Arc<L>) -> Self {
        Self { logo_source }
    }

    /// Renders `matrix` at exactly `config.size` pixels square.
    ///
    /// A logo that cannot be loaded is skipped with a warning; the image is
    /// still produced.
    ///
    /// # Errors
    ///
    /// - [`RenderError::InvalidDimensions`] when `config.size` is smaller
    ///   than the matrix width
    /// - [`RenderError::Allocation`] when the pixel buffer cannot be reserved
    pub fn render(&self, matrix: &BitMatrix, config: &QrConfig) -> Result<RenderedImage, RenderError> {
        info!(
            matrix_size = matrix.width(),
            size = config.size,
            body_shape = %config.body.shape,
            eye_shape = %config.eye.shape,
            "Starting QR render"
        );

        let layout = Layout::compute(matrix.width(), config.size)?;
        if layout.extra_pixels() > 0 {
            info!(
                "Adding {} extra pixels ({} each side) to reach exact size",
                layout.extra_pixels(),
                layout.offset_x
            );
        }
        debug!(
            module_size = layout.module_size,
            offset_x = layout.offset_x,
            offset_y = layout.offset_y,
            "Computed layout"
        );

        let logo = self.load_logo(config);
        let placement = match (&logo, &config.logo) {
            (Some(_), Some(logo_config)) => Some(LogoPlacement::compute(logo_config, &layout)),
            _ => None,
        };

        let mut canvas = Canvas::new(layout.image_size, layout.image_size)?;
        if !config.transparent_background {
            canvas.fill_all(Color::parse_or_black(&config.background_color));
        }

        let custom_eyes = config.has_custom_eyes();
        let drawn = draw_body(&mut canvas, matrix, config, &layout, placement.as_ref(), custom_eyes);
        debug!(modules = drawn, custom_eyes, "Drew body modules");

        if custom_eyes {
            draw_eyes(&mut canvas, matrix, config, &layout);
        }

        if let (Some(image), Some(placement)) = (&logo, &placement) {
            placement.draw(&mut canvas, image);
        }

        let image = canvas.into_image(config.transparent_background)?;

        metrics::counter!(
            "qr_renders_total",
            "body_shape" => config.body.shape.as_str(),
            "eye_shape" => config.eye.shape.as_str()
        )
        .increment(1);

        info!(
            size = layout.image_size,
            body_shape = %config.body.shape,
            eye_shape = %config.eye.shape,
            "QR render completed"
        );

        Ok(RenderedImage { image, layout })
    }

    fn load_logo(&self, config: &QrConfig) -> Option<DynamicImage> {
        let path = config.logo_path()?;
        match self.logo_source.load(path) {
            Ok(image) => {
                debug!(path, width = image.width(), height = image.height(), "Loaded logo");
                Some(image)
            }
            Err(e) => {
                warn!(path, error = %e, "Could not load logo, rendering without it");
                metrics::counter!("qr_logo_failures_total").increment(1);
                None
            }
        }
    }
}

/// Body pass. Finder modules are skipped when custom eyes replace them and
/// drawn as plain squares otherwise. Returns the number of modules drawn.
fn draw_body(
    canvas: &mut Canvas,
    matrix: &BitMatrix,
    config: &QrConfig,
    layout: &Layout,
    placement: Option<&LogoPlacement>,
    custom_eyes: bool,
) -> usize {
    let n = matrix.width();
    let paint = Paint::for_body(&config.body, layout.image_size);
    let mut drawn = 0;

    for y in 0..n {
        for x in 0..n {
            if !matrix.get(x, y) {
                continue;
            }

            let cell = layout.module_rect(x, y);
            if placement.is_some_and(|p| p.clears(&cell)) {
                continue;
            }

            let geometry = if is_finder_pattern(x, y, n, config.margin) {
                if custom_eyes {
                    continue;
                }
                Geometry::Rect(cell)
            } else {
                module_geometry(config.body.shape, cell, Neighbors::of(matrix, x, y))
            };

            canvas.fill(&geometry, &paint);
            drawn += 1;
        }
    }

    drawn
}

fn draw_eyes(canvas: &mut Canvas, matrix: &BitMatrix, config: &QrConfig, layout: &Layout) {
    let shape = config.eye.shape;
    let outer = Paint::Solid(Color::parse_or_black(&config.eye.color_outer));
    let inner = Paint::Solid(Color::parse_or_black(&config.eye.color_inner));
    let module = f64::from(layout.module_size);

    for (ax, ay) in finder_anchors(matrix.width(), config.margin) {
        let (px, py) = layout.module_origin(ax, ay);
        let frame = Rect::square(px, py, f64::from(FINDER_SIZE) * module);
        canvas.fill(&frame_geometry(shape, frame, module), &outer);

        let dot_offset = f64::from(DOT_OFFSET) * module;
        let dot = Rect::square(px + dot_offset, py + dot_offset, f64::from(DOT_MODULES) * module);
        canvas.fill(&dot_geometry(shape, dot), &inner);
    }
}
