//! RGBA pixel buffer with aliased shape filling.

use image::{DynamicImage, Rgba, RgbImage, RgbaImage, imageops};

use super::error::RenderError;
use super::geometry::Geometry;
use super::paint::Paint;
use crate::domain::entities::Color;

/// Straight-alpha RGBA raster.
///
/// A pixel is painted when its center lies inside the shape being filled.
/// Nothing is smoothed, so identical inputs always produce identical bytes.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

/// Reserves a zeroed buffer of `width * height * channels` bytes.
fn reserve(width: u32, height: u32, channels: usize) -> Result<Vec<u8>, RenderError> {
    let allocation = || RenderError::Allocation { width, height };
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(allocation)?;

    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| allocation())?;
    buffer.resize(len, 0);
    Ok(buffer)
}

impl Canvas {
    /// Allocates a fully transparent canvas.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Allocation`] when the buffer cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let image = RgbaImage::from_raw(width, height, reserve(width, height, 4)?)
            .ok_or(RenderError::Allocation { width, height })?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    pub fn fill_all(&mut self, color: Color) {
        let rgba = Rgba(color.to_rgba());
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Paints every pixel whose center lies inside `shape`. Returns the
    /// number of pixels written.
    pub fn fill(&mut self, shape: &Geometry, paint: &Paint) -> usize {
        let (width, height) = self.image.dimensions();
        let bounds = shape.bounds();
        let x0 = bounds.x.floor().max(0.0) as u32;
        let y0 = bounds.y.floor().max(0.0) as u32;
        let x1 = bounds.right().ceil().clamp(0.0, f64::from(width)) as u32;
        let y1 = bounds.bottom().ceil().clamp(0.0, f64::from(height)) as u32;

        let mut painted = 0;
        for y in y0..y1 {
            let cy = f64::from(y) + 0.5;
            for x in x0..x1 {
                let cx = f64::from(x) + 0.5;
                if shape.contains(cx, cy) {
                    self.image.put_pixel(x, y, Rgba(paint.color_at(cx, cy).to_rgba()));
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Composites `image` over the canvas with its top-left corner at
    /// `(x, y)`, clipping anything that falls outside.
    pub fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.image, image, x, y);
    }

    /// Converts into an image, keeping the alpha channel only when asked.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Allocation`] when the RGB buffer for an opaque
    /// image cannot be reserved.
    pub fn into_image(self, with_alpha: bool) -> Result<DynamicImage, RenderError> {
        if with_alpha {
            return Ok(DynamicImage::ImageRgba8(self.image));
        }

        let (width, height) = self.image.dimensions();
        let mut rgb = reserve(width, height, 3)?;
        for (dst, src) in rgb.chunks_exact_mut(3).zip(self.image.pixels()) {
            dst.copy_from_slice(&src.0[..3]);
        }

        let rgb = RgbImage::from_raw(width, height, rgb)
            .ok_or(RenderError::Allocation { width, height })?;
        Ok(DynamicImage::ImageRgb8(rgb))
    }
}
