//! Pixel layout of a module grid inside the requested image.

use super::error::RenderError;
use super::geometry::Rect;

/// Side length of a finder pattern in modules.
pub const FINDER_SIZE: u32 = 7;

/// Integer module sizing with leftover pixels split around the grid.
///
/// `image_size` always equals the requested size: the grid occupies
/// `module_size * matrix_size` pixels and the remainder is split with
/// `extra / 2` in front on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub matrix_size: u32,
    pub module_size: u32,
    pub image_size: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl Layout {
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidDimensions`] when the matrix is empty or
    /// a module would be narrower than one pixel.
    pub fn compute(matrix_size: u32, requested_size: u32) -> Result<Self, RenderError> {
        let invalid = RenderError::InvalidDimensions {
            matrix_size,
            size: requested_size,
        };
        if matrix_size == 0 {
            return Err(invalid);
        }

        let module_size = requested_size / matrix_size;
        if module_size == 0 {
            return Err(invalid);
        }

        let extra = requested_size - module_size * matrix_size;
        Ok(Self {
            matrix_size,
            module_size,
            image_size: requested_size,
            offset_x: extra / 2,
            offset_y: extra / 2,
        })
    }

    /// Leftover pixels not covered by whole modules.
    pub fn extra_pixels(&self) -> u32 {
        self.image_size - self.module_size * self.matrix_size
    }

    /// Pixel rectangle of module `(x, y)`.
    pub fn module_rect(&self, x: u32, y: u32) -> Rect {
        let size = f64::from(self.module_size);
        Rect::square(
            f64::from(self.offset_x) + f64::from(x) * size,
            f64::from(self.offset_y) + f64::from(y) * size,
            size,
        )
    }

    /// Pixel origin of module `(x, y)`; coordinates may be negative.
    pub fn module_origin(&self, x: i64, y: i64) -> (f64, f64) {
        let size = i64::from(self.module_size);
        (
            (i64::from(self.offset_x) + x * size) as f64,
            (i64::from(self.offset_y) + y * size) as f64,
        )
    }
}

/// Top-left module coordinates of the three finder patterns:
/// top-left, top-right, bottom-left.
pub fn finder_anchors(matrix_size: u32, margin: u32) -> [(i64, i64); 3] {
    let n = i64::from(matrix_size);
    let m = i64::from(margin);
    let far = n - m - i64::from(FINDER_SIZE);
    [(m, m), (far, m), (m, far)]
}

/// True when module `(x, y)` falls inside one of the three finder regions.
pub fn is_finder_pattern(x: u32, y: u32, matrix_size: u32, margin: u32) -> bool {
    let (x, y) = (i64::from(x), i64::from(y));
    let side = i64::from(FINDER_SIZE);
    finder_anchors(matrix_size, margin)
        .iter()
        .any(|&(ax, ay)| x >= ax && x < ax + side && y >= ay && y < ay + side)
}
