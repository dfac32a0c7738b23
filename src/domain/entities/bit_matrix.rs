//! Immutable module grid produced by a QR symbol encoder.

/// A square grid of QR modules where `true` means a dark module.
///
/// The matrix is built once (usually by a
/// [`MatrixProvider`](crate::domain::providers::MatrixProvider)) and never
/// mutated afterwards. Reads outside the grid return `false`, which is what
/// neighbor inspection at the edges expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: u32,
    modules: Vec<bool>,
}

impl BitMatrix {
    /// Builds a matrix of side `width` by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut modules = Vec::with_capacity((width as usize) * (width as usize));
        for y in 0..width {
            for x in 0..width {
                modules.push(f(x, y));
            }
        }
        Self { width, modules }
    }

    /// Builds a matrix from text rows, `#` marking a dark module.
    ///
    /// Returns `None` when the rows do not form a square.
    ///
    /// # Examples
    ///
    /// ```
    /// use zaplink_core::domain::entities::BitMatrix;
    ///
    /// let matrix = BitMatrix::from_rows(&["#.", ".#"]).unwrap();
    /// assert!(matrix.get(0, 0));
    /// assert!(!matrix.get(1, 0));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let width = rows.len();
        if rows.iter().any(|row| row.chars().count() != width) {
            return None;
        }

        let modules = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| c == '#'))
            .collect();

        Some(Self {
            width: width as u32,
            modules,
        })
    }

    /// Side length in modules.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Same as [`Self::width`]; the grid is always square.
    pub fn height(&self) -> u32 {
        self.width
    }

    /// Returns whether the module at `(x, y)` is dark.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.width {
            return false;
        }
        self.modules[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Number of dark modules.
    pub fn count_dark(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }

    /// Returns a new matrix surrounded by `margin` light modules on every side.
    pub fn with_quiet_zone(&self, margin: u32) -> Self {
        let width = self.width + 2 * margin;
        Self::from_fn(width, |x, y| {
            x >= margin && y >= margin && self.get(x - margin, y - margin)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_layout() {
        let matrix = BitMatrix::from_fn(3, |x, y| x == 2 && y == 1);

        assert_eq!(matrix.width(), 3);
        assert!(matrix.get(2, 1));
        assert!(!matrix.get(1, 2));
        assert_eq!(matrix.count_dark(), 1);
    }

    #[test]
    fn test_get_out_of_range_is_light() {
        let matrix = BitMatrix::from_fn(2, |_, _| true);

        assert!(!matrix.get(2, 0));
        assert!(!matrix.get(0, 5));
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        assert!(BitMatrix::from_rows(&["##", "#"]).is_none());
        assert!(BitMatrix::from_rows(&["###", "###"]).is_none());
    }

    #[test]
    fn test_with_quiet_zone() {
        let matrix = BitMatrix::from_rows(&["#"]).unwrap();
        let padded = matrix.with_quiet_zone(2);

        assert_eq!(padded.width(), 5);
        assert_eq!(padded.count_dark(), 1);
        assert!(padded.get(2, 2));
        assert!(!padded.get(0, 0));
    }
}
