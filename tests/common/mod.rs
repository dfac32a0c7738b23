#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zaplink_core::domain::entities::BitMatrix;
use zaplink_core::engine::{RenderedImage, is_finder_pattern};
use zaplink_core::keygen::Clock;

/// Clock returning each scripted value once, then repeating the last one.
pub struct ScriptedClock {
    values: Vec<i64>,
    calls: AtomicUsize,
}

impl ScriptedClock {
    pub fn new(values: Vec<i64>) -> Self {
        assert!(!values.is_empty());
        Self {
            values,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Clock for ScriptedClock {
    fn now_millis(&self) -> i64 {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        self.values[i.min(self.values.len() - 1)]
    }
}

/// Clock that never moves.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Dark/light layout of a 7x7 finder pattern at offset `(dx, dy)`.
fn finder_module(dx: u32, dy: u32) -> bool {
    let ring = dx == 0 || dy == 0 || dx == 6 || dy == 6;
    let core = (2..=4).contains(&dx) && (2..=4).contains(&dy);
    ring || core
}

/// Square matrix with real finder patterns at the margin-aware anchors and
/// `data(x, y)` everywhere else.
pub fn matrix_with_finders(size: u32, margin: u32, mut data: impl FnMut(u32, u32) -> bool) -> BitMatrix {
    let far = size - margin - 7;
    BitMatrix::from_fn(size, |x, y| {
        for (ax, ay) in [(margin, margin), (far, margin), (margin, far)] {
            if x >= ax && x < ax + 7 && y >= ay && y < ay + 7 {
                return finder_module(x - ax, y - ay);
            }
        }
        let in_quiet_zone =
            x < margin || y < margin || x >= size - margin || y >= size - margin;
        !in_quiet_zone && data(x, y)
    })
}

/// Seeded pseudo-random data modules around real finder patterns.
pub fn random_matrix(size: u32, margin: u32, seed: u64) -> BitMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    matrix_with_finders(size, margin, |_, _| rng.random_bool(0.5))
}

/// Every data module dark.
pub fn dark_matrix(size: u32, margin: u32) -> BitMatrix {
    matrix_with_finders(size, margin, |_, _| true)
}

/// RGBA at the center pixel of module `(x, y)`.
pub fn module_center(image: &RenderedImage, x: u32, y: u32) -> [u8; 4] {
    let layout = image.layout();
    let half = layout.module_size / 2;
    image.pixel(
        layout.offset_x + x * layout.module_size + half,
        layout.offset_y + y * layout.module_size + half,
    )
}

pub fn is_dark(pixel: [u8; 4]) -> bool {
    let [r, g, b, a] = pixel;
    let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
    a > 0 && luma < 128
}

pub fn is_finder(x: u32, y: u32, size: u32, margin: u32) -> bool {
    is_finder_pattern(x, y, size, margin)
}

/// Runs the rendered image through a QR decoder and returns the payload.
pub fn decode(image: &RenderedImage) -> Option<String> {
    let luma = image.as_image().to_luma8();
    let (width, height) = luma.dimensions();

    rxing::helpers::detect_in_luma(
        luma.into_raw(),
        width,
        height,
        Some(rxing::BarcodeFormat::QR_CODE),
    )
    .ok()
    .map(|result| result.getText().to_string())
}
