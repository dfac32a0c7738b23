//! Styled QR rendering.
//!
//! Turns a [`BitMatrix`](crate::domain::entities::BitMatrix) and a
//! [`QrConfig`](crate::domain::entities::QrConfig) into a raster image of
//! exactly the requested size.
//!
//! # Passes
//!
//! 1. Background fill (skipped when transparent)
//! 2. Body modules in the configured [`BodyShape`](crate::domain::entities::BodyShape)
//! 3. Finder patterns in the configured [`EyeShape`](crate::domain::entities::EyeShape), unless square
//! 4. Logo overlay with optional background and module clearance
//!
//! Edges are never antialiased so modules stay crisp for scanners.

pub mod body;
pub mod canvas;
pub mod error;
pub mod eye;
pub mod geometry;
pub mod layout;
pub mod logo;
pub mod paint;
pub mod renderer;

pub use error::RenderError;
pub use layout::{Layout, finder_anchors, is_finder_pattern};
pub use renderer::{QrRenderer, RenderedImage};
