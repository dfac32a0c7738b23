//! Core value objects of the QR and short-key domain.
//!
//! Everything here is an immutable value built once per render or generate
//! call.
//!
//! # Entity Types
//!
//! - [`BitMatrix`] - Module grid handed over by the symbol encoder
//! - [`QrConfig`] - Style aggregate (body, eyes, logo, background)
//! - [`BodyShape`] / [`EyeShape`] - Closed shape families
//! - [`Color`] - Parsed hex color

pub mod bit_matrix;
pub mod color;
pub mod qr_config;
pub mod shape;

pub use bit_matrix::BitMatrix;
pub use color::{Color, ColorFormatError};
pub use qr_config::{BodyConfig, EyeConfig, LogoConfig, QrConfig};
pub use shape::{BodyShape, EyeShape, StyleError};
