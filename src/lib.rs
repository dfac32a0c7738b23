//! # Zaplink Core
//!
//! Styled QR code rendering and distributed short-key generation for the
//! Zaplink link platform.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Style configuration, module grid and provider traits
//! - **Engine** ([`engine`]) - Pixel-exact QR rendering with shapes, gradients and logos
//! - **Key Generator** ([`keygen`]) - Snowflake ids folded into 8-character Base62 keys
//! - **Application Layer** ([`application`]) - Validation and orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - `qrcode` encoder and logo loading
//!
//! ## Features
//!
//! - Five body shapes including neighbor-aware "liquid" modules
//! - Custom finder-pattern eyes with independent colors
//! - Linear and radial gradients
//! - Centered logos with optional background and module clearance
//! - Exact output size, no antialiasing, byte-identical repeat renders
//! - Lock-per-instance Snowflake generator safe across 1024 machines
//!
//! ## Quick Start
//!
//! ```bash
//! zaplink render --data "https://zaplink.io" --size 512 --body-shape rounded -o qr.png
//! zaplink key --count 3
//! ```
//!
//! ## Configuration
//!
//! Runtime configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod infrastructure;
pub mod keygen;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{DynamicQr, QrService, QrServiceSettings};
    pub use crate::domain::entities::{
        BitMatrix, BodyConfig, BodyShape, Color, EyeConfig, EyeShape, LogoConfig, QrConfig,
    };
    pub use crate::domain::providers::{LogoSource, MatrixProvider, NullLogoSource};
    pub use crate::engine::{QrRenderer, RenderError, RenderedImage};
    pub use crate::error::AppError;
    pub use crate::infrastructure::{DefaultLogoSource, QrcodeMatrixProvider};
    pub use crate::keygen::{KeyGenError, SnowflakeGenerator};
}
