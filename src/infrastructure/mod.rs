//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the provider traits declared in
//! [`crate::domain::providers`].
//!
//! # Modules
//!
//! - [`qr_encoder`] - QR symbol encoding via the `qrcode` crate
//! - [`logo_loader`] - Logo fetching over HTTP(S) and from a local directory

pub mod logo_loader;
pub mod qr_encoder;

pub use logo_loader::DefaultLogoSource;
pub use qr_encoder::QrcodeMatrixProvider;
