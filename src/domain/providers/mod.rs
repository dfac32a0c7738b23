//! Collaborator traits for the domain layer.
//!
//! These traits describe the external services the core depends on. Concrete
//! implementations live in [`crate::infrastructure`]; mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Providers
//!
//! - [`MatrixProvider`] - QR symbol encoding (payload → [`BitMatrix`](crate::domain::entities::BitMatrix))
//! - [`LogoSource`] - Best-effort logo resolution

pub mod logo_source;
pub mod matrix_provider;

pub use logo_source::{LogoError, LogoSource, NullLogoSource};
pub use matrix_provider::{EccLevel, EncodeError, EncodeHints, MatrixProvider};

#[cfg(test)]
pub use logo_source::MockLogoSource;
#[cfg(test)]
pub use matrix_provider::MockMatrixProvider;
