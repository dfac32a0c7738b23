//! Contract for resolving logo images.

use image::DynamicImage;

/// Errors raised while resolving a logo.
///
/// The renderer never propagates these: a failed logo is logged and omitted.
#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    #[error("Logo request failed: {0}")]
    Http(String),

    #[error("Logo not found: {0}")]
    NotFound(String),

    #[error("Failed to read logo: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode logo: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Logo loading is disabled")]
    Disabled,
}

/// Resolves a configured logo path into an image.
///
/// # Implementations
///
/// - [`crate::infrastructure::DefaultLogoSource`] - HTTP(S) URLs and a local resource directory
/// - [`NullLogoSource`] - Always fails; renders without logos
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait LogoSource: Send + Sync {
    /// Loads the logo referenced by `path`.
    ///
    /// # Errors
    ///
    /// Any [`LogoError`]; callers treat every error as "no logo".
    fn load(&self, path: &str) -> Result<DynamicImage, LogoError>;
}

/// No-op logo source used when logos are not wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogoSource;

impl NullLogoSource {
    pub fn new() -> Self {
        Self
    }
}

impl LogoSource for NullLogoSource {
    fn load(&self, _path: &str) -> Result<DynamicImage, LogoError> {
        Err(LogoError::Disabled)
    }
}
