//! Contract for the external QR symbol encoder.

use crate::domain::entities::BitMatrix;

/// Error-correction level requested from the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EccLevel {
    Low,
    Medium,
    Quartile,
    /// ~30% recovery; required when modules are styled or covered by a logo.
    #[default]
    High,
}

/// Encoder hints forwarded alongside the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeHints {
    pub character_set: String,
    /// Quiet zone in modules added around the symbol.
    pub margin: u32,
}

impl EncodeHints {
    /// UTF-8 payload with the given quiet zone.
    pub fn utf8(margin: u32) -> Self {
        Self {
            character_set: "UTF-8".to_string(),
            margin,
        }
    }
}

/// Errors raised by a [`MatrixProvider`].
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Data too long for a QR symbol")]
    DataTooLong,

    #[error("Unsupported character set: {0}")]
    UnsupportedCharacterSet(String),

    #[error("QR encoder failed: {0}")]
    Encoder(String),
}

/// Turns a payload into a module grid.
///
/// The returned matrix already includes `hints.margin` light modules on every
/// side, so finder patterns start at `(margin, margin)`.
///
/// # Implementations
///
/// - [`crate::infrastructure::QrcodeMatrixProvider`] - backed by the `qrcode` crate
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait MatrixProvider: Send + Sync {
    /// Encodes `data` at the given error-correction level.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::DataTooLong`] when the payload does not fit any
    /// symbol version.
    fn encode(
        &self,
        data: &str,
        ecc: EccLevel,
        hints: &EncodeHints,
    ) -> Result<BitMatrix, EncodeError>;
}
