//! [`MatrixProvider`] backed by the `qrcode` crate.

use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::domain::entities::BitMatrix;
use crate::domain::providers::{EccLevel, EncodeError, EncodeHints, MatrixProvider};

/// Encodes payloads with the `qrcode` crate and pads the requested quiet zone.
///
/// Only UTF-8 payloads are supported; the symbol is encoded from the raw
/// string bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeMatrixProvider;

impl QrcodeMatrixProvider {
    pub fn new() -> Self {
        Self
    }
}

impl MatrixProvider for QrcodeMatrixProvider {
    fn encode(
        &self,
        data: &str,
        ecc: EccLevel,
        hints: &EncodeHints,
    ) -> Result<BitMatrix, EncodeError> {
        let charset = hints.character_set.to_ascii_uppercase();
        if charset != "UTF-8" && charset != "UTF8" {
            return Err(EncodeError::UnsupportedCharacterSet(
                hints.character_set.clone(),
            ));
        }

        let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level(ecc))
            .map_err(|e| match e {
                QrError::DataTooLong => EncodeError::DataTooLong,
                other => EncodeError::Encoder(other.to_string()),
            })?;

        let width = code.width() as u32;
        let colors = code.to_colors();
        let symbol = BitMatrix::from_fn(width, |x, y| {
            colors[(y * width + x) as usize] == qrcode::Color::Dark
        });

        debug!(
            version_width = width,
            margin = hints.margin,
            dark_modules = symbol.count_dark(),
            "Encoded QR symbol"
        );

        Ok(symbol.with_quiet_zone(hints.margin))
    }
}

fn ec_level(ecc: EccLevel) -> EcLevel {
    match ecc {
        EccLevel::Low => EcLevel::L,
        EccLevel::Medium => EcLevel::M,
        EccLevel::Quartile => EcLevel::Q,
        EccLevel::High => EcLevel::H,
    }
}
