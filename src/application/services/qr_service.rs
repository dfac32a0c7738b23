//! QR generation service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::config::Config;
use crate::domain::entities::QrConfig;
use crate::domain::providers::{EccLevel, EncodeHints, LogoSource, MatrixProvider};
use crate::engine::{QrRenderer, RenderedImage};
use crate::error::AppError;
use crate::keygen::{Clock, SnowflakeGenerator, SystemClock};

/// Tunables for [`QrService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrServiceSettings {
    pub redirect_base_url: String,
    pub max_size: u32,
}

impl Default for QrServiceSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl QrServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            redirect_base_url: config.redirect_base_url.clone(),
            max_size: config.qr_max_size,
        }
    }
}

/// A rendered dynamic QR code and the key it points to.
#[derive(Debug, Clone)]
pub struct DynamicQr {
    pub key: String,
    pub redirect_url: String,
    pub image: RenderedImage,
}

/// Service for encoding and rendering QR codes.
///
/// Payloads are always encoded at error-correction level H with UTF-8
/// character set, leaving room for styled modules and logos.
pub struct QrService<M: MatrixProvider, L: LogoSource, C: Clock = SystemClock> {
    matrix_provider: Arc<M>,
    renderer: QrRenderer<L>,
    key_generator: Arc<SnowflakeGenerator<C>>,
    settings: QrServiceSettings,
}

impl<M: MatrixProvider, L: LogoSource, C: Clock> QrService<M, L, C> {
    /// Creates a new QR service.
    pub fn new(
        matrix_provider: Arc<M>,
        logo_source: Arc<L>,
        key_generator: Arc<SnowflakeGenerator<C>>,
        settings: QrServiceSettings,
    ) -> Self {
        Self {
            matrix_provider,
            renderer: QrRenderer::new(logo_source),
            key_generator,
            settings,
        }
    }

    /// Validates `config`, encodes `config.data` and renders it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - The config fails field validation
    /// - `size` exceeds the configured maximum
    /// - The data does not fit a QR symbol
    ///
    /// Returns [`AppError::Internal`] if the image buffer cannot be allocated.
    pub fn generate(&self, config: &QrConfig) -> Result<RenderedImage, AppError> {
        self.validate(config)?;

        let matrix = self.matrix_provider.encode(
            &config.data,
            EccLevel::High,
            &EncodeHints::utf8(config.margin),
        )?;

        Ok(self.renderer.render(&matrix, config)?)
    }

    /// Mints a short key and renders a QR code for its redirect URL.
    ///
    /// `config.data` is ignored; the encoded payload is
    /// `{redirect_base_url}/r/{key}`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if key generation fails (e.g. the clock
    /// moved backwards), plus anything [`Self::generate`] returns.
    pub fn generate_dynamic(&self, config: &QrConfig) -> Result<DynamicQr, AppError> {
        let key = self.generate_short_key()?;
        let redirect_url = self.redirect_url(&key);
        info!(key = %key, url = %redirect_url, "Generating dynamic QR code");

        let config = QrConfig {
            data: redirect_url.clone(),
            ..config.clone()
        };
        let image = self.generate(&config)?;

        Ok(DynamicQr {
            key,
            redirect_url,
            image,
        })
    }

    /// Mints a new 8-character short key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the generator fails.
    pub fn generate_short_key(&self) -> Result<String, AppError> {
        Ok(self.key_generator.generate_short_key()?)
    }

    /// Redirect link encoded into dynamic QR codes.
    pub fn redirect_url(&self, key: &str) -> String {
        format!(
            "{}/r/{}",
            self.settings.redirect_base_url.trim_end_matches('/'),
            key
        )
    }

    fn validate(&self, config: &QrConfig) -> Result<(), AppError> {
        config.validate()?;

        if config.size > self.settings.max_size {
            return Err(AppError::bad_request(
                "Requested size exceeds the maximum",
                json!({ "size": config.size, "max_size": self.settings.max_size }),
            ));
        }

        Ok(())
    }
}
