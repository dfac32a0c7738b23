//! Logo resolution over HTTP(S) and a local resource directory.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use image::DynamicImage;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::domain::providers::{LogoError, LogoSource};

/// Loads logos from `http(s)://` URLs or from files under a resource root.
///
/// Local paths are resolved relative to `resource_dir`; a leading `/` is
/// ignored and `..` components are rejected so lookups cannot escape the
/// root.
pub struct DefaultLogoSource {
    client: reqwest::blocking::Client,
    resource_dir: PathBuf,
}

impl DefaultLogoSource {
    /// # Errors
    ///
    /// Returns [`LogoError::Http`] if the HTTP client cannot be built.
    pub fn new(resource_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, LogoError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("zaplink-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LogoError::Http(format!("Failed to build HTTP client: {}", e)))?;

        let resource_dir = resource_dir.into();
        info!("Logo resources served from {}", resource_dir.display());

        Ok(Self {
            client,
            resource_dir,
        })
    }

    /// Builds a source from `LOGO_RESOURCE_DIR` and `LOGO_FETCH_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`LogoError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, LogoError> {
        Self::new(
            &config.logo_resource_dir,
            Duration::from_secs(config.logo_fetch_timeout_secs),
        )
    }

    fn fetch(&self, url: &Url) -> Result<DynamicImage, LogoError> {
        debug!("Fetching logo from {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LogoError::Http(e.to_string()))?;

        let bytes = response
            .bytes()
            .map_err(|e| LogoError::Http(e.to_string()))?;

        Ok(image::load_from_memory(&bytes)?)
    }

    fn read_local(&self, path: &str) -> Result<DynamicImage, LogoError> {
        let full_path = self.resolve(path)?;
        debug!("Reading logo from {}", full_path.display());

        let bytes = std::fs::read(&full_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LogoError::NotFound(path.to_string()),
            _ => LogoError::Io(e),
        })?;

        Ok(image::load_from_memory(&bytes)?)
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, LogoError> {
        let relative = Path::new(path.trim_start_matches('/'));

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(LogoError::NotFound(path.to_string()));
        }

        Ok(self.resource_dir.join(relative))
    }
}

impl LogoSource for DefaultLogoSource {
    fn load(&self, path: &str) -> Result<DynamicImage, LogoError> {
        match Url::parse(path) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => self.fetch(&url),
            _ => self.read_local(path),
        }
    }
}
