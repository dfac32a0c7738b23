//! Style configuration for a single QR render.
//!
//! All structs deserialize from camelCase JSON and fall back to the platform
//! defaults for missing fields, so a request only needs to carry what it
//! changes:
//!
//! ```
//! use zaplink_core::domain::entities::{BodyShape, QrConfig};
//!
//! let config: QrConfig = serde_json::from_str(
//!     r#"{ "data": "https://zaplink.io", "size": 512, "body": { "shape": "LIQUID" } }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.body.shape, BodyShape::Liquid);
//! assert_eq!(config.background_color, "#FFFFFF");
//! ```

use super::shape::{BodyShape, EyeShape};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Complete style description of a QR image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct QrConfig {
    /// Payload encoded into the symbol.
    #[validate(length(min = 1, max = 2953, message = "Data must be 1-2953 bytes"))]
    pub data: String,

    /// Requested output side in pixels.
    #[validate(range(min = 21, message = "Size must be at least 21 pixels"))]
    pub size: u32,

    /// Quiet-zone width in modules, added by the matrix provider.
    #[validate(range(max = 40, message = "Margin must be at most 40 modules"))]
    pub margin: u32,

    pub background_color: String,
    pub transparent_background: bool,
    pub body: BodyConfig,
    pub eye: EyeConfig,

    #[validate(nested)]
    pub logo: Option<LogoConfig>,
}

impl QrConfig {
    /// Default style around the given payload.
    pub fn for_data(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Whether finder patterns are drawn by the eye pass instead of the body pass.
    pub fn has_custom_eyes(&self) -> bool {
        self.eye.shape != EyeShape::Square
    }

    /// Logo path, when one is configured and non-empty.
    pub fn logo_path(&self) -> Option<&str> {
        self.logo
            .as_ref()
            .and_then(|logo| logo.logo_path.as_deref())
            .filter(|path| !path.is_empty())
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            data: String::new(),
            size: 1024,
            margin: 0,
            background_color: "#FFFFFF".to_string(),
            transparent_background: false,
            body: BodyConfig::default(),
            eye: EyeConfig::default(),
            logo: None,
        }
    }
}

/// Style of the data modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyConfig {
    pub shape: BodyShape,
    pub color: String,
    /// Gradient end color; `None` paints a solid `color`.
    pub color_dark: Option<String>,
    /// `true` for a corner-to-corner linear gradient, `false` for radial.
    pub gradient_linear: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            shape: BodyShape::Square,
            color: "#000000".to_string(),
            color_dark: None,
            gradient_linear: true,
        }
    }
}

/// Style of the three finder patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EyeConfig {
    pub shape: EyeShape,
    pub color_outer: String,
    pub color_inner: String,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            shape: EyeShape::Square,
            color_outer: "#000000".to_string(),
            color_inner: "#000000".to_string(),
        }
    }
}

/// Centered logo overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoConfig {
    /// HTTP(S) URL or resource-relative path.
    pub logo_path: Option<String>,

    /// Logo side as a fraction of the image side.
    #[validate(range(min = 0.01, max = 0.99, message = "Logo size ratio must be within (0, 1)"))]
    pub size_ratio: f64,

    /// Background padding around the logo in pixels.
    #[validate(range(max = 512))]
    pub padding: u32,

    pub background_enabled: bool,
    pub background_color: String,
    pub background_rounded: bool,
    pub background_corner_radius: u32,

    /// Extra clearance around the logo, in modules.
    #[validate(range(max = 40))]
    pub margin_size: u32,

    /// Skip body modules underneath the logo.
    pub remove_quiet_zone: bool,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            logo_path: None,
            size_ratio: 0.2,
            padding: 2,
            background_enabled: true,
            background_color: "#FFFFFF".to_string(),
            background_rounded: true,
            background_corner_radius: 20,
            margin_size: 0,
            remove_quiet_zone: true,
        }
    }
}
