//! Application layer services.
//!
//! Services wire the domain providers, the rendering engine and the key
//! generator together, validate requests and translate component errors into
//! [`AppError`](crate::error::AppError).
//!
//! # Available Services
//!
//! - [`services::qr_service::QrService`] - Static and dynamic QR generation
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zaplink_core::application::services::{QrService, QrServiceSettings};
//! use zaplink_core::domain::entities::QrConfig;
//! use zaplink_core::domain::providers::NullLogoSource;
//! use zaplink_core::infrastructure::QrcodeMatrixProvider;
//! use zaplink_core::keygen::SnowflakeGenerator;
//!
//! let service = QrService::new(
//!     Arc::new(QrcodeMatrixProvider::new()),
//!     Arc::new(NullLogoSource::new()),
//!     Arc::new(SnowflakeGenerator::new(0)?),
//!     QrServiceSettings::default(),
//! );
//!
//! let image = service.generate(&QrConfig::for_data("https://zaplink.io"))?;
//! assert_eq!(image.size(), 1024);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod services;
