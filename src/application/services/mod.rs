//! Business logic services for the application layer.

pub mod qr_service;

pub use qr_service::{DynamicQr, QrService, QrServiceSettings};
