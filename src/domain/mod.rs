//! Domain layer containing value objects and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Style configuration, module grid, colors and shapes
//! - [`providers`] - Traits for the symbol encoder and the logo resolver
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Provider traits define contracts implemented by the infrastructure layer
//! - Rendering and key generation live in [`crate::engine`] and [`crate::keygen`]

pub mod entities;
pub mod providers;
