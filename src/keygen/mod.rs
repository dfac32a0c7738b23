//! Distributed short-key generation.
//!
//! A [`SnowflakeGenerator`] mints time-ordered 64-bit ids that are unique
//! across up to 1024 machines. Each id is folded into the `62^8` key space
//! and rendered as an 8-character Base62 string, e.g. `"0k3Jx9Qa"`.
//!
//! Folding trades global uniqueness for a fixed key length: two ids that are
//! congruent modulo the fold modulus produce the same key, so callers that
//! persist keys should still enforce uniqueness at the storage layer.

pub mod base62;
pub mod clock;
pub mod snowflake;

pub use base62::{KEY_LENGTH, KEY_SPACE, fold_to_key};
pub use clock::{Clock, SystemClock};
pub use snowflake::{EPOCH, IdParts, KeyGenError, SnowflakeGenerator, decompose};

#[cfg(test)]
pub use clock::MockClock;
