//! Common types shared by the cache model and its drivers.
//!
//! This module provides:
//! 1. **Address Layout:** Tag/index/offset bit fields derived from a cache geometry.
//! 2. **Error Handling:** Configuration validation errors.

/// Address decomposition into tag, index, and offset fields.
pub mod addr;

/// Configuration error types.
pub mod error;

pub use addr::{AddressLayout, BitField};
pub use error::ConfigError;
