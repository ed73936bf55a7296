#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`](error::IoError) variants for file access, decoding and
/// encoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image`] for the color and depth flags.
pub mod functional;

/// Deterministic content hashing of rasters.
pub mod hash;
