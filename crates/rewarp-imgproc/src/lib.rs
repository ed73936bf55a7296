#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// border policies for out of bounds sampling.
pub mod border;

/// runtime-typed entry points.
pub mod dynamic;

/// utility functions for interpolation.
pub mod interpolation;

/// image padding with border policies.
pub mod padding;

/// utilities for parallel processing.
pub mod parallel;

/// image resizing.
pub mod resize;

/// image geometric transformations module.
pub mod warp;
