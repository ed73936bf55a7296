#![deny(missing_docs)]
//! Raster types and traits for geometric image resampling

/// pixel sample types and depth tags.
pub mod dtype;

/// runtime-typed rasters.
pub mod dynamic;

/// Error types for the image module.
pub mod error;

/// image representation for computer vision purposes.
pub mod image;

/// constant fill colors.
pub mod scalar;

pub use crate::dtype::{ImageDtype, PixelDepth};
pub use crate::dynamic::{DynImage, ImageTransform, ImageVisitor, PixelBuffer};
pub use crate::error::{ErrorKind, ImageError};
pub use crate::image::{Image, ImageSize};
pub use crate::scalar::Scalar;
