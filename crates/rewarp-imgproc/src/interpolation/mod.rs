//! Pixel interpolation methods for image transformations.
//!
//! This module provides the interpolation kernels used when resampling
//! images during geometric transformations like resizing, warping, or remapping.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//! - **Bicubic**: 4x4 cubic convolution, sharper than bilinear
//! - **Area**: Pixel area relation, meaningful for resize only
//! - **Lanczos4**: 8x8 windowed sinc
//!
//! Every kernel samples outside the source through a [`crate::border::BorderPolicy`].

mod bicubic;
mod bilinear;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating coordinate meshgrids used in image warping
/// and transformation operations.
pub mod grid;

pub(crate) mod interpolate;
mod lanczos;
mod nearest;
mod remap;

pub use interpolate::InterpolationMode;
pub use remap::remap;

pub(crate) use remap::remap_unchecked;

pub use interpolate::interpolate_pixel;
