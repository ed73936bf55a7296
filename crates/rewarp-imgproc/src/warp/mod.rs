//! Geometric image transformations using affine and perspective warps.
//!
//! This module provides functions for applying 2D transformations to images:
//!
//! - Affine transformations (rotation, translation, scaling, shearing)
//! - Perspective transformations (homographies)
//! - Log-polar remapping
//! - Sub-pixel rectangle and quadrangle extraction
//! - Rotation matrix generation and matrix estimation from point pairs
//! - Affine and perspective transform inversion
//!
//! # Examples
//!
//! Rotating an image by 45 degrees:
//!
//! ```no_run
//! use rewarp_imgproc::warp::get_rotation_matrix2d;
//!
//! let rotation_matrix = get_rotation_matrix2d((128.0, 128.0), 45.0, 1.0);
//! // Use with warp_affine to rotate the image
//! ```

mod affine;
mod flags;
mod log_polar;
mod matrix;
mod perspective;
mod sub_pix;

pub use affine::{
    get_affine_transform, get_rotation_matrix2d, invert_affine_transform, warp_affine,
};
pub use flags::{WarpFlags, WARP_FILL_OUTLIERS, WARP_INVERSE_MAP};
pub use log_polar::log_polar;
pub use matrix::{TransformKind, TransformMatrix};
pub use perspective::{
    get_perspective_transform, invert_perspective_transform, warp_perspective,
};
pub use sub_pix::{quadrangle_sub_pix, rect_sub_pix};

use rewarp_image::{Image, ImageDtype, ImageError};

/// Largest source coordinate magnitude stored in a sampling map.
const MAP_LIMIT: f64 = (1u64 << 30) as f64;

/// Warps operate on gray, RGB and RGBA rasters.
pub(crate) fn check_channels<T: ImageDtype, const C: usize>() -> Result<(), ImageError> {
    match C {
        1 | 3 | 4 => Ok(()),
        _ => Err(ImageError::UnsupportedFormat(T::DEPTH, C)),
    }
}

/// The source must hold pixels and the destination must have a positive size.
pub(crate) fn check_sizes<T, const C: usize>(
    src: &Image<T, C>,
    dst: &Image<T, C>,
) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }
    if dst.is_empty() {
        return Err(ImageError::InvalidOutputSize(
            dst.width() as i64,
            dst.height() as i64,
        ));
    }
    Ok(())
}

/// Narrow a mapped coordinate for storage in a sampling map.
///
/// Non-finite values stay non-finite so the sampler resolves them to the fill.
#[inline]
pub(crate) fn map_coord(v: f64) -> f32 {
    if v.is_finite() {
        v.clamp(-MAP_LIMIT, MAP_LIMIT) as f32
    } else {
        f32::NAN
    }
}
