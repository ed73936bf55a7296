use std::f64::consts::TAU;

use rewarp_image::{Image, ImageDtype, ImageError};

use super::flags::WarpFlags;
use super::{check_channels, check_sizes, map_coord};
use crate::interpolation::{grid::meshgrid_from_fn, remap_unchecked};

/// Remaps an image to or from log-polar space.
///
/// In the forward direction destination column `x` is the log radius and row
/// `y` the angle: pixel `(x, y)` samples the source at
/// `center + exp(x / magnitude) * (cos(phi), sin(phi))` with
/// `phi = 2 * pi * y / dst.height`.
///
/// With `flags.inverse_map` the destination is cartesian and samples the
/// log-polar `src` at `(magnitude * ln(rho), phi * src.height / (2 * pi))`,
/// `rho` and `phi` being the polar coordinates of the pixel around `center`.
/// The center pixel itself maps to the border fill.
///
/// # Errors
///
/// Fails when `magnitude` is not a positive finite number, on empty images and
/// on channel counts other than 1, 3 or 4.
pub fn log_polar<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    center: (f64, f64),
    magnitude: f64,
    flags: &WarpFlags,
) -> Result<(), ImageError> {
    check_channels::<T, C>()?;
    check_sizes(src, dst)?;
    if !(magnitude > 0.0 && magnitude.is_finite()) {
        return Err(ImageError::InvalidParameter(
            "magnitude",
            format!("must be positive and finite, got {magnitude}"),
        ));
    }
    if !(center.0.is_finite() && center.1.is_finite()) {
        return Err(ImageError::InvalidParameter(
            "center",
            format!("must be finite, got {center:?}"),
        ));
    }

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = if flags.inverse_map {
        let angle_scale = src.rows() as f64 / TAU;
        meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
            let dx = x as f64 - center.0;
            let dy = y as f64 - center.1;
            let rho = dx.hypot(dy).ln() * magnitude;
            let phi = dy.atan2(dx).rem_euclid(TAU);
            Ok((map_coord(rho), map_coord(phi * angle_scale)))
        })?
    } else {
        let angle_step = TAU / dst_rows as f64;
        meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
            let rho = (x as f64 / magnitude).exp();
            let phi = y as f64 * angle_step;
            let u = center.0 + rho * phi.cos();
            let v = center.1 + rho * phi.sin();
            Ok((map_coord(u), map_coord(v)))
        })?
    };

    remap_unchecked(
        src,
        dst,
        &map_x,
        &map_y,
        flags.interpolation.for_point_sampling(),
        &flags.border,
    );

    Ok(())
}
