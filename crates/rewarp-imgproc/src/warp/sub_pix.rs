use rewarp_image::{Image, ImageDtype, ImageError};

use super::affine::transform_point;
use super::matrix::check_finite;
use super::{check_channels, check_sizes, map_coord};
use crate::border::BorderPolicy;
use crate::interpolation::{grid::meshgrid_from_fn, remap_unchecked, InterpolationMode};

/// Offset of the destination center from its top-left pixel.
#[inline]
fn half_extent<T, const C: usize>(dst: &Image<T, C>) -> (f64, f64) {
    (
        (dst.cols() as f64 - 1.0) * 0.5,
        (dst.rows() as f64 - 1.0) * 0.5,
    )
}

/// Extracts a rectangle centered on a sub-pixel position.
///
/// Pixel `(x, y)` of `dst` samples the source bilinearly at
/// `(x + center.x - (dst.width - 1) / 2, y + center.y - (dst.height - 1) / 2)`.
/// Samples outside the source replicate the nearest edge pixel.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output patch; its size is the size of the rectangle.
/// * `center` - The center of the rectangle in source coordinates.
///
/// # Errors
///
/// Fails on empty images, on channel counts other than 1, 3 or 4 and on a
/// non-finite center.
///
/// # Example
///
/// ```
/// use rewarp_image::Image;
/// use rewarp_imgproc::warp::rect_sub_pix;
///
/// let src = Image::<u8, 1>::new([4, 1].into(), vec![10, 20, 30, 40]).unwrap();
/// let mut dst = Image::<u8, 1>::zeros([2, 1].into()).unwrap();
///
/// rect_sub_pix(&src, &mut dst, (1.5, 0.0)).unwrap();
///
/// assert_eq!(dst.as_slice(), &[20, 30]);
/// ```
pub fn rect_sub_pix<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    center: (f64, f64),
) -> Result<(), ImageError> {
    check_channels::<T, C>()?;
    check_sizes(src, dst)?;
    if !(center.0.is_finite() && center.1.is_finite()) {
        return Err(ImageError::InvalidParameter(
            "center",
            format!("must be finite, got {center:?}"),
        ));
    }

    let (half_w, half_h) = half_extent(dst);
    let (x0, y0) = (center.0 - half_w, center.1 - half_h);

    let (map_x, map_y) = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
        Ok((map_coord(x as f64 + x0), map_coord(y as f64 + y0)))
    })?;

    remap_unchecked(
        src,
        dst,
        &map_x,
        &map_y,
        InterpolationMode::Bilinear,
        &BorderPolicy::Replicate,
    );

    Ok(())
}

/// Samples a quadrangle of the source through a 2x3 matrix.
///
/// Destination coordinates are taken relative to the destination center:
/// pixel `(x, y)` samples the source bilinearly at `m * (x', y', 1)` with
/// `x' = x - (dst.width - 1) / 2` and `y' = y - (dst.height - 1) / 2`, so the
/// translation column of `m` is where the destination center lands in the
/// source. Samples outside the source replicate the nearest edge pixel.
///
/// # Errors
///
/// Fails on empty images, on channel counts other than 1, 3 or 4 and on
/// non-finite coefficients.
pub fn quadrangle_sub_pix<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f64; 6],
) -> Result<(), ImageError> {
    check_channels::<T, C>()?;
    check_sizes(src, dst)?;
    check_finite(m)?;

    let (half_w, half_h) = half_extent(dst);

    let (map_x, map_y) = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
        let (u, v) = transform_point(x as f64 - half_w, y as f64 - half_h, m);
        Ok((map_coord(u), map_coord(v)))
    })?;

    remap_unchecked(
        src,
        dst,
        &map_x,
        &map_y,
        InterpolationMode::Bilinear,
        &BorderPolicy::Replicate,
    );

    Ok(())
}
