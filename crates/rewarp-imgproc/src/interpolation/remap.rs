use crate::border::BorderPolicy;
use crate::parallel;

use super::interpolate::interpolate_pixel;
use super::InterpolationMode;
use rewarp_image::{Image, ImageDtype, ImageError};

/// Apply generic geometric transformation to an image.
///
/// Every destination pixel `(x, y)` samples the source at
/// `(map_x(x, y), map_y(x, y))`.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `dst` - The output image container with shape (height, width, C).
/// * `map_x` - The x coordinates of the pixels to interpolate.
/// * `map_y` - The y coordinates of the pixels to interpolate.
/// * `interpolation` - The interpolation mode to use. `Area` samples bilinearly.
/// * `border` - How coordinates outside the source are resolved.
///
/// # Errors
///
/// * The source must not be empty.
/// * The mapx and mapy must have the same size.
/// * The output image must have the same size as the mapx and mapy.
pub fn remap<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    interpolation: InterpolationMode,
    border: &BorderPolicy,
) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }

    if map_x.size() != map_y.size() {
        return Err(ImageError::InvalidImageSize(
            map_x.width(),
            map_x.height(),
            map_y.width(),
            map_y.height(),
        ));
    }

    if dst.size() != map_x.size() {
        return Err(ImageError::InvalidImageSize(
            map_x.width(),
            map_x.height(),
            dst.width(),
            dst.height(),
        ));
    }

    remap_unchecked(
        src,
        dst,
        map_x,
        map_y,
        interpolation.for_point_sampling(),
        border,
    );

    Ok(())
}

/// Resample `src` into `dst` through maps already known to match `dst`.
pub(crate) fn remap_unchecked<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    interpolation: InterpolationMode,
    border: &BorderPolicy,
) {
    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(dst, map_x, map_y, |&x, &y, dst_pixel| {
        let pixel = interpolate_pixel(src, x, y, interpolation, border);
        for (d, p) in dst_pixel.iter_mut().zip(pixel) {
            *d = T::from_f64(p);
        }
    });
}
