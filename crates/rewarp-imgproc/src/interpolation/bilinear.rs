use super::interpolate::sample_separable;
use crate::border::BorderPolicy;
use rewarp_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - How taps outside the image are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
    border: &BorderPolicy,
) -> [f64; C] {
    let (fu, fv) = (u.floor(), v.floor());

    let frac_u = u - fu;
    let frac_v = v - fv;

    let wx = [1.0 - frac_u, frac_u];
    let wy = [1.0 - frac_v, frac_v];

    sample_separable(image, fu as isize, &wx, fv as isize, &wy, border)
}
