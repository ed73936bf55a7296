use super::interpolate::sample_separable;
use crate::border::BorderPolicy;
use rewarp_image::{Image, ImageDtype};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - How a coordinate outside the image is resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
    border: &BorderPolicy,
) -> [f64; C] {
    let iu = u.round() as isize;
    let iv = v.round() as isize;

    sample_separable(image, iu, &[1.0], iv, &[1.0], border)
}
