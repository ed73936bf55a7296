use super::interpolate::sample_separable;
use crate::border::BorderPolicy;
use rewarp_image::{Image, ImageDtype};

/// Free parameter of the cubic convolution kernel.
const CUBIC_A: f64 = -0.75;

/// Weights of the four taps at offsets -1, 0, 1, 2 for a fractional position `x` in `[0, 1)`.
#[inline]
pub(crate) fn cubic_weights(x: f64) -> [f64; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (x + 1.0) - 5.0 * a) * (x + 1.0) + 8.0 * a) * (x + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * x - (a + 3.0)) * x * x + 1.0;
    let w2 = ((a + 2.0) * (1.0 - x) - (a + 3.0)) * (1.0 - x) * (1.0 - x) + 1.0;
    let w3 = 1.0 - w0 - w1 - w2;
    [w0, w1, w2, w3]
}

/// Kernel for bicubic interpolation over the 4x4 neighborhood of `(u, v)`.
pub(crate) fn bicubic_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
    border: &BorderPolicy,
) -> [f64; C] {
    let (fu, fv) = (u.floor(), v.floor());
    let wx = cubic_weights(u - fu);
    let wy = cubic_weights(v - fv);

    sample_separable(image, fu as isize - 1, &wx, fv as isize - 1, &wy, border)
}
