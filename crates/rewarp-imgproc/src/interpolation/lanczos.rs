use std::f64::consts::PI;

use super::interpolate::sample_separable;
use crate::border::BorderPolicy;
use rewarp_image::{Image, ImageDtype};

/// Weights of the eight taps at offsets -3..=4 for a fractional position `x` in `[0, 1)`.
///
/// The weights are normalized to sum to one.
pub(crate) fn lanczos4_weights(x: f64) -> [f64; 8] {
    let mut w = [0.0; 8];
    if x < f64::EPSILON {
        w[3] = 1.0;
        return w;
    }

    let mut sum = 0.0;
    for (i, wi) in w.iter_mut().enumerate() {
        let t = x + 3.0 - i as f64;
        let pt = PI * t;
        *wi = 4.0 * (pt.sin() * (pt / 4.0).sin()) / (pt * pt);
        sum += *wi;
    }
    for wi in w.iter_mut() {
        *wi /= sum;
    }
    w
}

/// Kernel for Lanczos interpolation over the 8x8 neighborhood of `(u, v)`.
pub(crate) fn lanczos4_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
    border: &BorderPolicy,
) -> [f64; C] {
    let (fu, fv) = (u.floor(), v.floor());
    let wx = lanczos4_weights(u - fu);
    let wy = lanczos4_weights(v - fv);

    sample_separable(image, fu as isize - 3, &wx, fv as isize - 3, &wy, border)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewarp_image::{ImageError, ImageSize};

    #[test]
    fn weights_normalized_and_symmetric() {
        let w = lanczos4_weights(0.5);
        approx::assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        for i in 0..4 {
            approx::assert_relative_eq!(w[i], w[7 - i], epsilon = 1e-12);
        }
        // taps 2 and 5 sit 1.5 pixels out, in the negative lobe
        assert!(w[2] < 0.0);
        assert!(w[3] > w[2].abs());
    }

    #[test]
    fn constant_image_stays_constant() -> Result<(), ImageError> {
        let image = Image::<u16, 3>::from_size_val(
            ImageSize {
                width: 5,
                height: 5,
            },
            1000,
        )?;
        let got = lanczos4_interpolation(&image, 2.4, 1.7, &BorderPolicy::Reflect101);
        for v in got {
            approx::assert_relative_eq!(v, 1000.0, epsilon = 1e-9);
        }
        Ok(())
    }
}
