use std::fmt;
use std::str::FromStr;

use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::lanczos::lanczos4_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use crate::border::BorderPolicy;
use rewarp_image::{Image, ImageDtype, ImageError};

/// Largest coordinate magnitude handed to the kernels.
///
/// Anything beyond is outside every supported image, and the bound keeps the
/// float to integer conversion and the tap offsets from overflowing.
const COORD_LIMIT: f32 = (1u32 << 30) as f32;

/// Interpolation mode for the resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Bicubic interpolation
    Bicubic,
    /// Pixel area relation, only meaningful for resize
    Area,
    /// Lanczos interpolation over an 8x8 neighborhood
    Lanczos4,
}

impl InterpolationMode {
    /// The legacy integer code of the mode.
    pub fn code(&self) -> i32 {
        match self {
            InterpolationMode::Nearest => 0,
            InterpolationMode::Bilinear => 1,
            InterpolationMode::Bicubic => 2,
            InterpolationMode::Area => 3,
            InterpolationMode::Lanczos4 => 4,
        }
    }

    /// The lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMode::Nearest => "nearest",
            InterpolationMode::Bilinear => "linear",
            InterpolationMode::Bicubic => "cubic",
            InterpolationMode::Area => "area",
            InterpolationMode::Lanczos4 => "lanczos4",
        }
    }

    /// The mode used for point sampling; area falls back to bilinear.
    pub(crate) fn for_point_sampling(self) -> Self {
        match self {
            InterpolationMode::Area => {
                log::debug!("area interpolation is not defined for point sampling, using bilinear");
                InterpolationMode::Bilinear
            }
            mode => mode,
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for InterpolationMode {
    type Error = ImageError;

    /// Codes: 0 nearest, 1 linear, 2 cubic, 3 area, 4 lanczos4.
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(InterpolationMode::Nearest),
            1 => Ok(InterpolationMode::Bilinear),
            2 => Ok(InterpolationMode::Bicubic),
            3 => Ok(InterpolationMode::Area),
            4 => Ok(InterpolationMode::Lanczos4),
            _ => Err(ImageError::InvalidInterpolation(code.to_string())),
        }
    }
}

impl FromStr for InterpolationMode {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(InterpolationMode::Nearest),
            "linear" | "bilinear" => Ok(InterpolationMode::Bilinear),
            "cubic" | "bicubic" => Ok(InterpolationMode::Bicubic),
            "area" => Ok(InterpolationMode::Area),
            "lanczos4" | "lanczos" => Ok(InterpolationMode::Lanczos4),
            other => Err(ImageError::InvalidInterpolation(other.to_string())),
        }
    }
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use. `Area` samples bilinearly.
/// * `border` - How taps outside the image are resolved.
///
/// # Returns
///
/// The interpolated pixel value in double precision, one entry per channel.
/// Non-finite coordinates yield the border fill.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
    border: &BorderPolicy,
) -> [f64; C] {
    if !u.is_finite() || !v.is_finite() {
        return std::array::from_fn(|c| border.fill(c));
    }
    let u = u.clamp(-COORD_LIMIT, COORD_LIMIT) as f64;
    let v = v.clamp(-COORD_LIMIT, COORD_LIMIT) as f64;

    match interpolation {
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, border),
        InterpolationMode::Bilinear | InterpolationMode::Area => {
            bilinear_interpolation(image, u, v, border)
        }
        InterpolationMode::Bicubic => bicubic_interpolation(image, u, v, border),
        InterpolationMode::Lanczos4 => lanczos4_interpolation(image, u, v, border),
    }
}

/// Accumulate a separable kernel anchored at `(x0, y0)`.
///
/// Tap `(i, j)` reads the source at `(x0 + i, y0 + j)` with weight `wx[i] * wy[j]`.
/// Zero weights are skipped so a one-hot kernel reproduces the sample exactly.
#[inline]
pub(crate) fn sample_separable<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    x0: isize,
    wx: &[f64],
    y0: isize,
    wy: &[f64],
    border: &BorderPolicy,
) -> [f64; C] {
    // -0.0 is the additive identity, so signed zeros survive a single tap
    let mut acc = [-0.0f64; C];
    for (j, &w_y) in wy.iter().enumerate() {
        if w_y == 0.0 {
            continue;
        }
        for (i, &w_x) in wx.iter().enumerate() {
            let w = w_x * w_y;
            if w == 0.0 {
                continue;
            }
            match border.pixel(image, x0 + i as isize, y0 + j as isize) {
                Some(pixel) => {
                    for (a, &p) in acc.iter_mut().zip(pixel) {
                        let p: f64 = p.into();
                        *a += w * p;
                    }
                }
                None => {
                    for (c, a) in acc.iter_mut().enumerate() {
                        *a += w * border.fill(c);
                    }
                }
            }
        }
    }
    acc
}
