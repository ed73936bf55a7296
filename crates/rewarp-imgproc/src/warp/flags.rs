use rewarp_image::{ImageError, Scalar};

use crate::border::BorderPolicy;
use crate::interpolation::InterpolationMode;

/// Legacy flag bit: fill destination pixels that map outside the source.
pub const WARP_FILL_OUTLIERS: i32 = 8;

/// Legacy flag bit: the matrix already maps destination to source coordinates.
pub const WARP_INVERSE_MAP: i32 = 16;

const INTERPOLATION_MASK: i32 = 7;

/// Options shared by the warp operations.
///
/// # Example
///
/// ```
/// use rewarp_image::Scalar;
/// use rewarp_imgproc::border::BorderPolicy;
/// use rewarp_imgproc::interpolation::InterpolationMode;
/// use rewarp_imgproc::warp::WarpFlags;
///
/// let flags = WarpFlags::new(InterpolationMode::Nearest, BorderPolicy::Constant(Scalar::YELLOW))
///     .with_inverse_map(true);
///
/// assert!(flags.inverse_map);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WarpFlags {
    /// The resampling kernel.
    pub interpolation: InterpolationMode,
    /// How source coordinates outside the image are resolved.
    pub border: BorderPolicy,
    /// When set, the matrix maps destination to source and is applied as is.
    /// Otherwise it maps source to destination and is inverted first.
    pub inverse_map: bool,
}

impl WarpFlags {
    /// Create flags with a forward matrix.
    pub fn new(interpolation: InterpolationMode, border: BorderPolicy) -> Self {
        Self {
            interpolation,
            border,
            inverse_map: false,
        }
    }

    /// Set whether the matrix is already the destination to source map.
    pub fn with_inverse_map(mut self, inverse_map: bool) -> Self {
        self.inverse_map = inverse_map;
        self
    }

    /// Decode a legacy ORed flag word.
    ///
    /// The low three bits select the interpolation code, then
    /// [`WARP_FILL_OUTLIERS`] picks a constant border with `fill` and
    /// [`WARP_INVERSE_MAP`] sets `inverse_map`. Without the fill bit the border
    /// is constant black. Any other bit is rejected.
    pub fn from_bits(bits: i32, fill: Scalar) -> Result<Self, ImageError> {
        let known = INTERPOLATION_MASK | WARP_FILL_OUTLIERS | WARP_INVERSE_MAP;
        if bits & !known != 0 {
            return Err(ImageError::InvalidFlags(bits));
        }

        let interpolation = InterpolationMode::try_from(bits & INTERPOLATION_MASK)?;
        let border = if bits & WARP_FILL_OUTLIERS != 0 {
            BorderPolicy::Constant(fill)
        } else {
            BorderPolicy::Constant(Scalar::BLACK)
        };

        Ok(Self {
            interpolation,
            border,
            inverse_map: bits & WARP_INVERSE_MAP != 0,
        })
    }
}
