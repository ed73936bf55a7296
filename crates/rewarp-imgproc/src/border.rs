use std::str::FromStr;

use rewarp_image::{Image, ImageError, Scalar};

/// A rule to resolve source coordinates that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderPolicy {
    /// This border type fills the border with a single, constant color value.
    ///
    /// Example: ...d c b a | k k k k...
    Constant(Scalar),

    /// This border type takes the outermost row or column of pixels and repeats it.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,

    /// This border type wraps the content from the opposite side to fill the border.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl Default for BorderPolicy {
    fn default() -> Self {
        BorderPolicy::Constant(Scalar::BLACK)
    }
}

impl BorderPolicy {
    /// Build a policy from its legacy integer code.
    ///
    /// Codes: 0 constant, 1 replicate, 2 reflect, 3 wrap, 4 reflect-101.
    /// `fill` is only used by the constant policy.
    pub fn from_code(code: i32, fill: Scalar) -> Result<Self, ImageError> {
        match code {
            0 => Ok(BorderPolicy::Constant(fill)),
            1 => Ok(BorderPolicy::Replicate),
            2 => Ok(BorderPolicy::Reflect),
            3 => Ok(BorderPolicy::Wrap),
            4 => Ok(BorderPolicy::Reflect101),
            _ => Err(ImageError::InvalidBorder(code.to_string())),
        }
    }

    /// The legacy integer code of the policy.
    pub fn code(&self) -> i32 {
        match self {
            BorderPolicy::Constant(_) => 0,
            BorderPolicy::Replicate => 1,
            BorderPolicy::Reflect => 2,
            BorderPolicy::Wrap => 3,
            BorderPolicy::Reflect101 => 4,
        }
    }

    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        let period = 2 * len as isize;
        let r = i.rem_euclid(period) as usize;
        if r < len {
            r
        } else {
            2 * len - 1 - r
        }
    }

    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let period = (2 * len - 2) as isize;
        let r = i.rem_euclid(period) as usize;
        if r < len {
            r
        } else {
            2 * len - 2 - r
        }
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the policy.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Reflect`: mirror including edge
    /// - `Reflect101`: mirror excluding edge
    /// - `Wrap`: circular wrap
    /// - `Constant`: `None` for any index outside the range
    ///
    /// Always `None` when `len` is zero.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            BorderPolicy::Constant(_) => None,
            BorderPolicy::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            BorderPolicy::Reflect => Some(Self::reflect(i, len)),
            BorderPolicy::Reflect101 => Some(Self::reflect101(i, len)),
            BorderPolicy::Wrap => Some(i.rem_euclid(len as isize) as usize),
        }
    }

    /// Constant fill for channel `c`; zero for the non-constant policies.
    #[inline]
    pub fn fill(&self, c: usize) -> f64 {
        match self {
            BorderPolicy::Constant(color) => color.channel(c),
            _ => 0.0,
        }
    }

    /// The pixel at `(x, y)` after border resolution.
    ///
    /// Returns `None` when the coordinate resolves to the constant fill.
    #[inline]
    pub fn pixel<'a, T, const C: usize>(
        &self,
        image: &'a Image<T, C>,
        x: isize,
        y: isize,
    ) -> Option<&'a [T]> {
        let xi = self.map_index(x, image.width())?;
        let yi = self.map_index(y, image.height())?;
        image.pixel(xi, yi)
    }
}

impl FromStr for BorderPolicy {
    type Err = ImageError;

    /// Parses `constant` (black fill), `replicate`, `reflect`, `reflect101`
    /// (or `reflect_101`) and `wrap`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" => Ok(BorderPolicy::Constant(Scalar::BLACK)),
            "replicate" => Ok(BorderPolicy::Replicate),
            "reflect" => Ok(BorderPolicy::Reflect),
            "reflect101" | "reflect_101" => Ok(BorderPolicy::Reflect101),
            "wrap" => Ok(BorderPolicy::Wrap),
            other => Err(ImageError::InvalidBorder(other.to_string())),
        }
    }
}
