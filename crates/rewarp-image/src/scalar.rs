/// A per-channel color value used as a constant fill.
///
/// Components follow the channel order of the image (R, G, B, A for color
/// rasters); single channel images read the first component only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scalar(pub [f64; 4]);

impl Scalar {
    /// All components zero.
    pub const BLACK: Scalar = Scalar([0.0, 0.0, 0.0, 0.0]);
    /// Full 8-bit white.
    pub const WHITE: Scalar = Scalar([255.0, 255.0, 255.0, 255.0]);
    /// 8-bit red.
    pub const RED: Scalar = Scalar([255.0, 0.0, 0.0, 255.0]);
    /// 8-bit green.
    pub const GREEN: Scalar = Scalar([0.0, 255.0, 0.0, 255.0]);
    /// 8-bit blue.
    pub const BLUE: Scalar = Scalar([0.0, 0.0, 255.0, 255.0]);
    /// 8-bit yellow.
    pub const YELLOW: Scalar = Scalar([255.0, 255.0, 0.0, 255.0]);

    /// Create a scalar from its four components.
    pub const fn new(c0: f64, c1: f64, c2: f64, c3: f64) -> Self {
        Scalar([c0, c1, c2, c3])
    }

    /// Create a scalar with the same value in every component.
    pub const fn all(v: f64) -> Self {
        Scalar([v, v, v, v])
    }

    /// Component for channel `c`; channels past the fourth read zero.
    pub fn channel(&self, c: usize) -> f64 {
        self.0.get(c).copied().unwrap_or(0.0)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar([v, 0.0, 0.0, 0.0])
    }
}

impl From<[f64; 4]> for Scalar {
    fn from(v: [f64; 4]) -> Self {
        Scalar(v)
    }
}

impl From<[f64; 3]> for Scalar {
    fn from(v: [f64; 3]) -> Self {
        Scalar([v[0], v[1], v[2], 0.0])
    }
}
