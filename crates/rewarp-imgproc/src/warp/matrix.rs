use std::fmt;

use rewarp_image::ImageError;

/// The kind of geometric transform a matrix encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// 2x3 matrix, linear map plus translation.
    Affine,
    /// 3x3 matrix, projective map.
    Perspective,
}

impl TransformKind {
    /// The `(rows, cols)` shape required by the kind.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            TransformKind::Affine => (2, 3),
            TransformKind::Perspective => (3, 3),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformKind::Affine => f.write_str("affine"),
            TransformKind::Perspective => f.write_str("perspective"),
        }
    }
}

/// A dense row-major matrix of finite transform coefficients.
///
/// The shape is checked against a [`TransformKind`] only when the matrix is
/// used, so any shape can be built and carried around.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TransformMatrix {
    /// Create a matrix from row-major coefficients.
    ///
    /// # Errors
    ///
    /// Fails when `data` does not hold `rows * cols` values or a value is not finite.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ImageError> {
        if data.len() != rows * cols {
            return Err(ImageError::InvalidMatrixData(rows, cols, data.len()));
        }
        if let Some(i) = data.iter().position(|v| !v.is_finite()) {
            return Err(ImageError::NonFiniteMatrix(i));
        }
        Ok(Self { rows, cols, data })
    }

    /// The identity transform of the given kind.
    pub fn identity(kind: TransformKind) -> Self {
        match kind {
            TransformKind::Affine => Self::from([1.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
            TransformKind::Perspective => {
                Self::from([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
            }
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The row-major coefficients.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The coefficients of a 2x3 affine matrix.
    pub fn to_affine(&self) -> Result<[f64; 6], ImageError> {
        self.to_array(TransformKind::Affine)
    }

    /// The coefficients of a 3x3 perspective matrix.
    pub fn to_perspective(&self) -> Result<[f64; 9], ImageError> {
        self.to_array(TransformKind::Perspective)
    }

    fn to_array<const N: usize>(&self, kind: TransformKind) -> Result<[f64; N], ImageError> {
        let (rows, cols) = kind.shape();
        if self.rows != rows || self.cols != cols {
            return Err(ImageError::InvalidMatrixShape(
                self.rows, self.cols, rows, cols,
            ));
        }
        let mut out = [0.0; N];
        out.copy_from_slice(&self.data);
        Ok(out)
    }
}

impl From<[f64; 6]> for TransformMatrix {
    fn from(m: [f64; 6]) -> Self {
        Self {
            rows: 2,
            cols: 3,
            data: m.to_vec(),
        }
    }
}

impl From<[f64; 9]> for TransformMatrix {
    fn from(m: [f64; 9]) -> Self {
        Self {
            rows: 3,
            cols: 3,
            data: m.to_vec(),
        }
    }
}

/// Reject matrices carrying NaN or infinite coefficients.
pub(crate) fn check_finite<'a>(m: impl IntoIterator<Item = &'a f64>) -> Result<(), ImageError> {
    match m.into_iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ImageError::NonFiniteMatrix(i)),
        None => Ok(()),
    }
}
