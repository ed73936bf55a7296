use crate::dtype::PixelDepth;

/// Coarse classification of an [`ImageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A parameter was malformed: bad matrix shape, non-positive size, out of range code.
    InvalidArgument,
    /// The depth/channel combination is not implemented.
    UnsupportedFormat,
}

/// An error type for the image and image processing modules.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two image sizes that must agree do not.
    #[error("Invalid image size. Expected {0}x{1}, got {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when an operation requires a non-empty image.
    #[error("Image is empty ({0}x{1})")]
    EmptyImage(usize, usize),

    /// Error when a requested output size has a non-positive component.
    #[error("Output size must be positive, got {0}x{1}")]
    InvalidOutputSize(i64, i64),

    /// Error when the matrix shape does not match the transform kind.
    #[error("Invalid matrix shape {0}x{1}, expected {2}x{3}")]
    InvalidMatrixShape(usize, usize, usize, usize),

    /// Error when the matrix coefficients do not fill the declared shape.
    #[error("Matrix data length ({2}) does not match the shape {0}x{1}")]
    InvalidMatrixData(usize, usize, usize),

    /// Error when a matrix coefficient is NaN or infinite.
    #[error("Matrix coefficient at index {0} is not finite")]
    NonFiniteMatrix(usize),

    /// Error when the determinant of a matrix that has to be inverted is zero.
    #[error("Cannot compute the inverse, the determinant is zero")]
    CannotComputeDeterminant,

    /// Error when the correspondences of a transform estimation are degenerate.
    #[error("Degenerate point correspondences, the linear system is singular")]
    DegeneratePoints,

    /// Error when an interpolation name or code is unknown.
    #[error("Unknown interpolation mode: {0}")]
    InvalidInterpolation(String),

    /// Error when a border policy name or code is unknown.
    #[error("Unknown border policy: {0}")]
    InvalidBorder(String),

    /// Error when a legacy flag word carries unknown bits.
    #[error("Invalid warp flags: {0:#x}")]
    InvalidFlags(i32),

    /// Error when a pixel depth name or code is unknown.
    #[error("Unknown pixel depth: {0}")]
    InvalidDepth(String),

    /// Error for any other out of range scalar parameter.
    #[error("Invalid parameter `{0}`: {1}")]
    InvalidParameter(&'static str, String),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a raster is not of the requested depth or channel count.
    #[error("Image is not of the requested pixel type")]
    CastError,

    /// Error when the depth is recognised but not implemented.
    #[error("Unsupported pixel depth: {0}")]
    UnsupportedDepth(String),

    /// Error when a depth/channel combination is not implemented by an operation.
    #[error("Unsupported format: {0} with {1} channels")]
    UnsupportedFormat(PixelDepth, usize),
}

impl ImageError {
    /// Classify the error as invalid-argument or unsupported-format.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageError::UnsupportedDepth(_) | ImageError::UnsupportedFormat(..) => {
                ErrorKind::UnsupportedFormat
            }
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Returns true when the error is an invalid-argument error.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Returns true when the error is an unsupported-format error.
    pub fn is_unsupported_format(&self) -> bool {
        self.kind() == ErrorKind::UnsupportedFormat
    }
}
