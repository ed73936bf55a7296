use rewarp_image::{ErrorKind, PixelDepth};

/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open, read or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] rewarp_image::ImageError),

    /// Error from the codec while decoding or encoding.
    #[error("Failed to decode or encode the image. {0}")]
    ImageCodecError(#[from] image::ImageError),

    /// The decoded color layout has no raster counterpart.
    #[error("Unsupported color layout in file: {0}")]
    UnsupportedImageFormat(String),

    /// The raster cannot be written by the encoders.
    #[error("Cannot encode a {0} raster with {1} channels")]
    UnsupportedEncoding(PixelDepth, usize),
}

impl IoError {
    /// Classify the error for callers that only distinguish bad arguments from
    /// unsupported formats. File and codec failures count as invalid arguments.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IoError::ImageCreationError(e) => e.kind(),
            IoError::UnsupportedImageFormat(_) | IoError::UnsupportedEncoding(..) => {
                ErrorKind::UnsupportedFormat
            }
            _ => ErrorKind::InvalidArgument,
        }
    }
}
