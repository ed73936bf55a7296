use std::{fmt, str::FromStr};

use crate::error::ImageError;

/// Sample depth of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelDepth {
    /// 8-bit unsigned integer samples.
    U8,
    /// 16-bit unsigned integer samples.
    U16,
    /// 16-bit signed integer samples.
    I16,
    /// 32-bit floating point samples.
    F32,
    /// 64-bit floating point samples.
    F64,
}

impl PixelDepth {
    /// All supported depths, in increasing code order.
    pub const ALL: [PixelDepth; 5] = [
        PixelDepth::U8,
        PixelDepth::U16,
        PixelDepth::I16,
        PixelDepth::F32,
        PixelDepth::F64,
    ];

    /// Size of one sample in bytes.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            PixelDepth::U8 => 1,
            PixelDepth::U16 | PixelDepth::I16 => 2,
            PixelDepth::F32 => 4,
            PixelDepth::F64 => 8,
        }
    }

    /// Canonical short name of the depth.
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelDepth::U8 => "u8",
            PixelDepth::U16 => "u16",
            PixelDepth::I16 => "i16",
            PixelDepth::F32 => "f32",
            PixelDepth::F64 => "f64",
        }
    }
}

impl fmt::Display for PixelDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelDepth {
    type Err = ImageError;

    /// Parses the canonical names (`u8`, `u16`, `i16`, `f32`, `f64`) and the
    /// legacy `cv8u`-style symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u8" | "cv8u" => Ok(PixelDepth::U8),
            "u16" | "cv16u" => Ok(PixelDepth::U16),
            "i16" | "cv16s" => Ok(PixelDepth::I16),
            "f32" | "cv32f" => Ok(PixelDepth::F32),
            "f64" | "cv64f" => Ok(PixelDepth::F64),
            other @ ("i8" | "cv8s" | "i32" | "cv32s") => {
                Err(ImageError::UnsupportedDepth(other.to_string()))
            }
            other => Err(ImageError::InvalidDepth(other.to_string())),
        }
    }
}

impl TryFrom<i32> for PixelDepth {
    type Error = ImageError;

    /// Converts a legacy integer depth code.
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PixelDepth::U8),
            2 => Ok(PixelDepth::U16),
            3 => Ok(PixelDepth::I16),
            5 => Ok(PixelDepth::F32),
            6 => Ok(PixelDepth::F64),
            1 | 4 => Err(ImageError::UnsupportedDepth(code.to_string())),
            _ => Err(ImageError::InvalidDepth(code.to_string())),
        }
    }
}

/// Trait for image data types.
///
/// Samples are widened to `f64` for interpolation and narrowed back with
/// [`ImageDtype::from_f64`], which rounds and saturates integer depths.
pub trait ImageDtype:
    Copy + Default + Into<f64> + PartialEq + Send + Sync + fmt::Debug + 'static
{
    /// The depth tag of the type.
    const DEPTH: PixelDepth;

    /// Convert a f64 value to the image data type.
    fn from_f64(x: f64) -> Self;

    /// Append the little-endian bytes of the sample to `out`.
    fn write_le_bytes(self, out: &mut Vec<u8>);
}

impl ImageDtype for u8 {
    const DEPTH: PixelDepth = PixelDepth::U8;

    fn from_f64(x: f64) -> Self {
        x.round().clamp(0.0, u8::MAX as f64) as u8
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        out.push(self);
    }
}

impl ImageDtype for u16 {
    const DEPTH: PixelDepth = PixelDepth::U16;

    fn from_f64(x: f64) -> Self {
        x.round().clamp(0.0, u16::MAX as f64) as u16
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl ImageDtype for i16 {
    const DEPTH: PixelDepth = PixelDepth::I16;

    fn from_f64(x: f64) -> Self {
        x.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl ImageDtype for f32 {
    const DEPTH: PixelDepth = PixelDepth::F32;

    fn from_f64(x: f64) -> Self {
        x as f32
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl ImageDtype for f64 {
    const DEPTH: PixelDepth = PixelDepth::F64;

    fn from_f64(x: f64) -> Self {
        x
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}
