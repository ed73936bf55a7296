use std::any::Any;

use crate::dtype::{ImageDtype, PixelDepth};
use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// Owned samples of a runtime-typed raster, one variant per depth.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// 8-bit unsigned samples.
    U8(Vec<u8>),
    /// 16-bit unsigned samples.
    U16(Vec<u16>),
    /// 16-bit signed samples.
    I16(Vec<i16>),
    /// 32-bit float samples.
    F32(Vec<f32>),
    /// 64-bit float samples.
    F64(Vec<f64>),
}

impl PixelBuffer {
    /// A zero-filled buffer of `len` samples.
    pub fn zeros(depth: PixelDepth, len: usize) -> Self {
        match depth {
            PixelDepth::U8 => PixelBuffer::U8(vec![0; len]),
            PixelDepth::U16 => PixelBuffer::U16(vec![0; len]),
            PixelDepth::I16 => PixelBuffer::I16(vec![0; len]),
            PixelDepth::F32 => PixelBuffer::F32(vec![0.0; len]),
            PixelDepth::F64 => PixelBuffer::F64(vec![0.0; len]),
        }
    }

    /// The depth of the samples.
    pub fn depth(&self) -> PixelDepth {
        match self {
            PixelBuffer::U8(_) => PixelDepth::U8,
            PixelBuffer::U16(_) => PixelDepth::U16,
            PixelBuffer::I16(_) => PixelDepth::I16,
            PixelBuffer::F32(_) => PixelDepth::F32,
            PixelBuffer::F64(_) => PixelDepth::F64,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            PixelBuffer::U8(d) => d.len(),
            PixelBuffer::U16(d) => d.len(),
            PixelBuffer::I16(d) => d.len(),
            PixelBuffer::F32(d) => d.len(),
            PixelBuffer::F64(d) => d.len(),
        }
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A raster whose depth and channel count are only known at runtime.
///
/// One variant per supported (depth, channels) pair. Channel counts other
/// than 1, 3 and 4 cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum DynImage {
    /// 8-bit single channel.
    Mono8(Image<u8, 1>),
    /// 8-bit RGB.
    Rgb8(Image<u8, 3>),
    /// 8-bit RGBA.
    Rgba8(Image<u8, 4>),
    /// 16-bit unsigned single channel.
    Mono16(Image<u16, 1>),
    /// 16-bit unsigned RGB.
    Rgb16(Image<u16, 3>),
    /// 16-bit unsigned RGBA.
    Rgba16(Image<u16, 4>),
    /// 16-bit signed single channel.
    Mono16S(Image<i16, 1>),
    /// 16-bit signed RGB.
    Rgb16S(Image<i16, 3>),
    /// 16-bit signed RGBA.
    Rgba16S(Image<i16, 4>),
    /// 32-bit float single channel.
    Mono32F(Image<f32, 1>),
    /// 32-bit float RGB.
    Rgb32F(Image<f32, 3>),
    /// 32-bit float RGBA.
    Rgba32F(Image<f32, 4>),
    /// 64-bit float single channel.
    Mono64F(Image<f64, 1>),
    /// 64-bit float RGB.
    Rgb64F(Image<f64, 3>),
    /// 64-bit float RGBA.
    Rgba64F(Image<f64, 4>),
}

/// An operation that reads a typed image, whatever its depth and channels.
pub trait ImageVisitor {
    /// Value produced by the visit.
    type Output;

    /// Visit the typed image.
    fn visit<T: ImageDtype, const C: usize>(self, image: &Image<T, C>) -> Self::Output;
}

/// An operation producing a new image with the same depth and channels.
pub trait ImageTransform {
    /// Apply the operation to the typed image.
    fn apply<T: ImageDtype, const C: usize>(
        &self,
        image: &Image<T, C>,
    ) -> Result<Image<T, C>, ImageError>;
}

macro_rules! for_each_variant {
    ($value:expr, $img:ident => $body:expr) => {
        match $value {
            DynImage::Mono8($img) => $body,
            DynImage::Rgb8($img) => $body,
            DynImage::Rgba8($img) => $body,
            DynImage::Mono16($img) => $body,
            DynImage::Rgb16($img) => $body,
            DynImage::Rgba16($img) => $body,
            DynImage::Mono16S($img) => $body,
            DynImage::Rgb16S($img) => $body,
            DynImage::Rgba16S($img) => $body,
            DynImage::Mono32F($img) => $body,
            DynImage::Rgb32F($img) => $body,
            DynImage::Rgba32F($img) => $body,
            DynImage::Mono64F($img) => $body,
            DynImage::Rgb64F($img) => $body,
            DynImage::Rgba64F($img) => $body,
        }
    };
}

macro_rules! map_variant {
    ($value:expr, $img:ident => $body:expr) => {
        match $value {
            DynImage::Mono8($img) => DynImage::Mono8($body),
            DynImage::Rgb8($img) => DynImage::Rgb8($body),
            DynImage::Rgba8($img) => DynImage::Rgba8($body),
            DynImage::Mono16($img) => DynImage::Mono16($body),
            DynImage::Rgb16($img) => DynImage::Rgb16($body),
            DynImage::Rgba16($img) => DynImage::Rgba16($body),
            DynImage::Mono16S($img) => DynImage::Mono16S($body),
            DynImage::Rgb16S($img) => DynImage::Rgb16S($body),
            DynImage::Rgba16S($img) => DynImage::Rgba16S($body),
            DynImage::Mono32F($img) => DynImage::Mono32F($body),
            DynImage::Rgb32F($img) => DynImage::Rgb32F($body),
            DynImage::Rgba32F($img) => DynImage::Rgba32F($body),
            DynImage::Mono64F($img) => DynImage::Mono64F($body),
            DynImage::Rgb64F($img) => DynImage::Rgb64F($body),
            DynImage::Rgba64F($img) => DynImage::Rgba64F($body),
        }
    };
}

macro_rules! impl_from_image {
    ($($variant:ident => ($t:ty, $c:literal)),* $(,)?) => {
        $(
            impl From<Image<$t, $c>> for DynImage {
                fn from(image: Image<$t, $c>) -> Self {
                    DynImage::$variant(image)
                }
            }
        )*
    };
}

impl_from_image!(
    Mono8 => (u8, 1),
    Rgb8 => (u8, 3),
    Rgba8 => (u8, 4),
    Mono16 => (u16, 1),
    Rgb16 => (u16, 3),
    Rgba16 => (u16, 4),
    Mono16S => (i16, 1),
    Rgb16S => (i16, 3),
    Rgba16S => (i16, 4),
    Mono32F => (f32, 1),
    Rgb32F => (f32, 3),
    Rgba32F => (f32, 4),
    Mono64F => (f64, 1),
    Rgb64F => (f64, 3),
    Rgba64F => (f64, 4),
);

impl DynImage {
    /// Build a raster from raw interleaved samples.
    ///
    /// # Errors
    ///
    /// * [`ImageError::UnsupportedFormat`] if `channels` is not 1, 3 or 4.
    /// * [`ImageError::InvalidChannelShape`] if the buffer length does not match.
    ///
    /// # Example
    ///
    /// ```
    /// use rewarp_image::{DynImage, ImageSize, PixelBuffer, PixelDepth};
    ///
    /// let size = ImageSize { width: 2, height: 1 };
    /// let image = DynImage::from_buffer(size, 3, PixelBuffer::U16(vec![0; 6])).unwrap();
    ///
    /// assert_eq!(image.depth(), PixelDepth::U16);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_buffer(
        size: ImageSize,
        channels: usize,
        buffer: PixelBuffer,
    ) -> Result<Self, ImageError> {
        let image = match (buffer, channels) {
            (PixelBuffer::U8(d), 1) => DynImage::Mono8(Image::new(size, d)?),
            (PixelBuffer::U8(d), 3) => DynImage::Rgb8(Image::new(size, d)?),
            (PixelBuffer::U8(d), 4) => DynImage::Rgba8(Image::new(size, d)?),
            (PixelBuffer::U16(d), 1) => DynImage::Mono16(Image::new(size, d)?),
            (PixelBuffer::U16(d), 3) => DynImage::Rgb16(Image::new(size, d)?),
            (PixelBuffer::U16(d), 4) => DynImage::Rgba16(Image::new(size, d)?),
            (PixelBuffer::I16(d), 1) => DynImage::Mono16S(Image::new(size, d)?),
            (PixelBuffer::I16(d), 3) => DynImage::Rgb16S(Image::new(size, d)?),
            (PixelBuffer::I16(d), 4) => DynImage::Rgba16S(Image::new(size, d)?),
            (PixelBuffer::F32(d), 1) => DynImage::Mono32F(Image::new(size, d)?),
            (PixelBuffer::F32(d), 3) => DynImage::Rgb32F(Image::new(size, d)?),
            (PixelBuffer::F32(d), 4) => DynImage::Rgba32F(Image::new(size, d)?),
            (PixelBuffer::F64(d), 1) => DynImage::Mono64F(Image::new(size, d)?),
            (PixelBuffer::F64(d), 3) => DynImage::Rgb64F(Image::new(size, d)?),
            (PixelBuffer::F64(d), 4) => DynImage::Rgba64F(Image::new(size, d)?),
            (buffer, channels) => {
                return Err(ImageError::UnsupportedFormat(buffer.depth(), channels))
            }
        };
        Ok(image)
    }

    /// A zero-filled raster of the given size, depth and channel count.
    pub fn zeros(size: ImageSize, depth: PixelDepth, channels: usize) -> Result<Self, ImageError> {
        let buffer = PixelBuffer::zeros(depth, size.area() * channels);
        Self::from_buffer(size, channels, buffer)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        for_each_variant!(self, img => img.size())
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size().width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size().height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        for_each_variant!(self, img => img.num_channels())
    }

    /// Get the sample depth of the image.
    pub fn depth(&self) -> PixelDepth {
        struct DepthOf;
        impl ImageVisitor for DepthOf {
            type Output = PixelDepth;
            fn visit<T: ImageDtype, const C: usize>(self, _: &Image<T, C>) -> PixelDepth {
                T::DEPTH
            }
        }
        self.visit(DepthOf)
    }

    /// Returns true if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Run a visitor on the underlying typed image.
    pub fn visit<V: ImageVisitor>(&self, visitor: V) -> V::Output {
        for_each_variant!(self, img => visitor.visit(img))
    }

    /// Apply a transform and wrap the result in the same variant.
    pub fn try_map<F: ImageTransform>(&self, op: &F) -> Result<DynImage, ImageError> {
        Ok(map_variant!(self, img => op.apply(img)?))
    }

    /// Borrow the underlying typed image if depth and channels match.
    ///
    /// ```
    /// use rewarp_image::{DynImage, Image, ImageSize};
    ///
    /// let size = ImageSize { width: 2, height: 2 };
    /// let image: DynImage = Image::<u8, 1>::from_size_val(size, 7).unwrap().into();
    ///
    /// assert!(image.downcast_ref::<u8, 1>().is_some());
    /// assert!(image.downcast_ref::<u8, 3>().is_none());
    /// ```
    pub fn downcast_ref<T: ImageDtype, const C: usize>(&self) -> Option<&Image<T, C>> {
        for_each_variant!(self, img => (img as &dyn Any).downcast_ref::<Image<T, C>>())
    }
}
