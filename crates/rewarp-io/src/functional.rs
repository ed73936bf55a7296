use std::path::Path;

use rewarp_image::{DynImage, Image, ImageDtype, ImageError, ImageSize, PixelDepth};

use crate::error::IoError;

/// Legacy read flag keeping the file layout untouched.
pub const READ_UNCHANGED: i32 = -1;

/// Legacy read flag bit requesting three color channels.
pub const READ_COLOR: i32 = 1;

/// Legacy read flag bit keeping 16-bit and float samples.
pub const READ_ANY_DEPTH: i32 = 2;

/// Legacy read flag bit keeping gray files single channel.
pub const READ_ANY_COLOR: i32 = 4;

/// Channel layout requested when reading an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// A single luma channel, converted from color when needed.
    Grayscale,
    /// Three channels in RGB order.
    #[default]
    Color,
    /// One channel for gray files, three for color files.
    AnyColor,
    /// The layout of the file, alpha included. Implies `any_depth`.
    Unchanged,
}

/// Options for [`read_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadFlags {
    /// The channel layout of the result.
    pub color: ColorMode,
    /// Keep 16-bit and float samples instead of converting to 8-bit.
    pub any_depth: bool,
}

impl ReadFlags {
    /// Create flags for the given color mode, converting samples to 8-bit.
    pub fn new(color: ColorMode) -> Self {
        Self {
            color,
            any_depth: false,
        }
    }

    /// Set whether the source depth is kept.
    pub fn with_any_depth(mut self, any_depth: bool) -> Self {
        self.any_depth = any_depth;
        self
    }

    /// Decode a legacy integer flag word.
    ///
    /// [`READ_UNCHANGED`] keeps the file layout. Otherwise the word is an OR of
    /// [`READ_COLOR`], [`READ_ANY_DEPTH`] and [`READ_ANY_COLOR`], and zero
    /// requests grayscale.
    pub fn from_bits(bits: i32) -> Result<Self, ImageError> {
        if bits == READ_UNCHANGED {
            return Ok(Self::new(ColorMode::Unchanged).with_any_depth(true));
        }
        if bits < 0 || bits & !(READ_COLOR | READ_ANY_DEPTH | READ_ANY_COLOR) != 0 {
            return Err(ImageError::InvalidFlags(bits));
        }

        let color = if bits & READ_ANY_COLOR != 0 {
            ColorMode::AnyColor
        } else if bits & READ_COLOR != 0 {
            ColorMode::Color
        } else {
            ColorMode::Grayscale
        };
        Ok(Self::new(color).with_any_depth(bits & READ_ANY_DEPTH != 0))
    }
}

fn source_depth(color: image::ColorType) -> PixelDepth {
    use image::ColorType;
    match color {
        ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => PixelDepth::U16,
        ColorType::Rgb32F | ColorType::Rgba32F => PixelDepth::F32,
        _ => PixelDepth::U8,
    }
}

// BT.601 luma, the weights used for gray conversion of color files.
fn rgb_to_gray<T: ImageDtype>(rgb: Image<T, 3>) -> Result<Image<T, 1>, ImageError> {
    let data = rgb
        .as_slice()
        .chunks_exact(3)
        .map(|p| {
            let (r, g, b): (f64, f64, f64) = (p[0].into(), p[1].into(), p[2].into());
            T::from_f64(0.299 * r + 0.587 * g + 0.114 * b)
        })
        .collect();
    Image::new(rgb.size(), data)
}

/// Reads an image from the given file path.
///
/// The format is guessed from the file content and decoded with the `image`
/// crate, so JPEG, PNG and BMP files are accepted.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
/// * `flags` - The channel layout and depth of the result.
///
/// # Returns
///
/// A raster with 1, 3 or 4 channels and 8-bit, 16-bit or float samples.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] for a missing file.
/// * [`IoError::ImageCodecError`] when decoding fails.
/// * [`IoError::UnsupportedImageFormat`] when [`ColorMode::Unchanged`] meets a
///   gray file with alpha.
pub fn read_image(file_path: impl AsRef<Path>, flags: ReadFlags) -> Result<DynImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let color = img.color();
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let any_depth = flags.any_depth || flags.color == ColorMode::Unchanged;
    let depth = if any_depth {
        source_depth(color)
    } else {
        PixelDepth::U8
    };

    let channels = match flags.color {
        ColorMode::Grayscale => 1,
        ColorMode::Color => 3,
        ColorMode::AnyColor if color.has_color() => 3,
        ColorMode::AnyColor => 1,
        ColorMode::Unchanged => match (color.has_color(), color.has_alpha()) {
            (false, false) => 1,
            (true, false) => 3,
            (true, true) => 4,
            (false, true) => return Err(IoError::UnsupportedImageFormat(format!("{color:?}"))),
        },
    };

    log::debug!(
        "decoded {} as {color:?}, loading {depth} with {channels} channels",
        file_path.display()
    );

    let gray = !color.has_color();
    let image: DynImage = match (depth, channels) {
        (PixelDepth::U8, 1) if gray => {
            Image::<u8, 1>::new(size, img.into_luma8().into_raw())?.into()
        }
        (PixelDepth::U8, 1) => {
            rgb_to_gray(Image::<u8, 3>::new(size, img.into_rgb8().into_raw())?)?.into()
        }
        (PixelDepth::U8, 3) => Image::<u8, 3>::new(size, img.into_rgb8().into_raw())?.into(),
        (PixelDepth::U8, 4) => Image::<u8, 4>::new(size, img.into_rgba8().into_raw())?.into(),
        (PixelDepth::U16, 1) if gray => {
            Image::<u16, 1>::new(size, img.into_luma16().into_raw())?.into()
        }
        (PixelDepth::U16, 1) => {
            rgb_to_gray(Image::<u16, 3>::new(size, img.into_rgb16().into_raw())?)?.into()
        }
        (PixelDepth::U16, 3) => Image::<u16, 3>::new(size, img.into_rgb16().into_raw())?.into(),
        (PixelDepth::U16, 4) => Image::<u16, 4>::new(size, img.into_rgba16().into_raw())?.into(),
        (PixelDepth::F32, 1) => {
            rgb_to_gray(Image::<f32, 3>::new(size, img.into_rgb32f().into_raw())?)?.into()
        }
        (PixelDepth::F32, 3) => Image::<f32, 3>::new(size, img.into_rgb32f().into_raw())?.into(),
        (PixelDepth::F32, 4) => {
            Image::<f32, 4>::new(size, img.into_rgba32f().into_raw())?.into()
        }
        _ => return Err(IoError::UnsupportedImageFormat(format!("{color:?}"))),
    };

    Ok(image)
}

fn save_buffer<P, const C: usize>(
    file_path: &Path,
    image: &Image<P::Subpixel, C>,
) -> Result<(), IoError>
where
    P: image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
{
    let [width, height]: [u32; 2] = image.size().into();
    let buffer = image::ImageBuffer::<P, _>::from_raw(width, height, image.as_slice().to_vec())
        .ok_or(ImageError::InvalidChannelShape(
            image.as_slice().len(),
            image.size().area() * C,
        ))?;
    buffer.save(file_path)?;
    Ok(())
}

/// Writes an image to the given file path.
///
/// The encoder is picked from the file extension. Only 8-bit and 16-bit
/// rasters can be written, and each format accepts its own subset of those
/// (JPEG takes neither 16-bit nor alpha).
///
/// # Arguments
///
/// * `file_path` - The destination path with a known image extension.
/// * `image` - The raster to encode.
pub fn write_image(file_path: impl AsRef<Path>, image: &DynImage) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    log::debug!(
        "writing {} {} raster with {} channels to {}",
        image.size(),
        image.depth(),
        image.num_channels(),
        file_path.display()
    );

    match image {
        DynImage::Mono8(img) => save_buffer::<image::Luma<u8>, 1>(file_path, img),
        DynImage::Rgb8(img) => save_buffer::<image::Rgb<u8>, 3>(file_path, img),
        DynImage::Rgba8(img) => save_buffer::<image::Rgba<u8>, 4>(file_path, img),
        DynImage::Mono16(img) => save_buffer::<image::Luma<u16>, 1>(file_path, img),
        DynImage::Rgb16(img) => save_buffer::<image::Rgb<u16>, 3>(file_path, img),
        DynImage::Rgba16(img) => save_buffer::<image::Rgba<u16>, 4>(file_path, img),
        other => Err(IoError::UnsupportedEncoding(
            other.depth(),
            other.num_channels(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewarp_image::ErrorKind;

    fn rgb_sample() -> Result<Image<u8, 3>, ImageError> {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        Image::from_fn(size, |x, y, c| (x * 40 + y * 10 + c * 3) as u8)
    }

    #[test]
    fn png_round_trip() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        let image: DynImage = rgb_sample()?.into();
        write_image(&file_path, &image)?;

        let read = read_image(&file_path, ReadFlags::default())?;
        assert_eq!(read, image);
        Ok(())
    }

    #[test]
    fn bmp_round_trip() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.bmp");

        let image: DynImage = rgb_sample()?.into();
        write_image(&file_path, &image)?;

        let read = read_image(&file_path, ReadFlags::new(ColorMode::Color))?;
        assert_eq!(read, image);
        Ok(())
    }

    #[test]
    fn jpeg_keeps_dimensions() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.jpg");

        let image: DynImage = rgb_sample()?.into();
        write_image(&file_path, &image)?;

        let read = read_image(&file_path, ReadFlags::new(ColorMode::AnyColor))?;
        assert_eq!(read.size(), image.size());
        assert_eq!(read.depth(), PixelDepth::U8);
        assert_eq!(read.num_channels(), 3);
        Ok(())
    }

    #[test]
    fn sixteen_bit_depth_flags() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("mono16.png");

        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let image = Image::<u16, 1>::new(size, vec![0, 257, 2570, 25700, 65535, 514])?;
        write_image(&file_path, &image.clone().into())?;

        let deep = read_image(&file_path, ReadFlags::new(ColorMode::Unchanged))?;
        assert_eq!(deep, DynImage::Mono16(image));

        let shallow = read_image(&file_path, ReadFlags::new(ColorMode::Grayscale))?;
        let shallow = shallow
            .downcast_ref::<u8, 1>()
            .ok_or(ImageError::CastError)?;
        assert_eq!(shallow.as_slice(), &[0, 1, 10, 100, 255, 2]);

        let color = read_image(
            &file_path,
            ReadFlags::new(ColorMode::Color).with_any_depth(true),
        )?;
        assert_eq!(color.depth(), PixelDepth::U16);
        assert_eq!(color.num_channels(), 3);
        Ok(())
    }

    #[test]
    fn grayscale_from_color() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        let size = ImageSize {
            width: 3,
            height: 1,
        };
        let image = Image::<u8, 3>::new(size, vec![255, 0, 0, 0, 255, 0, 0, 0, 255])?;
        write_image(&file_path, &image.into())?;

        let gray = read_image(&file_path, ReadFlags::new(ColorMode::Grayscale))?;
        let gray = gray.downcast_ref::<u8, 1>().ok_or(ImageError::CastError)?;
        assert_eq!(gray.as_slice(), &[76, 150, 29]);

        let any = read_image(&file_path, ReadFlags::new(ColorMode::AnyColor))?;
        assert_eq!(any.num_channels(), 3);
        Ok(())
    }

    #[test]
    fn any_color_keeps_gray() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("mono.png");

        let image = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4])?;
        write_image(&file_path, &image.clone().into())?;

        let any = read_image(&file_path, ReadFlags::new(ColorMode::AnyColor))?;
        assert_eq!(any, DynImage::Mono8(image));

        let color = read_image(&file_path, ReadFlags::default())?;
        let color = color.downcast_ref::<u8, 3>().ok_or(ImageError::CastError)?;
        assert_eq!(&color.as_slice()[..3], &[1, 1, 1]);
        Ok(())
    }

    #[test]
    fn unchanged_keeps_alpha() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgba.png");

        let image = Image::<u8, 4>::from_size_val([2, 2].into(), 128)?;
        write_image(&file_path, &image.clone().into())?;

        let read = read_image(&file_path, ReadFlags::new(ColorMode::Unchanged))?;
        assert_eq!(read, DynImage::Rgba8(image));

        let gray_alpha = tmp_dir.path().join("la.png");
        image::GrayAlphaImage::new(2, 2).save(&gray_alpha)?;
        let res = read_image(&gray_alpha, ReadFlags::new(ColorMode::Unchanged));
        assert!(res.is_err_and(|e| e.kind() == ErrorKind::UnsupportedFormat));
        Ok(())
    }

    #[test]
    fn errors() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        let missing = read_image(tmp_dir.path().join("missing.png"), ReadFlags::default());
        assert!(matches!(missing, Err(IoError::FileDoesNotExist(_))));

        let float = DynImage::zeros([2, 2].into(), PixelDepth::F32, 3)?;
        let res = write_image(tmp_dir.path().join("float.png"), &float);
        assert!(matches!(
            res,
            Err(IoError::UnsupportedEncoding(PixelDepth::F32, 3))
        ));
        Ok(())
    }

    #[test]
    fn legacy_read_flags() -> Result<(), ImageError> {
        assert_eq!(
            ReadFlags::from_bits(READ_UNCHANGED)?,
            ReadFlags::new(ColorMode::Unchanged).with_any_depth(true)
        );
        assert_eq!(
            ReadFlags::from_bits(0)?,
            ReadFlags::new(ColorMode::Grayscale)
        );
        assert_eq!(
            ReadFlags::from_bits(READ_COLOR | READ_ANY_DEPTH)?,
            ReadFlags::new(ColorMode::Color).with_any_depth(true)
        );
        assert_eq!(
            ReadFlags::from_bits(READ_ANY_COLOR)?,
            ReadFlags::new(ColorMode::AnyColor)
        );
        assert_eq!(ReadFlags::from_bits(8), Err(ImageError::InvalidFlags(8)));
        assert_eq!(ReadFlags::from_bits(-3), Err(ImageError::InvalidFlags(-3)));
        Ok(())
    }
}
