//! Entry points for rasters whose depth and channel count are only known at runtime.
//!
//! Every function validates its arguments, dispatches to the typed kernel for
//! the variant of the input and returns a fresh [`DynImage`] of that same variant.

use rewarp_image::{DynImage, Image, ImageDtype, ImageError, ImageSize, ImageTransform};

use crate::border::BorderPolicy;
use crate::interpolation::InterpolationMode;
use crate::padding::Padding2D;
use crate::warp::{TransformKind, TransformMatrix, WarpFlags};

enum WarpMatrix {
    Affine([f64; 6]),
    Perspective([f64; 9]),
}

struct Warp<'a> {
    matrix: WarpMatrix,
    size: ImageSize,
    flags: &'a WarpFlags,
}

impl ImageTransform for Warp<'_> {
    fn apply<T: ImageDtype, const C: usize>(
        &self,
        image: &Image<T, C>,
    ) -> Result<Image<T, C>, ImageError> {
        let mut dst = Image::zeros(self.size)?;
        match &self.matrix {
            WarpMatrix::Affine(m) => crate::warp::warp_affine(image, &mut dst, m, self.flags)?,
            WarpMatrix::Perspective(m) => {
                crate::warp::warp_perspective(image, &mut dst, m, self.flags)?
            }
        }
        Ok(dst)
    }
}

fn check_source(src: &DynImage) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }
    Ok(())
}

fn check_output_size(size: ImageSize) -> Result<ImageSize, ImageError> {
    if size.is_empty() {
        return Err(ImageError::InvalidOutputSize(
            size.width as i64,
            size.height as i64,
        ));
    }
    Ok(size)
}

/// Warps an image with an affine or perspective matrix.
///
/// # Arguments
///
/// * `src` - The input image, any supported depth with 1, 3 or 4 channels.
/// * `matrix` - 2x3 for [`TransformKind::Affine`], 3x3 for [`TransformKind::Perspective`].
/// * `kind` - The transform the matrix encodes.
/// * `output_size` - The destination size, the source size when `None`.
/// * `flags` - Interpolation, border policy and matrix direction.
///
/// # Returns
///
/// A new image with the depth and channels of `src` and the requested size.
///
/// # Errors
///
/// Invalid-argument errors for an empty source, a non-positive output size, a
/// matrix shape that does not match `kind` and a singular forward matrix.
///
/// # Example
///
/// ```
/// use rewarp_image::{DynImage, Image, ImageSize};
/// use rewarp_imgproc::dynamic::warp;
/// use rewarp_imgproc::warp::{TransformKind, TransformMatrix, WarpFlags};
///
/// let size = ImageSize { width: 8, height: 6 };
/// let src: DynImage = Image::<u16, 3>::from_size_val(size, 512).unwrap().into();
///
/// let dst = warp(
///     &src,
///     &TransformMatrix::identity(TransformKind::Affine),
///     TransformKind::Affine,
///     None,
///     &WarpFlags::default(),
/// )
/// .unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn warp(
    src: &DynImage,
    matrix: &TransformMatrix,
    kind: TransformKind,
    output_size: Option<ImageSize>,
    flags: &WarpFlags,
) -> Result<DynImage, ImageError> {
    check_source(src)?;
    let size = check_output_size(output_size.unwrap_or(src.size()))?;
    let matrix = match kind {
        TransformKind::Affine => WarpMatrix::Affine(matrix.to_affine()?),
        TransformKind::Perspective => WarpMatrix::Perspective(matrix.to_perspective()?),
    };

    log::debug!(
        "warp {kind} {}x{} {} ch{} -> {size}, {} border {:?}, inverse map {}",
        src.width(),
        src.height(),
        src.depth(),
        src.num_channels(),
        flags.interpolation,
        flags.border,
        flags.inverse_map,
    );

    src.try_map(&Warp {
        matrix,
        size,
        flags,
    })
}

struct Resize {
    size: ImageSize,
    interpolation: InterpolationMode,
}

impl ImageTransform for Resize {
    fn apply<T: ImageDtype, const C: usize>(
        &self,
        image: &Image<T, C>,
    ) -> Result<Image<T, C>, ImageError> {
        let mut dst = Image::zeros(self.size)?;
        crate::resize::resize(image, &mut dst, self.interpolation)?;
        Ok(dst)
    }
}

/// Resizes an image to `size`.
///
/// See [`crate::resize::resize`] for the sampling rules.
pub fn resize(
    src: &DynImage,
    size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<DynImage, ImageError> {
    check_source(src)?;
    let size = check_output_size(size)?;
    log::debug!(
        "resize {} {} -> {size} ({interpolation})",
        src.size(),
        src.depth()
    );
    src.try_map(&Resize {
        size,
        interpolation,
    })
}

struct Remap<'a> {
    map_x: &'a Image<f32, 1>,
    map_y: &'a Image<f32, 1>,
    interpolation: InterpolationMode,
    border: &'a BorderPolicy,
}

impl ImageTransform for Remap<'_> {
    fn apply<T: ImageDtype, const C: usize>(
        &self,
        image: &Image<T, C>,
    ) -> Result<Image<T, C>, ImageError> {
        let mut dst = Image::zeros(self.map_x.size())?;
        crate::interpolation::remap(
            image,
            &mut dst,
            self.map_x,
            self.map_y,
            self.interpolation,
            self.border,
        )?;
        Ok(dst)
    }
}

/// Samples `src` at the coordinates held by `map_x` and `map_y`.
///
/// The result has the size of the maps.
pub fn remap(
    src: &DynImage,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    interpolation: InterpolationMode,
    border: &BorderPolicy,
) -> Result<DynImage, ImageError> {
    check_source(src)?;
    check_output_size(map_x.size())?;
    src.try_map(&Remap {
        map_x,
        map_y,
        interpolation,
        border,
    })
}

struct CopyMakeBorder<'a> {
    padding: &'a Padding2D,
    border: &'a BorderPolicy,
}

impl ImageTransform for CopyMakeBorder<'_> {
    fn apply<T: ImageDtype, const C: usize>(
        &self,
        image: &Image<T, C>,
    ) -> Result<Image<T, C>, ImageError> {
        let mut dst = Image::zeros(self.padding.padded_size(image.size()))?;
        crate::padding::copy_make_border(image, &mut dst, self.padding, self.border)?;
        Ok(dst)
    }
}

/// Pads an image on each side, filling the frame through `border`.
pub fn copy_make_border(
    src: &DynImage,
    padding: &Padding2D,
    border: &BorderPolicy,
) -> Result<DynImage, ImageError> {
    check_source(src)?;
    src.try_map(&CopyMakeBorder { padding, border })
}

struct LogPolar<'a> {
    size: ImageSize,
    center: (f64, f64),
    magnitude: f64,
    flags: &'a WarpFlags,
}

impl ImageTransform for LogPolar<'_> {
    fn apply<T: ImageDtype, const C: usize>(
        &self,
        image: &Image<T, C>,
    ) -> Result<Image<T, C>, ImageError> {
        let mut dst = Image::zeros(self.size)?;
        crate::warp::log_polar(image, &mut dst, self.center, self.magnitude, self.flags)?;
        Ok(dst)
    }
}

/// Remaps an image to or from log-polar space.
///
/// The destination has `output_size`, or the source size when `None`. See
/// [`crate::warp::log_polar`] for the mapping.
pub fn log_polar(
    src: &DynImage,
    output_size: Option<ImageSize>,
    center: (f64, f64),
    magnitude: f64,
    flags: &WarpFlags,
) -> Result<DynImage, ImageError> {
    check_source(src)?;
    let size = check_output_size(output_size.unwrap_or(src.size()))?;
    src.try_map(&LogPolar {
        size,
        center,
        magnitude,
        flags,
    })
}

enum SubPix {
    Rect((f64, f64)),
    Quadrangle([f64; 6]),
}

struct SubPixSample {
    mode: SubPix,
    size: ImageSize,
}

impl ImageTransform for SubPixSample {
    fn apply<T: ImageDtype, const C: usize>(
        &self,
        image: &Image<T, C>,
    ) -> Result<Image<T, C>, ImageError> {
        let mut dst = Image::zeros(self.size)?;
        match &self.mode {
            SubPix::Rect(center) => crate::warp::rect_sub_pix(image, &mut dst, *center)?,
            SubPix::Quadrangle(m) => crate::warp::quadrangle_sub_pix(image, &mut dst, m)?,
        }
        Ok(dst)
    }
}

/// Extracts a rectangle of `output_size` centered on `center`.
///
/// The rectangle has the source size when `output_size` is `None`. See
/// [`crate::warp::rect_sub_pix`] for the sampling rules.
pub fn rect_sub_pix(
    src: &DynImage,
    center: (f64, f64),
    output_size: Option<ImageSize>,
) -> Result<DynImage, ImageError> {
    check_source(src)?;
    let size = check_output_size(output_size.unwrap_or(src.size()))?;
    log::debug!("rect_sub_pix {} around {center:?} -> {size}", src.size());
    src.try_map(&SubPixSample {
        mode: SubPix::Rect(center),
        size,
    })
}

/// Samples a quadrangle of the source through a 2x3 `matrix`.
///
/// The destination has `output_size`, or the source size when `None`. See
/// [`crate::warp::quadrangle_sub_pix`] for the centered mapping.
///
/// # Errors
///
/// Besides the size checks, a matrix that is not 2x3 is invalid-argument.
pub fn quadrangle_sub_pix(
    src: &DynImage,
    matrix: &TransformMatrix,
    output_size: Option<ImageSize>,
) -> Result<DynImage, ImageError> {
    check_source(src)?;
    let size = check_output_size(output_size.unwrap_or(src.size()))?;
    let m = matrix.to_affine()?;
    log::debug!("quadrangle_sub_pix {} -> {size}", src.size());
    src.try_map(&SubPixSample {
        mode: SubPix::Quadrangle(m),
        size,
    })
}
