use rewarp_image::{Image, ImageDtype, ImageError, ImageSize};

use crate::border::BorderPolicy;
use crate::parallel;

/// Padding amount for each side of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// The same padding on all four sides.
    pub const fn uniform(pad: usize) -> Self {
        Self {
            top: pad,
            bottom: pad,
            left: pad,
            right: pad,
        }
    }

    /// The image size after applying this padding to `size`.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }

    /// Validates that a new image size correctly matches the expected dimensions
    /// after applying this padding to an existing image.
    ///
    /// # Example
    /// ```rust
    /// use rewarp_image::ImageSize;
    /// use rewarp_imgproc::padding::Padding2D;
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let old_size = ImageSize { width: 4, height: 4 };
    /// let new_size = ImageSize { width: 8, height: 6 };
    ///
    /// assert!(padding.validate_size(old_size, new_size));
    /// ```
    pub fn validate_size(&self, old_size: ImageSize, new_size: ImageSize) -> bool {
        self.padded_size(old_size) == new_size
    }
}

/// Copies `src` into the center of `dst` and fills the frame around it.
///
/// `src` lands at offset `(left, top)`; the surrounding pixels are resolved
/// through `border`, so a constant policy paints its color and the other
/// policies extend the source content. Any padding amount is accepted, also
/// larger than the image.
///
/// # Errors
///
/// Returns an error if `src` is empty or the size of `dst` does not match
/// `src` grown by `padding`.
///
/// # Example
///
/// ```rust
/// use rewarp_image::{Image, ImageSize, Scalar};
/// use rewarp_imgproc::border::BorderPolicy;
/// use rewarp_imgproc::padding::{copy_make_border, Padding2D};
///
/// let src = Image::<u8, 3>::from_size_val(ImageSize { width: 2, height: 2 }, 1).unwrap();
/// let mut dst = Image::<u8, 3>::zeros(ImageSize { width: 4, height: 4 }).unwrap();
///
/// copy_make_border(
///     &src,
///     &mut dst,
///     &Padding2D::uniform(1),
///     &BorderPolicy::Constant(Scalar::all(0.0)),
/// ).unwrap();
///
/// assert_eq!(dst.pixel(1, 1), Some(&[1u8, 1, 1][..]));
/// assert_eq!(dst.pixel(0, 0), Some(&[0u8, 0, 0][..]));
/// ```
pub fn copy_make_border<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: &Padding2D,
    border: &BorderPolicy,
) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }

    if !padding.validate_size(src.size(), dst.size()) {
        let expected = padding.padded_size(src.size());
        return Err(ImageError::InvalidImageSize(
            expected.width,
            expected.height,
            dst.width(),
            dst.height(),
        ));
    }

    let fill: [T; C] = std::array::from_fn(|c| T::from_f64(border.fill(c)));
    let (left, top) = (padding.left as isize, padding.top as isize);

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        match border.pixel(src, x as isize - left, y as isize - top) {
            Some(pixel) => dst_pixel.copy_from_slice(pixel),
            None => dst_pixel.copy_from_slice(&fill),
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewarp_image::Scalar;

    // helper functions
    fn make_src_2x2_rgb() -> Result<Image<u8, 3>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4],
        )
    }

    fn make_dst_4x4_rgb() -> Result<Image<u8, 3>, ImageError> {
        Image::zeros(ImageSize {
            width: 4,
            height: 4,
        })
    }

    const PAD_1: Padding2D = Padding2D::uniform(1);

    #[test]
    fn test_copy_make_border_constant() -> Result<(), ImageError> {
        let src = make_src_2x2_rgb()?;
        let mut dst = make_dst_4x4_rgb()?;

        copy_make_border(
            &src,
            &mut dst,
            &PAD_1,
            &BorderPolicy::Constant(Scalar::all(9.0)),
        )?;

        let d = dst.as_slice();

        // corners
        assert_eq!(&d[0..3], &[9, 9, 9]);
        assert_eq!(&d[45..48], &[9, 9, 9]);

        // top edge
        assert_eq!(&d[3..6], &[9, 9, 9]);

        // actual image
        assert_eq!(&d[15..18], &[1, 1, 1]);
        assert_eq!(&d[30..33], &[4, 4, 4]);

        Ok(())
    }

    #[test]
    fn test_copy_make_border_replicate() -> Result<(), ImageError> {
        let src = make_src_2x2_rgb()?;
        let mut dst = make_dst_4x4_rgb()?;

        copy_make_border(&src, &mut dst, &PAD_1, &BorderPolicy::Replicate)?;

        let d = dst.as_slice();

        // corners
        assert_eq!(&d[0..3], &[1, 1, 1]);
        assert_eq!(&d[45..48], &[4, 4, 4]);

        // edges
        assert_eq!(&d[3..6], &[1, 1, 1]);
        assert_eq!(&d[21..24], &[2, 2, 2]);

        Ok(())
    }

    #[test]
    fn test_copy_make_border_reflect101() -> Result<(), ImageError> {
        let src = make_src_2x2_rgb()?;
        let mut dst = make_dst_4x4_rgb()?;

        copy_make_border(&src, &mut dst, &PAD_1, &BorderPolicy::Reflect101)?;

        let d = dst.as_slice();

        // corners
        assert_eq!(&d[0..3], &[4, 4, 4]);
        assert_eq!(&d[9..12], &[3, 3, 3]);

        // top edge
        assert_eq!(&d[3..6], &[3, 3, 3]);

        // actual image
        assert_eq!(&d[15..18], &[1, 1, 1]);

        Ok(())
    }

    #[test]
    fn test_copy_make_border_wrap_wider_than_image() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 3])?;
        let padding = Padding2D {
            top: 0,
            bottom: 0,
            left: 4,
            right: 5,
        };
        let mut dst = Image::<u8, 1>::zeros([12, 1].into())?;

        copy_make_border(&src, &mut dst, &padding, &BorderPolicy::Wrap)?;

        assert_eq!(dst.as_slice(), &[3, 1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2]);
        Ok(())
    }

    #[test]
    fn test_copy_make_border_float_fill() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val([1, 1].into(), 0.5)?;
        let mut dst = Image::<f32, 1>::zeros([1, 2].into())?;
        let padding = Padding2D {
            top: 1,
            ..Default::default()
        };

        copy_make_border(
            &src,
            &mut dst,
            &padding,
            &BorderPolicy::Constant(Scalar::all(-2.5)),
        )?;
        assert_eq!(dst.as_slice(), &[-2.5, 0.5]);
        Ok(())
    }

    #[test]
    fn test_copy_make_border_dst_size_mismatch() -> Result<(), ImageError> {
        let src = make_src_2x2_rgb()?;
        let mut dst = Image::<u8, 3>::zeros([5, 4].into())?;

        let res = copy_make_border(&src, &mut dst, &PAD_1, &BorderPolicy::Replicate);
        assert_eq!(res, Err(ImageError::InvalidImageSize(4, 4, 5, 4)));
        Ok(())
    }
}
