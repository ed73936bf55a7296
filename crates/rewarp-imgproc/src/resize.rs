use rewarp_image::{Image, ImageDtype, ImageError};

use crate::border::BorderPolicy;
use crate::interpolation::{grid::meshgrid_from_fn, remap_unchecked, InterpolationMode};
use crate::parallel;

/// Resize an image to a new size.
///
/// The scale factors are taken from the sizes of `src` and `dst`. Nearest
/// samples `floor(x * scale)`; bilinear, bicubic and Lanczos sample at the
/// pixel centers `(x + 0.5) * scale - 0.5` with replicated borders; area
/// averages the source footprint of every destination pixel. Resizing to the
/// same size copies the image.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use rewarp_image::{Image, ImageSize};
/// use rewarp_imgproc::resize::resize;
/// use rewarp_imgproc::interpolation::InterpolationMode;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize(
///     &image,
///     &mut image_resized,
///     InterpolationMode::Nearest,
/// )
/// .unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }
    if dst.is_empty() {
        return Err(ImageError::InvalidOutputSize(
            dst.width() as i64,
            dst.height() as i64,
        ));
    }

    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let scale_x = src.width() as f64 / dst.width() as f64;
    let scale_y = src.height() as f64 / dst.height() as f64;

    match interpolation {
        InterpolationMode::Area => resize_area(src, dst),
        InterpolationMode::Nearest => {
            let (map_x, map_y) = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
                let u = (x as f64 * scale_x).floor().min((src.width() - 1) as f64);
                let v = (y as f64 * scale_y).floor().min((src.height() - 1) as f64);
                Ok((u as f32, v as f32))
            })?;
            remap_unchecked(
                src,
                dst,
                &map_x,
                &map_y,
                interpolation,
                &BorderPolicy::Replicate,
            );
        }
        _ => {
            let (map_x, map_y) = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
                let u = (x as f64 + 0.5) * scale_x - 0.5;
                let v = (y as f64 + 0.5) * scale_y - 0.5;
                Ok((u as f32, v as f32))
            })?;
            remap_unchecked(
                src,
                dst,
                &map_x,
                &map_y,
                interpolation,
                &BorderPolicy::Replicate,
            );
        }
    }

    Ok(())
}

/// The source pixels covered by each destination pixel along one axis.
///
/// Weights are the overlap lengths normalized by the footprint length, so
/// every list sums to one.
fn area_taps(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = ((d + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let overlap = (end.min((s + 1) as f64) - start.max(s as f64)).max(0.0);
                    (overlap > 0.0).then_some((s, overlap / (end - start)))
                })
                .collect()
        })
        .collect()
}

/// Resample with the exact pixel area relation.
fn resize_area<T: ImageDtype, const C: usize>(src: &Image<T, C>, dst: &mut Image<T, C>) {
    let taps_x = area_taps(src.width(), dst.width());
    let taps_y = area_taps(src.height(), dst.height());
    let src_data = src.as_slice();
    let src_cols = src.cols();

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let mut acc = [0.0f64; C];
        for &(sy, wy) in &taps_y[y] {
            for &(sx, wx) in &taps_x[x] {
                let w = wx * wy;
                let base = (sy * src_cols + sx) * C;
                for (a, &p) in acc.iter_mut().zip(&src_data[base..base + C]) {
                    let p: f64 = p.into();
                    *a += w * p;
                }
            }
        }
        for (d, a) in dst_pixel.iter_mut().zip(acc) {
            *d = T::from_f64(a);
        }
    });
}
