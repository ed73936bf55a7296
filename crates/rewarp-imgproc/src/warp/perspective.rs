use nalgebra::{SMatrix, SVector};
use rewarp_image::{Image, ImageDtype, ImageError};

use super::affine::collinear;
use super::flags::WarpFlags;
use super::matrix::check_finite;
use super::{check_channels, check_sizes, map_coord};
use crate::interpolation::{grid::meshgrid_from_fn, remap_unchecked};

#[rustfmt::skip]
fn determinant3x3(m: &[f64; 9]) -> f64 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f64; 9]) -> [f64; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

/// Inverts a 3x3 perspective matrix.
///
/// # Errors
///
/// Fails when the matrix is singular.
pub fn invert_perspective_transform(m: &[f64; 9]) -> Result<[f64; 9], ImageError> {
    let det = determinant3x3(m);

    if det == 0.0 || !det.is_finite() {
        return Err(ImageError::CannotComputeDeterminant);
    }

    let adj = adjugate3x3(m);
    let inv_det = 1.0 / det;

    let mut inv_m = [0.0; 9];
    for (inv, a) in inv_m.iter_mut().zip(adj.iter()) {
        *inv = a * inv_det;
    }

    Ok(inv_m)
}

/// Maps a point through a perspective matrix.
///
/// Points on the line at infinity (`w == 0`) come out non-finite.
#[inline]
pub(crate) fn transform_point(x: f64, y: f64, m: &[f64; 9]) -> (f64, f64) {
    let w = m[6] * x + m[7] * y + m[8];
    let u = (m[0] * x + m[1] * y + m[2]) / w;
    let v = (m[3] * x + m[4] * y + m[5]) / w;
    (u, v)
}

/// Computes the perspective transform mapping four source points onto four destination points.
///
/// Solves the 8x8 linear system for the homography normalized with `m[8] = 1`.
///
/// # Errors
///
/// Fails when a coordinate is not finite or three points of either quad are collinear.
pub fn get_perspective_transform(
    src: &[[f64; 2]; 4],
    dst: &[[f64; 2]; 4],
) -> Result<[f64; 9], ImageError> {
    check_finite(src.iter().flatten())?;
    check_finite(dst.iter().flatten())?;
    for quad in [src, dst] {
        for skip in 0..4 {
            let tri: Vec<&[f64; 2]> = (0..4).filter(|&i| i != skip).map(|i| &quad[i]).collect();
            if collinear(tri[0], tri[1], tri[2]) {
                return Err(ImageError::DegeneratePoints);
            }
        }
    }

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let (x, y, u, v) = (s[0], s[1], d[0], d[1]);
        let (r0, r1) = (2 * i, 2 * i + 1);
        a[(r0, 0)] = x;
        a[(r0, 1)] = y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -x * u;
        a[(r0, 7)] = -y * u;
        a[(r1, 3)] = x;
        a[(r1, 4)] = y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -x * v;
        a[(r1, 7)] = -y * v;
        b[r0] = u;
        b[r1] = v;
    }

    let h = a.lu().solve(&b).ok_or(ImageError::DegeneratePoints)?;

    let mut m = [1.0; 9];
    m[..8].copy_from_slice(h.as_slice());
    check_finite(&m).map_err(|_| ImageError::DegeneratePoints)?;
    Ok(m)
}

/// Applies a perspective transformation to an image.
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 3x3 perspective transformation matrix, src -> dst unless `flags.inverse_map` is set.
/// * `flags` - Interpolation, border policy and matrix direction.
///
/// Destination pixels whose source lies on the line at infinity get the
/// constant fill, or zero under the non-constant policies.
///
/// # Example
///
/// ```
/// use rewarp_image::{Image, ImageSize};
/// use rewarp_imgproc::warp::{warp_perspective, WarpFlags};
///
/// let src = Image::<f32, 1>::new(
///   ImageSize {
///     width: 4,
///     height: 5,
///   },
///   vec![0.0f32; 4 * 5]
/// ).unwrap();
///
/// let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
///
/// let mut dst = Image::<f32, 1>::from_size_val(
///   ImageSize {
///     width: 2,
///     height: 3,
///   },
///   0.0
/// ).unwrap();
///
/// warp_perspective(&src, &mut dst, &m, &WarpFlags::default()).unwrap();
///
/// assert_eq!(dst.size().width, 2);
/// assert_eq!(dst.size().height, 3);
/// ```
pub fn warp_perspective<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f64; 9],
    flags: &WarpFlags,
) -> Result<(), ImageError> {
    check_channels::<T, C>()?;
    check_sizes(src, dst)?;
    check_finite(m)?;

    let inv_m = if flags.inverse_map {
        *m
    } else {
        invert_perspective_transform(m)?
    };

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        let (u_src, v_src) = transform_point(x as f64, y as f64, &inv_m);
        Ok((map_coord(u_src), map_coord(v_src)))
    })?;

    remap_unchecked(
        src,
        dst,
        &map_x,
        &map_y,
        flags.interpolation.for_point_sampling(),
        &flags.border,
    );

    Ok(())
}
