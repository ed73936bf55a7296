use std::f64::consts::PI;

use nalgebra::{SMatrix, SVector};
use rewarp_image::{Image, ImageDtype, ImageError};

use super::flags::WarpFlags;
use super::matrix::check_finite;
use super::{check_channels, check_sizes, map_coord};
use crate::interpolation::{grid::meshgrid_from_fn, remap_unchecked};

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix.
///
/// # Errors
///
/// Fails when the linear part of the matrix is singular.
pub fn invert_affine_transform(m: &[f64; 6]) -> Result<[f64; 6], ImageError> {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    if determinant == 0.0 || !determinant.is_finite() {
        return Err(ImageError::CannotComputeDeterminant);
    }
    let inv_determinant = 1.0 / determinant;

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    Ok([new_a, new_b, new_c, new_d, new_e, new_f])
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// Positive angles rotate counter-clockwise on screen, the y axis pointing down.
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use rewarp_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d((10.0, 20.0), 60.0, 2.0);
///
/// assert!((m[1] - 1.73205).abs() < 1e-3);
/// assert!((m[2] + 34.64102).abs() < 1e-3);
/// ```
pub fn get_rotation_matrix2d(center: (f64, f64), angle: f64, scale: f64) -> [f64; 6] {
    let angle = angle * PI / 180.0;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Whether `a`, `b` and `c` lie on a line, coincident points included.
pub(crate) fn collinear(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> bool {
    let (ux, uy) = (b[0] - a[0], b[1] - a[1]);
    let (vx, vy) = (c[0] - a[0], c[1] - a[1]);
    let cross = ux * vy - uy * vx;
    let scale = (ux * ux + uy * uy).max(vx * vx + vy * vy);
    cross.abs() <= 1e-12 * scale
}

/// Computes the affine transform mapping three source points onto three destination points.
///
/// Solves the 6x6 linear system `dst_i = M * [src_i, 1]`.
///
/// # Errors
///
/// Fails when a coordinate is not finite or the source points are collinear.
pub fn get_affine_transform(
    src: &[[f64; 2]; 3],
    dst: &[[f64; 2]; 3],
) -> Result<[f64; 6], ImageError> {
    check_finite(src.iter().flatten())?;
    check_finite(dst.iter().flatten())?;
    if collinear(&src[0], &src[1], &src[2]) {
        return Err(ImageError::DegeneratePoints);
    }

    let mut a = SMatrix::<f64, 6, 6>::zeros();
    let mut b = SVector::<f64, 6>::zeros();
    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let (r0, r1) = (2 * i, 2 * i + 1);
        a[(r0, 0)] = s[0];
        a[(r0, 1)] = s[1];
        a[(r0, 2)] = 1.0;
        a[(r1, 3)] = s[0];
        a[(r1, 4)] = s[1];
        a[(r1, 5)] = 1.0;
        b[r0] = d[0];
        b[r1] = d[1];
    }

    let x = a.lu().solve(&b).ok_or(ImageError::DegeneratePoints)?;

    let mut m = [0.0; 6];
    m.copy_from_slice(x.as_slice());
    check_finite(&m).map_err(|_| ImageError::DegeneratePoints)?;
    Ok(m)
}

/// Applies an affine transformation to a point.
#[inline]
pub(crate) fn transform_point(x: f64, y: f64, m: &[f64; 6]) -> (f64, f64) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (new_height, new_width, channels).
/// * `m` - The 2x3 affine transformation matrix, src -> dst unless `flags.inverse_map` is set.
/// * `flags` - Interpolation, border policy and matrix direction.
///
/// # Errors
///
/// Fails on empty images, on channel counts other than 1, 3 or 4, on
/// non-finite coefficients and when a forward matrix cannot be inverted.
///
/// # Example
///
/// ```
/// use rewarp_image::{Image, ImageSize};
/// use rewarp_imgproc::interpolation::InterpolationMode;
/// use rewarp_imgproc::warp::{warp_affine, WarpFlags};
///
/// let src = Image::<_, 3>::from_size_val(
///    ImageSize {
///       width: 4,
///      height: 5,
///  },
///  1u8,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let new_size = ImageSize {
///    width: 4,
///   height: 5,
/// };
///
/// let mut dst = Image::<u8, 3>::zeros(new_size).unwrap();
///
/// let flags = WarpFlags {
///     interpolation: InterpolationMode::Nearest,
///     ..Default::default()
/// };
/// warp_affine(&src, &mut dst, &m, &flags).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn warp_affine<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f64; 6],
    flags: &WarpFlags,
) -> Result<(), ImageError> {
    check_channels::<T, C>()?;
    check_sizes(src, dst)?;
    check_finite(m)?;

    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = if flags.inverse_map {
        *m
    } else {
        invert_affine_transform(m)?
    };

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        let (u_src, v_src) = transform_point(x as f64, y as f64, &m_inv);
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
