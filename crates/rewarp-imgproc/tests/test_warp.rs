use rand::{rngs::StdRng, Rng, SeedableRng};

use rewarp_image::{DynImage, ImageError, ImageSize, PixelBuffer, PixelDepth, Scalar};
use rewarp_imgproc::{
    border::BorderPolicy,
    dynamic,
    interpolation::{grid::meshgrid, InterpolationMode},
    padding::Padding2D,
    warp::{
        get_rotation_matrix2d, TransformKind, TransformMatrix, WarpFlags, WARP_FILL_OUTLIERS,
        WARP_INVERSE_MAP,
    },
};

const SIZE: ImageSize = ImageSize {
    width: 256,
    height: 256,
};

fn random_buffer(depth: PixelDepth, len: usize, rng: &mut StdRng) -> PixelBuffer {
    match depth {
        PixelDepth::U8 => PixelBuffer::U8((0..len).map(|_| rng.random()).collect()),
        PixelDepth::U16 => PixelBuffer::U16((0..len).map(|_| rng.random()).collect()),
        PixelDepth::I16 => PixelBuffer::I16((0..len).map(|_| rng.random()).collect()),
        PixelDepth::F32 => {
            PixelBuffer::F32((0..len).map(|_| rng.random_range(-1.0e3..1.0e3)).collect())
        }
        PixelDepth::F64 => {
            PixelBuffer::F64((0..len).map(|_| rng.random_range(-1.0e3..1.0e3)).collect())
        }
    }
}

fn random_image(
    size: ImageSize,
    depth: PixelDepth,
    channels: usize,
    seed: u64,
) -> Result<DynImage, ImageError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let buffer = random_buffer(depth, size.area() * channels, &mut rng);
    DynImage::from_buffer(size, channels, buffer)
}

#[test]
fn identity_warp_is_bit_exact() -> Result<(), ImageError> {
    let size = ImageSize {
        width: 23,
        height: 17,
    };
    for depth in PixelDepth::ALL {
        for channels in [1, 3, 4] {
            let src = random_image(size, depth, channels, 3)?;
            for interpolation in [
                InterpolationMode::Nearest,
                InterpolationMode::Bilinear,
                InterpolationMode::Bicubic,
                InterpolationMode::Area,
                InterpolationMode::Lanczos4,
            ] {
                for border in [
                    BorderPolicy::default(),
                    BorderPolicy::Replicate,
                    BorderPolicy::Reflect,
                    BorderPolicy::Reflect101,
                    BorderPolicy::Wrap,
                ] {
                    let flags = WarpFlags::new(interpolation, border);
                    for kind in [TransformKind::Affine, TransformKind::Perspective] {
                        let dst = dynamic::warp(
                            &src,
                            &TransformMatrix::identity(kind),
                            kind,
                            None,
                            &flags,
                        )?;
                        assert_eq!(dst, src, "{depth} x{channels} {interpolation} {kind}");
                    }
                }
            }
        }
    }
    Ok(())
}

#[test]
fn non_positive_output_size_is_rejected() -> Result<(), ImageError> {
    let src = random_image(SIZE, PixelDepth::U8, 1, 0)?;
    let identity = TransformMatrix::identity(TransformKind::Affine);

    for size in [[0i64, 10], [10, 0], [-5, 10], [10, -1], [0, 0]] {
        let res = ImageSize::try_from(size);
        assert_eq!(res, Err(ImageError::InvalidOutputSize(size[0], size[1])));
    }

    let res = dynamic::warp(
        &src,
        &identity,
        TransformKind::Affine,
        Some(ImageSize {
            width: 0,
            height: 10,
        }),
        &WarpFlags::default(),
    );
    assert_eq!(res, Err(ImageError::InvalidOutputSize(0, 10)));
    Ok(())
}

#[test]
fn malformed_matrix_is_rejected() -> Result<(), ImageError> {
    let src = random_image(SIZE, PixelDepth::F32, 3, 1)?;
    let flags = WarpFlags::default();

    let shapes = [(3, 3), (2, 2), (3, 2), (1, 6), (2, 4), (4, 4)];
    for (rows, cols) in shapes {
        let matrix = TransformMatrix::new(rows, cols, vec![0.5; rows * cols])?;
        let res = dynamic::warp(&src, &matrix, TransformKind::Affine, None, &flags);
        assert!(res.is_err_and(|e| e.is_invalid_argument()));
    }

    for (rows, cols) in [(2, 3), (3, 4), (2, 2)] {
        let matrix = TransformMatrix::new(rows, cols, vec![0.5; rows * cols])?;
        let res = dynamic::warp(&src, &matrix, TransformKind::Perspective, None, &flags);
        assert!(res.is_err_and(|e| e.is_invalid_argument()));
    }

    assert!(TransformMatrix::new(2, 3, vec![1.0; 4]).is_err_and(|e| e.is_invalid_argument()));
    assert!(
        TransformMatrix::new(2, 3, vec![1.0, 0.0, f64::INFINITY, 0.0, 1.0, 0.0])
            .is_err_and(|e| e.is_invalid_argument())
    );

    let singular = TransformMatrix::from([0.0; 6]);
    let res = dynamic::warp(&src, &singular, TransformKind::Affine, None, &flags);
    assert_eq!(res, Err(ImageError::CannotComputeDeterminant));
    Ok(())
}

#[test]
fn warps_are_deterministic() -> Result<(), ImageError> {
    let src = random_image(SIZE, PixelDepth::U8, 3, 11)?;
    let matrix = TransformMatrix::from(get_rotation_matrix2d((128.0, 128.0), 25.0, 1.0));
    let flags = WarpFlags::new(InterpolationMode::Bicubic, BorderPolicy::Reflect);

    let a = dynamic::warp(&src, &matrix, TransformKind::Affine, None, &flags)?;
    let b = dynamic::warp(&src, &matrix, TransformKind::Affine, None, &flags)?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn zero_translation_nearest_returns_source() -> Result<(), ImageError> {
    let src = random_image(SIZE, PixelDepth::U8, 1, 5)?;
    let matrix = TransformMatrix::new(2, 3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0])?;
    let flags = WarpFlags::new(InterpolationMode::Nearest, BorderPolicy::default());

    let dst = dynamic::warp(&src, &matrix, TransformKind::Affine, Some(SIZE), &flags)?;
    assert_eq!(dst, src);
    Ok(())
}

#[test]
fn rotation_keeps_shape_and_format() -> Result<(), ImageError> {
    // 0.90631, 0.42262, -42.10254 / -0.42262, 0.90631, 66.08774
    let matrix = TransformMatrix::from(get_rotation_matrix2d((128.0, 128.0), 25.0, 1.0));

    let flag_sets = [
        WarpFlags::default(),
        WarpFlags::from_bits(WARP_FILL_OUTLIERS, Scalar::BLACK)?,
        WarpFlags::from_bits(1 | WARP_FILL_OUTLIERS, Scalar::YELLOW)?,
        WarpFlags::from_bits(1 | WARP_FILL_OUTLIERS | WARP_INVERSE_MAP, Scalar::BLACK)?,
    ];

    for depth in PixelDepth::ALL {
        for channels in [1, 3, 4] {
            let src = random_image(SIZE, depth, channels, 21)?;
            for flags in &flag_sets {
                let dst = dynamic::warp(&src, &matrix, TransformKind::Affine, Some(SIZE), flags)?;
                assert_eq!(dst.size(), src.size());
                assert_eq!(dst.depth(), src.depth());
                assert_eq!(dst.num_channels(), src.num_channels());
            }
        }
    }
    Ok(())
}

#[test]
fn rotation_center_is_fixed() -> Result<(), ImageError> {
    let src = random_image(SIZE, PixelDepth::U16, 1, 8)?;
    let matrix = TransformMatrix::from(get_rotation_matrix2d((128.0, 128.0), 25.0, 1.0));
    let flags = WarpFlags::new(InterpolationMode::Nearest, BorderPolicy::default());

    let dst = dynamic::warp(&src, &matrix, TransformKind::Affine, None, &flags)?;
    let (src, dst) = (
        src.downcast_ref::<u16, 1>().ok_or(ImageError::CastError)?,
        dst.downcast_ref::<u16, 1>().ok_or(ImageError::CastError)?,
    );
    assert_eq!(src.get_pixel(128, 128, 0)?, dst.get_pixel(128, 128, 0)?);
    // the rotated corners leave the frame and get the black fill
    assert_eq!(dst.get_pixel(0, 0, 0)?, 0);
    Ok(())
}

#[test]
fn perspective_keeps_shape_and_format() -> Result<(), ImageError> {
    let matrix = TransformMatrix::new(
        3,
        3,
        vec![
            0.72430, -0.19608, 50.0, 0.0, 0.62489, 0.0, 0.00057, -0.00165, 1.0,
        ],
    )?;

    let flag_sets = [
        WarpFlags::default(),
        WarpFlags::new(InterpolationMode::Nearest, BorderPolicy::default()),
        WarpFlags::default().with_inverse_map(true),
        WarpFlags::new(
            InterpolationMode::Bilinear,
            BorderPolicy::Constant(Scalar::YELLOW),
        ),
    ];

    for depth in [PixelDepth::U8, PixelDepth::F32] {
        for channels in [1, 3] {
            let src = random_image(SIZE, depth, channels, 4)?;
            for flags in &flag_sets {
                let dst = dynamic::warp(&src, &matrix, TransformKind::Perspective, None, flags)?;
                assert_eq!(dst.size(), src.size());
                assert_eq!(dst.depth(), src.depth());
                assert_eq!(dst.num_channels(), src.num_channels());
            }
        }
    }
    Ok(())
}

#[test]
fn resize_remap_log_polar_keep_format() -> Result<(), ImageError> {
    let size = ImageSize {
        width: 32,
        height: 24,
    };
    let half = ImageSize {
        width: 16,
        height: 12,
    };

    // rotation by 30 degrees about the center
    let (cos30, sin30) = (30f32.to_radians().cos(), 30f32.to_radians().sin());
    let (cx, cy) = (size.width as f32 / 2.0, size.height as f32 / 2.0);
    let map_x = rewarp_image::Image::<f32, 1>::from_fn(size, |i, j, _| {
        (i as f32 - cx) * cos30 - (j as f32 - cy) * sin30 + cx
    })?;
    let map_y = rewarp_image::Image::<f32, 1>::from_fn(size, |i, j, _| {
        (i as f32 - cx) * sin30 + (j as f32 - cy) * cos30 + cy
    })?;

    for depth in PixelDepth::ALL {
        for channels in [1, 3, 4] {
            let src = random_image(size, depth, channels, 9)?;
            for interpolation in [
                InterpolationMode::Nearest,
                InterpolationMode::Bilinear,
                InterpolationMode::Bicubic,
                InterpolationMode::Area,
                InterpolationMode::Lanczos4,
            ] {
                let resized = dynamic::resize(&src, half, interpolation)?;
                let remapped = dynamic::remap(
                    &src,
                    &map_x,
                    &map_y,
                    interpolation,
                    &BorderPolicy::Constant(Scalar::YELLOW),
                )?;
                let polar = dynamic::log_polar(
                    &src,
                    None,
                    (cx as f64, cy as f64),
                    40.0,
                    &WarpFlags::new(interpolation, BorderPolicy::default()),
                )?;

                for (out, expected) in [(&resized, half), (&remapped, size), (&polar, size)] {
                    assert_eq!(out.size(), expected);
                    assert_eq!(out.depth(), depth);
                    assert_eq!(out.num_channels(), channels);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn sub_pix_keeps_format_and_centers() -> Result<(), ImageError> {
    let size = ImageSize {
        width: 21,
        height: 15,
    };
    let large = ImageSize {
        width: 40,
        height: 30,
    };
    let center = (
        (size.width as f64 - 1.0) / 2.0,
        (size.height as f64 - 1.0) / 2.0,
    );
    let centered = TransformMatrix::from([1.0, 0.0, center.0, 0.0, 1.0, center.1]);
    let (cos60, sin60) = (60f64.to_radians().cos(), 60f64.to_radians().sin());
    let rotation = TransformMatrix::from([
        cos60,
        -sin60,
        size.width as f64 * 0.5,
        sin60,
        cos60,
        size.height as f64 * 0.5,
    ]);

    for depth in PixelDepth::ALL {
        for channels in [1, 3, 4] {
            let src = random_image(size, depth, channels, 11)?;

            // centered on the middle pixel, both extract the source itself
            assert_eq!(dynamic::rect_sub_pix(&src, center, None)?, src);
            assert_eq!(dynamic::quadrangle_sub_pix(&src, &centered, None)?, src);

            let default_size = dynamic::quadrangle_sub_pix(&src, &rotation, None)?;
            let same_size = dynamic::quadrangle_sub_pix(&src, &rotation, Some(size))?;
            assert_eq!(default_size, same_size);

            let rect = dynamic::rect_sub_pix(&src, center, Some(large))?;
            let quad = dynamic::quadrangle_sub_pix(&src, &rotation, Some(large))?;
            for out in [&rect, &quad] {
                assert_eq!(out.size(), large);
                assert_eq!(out.depth(), depth);
                assert_eq!(out.num_channels(), channels);
            }
        }
    }

    let src = random_image(size, PixelDepth::U8, 1, 12)?;
    let res = dynamic::quadrangle_sub_pix(
        &src,
        &TransformMatrix::identity(TransformKind::Perspective),
        None,
    );
    assert_eq!(res, Err(ImageError::InvalidMatrixShape(3, 3, 2, 3)));
    let res = dynamic::rect_sub_pix(
        &src,
        center,
        Some(ImageSize {
            width: 0,
            height: 3,
        }),
    );
    assert_eq!(res, Err(ImageError::InvalidOutputSize(0, 3)));
    Ok(())
}

#[test]
fn identity_remap_is_bit_exact() -> Result<(), ImageError> {
    let size = ImageSize {
        width: 31,
        height: 7,
    };
    let (map_x, map_y) = meshgrid(size)?;
    for depth in PixelDepth::ALL {
        let src = random_image(size, depth, 3, 17)?;
        for interpolation in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Bicubic,
            InterpolationMode::Lanczos4,
        ] {
            let dst = dynamic::remap(
                &src,
                &map_x,
                &map_y,
                interpolation,
                &BorderPolicy::Reflect101,
            )?;
            assert_eq!(dst, src, "{depth} {interpolation}");
        }
    }
    Ok(())
}

#[test]
fn padding_grows_the_image() -> Result<(), ImageError> {
    let src = random_image(SIZE, PixelDepth::I16, 4, 2)?;
    let padding = Padding2D {
        top: 3,
        bottom: 1,
        left: 0,
        right: 7,
    };
    let out = dynamic::copy_make_border(&src, &padding, &BorderPolicy::Reflect)?;
    assert_eq!(
        out.size(),
        ImageSize {
            width: 263,
            height: 260,
        }
    );
    assert_eq!(out.depth(), PixelDepth::I16);
    Ok(())
}

#[test]
fn compatibility_codes_out_of_range() {
    assert!(InterpolationMode::try_from(5).is_err_and(|e| e.is_invalid_argument()));
    assert!(InterpolationMode::try_from(-1).is_err_and(|e| e.is_invalid_argument()));
    assert!(BorderPolicy::from_code(9, Scalar::BLACK).is_err_and(|e| e.is_invalid_argument()));
    assert!(WarpFlags::from_bits(64, Scalar::BLACK).is_err_and(|e| e.is_invalid_argument()));
    assert!(PixelDepth::try_from(7).is_err_and(|e| e.is_invalid_argument()));
    assert!(PixelDepth::try_from(1).is_err_and(|e| e.is_unsupported_format()));
}
