use rewarp::image::{DynImage, Image, ImageSize};
use rewarp::imgproc::{
    dynamic,
    interpolation::InterpolationMode,
    warp::{TransformKind, TransformMatrix, WarpFlags},
};
use rewarp::io::{
    functional::{read_image, write_image, ColorMode, ReadFlags},
    hash::hash_image,
};

fn pattern(size: ImageSize) -> Result<Image<u8, 3>, rewarp::image::ImageError> {
    Image::from_fn(size, |x, y, c| (1 + x * 7 + y * 13 + c * 50) as u8)
}

#[test]
fn load_translate_save() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");

    let size = ImageSize {
        width: 12,
        height: 9,
    };
    let src = pattern(size)?;
    write_image(&input, &src.clone().into())?;

    let loaded = read_image(&input, ReadFlags::new(ColorMode::Color))?;
    assert_eq!(hash_image(&loaded), hash_image(&src.clone().into()));

    let matrix = TransformMatrix::new(2, 3, vec![1.0, 0.0, 2.0, 0.0, 1.0, 1.0])?;
    let flags = WarpFlags::new(InterpolationMode::Nearest, Default::default());
    let warped = dynamic::warp(&loaded, &matrix, TransformKind::Affine, None, &flags)?;

    let expected: DynImage = Image::<u8, 3>::from_fn(size, |x, y, c| {
        if x < 2 || y < 1 {
            0
        } else {
            src.get_pixel(x - 2, y - 1, c).unwrap_or_default()
        }
    })?
    .into();
    assert_eq!(warped, expected);

    write_image(&output, &warped)?;
    let reloaded = read_image(&output, ReadFlags::new(ColorMode::Unchanged))?;
    assert_eq!(hash_image(&reloaded), hash_image(&expected));
    Ok(())
}

#[test]
fn repeated_warps_hash_equal() -> Result<(), Box<dyn std::error::Error>> {
    let size = ImageSize {
        width: 64,
        height: 48,
    };
    let src: DynImage = pattern(size)?.into();
    let matrix = TransformMatrix::from(rewarp::imgproc::warp::get_rotation_matrix2d(
        (32.0, 24.0),
        25.0,
        0.8,
    ));
    let flags = WarpFlags::default();

    let a = dynamic::warp(&src, &matrix, TransformKind::Affine, None, &flags)?;
    let b = dynamic::warp(&src, &matrix, TransformKind::Affine, None, &flags)?;
    assert_eq!(hash_image(&a), hash_image(&b));
    assert_ne!(hash_image(&a), hash_image(&src));
    Ok(())
}
