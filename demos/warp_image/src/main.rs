use argh::FromArgs;
use std::path::PathBuf;

use rewarp::image::{ImageSize, Scalar};
use rewarp::imgproc::{
    border::BorderPolicy,
    dynamic,
    interpolation::InterpolationMode,
    warp::{self, TransformKind, TransformMatrix, WarpFlags},
};
use rewarp::io::{
    functional::{self as F, ColorMode, ReadFlags},
    hash::hash_image,
};

#[derive(FromArgs)]
/// Rotate and scale an image about its center, save it and print its content hash
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// rotation angle in degrees, counter-clockwise
    #[argh(option, default = "25.0")]
    angle: f64,

    /// isotropic scale factor
    #[argh(option, default = "1.0")]
    scale: f64,

    /// interpolation: nearest, linear, cubic, area or lanczos4
    #[argh(option, default = "InterpolationMode::Bilinear")]
    interpolation: InterpolationMode,

    /// border: constant, replicate, reflect, reflect101 or wrap
    #[argh(option, default = "BorderPolicy::default()")]
    border: BorderPolicy,

    /// gray level of the constant border
    #[argh(option, default = "0.0")]
    fill: f64,

    /// output width, the input width when omitted
    #[argh(option)]
    width: Option<usize>,

    /// output height, the input height when omitted
    #[argh(option)]
    height: Option<usize>,

    /// keep 16-bit samples and alpha from the input
    #[argh(switch)]
    unchanged: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let color = if args.unchanged {
        ColorMode::Unchanged
    } else {
        ColorMode::Color
    };
    let image = F::read_image(&args.input, ReadFlags::new(color))?;
    log::info!(
        "loaded {} ({} {} channels)",
        image.size(),
        image.depth(),
        image.num_channels()
    );

    let output_size = ImageSize {
        width: args.width.unwrap_or(image.width()),
        height: args.height.unwrap_or(image.height()),
    };

    let center = (image.width() as f64 / 2.0, image.height() as f64 / 2.0);
    let matrix = TransformMatrix::from(warp::get_rotation_matrix2d(
        center,
        args.angle,
        args.scale,
    ));

    let border = match args.border {
        BorderPolicy::Constant(_) => BorderPolicy::Constant(Scalar::all(args.fill)),
        border => border,
    };
    let flags = WarpFlags::new(args.interpolation, border);

    let output = dynamic::warp(
        &image,
        &matrix,
        TransformKind::Affine,
        Some(output_size),
        &flags,
    )?;

    F::write_image(&args.output, &output)?;
    log::info!("wrote {}", args.output.display());

    println!("{}", hash_image(&output));

    Ok(())
}
