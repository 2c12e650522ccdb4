use argh::FromArgs;
use std::path::PathBuf;

use clarify_image::Image;
use clarify_imgproc::color;
use clarify_imgproc::deblur::{deblur_wiener, MAX_KERNEL_SIZE, MIN_KERNEL_SIZE};
use clarify_io::functional as F;
use clarify_io::png::write_image_png_gray8;

#[derive(FromArgs)]
/// Deblur an image with the adaptive Wiener filter
struct Args {
    /// path to an input image (jpg, jpeg or png)
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output png
    #[argh(option, short = 'o', default = "PathBuf::from(\"deblurred_image.png\")")]
    output_path: PathBuf,

    /// side length of the square filter window, odd, between 3 and 15
    #[argh(option, short = 'k', default = "5")]
    kernel_size: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // the core validates again, but reject out-of-domain sizes with the
    // same bounds a slider control would enforce
    if args.kernel_size % 2 == 0
        || !(MIN_KERNEL_SIZE..=MAX_KERNEL_SIZE).contains(&args.kernel_size)
    {
        return Err(format!(
            "kernel size must be an odd value between {MIN_KERNEL_SIZE} and {MAX_KERNEL_SIZE}, got {}",
            args.kernel_size
        )
        .into());
    }

    // read the image and bring it into blue-green-red channel order
    let image: Image<u8, 3> = F::read_image_any_rgb8(&args.image_path)?;
    log::info!(
        "loaded {} ({}x{})",
        args.image_path.display(),
        image.cols(),
        image.rows()
    );

    let mut bgr = Image::<u8, 3>::from_size_val(image.size(), 0)?;
    color::bgr_from_rgb(&image, &mut bgr)?;

    // deblur
    let mut deblurred = Image::<u8, 1>::from_size_val(image.size(), 0)?;
    deblur_wiener(&bgr, &mut deblurred, args.kernel_size)?;
    log::info!("applied wiener filter with kernel size {}", args.kernel_size);

    write_image_png_gray8(&args.output_path, &deblurred)?;
    log::info!("wrote {}", args.output_path.display());

    Ok(())
}
