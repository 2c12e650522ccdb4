use crate::parallel;
use clarify_image::{Image, ImageError};

/// Define the BGR weights for the grayscale conversion.
const BW: f64 = 0.114;
const GW: f64 = 0.587;
const RW: f64 = 0.299;

/// Convert a BGR image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input image must have 3 channels in blue-green-red order.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use clarify_image::{Image, ImageSize};
/// use clarify_imgproc::color::gray_from_bgr;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gray_from_bgr(&image, &mut gray).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn gray_from_bgr<T>(src: &Image<T, 3>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let bw = T::from(BW).ok_or(ImageError::CastError)?;
    let gw = T::from(GW).ok_or(ImageError::CastError)?;
    let rw = T::from(RW).ok_or(ImageError::CastError)?;

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0];
        let g = src_pixel[1];
        let r = src_pixel[2];
        dst_pixel[0] = bw * b + gw * g + rw * r;
    });

    Ok(())
}

/// Convert a BGR8 image to grayscale using the formula:
///
/// Y = (29 * B + 150 * G + 77 * R) >> 8
///
/// # Arguments
///
/// * `src` - The input BGR8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input image must have 3 channels in blue-green-red order.
/// Precondition: the input and output images must have the same size.
pub fn gray_from_bgr_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0] as u16;
        let g = src_pixel[1] as u16;
        let r = src_pixel[2] as u16;
        dst_pixel[0] = ((b * 29 + g * 150 + r * 77) >> 8) as u8;
    });

    Ok(())
}

/// Convert an RGB image to BGR by swapping the red and blue channels.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output BGR image.
///
/// Precondition: the input and output images must have the same size.
pub fn bgr_from_rgb<T>(src: &Image<T, 3>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel
            .iter_mut()
            .zip(src_pixel.iter().rev())
            .for_each(|(d, s)| {
                *d = *s;
            });
    });

    Ok(())
}
