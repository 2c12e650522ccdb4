use crate::{color, filter, parallel};
use clarify_image::{Image, ImageError};

/// Smallest kernel size offered by slider-like host controls.
pub const MIN_KERNEL_SIZE: usize = 3;

/// Largest kernel size offered by slider-like host controls.
pub const MAX_KERNEL_SIZE: usize = 15;

/// Deblur a BGR8 image with the adaptive Wiener filter.
///
/// The image is reduced to grayscale, filtered with
/// [`filter::wiener_filter`], and the result is clipped to [0, 255] and
/// truncated back to 8 bits. The input is never mutated.
///
/// # Arguments
///
/// * `src` - The input image with 3 channels in blue-green-red order.
/// * `dst` - The output grayscale image with the same size as the input.
/// * `kernel_size` - The side length of the square filter window, odd and
///   positive. Hosts exposing a bounded control should stay within
///   [`MIN_KERNEL_SIZE`]..=[`MAX_KERNEL_SIZE`].
///
/// # Example
///
/// ```
/// use clarify_image::{Image, ImageSize};
/// use clarify_imgproc::deblur::deblur_wiener;
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 4,
///     },
///     100,
/// )
/// .unwrap();
///
/// let mut deblurred = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
/// deblur_wiener(&image, &mut deblurred, 3).unwrap();
///
/// assert_eq!(deblurred.as_slice(), &[100u8; 16]);
/// ```
pub fn deblur_wiener(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 1>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut gray = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    color::gray_from_bgr_u8(src, &mut gray)?;

    let gray_f32 = gray.cast::<f32>()?;
    let mut filtered = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    filter::wiener_filter(&gray_f32, &mut filtered, kernel_size)?;

    // clip then truncate, not round
    parallel::par_iter_rows_val(&filtered, dst, |&s, d| {
        *d = s.clamp(0.0, 255.0) as u8;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarify_image::ImageSize;

    #[test]
    fn deblur_uniform_gray_is_preserved() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let img = Image::<u8, 3>::from_size_val(size, 100)?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        deblur_wiener(&img, &mut dst, 3)?;

        assert_eq!(dst.as_slice(), &[100u8; 16]);
        Ok(())
    }

    #[test]
    fn deblur_output_shape_matches_input() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 7,
            height: 5,
        };
        let data = (0..7 * 5 * 3).map(|x| (x % 256) as u8).collect();
        let img = Image::<u8, 3>::new(size, data)?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        deblur_wiener(&img, &mut dst, 5)?;

        assert_eq!(dst.size(), size);
        assert_eq!(dst.num_channels(), 1);
        Ok(())
    }

    #[test]
    fn deblur_kernel_validation_propagates() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let img = Image::<u8, 3>::from_size_val(size, 100)?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        let res = deblur_wiener(&img, &mut dst, 4);
        assert!(matches!(res, Err(ImageError::InvalidKernelSize(4))));

        let res = deblur_wiener(&img, &mut dst, 5);
        assert!(matches!(
            res,
            Err(ImageError::KernelSizeExceedsImage(5, 4, 4))
        ));

        Ok(())
    }

    #[test]
    fn deblur_extreme_values_stay_in_range() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 6,
        };
        // checkerboard of black and white pixels
        let data = (0..6 * 6)
            .flat_map(|i| {
                let v = if (i / 6 + i % 6) % 2 == 0 { 0u8 } else { 255 };
                [v, v, v]
            })
            .collect();
        let img = Image::<u8, 3>::new(size, data)?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        deblur_wiener(&img, &mut dst, 3)?;

        // the filter pulls samples toward the local mean; the smoothed
        // checkerboard must keep some contrast without wrapping around
        let max = dst.as_slice().iter().max().copied().unwrap_or(0);
        let min = dst.as_slice().iter().min().copied().unwrap_or(0);
        assert!(min < max, "filter output collapsed unexpectedly");
        assert!(min > 0 && max < 255, "filter output escaped the local means");
        Ok(())
    }
}
