use clarify_image::{Image, ImageError};
use rayon::prelude::*;

/// Reflect an out-of-range index back into [0, len) with symmetric mirroring.
///
/// The edge sample is included in the reflection. A single reflection is
/// enough because the kernel is validated to not exceed the image.
#[inline]
fn mirror_index(i: isize, len: usize) -> usize {
    if i < 0 {
        (-i - 1) as usize
    } else if i >= len as isize {
        2 * len - 1 - i as usize
    } else {
        i as usize
    }
}

fn check_kernel_size(kernel_size: usize, cols: usize, rows: usize) -> Result<(), ImageError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }

    if kernel_size > cols || kernel_size > rows {
        return Err(ImageError::KernelSizeExceedsImage(kernel_size, cols, rows));
    }

    Ok(())
}

/// Apply an adaptive local-statistics (Wiener) filter to a grayscale image.
///
/// For each pixel, the local mean μ and local variance σ² are estimated over a
/// `kernel_size` x `kernel_size` window with symmetric mirror padding at the
/// image borders. The noise power ν² is estimated as the average of all local
/// variances, and the output is:
///
/// out = μ + max(0, σ² − ν²) / σ² * (in − μ)
///
/// Windows with σ² ≤ ν² (including flat windows with σ² = 0) map to μ exactly.
///
/// # Arguments
///
/// * `src` - The source grayscale image with shape (H, W).
/// * `dst` - The destination grayscale image with shape (H, W).
/// * `kernel_size` - The side length of the square window. Must be a positive
///   odd integer no larger than either image dimension.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] for an even or zero kernel size,
/// [`ImageError::KernelSizeExceedsImage`] when the window does not fit inside
/// the image, and [`ImageError::NonFiniteValue`] if the computation produces a
/// non-finite sample.
///
/// # Example
///
/// ```
/// use clarify_image::{Image, ImageSize};
/// use clarify_imgproc::filter::wiener_filter;
///
/// let image = Image::<f32, 1>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 4,
///     },
///     100.0,
/// )
/// .unwrap();
///
/// let mut filtered = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
/// wiener_filter(&image, &mut filtered, 3).unwrap();
///
/// // a constant image is a fixed point of the filter
/// assert_eq!(filtered.as_slice(), image.as_slice());
/// ```
pub fn wiener_filter(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    wiener_filter_impl(src, dst, kernel_size, None)
}

/// Apply the Wiener filter with a caller-supplied noise power.
///
/// Identical to [`wiener_filter`] except that the noise power ν² is given by
/// the caller instead of being estimated from the image.
pub fn wiener_filter_with_noise(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_size: usize,
    noise: f32,
) -> Result<(), ImageError> {
    wiener_filter_impl(src, dst, kernel_size, Some(noise))
}

fn wiener_filter_impl(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_size: usize,
    noise: Option<f32>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rows = src.rows();
    let cols = src.cols();
    check_kernel_size(kernel_size, cols, rows)?;

    let half = (kernel_size / 2) as isize;
    let window_area = (kernel_size * kernel_size) as f32;
    let src_data = src.as_slice();

    // local statistics pass, parallel by rows
    let mut local_mean = vec![0.0f32; rows * cols];
    let mut local_var = vec![0.0f32; rows * cols];

    local_mean
        .par_chunks_mut(cols)
        .zip(local_var.par_chunks_mut(cols))
        .enumerate()
        .for_each(|(r, (mean_row, var_row))| {
            for c in 0..cols {
                let mut sum = 0.0f32;
                let mut sq_sum = 0.0f32;
                for dy in -half..=half {
                    let y = mirror_index(r as isize + dy, rows);
                    let row_offset = y * cols;
                    for dx in -half..=half {
                        let x = mirror_index(c as isize + dx, cols);
                        let val = unsafe { *src_data.get_unchecked(row_offset + x) };
                        sum += val;
                        sq_sum += val * val;
                    }
                }
                let mean = sum / window_area;
                mean_row[c] = mean;
                var_row[c] = (sq_sum / window_area - mean * mean).max(0.0);
            }
        });

    // noise power: average of the local variances, accumulated in f64
    let noise = match noise {
        Some(n) => n,
        None => {
            let var_sum = local_var.iter().map(|&v| v as f64).sum::<f64>();
            (var_sum / (rows * cols) as f64) as f32
        }
    };

    // filtering pass, parallel by rows
    dst.as_slice_mut()
        .par_chunks_mut(cols)
        .zip(src_data.par_chunks(cols))
        .zip(local_mean.par_chunks(cols))
        .zip(local_var.par_chunks(cols))
        .for_each(|(((dst_row, src_row), mean_row), var_row)| {
            for c in 0..cols {
                let mean = mean_row[c];
                let var = var_row[c];
                dst_row[c] = if var <= noise {
                    mean
                } else {
                    mean + (var - noise) / var * (src_row[c] - mean)
                };
            }
        });

    // surface numeric failures instead of handing back garbage pixels
    if let Some(pos) = dst.as_slice().iter().position(|v| !v.is_finite()) {
        return Err(ImageError::NonFiniteValue(pos / cols, pos % cols));
    }

    Ok(())
}
