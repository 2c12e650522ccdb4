use std::{fs, fs::File, path::Path};

use clarify_image::{Image, ImageSize};
use png::{BitDepth, ColorType, Decoder, Encoder};

use crate::error::IoError;

/// Read a PNG image with a single channel (mono8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let (buf, size) = read_png_impl(file_path)?;
    Ok(Image::new(size.into(), buf)?)
}

/// Read a PNG image with three channels (rgb8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A RGB image with three channels (rgb8).
pub fn read_image_png_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let (buf, size) = read_png_impl(file_path)?;
    Ok(Image::new(size.into(), buf)?)
}

/// Decode a PNG image with a single channel (mono8) from raw bytes.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the png file.
pub fn decode_image_png_mono8(bytes: &[u8]) -> Result<Image<u8, 1>, IoError> {
    let (buf, size) = decode_png_impl(bytes)?;
    Ok(Image::new(size.into(), buf)?)
}

/// Decode a PNG image with three channels (rgb8) from raw bytes.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the png file.
pub fn decode_image_png_rgb8(bytes: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let (buf, size) = decode_png_impl(bytes)?;
    Ok(Image::new(size.into(), buf)?)
}

// utility function to read the png file
fn read_png_impl(file_path: impl AsRef<Path>) -> Result<(Vec<u8>, [usize; 2]), IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    if let Some(extension) = file_path.extension() {
        if extension != "png" {
            return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
        }
    } else {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = fs::File::open(file_path)?;
    decode_png_reader(Decoder::new(file))
}

// utility function to decode png data from raw bytes
fn decode_png_impl(bytes: &[u8]) -> Result<(Vec<u8>, [usize; 2]), IoError> {
    decode_png_reader(Decoder::new(bytes))
}

fn decode_png_reader<R: std::io::Read>(
    decoder: Decoder<R>,
) -> Result<(Vec<u8>, [usize; 2]), IoError> {
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    Ok((buf, [info.width as usize, info.height as usize]))
}

/// Writes the given PNG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the PNG image data.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;
    write_png_impl(file, image.as_slice(), image.size(), ColorType::Rgb)
}

/// Writes the given PNG _(grayscale 8-bit)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the PNG image data.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;
    write_png_impl(file, image.as_slice(), image.size(), ColorType::Grayscale)
}

/// Encodes the given image as a PNG _(rgb8)_ byte stream.
///
/// # Arguments
///
/// - `image` - The image containing the PNG image data.
///
/// # Returns
///
/// The PNG-encoded bytes, ready to be served as `image/png`.
pub fn encode_image_png_rgb8(image: &Image<u8, 3>) -> Result<Vec<u8>, IoError> {
    let mut bytes = Vec::new();
    write_png_impl(&mut bytes, image.as_slice(), image.size(), ColorType::Rgb)?;
    Ok(bytes)
}

/// Encodes the given image as a PNG _(grayscale 8-bit)_ byte stream.
///
/// # Arguments
///
/// - `image` - The image containing the PNG image data.
///
/// # Returns
///
/// The PNG-encoded bytes, ready to be served as `image/png`.
pub fn encode_image_png_gray8(image: &Image<u8, 1>) -> Result<Vec<u8>, IoError> {
    let mut bytes = Vec::new();
    write_png_impl(
        &mut bytes,
        image.as_slice(),
        image.size(),
        ColorType::Grayscale,
    )?;
    Ok(bytes)
}

fn write_png_impl<W: std::io::Write>(
    writer: W,
    image_data: &[u8],
    image_size: ImageSize,
    color_type: ColorType,
) -> Result<(), IoError> {
    let mut encoder = Encoder::new(writer, image_size.width as u32, image_size.height as u32);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarify_image::ImageSize;

    #[test]
    fn read_write_png_gray8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("deblurred_image.png");

        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 64, 128, 192, 255, 100],
        )?;

        write_image_png_gray8(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_png_mono8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn encode_decode_png_rgb8() -> Result<(), IoError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 253, 254, 255, 128, 129, 130, 64, 65, 66],
        )?;

        let bytes = encode_image_png_rgb8(&image)?;
        let image_back = decode_image_png_rgb8(&bytes)?;

        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_png_invalid_extension() {
        let res = read_image_png_mono8("/tmp/not_a_png.jpg");
        assert!(matches!(
            res,
            Err(IoError::FileDoesNotExist(_)) | Err(IoError::InvalidFileExtension(_))
        ));
    }
}
