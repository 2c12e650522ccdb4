use std::path::Path;

use clarify_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the
/// [image](https://crates.io/crates/image) crate and converts it to 8-bit RGB.
/// This is the entry point for user uploads and camera captures, whose
/// container format is not known up front.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image with three channels (rgb8).
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?.decode()?;
    image_from_dynamic(img)
}

/// Decodes an image of any supported format from raw bytes.
///
/// The container format is guessed from the byte stream, as for an upload
/// whose filename is not trusted.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the image file.
///
/// # Returns
///
/// An RGB image with three channels (rgb8).
pub fn decode_image_any_rgb8(bytes: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let img = image::load_from_memory(bytes)?;
    image_from_dynamic(img)
}

fn image_from_dynamic(img: image::DynamicImage) -> Result<Image<u8, 3>, IoError> {
    let rgb = img.to_rgb8();
    let size = ImageSize {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
    };

    Ok(Image::new(size, rgb.into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarify_image::ImageSize;

    #[test]
    fn read_any_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("pixel.png");

        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![255, 0, 0, 0, 0, 255],
        )?;
        crate::png::write_image_png_rgb8(&file_path, &image)?;

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn decode_any_from_bytes() -> Result<(), IoError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120],
        )?;
        let bytes = crate::png::encode_image_png_rgb8(&image)?;

        let image_back = decode_image_any_rgb8(&bytes)?;
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_any_missing_file() {
        let res = read_image_any_rgb8("/tmp/definitely_missing_clarify.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }
}
