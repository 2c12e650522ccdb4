/// An error type for the image module.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Images have incompatible sizes ({0}x{1} != {2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel data cannot be cast to the requested type.
    #[error("Failed to cast the image data")]
    CastError,

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a filter kernel size is not a positive odd integer.
    #[error("Kernel size must be a positive odd integer, got {0}")]
    InvalidKernelSize(usize),

    /// Error when a filter kernel does not fit inside the image.
    #[error("Kernel size ({0}) exceeds the image dimensions ({1}x{2})")]
    KernelSizeExceedsImage(usize, usize, usize),

    /// Error when a computation produces a non-finite sample.
    #[error("Non-finite value produced at pixel ({0}, {1})")]
    NonFiniteValue(usize, usize),
}
