#![deny(missing_docs)]
//! Image types and traits for the clarify deblurring pipeline

/// image representation for the deblurring pipeline.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
