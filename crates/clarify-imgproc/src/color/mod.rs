//! Color transformations
//!
//! This module provides color space conversions for the deblurring pipeline.

mod gray;
pub use gray::*;
