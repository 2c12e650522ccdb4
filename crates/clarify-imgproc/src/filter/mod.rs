//! Filter operations
//!
//! This module provides adaptive filtering operations for image deblurring.

mod wiener;
pub use wiener::*;
