#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image deblurring pipeline module.
pub mod deblur;

/// image filtering module.
pub mod filter;

/// module containing parallelization utilities.
pub mod parallel;
