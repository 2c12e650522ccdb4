#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use clarify_image as image;

#[doc(inline)]
pub use clarify_imgproc as imgproc;

#[doc(inline)]
pub use clarify_io as io;
