#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use percept_image as image;

#[doc(inline)]
pub use percept_imgproc as imgproc;

#[doc(inline)]
pub use percept_recognize as recognize;
