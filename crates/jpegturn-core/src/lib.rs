//! # jpegturn-core
//!
//! Lossless JPEG transforms and EXIF editing on in-memory byte buffers.
//!
//! Rotation, flipping, transposition, cropping, grayscale conversion and
//! progressive re-encoding all operate in the DCT coefficient domain, so
//! the image is never decoded and re-encoded and picks up no generation
//! loss. Downscaling is the one pixel-domain operation. EXIF orientation
//! and the embedded thumbnail are read and written by patching the APP1
//! segment bytes directly.
//!
//! ## Architecture
//!
//! - [`jpeg`] - the [`JpegImage`] facade with immutable-value transforms
//! - [`transform`] - transform descriptions and policy options
//! - [`exif`] - APP1/TIFF parsing and in-place tag patching
//! - `codec` - the coefficient-domain and pixel-domain backends
//!
//! ## Example
//!
//! ```ignore
//! use jpegturn_core::{FlipDirection, JpegImage};
//!
//! let image = JpegImage::open("photo.jpg")?;
//! let upright = image.exif_autotransform()?;
//! upright.crop(100, 50, 800, 600)?.save("cropped.jpg")?;
//! ```

mod codec;
pub mod error;
pub mod exif;
pub mod jpeg;
pub mod transform;

pub use error::Error;
pub use jpeg::{FlipDirection, JpegImage};
pub use transform::{CropRegion, MarkerPolicy, Transform, TransformOptions};
