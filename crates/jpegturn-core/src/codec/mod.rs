//! Codec adapter: the crate's only boundary with the JPEG codecs.
//!
//! Two capability groups, matching the two ways a JPEG can be reworked:
//!
//! - **coefficient-domain** ([`lossless`]): header parse plus quantized DCT
//!   block decode/encode with MCU-aware geometric remapping, via mozjpeg's
//!   `transupp` extension. Lossless by construction.
//! - **pixel-domain** ([`scale`]): full decode, resample, re-encode at a
//!   quality setting, via the `image` crate. Lossy; used only for
//!   downscaling.
//!
//! Everything transient (coefficient arrays, scratch buffers, C-side output
//! buffers) is owned by a single call and released before it returns.

mod lossless;
mod scale;

pub(crate) use lossless::transform as lossless_transform;
pub(crate) use scale::{probe_dimensions, scale};
