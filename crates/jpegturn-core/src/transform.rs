//! Lossless transform descriptions and the engine entry point.
//!
//! A geometric operation on a JPEG is described by a [`Transform`] plus
//! [`TransformOptions`], then executed in the DCT coefficient domain by the
//! codec adapter, with no pixel decode and no recompression loss. The engine's job
//! is block remapping: the codec reads the compressed block structure,
//! permutes blocks for the requested geometry, and re-emits a valid stream.
//!
//! # MCU alignment
//!
//! JPEG transforms operate on minimum coded units (8x8 blocks, or larger with
//! chroma subsampling). An operation that is not aligned to the MCU grid has
//! three possible outcomes, chosen by [`TransformOptions`]:
//!
//! - default: the partial edge block is carried over untouched; the result is
//!   lossless but the trailing edge may look odd for flips/rotations
//! - `trim`: the partial edge strip is dropped and the output shrinks to the
//!   next MCU boundary
//! - `perfect`: the operation fails with
//!   [`Error::ImperfectTransform`](crate::Error::ImperfectTransform) instead
//!   of touching edge data

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::Error;

/// A rectangular crop region in pixel coordinates, origin top-left.
///
/// The requested dimensions are forced exactly: the codec internally expands
/// the decoded region outward to MCU boundaries and re-crops, so `width` and
/// `height` do not need to be multiples of the MCU size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Horizontal offset of the upper-left corner.
    pub x: u32,
    /// Vertical offset of the upper-left corner.
    pub y: u32,
    /// Width of the region in pixels.
    pub width: u32,
    /// Height of the region in pixels.
    pub height: u32,
}

/// A single coefficient-domain operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transform {
    /// No geometric change. Combined with a [`MarkerPolicy`] this is the
    /// "copy markers only" operation: re-emit the stream, filtering metadata.
    None,
    /// Mirror left-right.
    FlipHorizontal,
    /// Mirror top-bottom.
    FlipVertical,
    /// Mirror across the main (upper-left to lower-right) diagonal.
    Transpose,
    /// Mirror across the anti (upper-right to lower-left) diagonal.
    Transverse,
    /// Rotate 90 degrees clockwise. Swaps width and height.
    Rotate90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise). Swaps dimensions.
    Rotate270,
    /// Drop the chroma components, keeping only luma blocks.
    Grayscale,
    /// Extract a sub-rectangle of blocks.
    Crop(CropRegion),
    /// Re-encode with progressive scan order instead of baseline.
    Progressive,
}

impl Transform {
    /// Returns true if this operation swaps the width and height of the
    /// output relative to the input.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Transform::Transpose
                | Transform::Transverse
                | Transform::Rotate90
                | Transform::Rotate270
        )
    }

    /// Returns true if this operation changes pixel content or geometry, as
    /// opposed to only re-arranging the encoded representation.
    #[inline]
    pub fn changes_pixels(self) -> bool {
        !matches!(self, Transform::None | Transform::Progressive)
    }
}

/// Which non-essential markers survive into the transformed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerPolicy {
    /// Drop all COM and APPn markers.
    None,
    /// Keep COM markers, drop APPn (EXIF, JFIF extensions, ...).
    Comments,
    /// Keep every COM and APPn marker from the source.
    #[default]
    All,
}

/// Policy knobs for a lossless transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Fail with `ImperfectTransform` rather than touch a partial edge MCU.
    pub perfect: bool,
    /// Drop the partial edge strip when the operation is not MCU-aligned.
    pub trim: bool,
    /// Marker survival policy for the output stream.
    pub markers: MarkerPolicy,
}

/// Execute one lossless transform and return the new JPEG byte stream.
///
/// This is the low-level engine entry; [`JpegImage`](crate::JpegImage)
/// wraps it with bounds validation, EXIF bookkeeping, and thumbnail
/// maintenance. The source buffer is never modified.
///
/// # Errors
///
/// - [`Error::Decode`] if `data` is not a parseable JPEG stream
/// - [`Error::ImperfectTransform`] if `options.perfect` is set and the
///   operation is not MCU-aligned
pub fn apply(data: &[u8], transform: Transform, options: &TransformOptions) -> Result<Vec<u8>, Error> {
    codec::lossless_transform(data, transform, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swaps_dimensions() {
        assert!(Transform::Rotate90.swaps_dimensions());
        assert!(Transform::Rotate270.swaps_dimensions());
        assert!(Transform::Transpose.swaps_dimensions());
        assert!(Transform::Transverse.swaps_dimensions());

        assert!(!Transform::None.swaps_dimensions());
        assert!(!Transform::Rotate180.swaps_dimensions());
        assert!(!Transform::FlipHorizontal.swaps_dimensions());
        assert!(!Transform::FlipVertical.swaps_dimensions());
        assert!(!Transform::Grayscale.swaps_dimensions());
        assert!(!Transform::Progressive.swaps_dimensions());
    }

    #[test]
    fn test_changes_pixels() {
        assert!(Transform::Rotate90.changes_pixels());
        assert!(Transform::Grayscale.changes_pixels());
        assert!(Transform::Crop(CropRegion { x: 0, y: 0, width: 8, height: 8 }).changes_pixels());

        // Re-encoding passes leave pixel content alone.
        assert!(!Transform::None.changes_pixels());
        assert!(!Transform::Progressive.changes_pixels());
    }

    #[test]
    fn test_default_options() {
        let options = TransformOptions::default();
        assert!(!options.perfect);
        assert!(!options.trim);
        assert_eq!(options.markers, MarkerPolicy::All);
    }

    #[test]
    fn test_apply_rejects_garbage() {
        let result = apply(&[0x00, 0x01, 0x02, 0x03], Transform::Rotate90, &TransformOptions::default());
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
