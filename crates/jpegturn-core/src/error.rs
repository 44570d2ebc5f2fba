//! Error types shared across the crate.
//!
//! Every fallible operation in this library returns [`Error`]. Nothing is
//! logged or retried internally; a failed transform leaves the source image
//! untouched and the error is surfaced to the caller as-is.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by JPEG transforms and EXIF access.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte stream is not a parseable JPEG, or the codec rejected it.
    #[error("Failed to decode JPEG stream: {0}")]
    Decode(String),

    /// A caller-supplied parameter is outside its valid domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The crop rectangle extends outside the image bounds.
    #[error(
        "Crop region {width}x{height}+{x}+{y} falls outside the {image_width}x{image_height} image"
    )]
    InvalidCropRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// A perfect transform was requested but the operation would have to
    /// discard a partial edge MCU row or column.
    #[error("Transform is not MCU-aligned and would discard edge blocks")]
    ImperfectTransform,

    /// The image carries no EXIF APP1 segment.
    #[error("No EXIF data found in image")]
    NoExifData,

    /// An APP1 segment is present but its EXIF/TIFF structure is broken.
    #[error("Invalid EXIF data: {0}")]
    InvalidExifData(String),

    /// The requested tag is not present in any IFD of the EXIF chain.
    #[error("EXIF tag {0:#06x} not found")]
    TagNotFound(u16),

    /// The embedded thumbnail exists but is not JPEG-compressed.
    #[error("Embedded EXIF thumbnail is not JPEG-compressed")]
    NotAJpegThumbnail,

    /// The EXIF data has no orientation tag to auto-transform from.
    #[error("No EXIF orientation tag found in image")]
    NoOrientationData,

    /// Scaling can only shrink an image; the requested target is larger.
    #[error("Cannot upscale {width}x{height} image to {target_width}x{target_height}")]
    UpscaleNotSupported {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },

    /// The save target does not end in `.jpg` or `.jpeg`.
    #[error("Not a JPEG filename: {}", .0.display())]
    InvalidFilename(PathBuf),

    /// I/O error while reading or writing an image file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Decode("truncated stream".to_string());
        assert_eq!(err.to_string(), "Failed to decode JPEG stream: truncated stream");

        let err = Error::TagNotFound(0x0112);
        assert_eq!(err.to_string(), "EXIF tag 0x0112 not found");

        let err = Error::InvalidFilename(PathBuf::from("photo.png"));
        assert!(err.to_string().contains("photo.png"));
    }

    #[test]
    fn test_crop_error_reports_geometry() {
        let err = Error::InvalidCropRegion {
            x: 10,
            y: 20,
            width: 500,
            height: 400,
            image_width: 480,
            image_height: 360,
        };
        let msg = err.to_string();
        assert!(msg.contains("500x400+10+20"));
        assert!(msg.contains("480x360"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
