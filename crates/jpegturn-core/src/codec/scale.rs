//! Pixel-domain probe and rescale path.
//!
//! Scaling cannot be done losslessly in the coefficient domain, so this is
//! the one operation that takes the full decode, resample, re-encode trip
//! through the `image` crate. The caller's policy restricts it to downscales.
//! Dimension probing also lives here: it only parses the header, never the
//! entropy-coded data.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader};

use crate::error::Error;

/// Read the pixel dimensions from the JPEG header without decoding the image.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the buffer is not a parseable JPEG stream.
pub(crate) fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), Error> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| Error::Decode(e.to_string()))?;

    if reader.format() != Some(ImageFormat::Jpeg) {
        return Err(Error::Decode("not a JPEG stream".to_string()));
    }

    reader
        .into_dimensions()
        .map_err(|e| Error::Decode(e.to_string()))
}

/// Decode, resample to exactly `width` x `height`, and re-encode at
/// `quality` (clamped to 1-100).
///
/// This is lossy and drops all source metadata; the output is a bare
/// JFIF stream.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a zero target dimension and
/// [`Error::Decode`] if the source cannot be decoded.
pub(crate) fn scale(data: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidArgument(format!(
            "scale target must be non-zero, got {width}x{height}"
        )));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| Error::Decode(e.to_string()))?;
    if reader.format() != Some(ImageFormat::Jpeg) {
        return Err(Error::Decode("not a JPEG stream".to_string()));
    }

    let rgb = reader
        .decode()
        .map_err(|e| Error::Decode(e.to_string()))?
        .into_rgb8();

    // Triangle (bilinear) keeps this fast; thumbnails and previews do not
    // benefit from Lanczos at these sizes.
    let resized = image::imageops::resize(&rgb, width, height, image::imageops::FilterType::Triangle);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder
        .write_image(resized.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| Error::Decode(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a gradient RGB image so every test is self-contained.
    fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
            ])
        });
        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, 90);
        encoder
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_probe_dimensions() {
        let jpeg = gradient_jpeg(480, 360);
        assert_eq!(probe_dimensions(&jpeg).unwrap(), (480, 360));
    }

    #[test]
    fn test_probe_rejects_garbage() {
        assert!(matches!(probe_dimensions(b"junk"), Err(Error::Decode(_))));
        assert!(matches!(probe_dimensions(&[]), Err(Error::Decode(_))));
    }

    #[test]
    fn test_probe_rejects_non_jpeg() {
        // PNG magic followed by nothing useful; format detection should
        // still refuse it before any decode is attempted.
        let png_magic = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert!(matches!(probe_dimensions(&png_magic), Err(Error::Decode(_))));
    }

    #[test]
    fn test_scale_produces_target_dimensions() {
        let jpeg = gradient_jpeg(64, 48);
        let scaled = scale(&jpeg, 32, 24, 75).unwrap();
        assert_eq!(probe_dimensions(&scaled).unwrap(), (32, 24));
    }

    #[test]
    fn test_scale_is_deterministic() {
        let jpeg = gradient_jpeg(64, 48);
        let a = scale(&jpeg, 32, 24, 75).unwrap();
        let b = scale(&jpeg, 32, 24, 75).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scale_rejects_zero_target() {
        let jpeg = gradient_jpeg(64, 48);
        assert!(matches!(scale(&jpeg, 0, 24, 75), Err(Error::InvalidArgument(_))));
        assert!(matches!(scale(&jpeg, 32, 0, 75), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_scale_clamps_quality() {
        let jpeg = gradient_jpeg(64, 48);
        // Quality 0 would panic inside the encoder if passed through raw.
        assert!(scale(&jpeg, 32, 24, 0).is_ok());
        assert!(scale(&jpeg, 32, 24, 255).is_ok());
    }
}
