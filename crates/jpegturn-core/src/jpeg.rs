//! High-level immutable-value API over a JPEG byte buffer.
//!
//! A [`JpegImage`] owns one complete JPEG file in memory. Every geometric
//! operation returns a *new* image and leaves the source untouched; the only
//! in-place mutations are the explicit EXIF setters, which are metadata
//! bookkeeping rather than pixel transforms.
//!
//! After any pixel-changing operation the facade keeps an embedded EXIF
//! thumbnail honest: it re-derives a 160-long-edge preview from the
//! transformed image and patches it into the copied APP1 segment.
//!
//! # Example
//!
//! ```ignore
//! use jpegturn_core::JpegImage;
//!
//! let image = JpegImage::open("photo.jpg")?;
//! image.rotate(90)?.save("rotated.jpg")?;
//! ```

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::Error;
use crate::exif::ExifSegment;
use crate::transform::{self, CropRegion, MarkerPolicy, Transform, TransformOptions};

/// Long edge of auto-maintained EXIF thumbnails, in pixels.
const THUMBNAIL_LONG_EDGE: u32 = 160;
/// Re-encode quality for auto-maintained thumbnails.
const THUMBNAIL_QUALITY: u8 = 75;

/// Mirror axis for [`JpegImage::flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipDirection {
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
}

/// An in-memory JPEG image with lossless transform and EXIF accessors.
#[derive(Debug, Clone)]
pub struct JpegImage {
    data: Vec<u8>,
    /// Probed lazily; one probe per instance.
    dimensions: OnceLock<(u32, u32)>,
}

impl JpegImage {
    /// Wrap an in-memory JPEG blob. The bytes are not validated until the
    /// first operation that needs to parse them.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            dimensions: OnceLock::new(),
        }
    }

    /// Read a JPEG file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::from_bytes(fs::read(path)?))
    }

    /// Write the image to disk.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFilename`] unless the path ends in `.jpg` or `.jpeg`
    /// (case-insensitive).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let is_jpeg_name = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
        if !is_jpeg_name {
            return Err(Error::InvalidFilename(path.to_path_buf()));
        }
        fs::write(path, &self.data)?;
        Ok(())
    }

    /// Borrow the raw JPEG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and take the raw JPEG bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixel dimensions `(width, height)`, probed from the header on first
    /// use and cached for the lifetime of this instance.
    pub fn dimensions(&self) -> Result<(u32, u32), Error> {
        if let Some(&dims) = self.dimensions.get() {
            return Ok(dims);
        }
        let dims = codec::probe_dimensions(&self.data)?;
        Ok(*self.dimensions.get_or_init(|| dims))
    }

    /// Width in pixels.
    pub fn width(&self) -> Result<u32, Error> {
        Ok(self.dimensions()?.0)
    }

    /// Height in pixels.
    pub fn height(&self) -> Result<u32, Error> {
        Ok(self.dimensions()?.1)
    }

    /// Apply one lossless transform with explicit policy control.
    ///
    /// This is the generic entry behind the convenience methods; use it when
    /// `perfect`, `trim` or the marker policy matter. Pixel-changing
    /// operations refresh an embedded thumbnail on the result.
    pub fn transform(
        &self,
        transform: Transform,
        options: &TransformOptions,
    ) -> Result<JpegImage, Error> {
        let mut out = JpegImage::from_bytes(transform::apply(&self.data, transform, options)?);
        if transform.changes_pixels() {
            out.update_thumbnail()?;
        }
        Ok(out)
    }

    /// Rotate losslessly by `angle` degrees clockwise.
    ///
    /// A present EXIF orientation tag is reset to 1 on the result, since the
    /// pixels now carry the rotation themselves.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] unless `angle` is -90, 90, 180 or 270.
    pub fn rotate(&self, angle: i32) -> Result<JpegImage, Error> {
        let transform = match angle {
            90 => Transform::Rotate90,
            180 => Transform::Rotate180,
            -90 | 270 => Transform::Rotate270,
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "rotation angle must be -90, 90, 180 or 270, got {angle}"
                )))
            }
        };
        let mut rotated = self.transform(transform, &TransformOptions::default())?;
        rotated.reset_orientation_tag()?;
        Ok(rotated)
    }

    /// Mirror losslessly along one axis.
    pub fn flip(&self, direction: FlipDirection) -> Result<JpegImage, Error> {
        let transform = match direction {
            FlipDirection::Horizontal => Transform::FlipHorizontal,
            FlipDirection::Vertical => Transform::FlipVertical,
        };
        self.transform(transform, &TransformOptions::default())
    }

    /// Mirror across the main (upper-left to lower-right) diagonal.
    pub fn transpose(&self) -> Result<JpegImage, Error> {
        self.transform(Transform::Transpose, &TransformOptions::default())
    }

    /// Mirror across the anti (upper-right to lower-left) diagonal.
    pub fn transverse(&self) -> Result<JpegImage, Error> {
        self.transform(Transform::Transverse, &TransformOptions::default())
    }

    /// Drop the chroma components, producing a grayscale image losslessly.
    pub fn grayscale(&self) -> Result<JpegImage, Error> {
        self.transform(Transform::Grayscale, &TransformOptions::default())
    }

    /// Re-encode with progressive scan order. Coefficient-lossless.
    pub fn progressive(&self) -> Result<JpegImage, Error> {
        self.transform(Transform::Progressive, &TransformOptions::default())
    }

    /// Re-emit the stream keeping only the markers `policy` allows. No pixel
    /// change; useful for stripping metadata.
    pub fn with_markers(&self, markers: MarkerPolicy) -> Result<JpegImage, Error> {
        self.transform(
            Transform::None,
            &TransformOptions {
                markers,
                ..TransformOptions::default()
            },
        )
    }

    /// Crop a pixel rectangle losslessly.
    ///
    /// The requested dimensions are forced exactly even when they are not
    /// MCU-aligned; the codec handles the edge blocks.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCropRegion`] when the rectangle is empty or does not
    /// lie fully inside the image (inclusive bounds: `x + width <= width`).
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<JpegImage, Error> {
        let (image_width, image_height) = self.dimensions()?;
        let fits = width > 0
            && height > 0
            && x < image_width
            && y < image_height
            && x.checked_add(width).is_some_and(|right| right <= image_width)
            && y.checked_add(height).is_some_and(|bottom| bottom <= image_height);
        if !fits {
            return Err(Error::InvalidCropRegion {
                x,
                y,
                width,
                height,
                image_width,
                image_height,
            });
        }
        self.transform(
            Transform::Crop(CropRegion { x, y, width, height }),
            &TransformOptions::default(),
        )
    }

    /// Downscale via pixel-domain re-encode at `quality`.
    ///
    /// Requesting the current dimensions returns a byte-identical clone.
    ///
    /// # Errors
    ///
    /// [`Error::UpscaleNotSupported`] when either target dimension exceeds
    /// the source.
    pub fn downscale(&self, width: u32, height: u32, quality: u8) -> Result<JpegImage, Error> {
        let (image_width, image_height) = self.dimensions()?;
        if width == image_width && height == image_height {
            return Ok(self.clone());
        }
        if width > image_width || height > image_height {
            return Err(Error::UpscaleNotSupported {
                width: image_width,
                height: image_height,
                target_width: width,
                target_height: height,
            });
        }
        let mut out = JpegImage::from_bytes(codec::scale(&self.data, width, height, quality)?);
        // The rescaled stream carries no metadata, so this is a no-op unless
        // a future codec preserves the APP1 segment.
        out.update_thumbnail()?;
        Ok(out)
    }

    /// The EXIF orientation value (1-8), or `None` when the image has no
    /// EXIF data or no orientation tag.
    ///
    /// Malformed-but-present EXIF is a hard error.
    pub fn exif_orientation(&self) -> Result<Option<u16>, Error> {
        match self.exif().and_then(|segment| segment.orientation(&self.data)) {
            Ok(value) => Ok(Some(value)),
            Err(Error::NoExifData | Error::TagNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Overwrite the EXIF orientation tag in place.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] outside 1-8 (checked before the buffer is
    /// touched); [`Error::NoExifData`]/[`Error::TagNotFound`] when there is
    /// no tag to overwrite.
    pub fn set_exif_orientation(&mut self, value: u16) -> Result<(), Error> {
        if !(1..=8).contains(&value) {
            return Err(Error::InvalidArgument(format!(
                "orientation must be between 1 and 8, got {value}"
            )));
        }
        let segment = self.exif()?;
        segment.set_orientation(&mut self.data, value)
    }

    /// The embedded EXIF thumbnail as a JPEG blob, or `None` when the image
    /// has no EXIF data or no thumbnail directory.
    pub fn exif_thumbnail(&self) -> Result<Option<Vec<u8>>, Error> {
        let segment = match self.exif() {
            Ok(segment) => segment,
            Err(Error::NoExifData) => return Ok(None),
            Err(e) => return Err(e),
        };
        match segment.thumbnail(&self.data) {
            Ok(bytes) => Ok(Some(bytes.to_vec())),
            Err(Error::TagNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replace the embedded EXIF thumbnail in place.
    pub fn set_exif_thumbnail(&mut self, thumbnail: &[u8]) -> Result<(), Error> {
        let segment = self.exif()?;
        segment.set_thumbnail(&mut self.data, thumbnail)
    }

    /// Apply the transform the EXIF orientation tag calls for and reset the
    /// tag to 1 on the result.
    ///
    /// Orientation 1 is the identity and returns a clone.
    ///
    /// # Errors
    ///
    /// [`Error::NoOrientationData`] when the image carries no orientation.
    pub fn exif_autotransform(&self) -> Result<JpegImage, Error> {
        let orientation = self.exif_orientation()?.ok_or(Error::NoOrientationData)?;
        let transform = match orientation {
            1 => return Ok(self.clone()),
            2 => Transform::FlipHorizontal,
            3 => Transform::Rotate180,
            4 => Transform::FlipVertical,
            5 => Transform::Transpose,
            6 => Transform::Rotate90,
            7 => Transform::Transverse,
            8 => Transform::Rotate270,
            other => {
                return Err(Error::InvalidExifData(format!(
                    "orientation {other} is outside the 1-8 range"
                )))
            }
        };
        let mut transformed = self.transform(transform, &TransformOptions::default())?;
        transformed.reset_orientation_tag()?;
        Ok(transformed)
    }

    fn exif(&self) -> Result<ExifSegment, Error> {
        ExifSegment::parse(&self.data)
    }

    /// Set a present orientation tag back to 1; absence is fine.
    fn reset_orientation_tag(&mut self) -> Result<(), Error> {
        let segment = match self.exif() {
            Ok(segment) => segment,
            Err(Error::NoExifData) => return Ok(()),
            Err(e) => return Err(e),
        };
        match segment.orientation(&self.data) {
            Ok(1) => Ok(()),
            Ok(_) => segment.set_orientation(&mut self.data, 1),
            Err(Error::TagNotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Re-derive the embedded thumbnail from the current pixels.
    ///
    /// Runs after pixel-changing transforms. Images without a usable JPEG
    /// thumbnail are left alone, as are images smaller than the thumbnail
    /// they would get.
    fn update_thumbnail(&mut self) -> Result<(), Error> {
        let existing = match self.exif_thumbnail() {
            Ok(thumbnail) => thumbnail,
            Err(Error::NotAJpegThumbnail) => None,
            Err(e) => return Err(e),
        };
        if existing.is_none() {
            return Ok(());
        }

        let (width, height) = self.dimensions()?;
        let (target_width, target_height) = thumbnail_target(width, height);
        if target_width > width && target_height > height {
            return Ok(());
        }

        let scaled = codec::scale(&self.data, target_width, target_height, THUMBNAIL_QUALITY)?;
        self.set_exif_thumbnail(&scaled)
    }
}

/// Aspect-fit thumbnail dimensions: long edge 160, short edge floored.
fn thumbnail_target(width: u32, height: u32) -> (u32, u32) {
    let long = u64::from(THUMBNAIL_LONG_EDGE);
    if width > height {
        let short = (long * u64::from(height) / u64::from(width)) as u32;
        (THUMBNAIL_LONG_EDGE, short.max(1))
    } else {
        let short = (long * u64::from(width) / u64::from(height)) as u32;
        (short.max(1), THUMBNAIL_LONG_EDGE)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::codecs::jpeg::JpegEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    use super::*;
    use crate::exif::fixture::{app1_segment, insert_app1};
    use crate::exif::ByteOrder;

    /// Encode an asymmetric gradient so flips and rotations change bytes.
    fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                64,
            ])
        });
        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, 90);
        encoder
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
            .unwrap();
        buffer.into_inner()
    }

    /// A real JPEG with a synthetic EXIF segment spliced in after SOI.
    fn exif_image(width: u32, height: u32, orientation: u16, thumbnail: Option<&[u8]>) -> JpegImage {
        let jpeg = gradient_jpeg(width, height);
        let app1 = app1_segment(ByteOrder::Little, orientation, thumbnail, 6);
        JpegImage::from_bytes(insert_app1(&jpeg, &app1))
    }

    fn decoded_pixels(image: &JpegImage) -> (u32, u32, Vec<u8>) {
        let decoded = image::load_from_memory(image.as_bytes()).unwrap().into_rgb8();
        let (w, h) = decoded.dimensions();
        (w, h, decoded.into_raw())
    }

    #[test]
    fn test_dimensions_probe_and_cache() {
        let image = JpegImage::from_bytes(gradient_jpeg(480, 360));
        assert_eq!(image.dimensions().unwrap(), (480, 360));
        assert_eq!(image.width().unwrap(), 480);
        assert_eq!(image.height().unwrap(), 360);
        // Second call served from the cache.
        assert_eq!(image.dimensions().unwrap(), (480, 360));
    }

    #[test]
    fn test_dimensions_of_garbage() {
        let image = JpegImage::from_bytes(vec![0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(image.width(), Err(Error::Decode(_))));
    }

    #[test]
    fn test_rotate_dimension_algebra() {
        let image = JpegImage::from_bytes(gradient_jpeg(480, 360));
        for angle in [90, -90, 270] {
            let rotated = image.rotate(angle).unwrap();
            assert_eq!(rotated.dimensions().unwrap(), (360, 480), "angle {angle}");
        }
        let rotated = image.rotate(180).unwrap();
        assert_eq!(rotated.dimensions().unwrap(), (480, 360));
    }

    #[test]
    fn test_rotate_invalid_angle() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 64));
        for angle in [0, 45, 91, 360, -180] {
            assert!(
                matches!(image.rotate(angle), Err(Error::InvalidArgument(_))),
                "angle {angle} should be rejected"
            );
        }
    }

    #[test]
    fn test_rotate_round_trip_restores_pixels() {
        // MCU-aligned image: the round trip is exactly lossless.
        let image = JpegImage::from_bytes(gradient_jpeg(64, 64));
        let round_tripped = image.rotate(90).unwrap().rotate(-90).unwrap();
        assert_eq!(decoded_pixels(&image), decoded_pixels(&round_tripped));
    }

    #[test]
    fn test_flip_is_involutive_on_aligned_image() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 64));
        let double_flip = image
            .flip(FlipDirection::Horizontal)
            .unwrap()
            .flip(FlipDirection::Horizontal)
            .unwrap();
        assert_eq!(decoded_pixels(&image), decoded_pixels(&double_flip));
    }

    #[test]
    fn test_flip_changes_bytes_keeps_dimensions() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        for direction in [FlipDirection::Horizontal, FlipDirection::Vertical] {
            let flipped = image.flip(direction).unwrap();
            assert_eq!(flipped.dimensions().unwrap(), (64, 48));
            assert_ne!(flipped.as_bytes(), image.as_bytes());
        }
    }

    #[test]
    fn test_transpose_and_transverse_swap_dimensions() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        assert_eq!(image.transpose().unwrap().dimensions().unwrap(), (48, 64));
        assert_eq!(image.transverse().unwrap().dimensions().unwrap(), (48, 64));
    }

    #[test]
    fn test_grayscale_keeps_dimensions() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        let gray = image.grayscale().unwrap();
        assert_eq!(gray.dimensions().unwrap(), (64, 48));
        // Still a decodable stream.
        image::load_from_memory(gray.as_bytes()).unwrap();
    }

    #[test]
    fn test_progressive_reencode() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        let progressive = image.progressive().unwrap();
        assert_eq!(progressive.dimensions().unwrap(), (64, 48));
        // Same pixels, different scan order.
        let (_, _, original) = decoded_pixels(&image);
        let (_, _, reencoded) = decoded_pixels(&progressive);
        assert_eq!(original, reencoded);
    }

    #[test]
    fn test_marker_policy_none_strips_exif() {
        let image = exif_image(64, 48, 6, None);
        assert_eq!(image.exif_orientation().unwrap(), Some(6));

        let stripped = image.with_markers(MarkerPolicy::None).unwrap();
        assert_eq!(stripped.exif_orientation().unwrap(), None);
        assert_eq!(stripped.dimensions().unwrap(), (64, 48));
    }

    #[test]
    fn test_marker_policy_all_keeps_exif() {
        let image = exif_image(64, 48, 6, None);
        let kept = image.with_markers(MarkerPolicy::All).unwrap();
        assert_eq!(kept.exif_orientation().unwrap(), Some(6));
    }

    #[test]
    fn test_crop_exact_dimensions() {
        let image = JpegImage::from_bytes(gradient_jpeg(480, 360));
        let cropped = image.crop(0, 0, 125, 125).unwrap();
        assert_eq!(cropped.dimensions().unwrap(), (125, 125));

        // Non-aligned offset: dimensions are still forced exactly.
        let cropped = image.crop(13, 7, 100, 50).unwrap();
        assert_eq!(cropped.dimensions().unwrap(), (100, 50));
    }

    #[test]
    fn test_crop_rejects_out_of_bounds() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        let bad_regions = [
            (0, 0, 65, 48),              // too wide
            (0, 0, 64, 49),              // too tall
            (64, 0, 1, 1),               // x at the edge
            (0, 48, 1, 1),               // y at the edge
            (60, 0, 5, 10),              // overhangs the right edge
            (0, 0, 0, 10),               // empty width
            (0, 0, 10, 0),               // empty height
            (u32::MAX, 0, 1, 1),         // offset overflow
            (0, 0, u32::MAX, u32::MAX),  // size overflow
        ];
        for (x, y, w, h) in bad_regions {
            assert!(
                matches!(image.crop(x, y, w, h), Err(Error::InvalidCropRegion { .. })),
                "crop({x}, {y}, {w}, {h}) should be rejected"
            );
        }
    }

    #[test]
    fn test_crop_inclusive_boundary() {
        // x + width == width is valid per the inclusive bound.
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        let cropped = image.crop(32, 24, 32, 24).unwrap();
        assert_eq!(cropped.dimensions().unwrap(), (32, 24));
    }

    #[test]
    fn test_downscale_same_size_is_identity() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        let same = image.downscale(64, 48, 75).unwrap();
        assert_eq!(same.as_bytes(), image.as_bytes());
    }

    #[test]
    fn test_downscale_to_target() {
        let image = JpegImage::from_bytes(gradient_jpeg(480, 360));
        let scaled = image.downscale(240, 180, 75).unwrap();
        assert_eq!(scaled.dimensions().unwrap(), (240, 180));
    }

    #[test]
    fn test_downscale_rejects_upscale() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        assert!(matches!(
            image.downscale(128, 48, 75),
            Err(Error::UpscaleNotSupported { .. })
        ));
        assert!(matches!(
            image.downscale(64, 96, 75),
            Err(Error::UpscaleNotSupported { .. })
        ));
    }

    #[test]
    fn test_orientation_get_set_round_trip() {
        let mut image = exif_image(64, 48, 1, None);
        assert_eq!(image.exif_orientation().unwrap(), Some(1));
        for value in 1..=8 {
            image.set_exif_orientation(value).unwrap();
            assert_eq!(image.exif_orientation().unwrap(), Some(value));
        }
    }

    #[test]
    fn test_orientation_rejects_out_of_range() {
        let mut image = exif_image(64, 48, 1, None);
        assert!(matches!(
            image.set_exif_orientation(0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            image.set_exif_orientation(9),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_orientation_absent_is_soft_for_get_hard_for_set() {
        let mut image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        assert_eq!(image.exif_orientation().unwrap(), None);
        assert!(matches!(
            image.set_exif_orientation(3),
            Err(Error::NoExifData)
        ));
    }

    #[test]
    fn test_autotransform_orientation_six() {
        let image = exif_image(64, 48, 6, None);
        let upright = image.exif_autotransform().unwrap();
        assert_eq!(upright.dimensions().unwrap(), (48, 64));
        assert_eq!(upright.exif_orientation().unwrap(), Some(1));
    }

    #[test]
    fn test_autotransform_identity() {
        let image = exif_image(64, 48, 1, None);
        let same = image.exif_autotransform().unwrap();
        assert_eq!(same.as_bytes(), image.as_bytes());
    }

    #[test]
    fn test_autotransform_without_orientation() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 48));
        assert!(matches!(
            image.exif_autotransform(),
            Err(Error::NoOrientationData)
        ));
    }

    #[test]
    fn test_rotate_resets_orientation_tag() {
        let image = exif_image(64, 48, 6, None);
        let rotated = image.rotate(90).unwrap();
        assert_eq!(rotated.exif_orientation().unwrap(), Some(1));
    }

    #[test]
    fn test_thumbnail_refresh_after_rotate() {
        let thumb = gradient_jpeg(160, 120);
        let image = exif_image(480, 360, 1, Some(&thumb));

        let original_thumb = JpegImage::from_bytes(image.exif_thumbnail().unwrap().unwrap());
        assert_eq!(original_thumb.dimensions().unwrap(), (160, 120));

        // Portrait result: the thumbnail follows, long edge still 160.
        let rotated = image.rotate(90).unwrap();
        assert_eq!(rotated.dimensions().unwrap(), (360, 480));
        let new_thumb = JpegImage::from_bytes(rotated.exif_thumbnail().unwrap().unwrap());
        assert_eq!(new_thumb.dimensions().unwrap(), (120, 160));
    }

    #[test]
    fn test_thumbnail_refresh_after_crop() {
        let thumb = gradient_jpeg(160, 120);
        let image = exif_image(480, 360, 1, Some(&thumb));

        let cropped = image.crop(0, 0, 180, 180).unwrap();
        assert_eq!(cropped.dimensions().unwrap(), (180, 180));
        let new_thumb = JpegImage::from_bytes(cropped.exif_thumbnail().unwrap().unwrap());
        assert_eq!(new_thumb.dimensions().unwrap(), (160, 160));
    }

    #[test]
    fn test_thumbnail_skipped_for_tiny_image() {
        let thumb = gradient_jpeg(32, 24);
        let image = exif_image(64, 48, 1, Some(&thumb));

        // 64x48 is smaller than the 160x120 thumbnail it would get; the
        // stale thumbnail is left in place.
        let flipped = image.flip(FlipDirection::Horizontal).unwrap();
        let kept = JpegImage::from_bytes(flipped.exif_thumbnail().unwrap().unwrap());
        assert_eq!(kept.dimensions().unwrap(), (32, 24));
    }

    #[test]
    fn test_set_thumbnail_preserves_host_image() {
        let thumb = gradient_jpeg(160, 120);
        let mut image = exif_image(480, 360, 1, Some(&thumb));

        let replacement = gradient_jpeg(80, 60);
        image.set_exif_thumbnail(&replacement).unwrap();

        // The host stream must still parse with unchanged dimensions.
        assert_eq!(codec::probe_dimensions(image.as_bytes()).unwrap(), (480, 360));
        let stored = JpegImage::from_bytes(image.exif_thumbnail().unwrap().unwrap());
        assert_eq!(stored.dimensions().unwrap(), (80, 60));
    }

    #[test]
    fn test_transform_perfect_rejects_unaligned() {
        // Neither 100 nor 75 is a multiple of the MCU size.
        let image = JpegImage::from_bytes(gradient_jpeg(100, 75));
        let options = TransformOptions {
            perfect: true,
            ..TransformOptions::default()
        };
        assert!(matches!(
            image.transform(Transform::Rotate90, &options),
            Err(Error::ImperfectTransform)
        ));
    }

    #[test]
    fn test_transform_perfect_accepts_aligned() {
        let image = JpegImage::from_bytes(gradient_jpeg(64, 64));
        let options = TransformOptions {
            perfect: true,
            ..TransformOptions::default()
        };
        let rotated = image.transform(Transform::Rotate90, &options).unwrap();
        assert_eq!(rotated.dimensions().unwrap(), (64, 64));
    }

    #[test]
    fn test_transform_trim_shrinks_to_boundary() {
        let image = JpegImage::from_bytes(gradient_jpeg(100, 75));
        let options = TransformOptions {
            trim: true,
            ..TransformOptions::default()
        };
        let flipped = image.transform(Transform::FlipHorizontal, &options).unwrap();
        // 100 is 96 + a partial block; trim drops the partial strip.
        assert_eq!(flipped.width().unwrap(), 96);
        assert_eq!(flipped.height().unwrap(), 75);
    }

    #[test]
    fn test_transform_default_keeps_odd_size() {
        let image = JpegImage::from_bytes(gradient_jpeg(100, 75));
        let flipped = image.flip(FlipDirection::Horizontal).unwrap();
        assert_eq!(flipped.dimensions().unwrap(), (100, 75));
    }

    #[test]
    fn test_save_rejects_non_jpeg_extension() {
        let image = JpegImage::from_bytes(gradient_jpeg(16, 16));
        for name in ["photo.png", "photo", "photo.jpg.txt"] {
            assert!(
                matches!(image.save(name), Err(Error::InvalidFilename(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_save_and_open_round_trip() {
        let dir = std::env::temp_dir().join("jpegturn-test-save");
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["image.jpg", "image.jpeg", "IMAGE.JPG"] {
            let path = dir.join(name);
            let image = JpegImage::from_bytes(gradient_jpeg(16, 16));
            image.save(&path).unwrap();
            let reloaded = JpegImage::open(&path).unwrap();
            assert_eq!(reloaded.as_bytes(), image.as_bytes());
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_thumbnail_target_shapes() {
        assert_eq!(thumbnail_target(480, 360), (160, 120));
        assert_eq!(thumbnail_target(360, 480), (120, 160));
        assert_eq!(thumbnail_target(180, 180), (160, 160));
        // Extreme aspect ratios never collapse to zero.
        assert_eq!(thumbnail_target(10_000, 1), (160, 1));
        assert_eq!(thumbnail_target(1, 10_000), (1, 160));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Property: the thumbnail always fits the 160-pixel bounding box
        /// with the long edge pinned at 160.
        #[test]
        fn prop_thumbnail_target_fits_box(width in 1u32..=8192, height in 1u32..=8192) {
            let (tw, th) = thumbnail_target(width, height);
            prop_assert!(tw <= 160 && th <= 160);
            prop_assert!(tw == 160 || th == 160);
            prop_assert!(tw >= 1 && th >= 1);
        }

        /// Property: the constrained edge matches the source's longer side.
        #[test]
        fn prop_thumbnail_target_orientation(width in 1u32..=8192, height in 1u32..=8192) {
            let (tw, th) = thumbnail_target(width, height);
            if width > height {
                prop_assert_eq!(tw, 160);
                prop_assert!(th <= tw);
            } else {
                prop_assert_eq!(th, 160);
                prop_assert!(tw <= th);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// Property: crop accepts exactly the rectangles inside the image
        /// and reports the forced dimensions back.
        #[test]
        fn prop_crop_bounds(
            x in 0u32..=80,
            y in 0u32..=60,
            width in 0u32..=80,
            height in 0u32..=60,
        ) {
            use std::sync::OnceLock;
            static FIXTURE: OnceLock<Vec<u8>> = OnceLock::new();
            let data = FIXTURE.get_or_init(|| {
                let img = image::RgbImage::from_fn(64, 48, |x, y| {
                    image::Rgb([x as u8, y as u8, 0])
                });
                let mut buffer = std::io::Cursor::new(Vec::new());
                let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, 90);
                use image::ImageEncoder;
                encoder
                    .write_image(img.as_raw(), 64, 48, image::ExtendedColorType::Rgb8)
                    .unwrap();
                buffer.into_inner()
            });

            let image = JpegImage::from_bytes(data.clone());
            let inside = width > 0
                && height > 0
                && x < 64
                && y < 48
                && x + width <= 64
                && y + height <= 48;
            match image.crop(x, y, width, height) {
                Ok(cropped) => {
                    prop_assert!(inside);
                    prop_assert_eq!(cropped.dimensions().unwrap(), (width, height));
                }
                Err(Error::InvalidCropRegion { .. }) => prop_assert!(!inside),
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
            }
        }
    }
}
