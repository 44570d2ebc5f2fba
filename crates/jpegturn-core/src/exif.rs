//! EXIF APP1 access over raw JPEG bytes.
//!
//! This module deliberately does not build a parsed tag tree. Orientation and
//! thumbnail edits must land in their original byte locations so the rest of
//! the segment survives untouched, so [`ExifSegment`] is just a set of
//! offsets plus the byte order; every read and write takes the live buffer as
//! an argument and patches it in place.
//!
//! # Layout walked here
//!
//! ```text
//! FFD8 | ... | FFE1 <len:2> "Exif\0\0" <TIFF header> <IFD0> <IFD1> ... | ...
//! ```
//!
//! The TIFF header starts with the alignment string (`II` little-endian, `MM`
//! big-endian) and a u32 pointer to IFD0. Each IFD is a u16 entry count,
//! 12-byte entries, and a u32 offset to the next IFD (0 terminates). All IFD
//! offsets are relative to the TIFF header; the APP1 segment length field is
//! big-endian regardless of the TIFF byte order.

use std::borrow::Cow;

use crate::error::Error;

/// TIFF Compression tag; value 6 means the thumbnail is a JPEG stream.
pub const TAG_COMPRESSION: u16 = 0x0103;
/// Orientation tag, values 1-8.
pub const TAG_ORIENTATION: u16 = 0x0112;
/// Offset of the embedded thumbnail, relative to the TIFF header.
pub const TAG_THUMBNAIL_OFFSET: u16 = 0x0201;
/// Byte length of the embedded thumbnail.
pub const TAG_THUMBNAIL_LENGTH: u16 = 0x0202;

const COMPRESSION_JPEG: u16 = 6;
const ENTRY_SIZE: usize = 12;
const SOI: [u8; 2] = [0xFF, 0xD8];
const DQT: [u8; 2] = [0xFF, 0xDB];

/// An IFD chain longer than this is assumed to be cyclic.
const MAX_IFD_CHAIN: usize = 64;

/// TIFF byte alignment of the EXIF payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// `II` alignment.
    Little,
    /// `MM` alignment.
    Big,
}

/// A view over the EXIF APP1 segment of a JPEG buffer.
///
/// Holds offsets only; the buffer itself is passed to each accessor so reads
/// and writes always act on the caller's live bytes.
#[derive(Debug, Clone, Copy)]
pub struct ExifSegment {
    /// Offset of the `FFE1` marker.
    app1_offset: usize,
    /// Offset of the TIFF header (the `II`/`MM` alignment string).
    tiff_offset: usize,
    byte_order: ByteOrder,
}

impl ExifSegment {
    /// Locate and validate the APP1 segment of a JPEG buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::NoExifData`] when the buffer carries no APP1 marker before
    ///   the entropy-coded data
    /// - [`Error::InvalidExifData`] when an APP1 segment exists but its
    ///   `Exif\0\0` header or TIFF alignment is broken
    pub fn parse(buf: &[u8]) -> Result<Self, Error> {
        let app1_offset = find_app1(buf)?;

        // Segment data: 2-byte length, then the 6-byte EXIF header.
        let header_start = app1_offset + 4;
        let header = buf
            .get(header_start..header_start + 6)
            .ok_or_else(|| invalid("truncated APP1 segment"))?;
        if header != b"Exif\0\0" {
            return Err(invalid("APP1 segment does not carry an EXIF header"));
        }

        let tiff_offset = header_start + 6;
        let alignment = buf
            .get(tiff_offset..tiff_offset + 2)
            .ok_or_else(|| invalid("truncated TIFF header"))?;
        let byte_order = match alignment {
            b"II" => ByteOrder::Little,
            b"MM" => ByteOrder::Big,
            _ => return Err(invalid("unknown TIFF byte alignment")),
        };

        Ok(Self {
            app1_offset,
            tiff_offset,
            byte_order,
        })
    }

    /// The detected TIFF byte order.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Walk the IFD chain for `tag` and return the offset of its 12-byte
    /// entry within `buf`.
    ///
    /// # Errors
    ///
    /// [`Error::TagNotFound`] when the chain terminates without a match;
    /// [`Error::InvalidExifData`] on a truncated or cyclic chain.
    pub fn find_tag(&self, buf: &[u8], tag: u16) -> Result<usize, Error> {
        let first = self.read_u32(buf, self.tiff_offset + 4)? as usize;
        let mut ifd = self
            .tiff_offset
            .checked_add(first)
            .ok_or_else(|| invalid("IFD offset overflow"))?;

        for _ in 0..MAX_IFD_CHAIN {
            let count = self.read_u16(buf, ifd)? as usize;
            for i in 0..count {
                let entry = ifd + 2 + i * ENTRY_SIZE;
                if self.read_u16(buf, entry)? == tag {
                    return Ok(entry);
                }
            }

            let next = self.read_u32(buf, ifd + 2 + count * ENTRY_SIZE)? as usize;
            if next == 0 {
                return Err(Error::TagNotFound(tag));
            }
            ifd = self
                .tiff_offset
                .checked_add(next)
                .ok_or_else(|| invalid("IFD offset overflow"))?;
        }

        Err(invalid("IFD chain does not terminate"))
    }

    /// Read the orientation value (1-8 in well-formed files).
    pub fn orientation(&self, buf: &[u8]) -> Result<u16, Error> {
        let entry = self.find_tag(buf, TAG_ORIENTATION)?;
        // Skip tag id, type and component count to reach the value field.
        self.read_u16(buf, entry + 8)
    }

    /// Overwrite the orientation value in place.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] unless `1 <= value <= 8`, plus the usual
    /// tag lookup errors.
    pub fn set_orientation(&self, buf: &mut [u8], value: u16) -> Result<(), Error> {
        if !(1..=8).contains(&value) {
            return Err(Error::InvalidArgument(format!(
                "orientation must be between 1 and 8, got {value}"
            )));
        }
        let entry = self.find_tag(buf, TAG_ORIENTATION)?;
        self.write_u16(buf, entry + 8, value)
    }

    /// Borrow the embedded thumbnail bytes.
    ///
    /// # Errors
    ///
    /// [`Error::NotAJpegThumbnail`] when the thumbnail directory describes a
    /// non-JPEG (e.g. uncompressed TIFF) preview.
    pub fn thumbnail<'a>(&self, buf: &'a [u8]) -> Result<&'a [u8], Error> {
        let (start, length) = self.thumbnail_range(buf)?;
        buf.get(start..start + length)
            .ok_or_else(|| invalid("thumbnail range extends past the buffer"))
    }

    /// Replace the embedded thumbnail in place, resizing the buffer.
    ///
    /// A leading JFIF wrapper on `thumbnail` is stripped first (the SOI is
    /// kept, the APP0 segment up to the first DQT marker is dropped) so the
    /// stored stream nests cleanly inside IFD1. The thumbnail length tag and
    /// the APP1 segment length are patched to match; everything after the
    /// insertion point shifts by the size delta.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when the replacement would grow the APP1
    /// segment past the 64 KiB a JPEG marker can hold, plus the usual lookup
    /// errors; [`Error::NotAJpegThumbnail`] when there is no JPEG thumbnail
    /// slot to replace.
    pub fn set_thumbnail(&self, buf: &mut Vec<u8>, thumbnail: &[u8]) -> Result<(), Error> {
        let new_bytes = strip_jfif_header(thumbnail);

        let (start, old_length) = self.thumbnail_range(buf)?;
        if buf.get(start..start + old_length).is_none() {
            return Err(invalid("thumbnail range extends past the buffer"));
        }
        let length_entry = self.find_tag(buf, TAG_THUMBNAIL_LENGTH)?;
        // The directories must precede the thumbnail data they describe,
        // otherwise the splice below would shift the entries we patch.
        if start <= length_entry + ENTRY_SIZE {
            return Err(invalid("thumbnail data precedes its directory"));
        }

        let app1_length = u16::from_be_bytes([buf[self.app1_offset + 2], buf[self.app1_offset + 3]]);
        let new_app1_length =
            i64::from(app1_length) + new_bytes.len() as i64 - old_length as i64;
        if new_app1_length > i64::from(u16::MAX) {
            return Err(Error::InvalidArgument(format!(
                "replacement thumbnail of {} bytes does not fit the APP1 segment",
                new_bytes.len()
            )));
        }

        buf.splice(start..start + old_length, new_bytes.iter().copied());
        self.write_u32(buf, length_entry + 8, new_bytes.len() as u32)?;
        let length_field = (new_app1_length as u16).to_be_bytes();
        buf[self.app1_offset + 2..self.app1_offset + 4].copy_from_slice(&length_field);
        Ok(())
    }

    /// Resolve the thumbnail's absolute byte range from tags 0x103/0x201/0x202.
    fn thumbnail_range(&self, buf: &[u8]) -> Result<(usize, usize), Error> {
        let compression_entry = self.find_tag(buf, TAG_COMPRESSION)?;
        if self.read_u16(buf, compression_entry + 8)? != COMPRESSION_JPEG {
            return Err(Error::NotAJpegThumbnail);
        }

        let offset_entry = self.find_tag(buf, TAG_THUMBNAIL_OFFSET)?;
        let length_entry = self.find_tag(buf, TAG_THUMBNAIL_LENGTH)?;
        let offset = self.read_u32(buf, offset_entry + 8)? as usize;
        let length = self.read_u32(buf, length_entry + 8)? as usize;

        let start = self
            .tiff_offset
            .checked_add(offset)
            .ok_or_else(|| invalid("thumbnail offset overflow"))?;
        Ok((start, length))
    }

    fn read_u16(&self, buf: &[u8], offset: usize) -> Result<u16, Error> {
        let bytes = buf
            .get(offset..offset + 2)
            .ok_or_else(|| invalid("read past the end of EXIF data"))?;
        Ok(match self.byte_order {
            ByteOrder::Little => u16::from_le_bytes([bytes[0], bytes[1]]),
            ByteOrder::Big => u16::from_be_bytes([bytes[0], bytes[1]]),
        })
    }

    fn read_u32(&self, buf: &[u8], offset: usize) -> Result<u32, Error> {
        let bytes = buf
            .get(offset..offset + 4)
            .ok_or_else(|| invalid("read past the end of EXIF data"))?;
        let bytes = [bytes[0], bytes[1], bytes[2], bytes[3]];
        Ok(match self.byte_order {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        })
    }

    fn write_u16(&self, buf: &mut [u8], offset: usize, value: u16) -> Result<(), Error> {
        let target = buf
            .get_mut(offset..offset + 2)
            .ok_or_else(|| invalid("write past the end of EXIF data"))?;
        target.copy_from_slice(&match self.byte_order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        });
        Ok(())
    }

    fn write_u32(&self, buf: &mut [u8], offset: usize, value: u32) -> Result<(), Error> {
        let target = buf
            .get_mut(offset..offset + 4)
            .ok_or_else(|| invalid("write past the end of EXIF data"))?;
        target.copy_from_slice(&match self.byte_order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        });
        Ok(())
    }
}

/// Walk the marker stream from SOI until APP1 or the entropy-coded data.
fn find_app1(buf: &[u8]) -> Result<usize, Error> {
    if buf.len() < 2 || buf[0..2] != SOI {
        return Err(Error::NoExifData);
    }

    let mut pos = 2;
    loop {
        if pos + 4 > buf.len() {
            return Err(Error::NoExifData);
        }
        if buf[pos] != 0xFF {
            return Err(invalid("corrupt marker stream"));
        }
        match buf[pos + 1] {
            0xE1 => return Ok(pos),
            // SOS or EOI: no APP1 can follow.
            0xDA | 0xD9 => return Err(Error::NoExifData),
            _ => {
                let length = u16::from_be_bytes([buf[pos + 2], buf[pos + 3]]) as usize;
                if length < 2 {
                    return Err(invalid("corrupt segment length"));
                }
                pos += 2 + length;
            }
        }
    }
}

/// Drop a redundant JFIF wrapper from a thumbnail-to-be.
///
/// If the stream opens with SOI followed by an APP0 segment, everything
/// between the SOI and the first quantization table marker is removed; the
/// bytes are returned unmodified otherwise.
fn strip_jfif_header(data: &[u8]) -> Cow<'_, [u8]> {
    if data.len() >= 4 && data[0..2] == SOI && data[2..4] == [0xFF, 0xE0] {
        if let Some(pos) = data.windows(2).position(|w| w == DQT) {
            let mut stripped = Vec::with_capacity(2 + data.len() - pos);
            stripped.extend_from_slice(&SOI);
            stripped.extend_from_slice(&data[pos..]);
            return Cow::Owned(stripped);
        }
    }
    Cow::Borrowed(data)
}

fn invalid(message: &str) -> Error {
    Error::InvalidExifData(message.to_string())
}

/// Synthetic EXIF fixtures shared by this module's tests and the facade
/// tests. Buffers are assembled byte by byte so offsets are exact.
#[cfg(test)]
pub(crate) mod fixture {
    use super::ByteOrder;

    fn u16v(value: u16, order: ByteOrder) -> [u8; 2] {
        match order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    fn u32v(value: u32, order: ByteOrder) -> [u8; 4] {
        match order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    /// A 12-byte IFD entry with the value packed into the trailing field.
    fn entry(tag: u16, field_type: u16, value: &[u8], order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::with_capacity(12);
        out.extend_from_slice(&u16v(tag, order));
        out.extend_from_slice(&u16v(field_type, order));
        out.extend_from_slice(&u32v(1, order));
        out.extend_from_slice(value);
        out.extend_from_slice(&vec![0; 4 - value.len()]);
        out
    }

    /// Build an APP1 segment: IFD0 with an orientation entry, optionally an
    /// IFD1 describing an embedded JPEG thumbnail.
    pub(crate) fn app1_segment(
        order: ByteOrder,
        orientation: u16,
        thumbnail: Option<&[u8]>,
        thumbnail_compression: u16,
    ) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(match order {
            ByteOrder::Little => b"II",
            ByteOrder::Big => b"MM",
        });
        tiff.extend_from_slice(&u16v(42, order));
        tiff.extend_from_slice(&u32v(8, order)); // IFD0 at offset 8

        // IFD0: one entry (orientation), next pointer to IFD1 when a
        // thumbnail is present. IFD0 spans 8..26, so IFD1 starts at 26.
        tiff.extend_from_slice(&u16v(1, order));
        tiff.extend(entry(super::TAG_ORIENTATION, 3, &u16v(orientation, order), order));
        tiff.extend_from_slice(&u32v(if thumbnail.is_some() { 26 } else { 0 }, order));

        if let Some(thumb) = thumbnail {
            // IFD1: compression, offset, length; data follows the directory.
            // 26 + 2 + 3*12 + 4 = 68.
            let thumb_offset: u32 = 68;
            tiff.extend_from_slice(&u16v(3, order));
            tiff.extend(entry(
                super::TAG_COMPRESSION,
                3,
                &u16v(thumbnail_compression, order),
                order,
            ));
            tiff.extend(entry(super::TAG_THUMBNAIL_OFFSET, 4, &u32v(thumb_offset, order), order));
            tiff.extend(entry(
                super::TAG_THUMBNAIL_LENGTH,
                4,
                &u32v(thumb.len() as u32, order),
                order,
            ));
            tiff.extend_from_slice(&u32v(0, order));
            assert_eq!(tiff.len(), thumb_offset as usize);
            tiff.extend_from_slice(thumb);
        }

        let mut segment = Vec::new();
        segment.extend_from_slice(&[0xFF, 0xE1]);
        segment.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        segment.extend_from_slice(b"Exif\0\0");
        segment.extend_from_slice(&tiff);
        segment
    }

    /// Splice an APP1 segment into a JPEG right after the SOI marker.
    pub(crate) fn insert_app1(jpeg: &[u8], app1: &[u8]) -> Vec<u8> {
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8], "fixture is not a JPEG");
        let mut out = Vec::with_capacity(jpeg.len() + app1.len());
        out.extend_from_slice(&jpeg[0..2]);
        out.extend_from_slice(app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    /// A standalone EXIF-bearing pseudo-JPEG: enough marker structure for
    /// segment parsing, no entropy-coded data.
    pub(crate) fn exif_jpeg(
        order: ByteOrder,
        orientation: u16,
        thumbnail: Option<&[u8]>,
    ) -> Vec<u8> {
        let mut out = vec![0xFF, 0xD8];
        out.extend(app1_segment(order, orientation, thumbnail, 6));
        // Terminate the marker stream so walks past APP1 stop cleanly.
        out.extend_from_slice(&[0xFF, 0xD9]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::fixture::{app1_segment, exif_jpeg};
    use super::*;

    #[test]
    fn test_parse_no_app1() {
        // SOI directly followed by a DQT-like segment, then EOI.
        let buf = [0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xD9];
        assert!(matches!(ExifSegment::parse(&buf), Err(Error::NoExifData)));
    }

    #[test]
    fn test_parse_not_a_jpeg() {
        assert!(matches!(ExifSegment::parse(b"hello"), Err(Error::NoExifData)));
        assert!(matches!(ExifSegment::parse(&[]), Err(Error::NoExifData)));
    }

    #[test]
    fn test_parse_bad_exif_header() {
        let mut buf = exif_jpeg(ByteOrder::Little, 1, None);
        // Corrupt the "Exif" literal.
        buf[4] = b'X';
        assert!(matches!(ExifSegment::parse(&buf), Err(Error::InvalidExifData(_))));
    }

    #[test]
    fn test_parse_bad_alignment() {
        let mut buf = exif_jpeg(ByteOrder::Little, 1, None);
        // The alignment string sits right after the 6-byte EXIF header.
        buf[10] = b'Q';
        buf[11] = b'Q';
        assert!(matches!(ExifSegment::parse(&buf), Err(Error::InvalidExifData(_))));
    }

    #[test]
    fn test_orientation_little_endian() {
        let buf = exif_jpeg(ByteOrder::Little, 6, None);
        let segment = ExifSegment::parse(&buf).unwrap();
        assert_eq!(segment.byte_order(), ByteOrder::Little);
        assert_eq!(segment.orientation(&buf).unwrap(), 6);
    }

    #[test]
    fn test_orientation_big_endian() {
        let buf = exif_jpeg(ByteOrder::Big, 8, None);
        let segment = ExifSegment::parse(&buf).unwrap();
        assert_eq!(segment.byte_order(), ByteOrder::Big);
        assert_eq!(segment.orientation(&buf).unwrap(), 8);
    }

    #[test]
    fn test_set_orientation_round_trip() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let mut buf = exif_jpeg(order, 1, None);
            let segment = ExifSegment::parse(&buf).unwrap();
            for value in 1..=8 {
                segment.set_orientation(&mut buf, value).unwrap();
                assert_eq!(segment.orientation(&buf).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_set_orientation_out_of_range() {
        let mut buf = exif_jpeg(ByteOrder::Little, 1, None);
        let segment = ExifSegment::parse(&buf).unwrap();
        assert!(matches!(
            segment.set_orientation(&mut buf, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            segment.set_orientation(&mut buf, 9),
            Err(Error::InvalidArgument(_))
        ));
        // The buffer must be untouched by the failed writes.
        assert_eq!(segment.orientation(&buf).unwrap(), 1);
    }

    #[test]
    fn test_find_tag_missing() {
        let buf = exif_jpeg(ByteOrder::Little, 1, None);
        let segment = ExifSegment::parse(&buf).unwrap();
        assert!(matches!(
            segment.find_tag(&buf, 0x9999),
            Err(Error::TagNotFound(0x9999))
        ));
    }

    #[test]
    fn test_find_tag_walks_into_second_ifd() {
        let thumb = [0xAA; 16];
        let buf = exif_jpeg(ByteOrder::Little, 1, Some(&thumb));
        let segment = ExifSegment::parse(&buf).unwrap();
        // Compression lives in IFD1, reachable only via the chain walk.
        assert!(segment.find_tag(&buf, TAG_COMPRESSION).is_ok());
    }

    #[test]
    fn test_thumbnail_round_trip() {
        let thumb: Vec<u8> = (0..32).collect();
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let buf = exif_jpeg(order, 1, Some(&thumb));
            let segment = ExifSegment::parse(&buf).unwrap();
            assert_eq!(segment.thumbnail(&buf).unwrap(), &thumb[..]);
        }
    }

    #[test]
    fn test_thumbnail_absent() {
        let buf = exif_jpeg(ByteOrder::Little, 1, None);
        let segment = ExifSegment::parse(&buf).unwrap();
        assert!(matches!(
            segment.thumbnail(&buf),
            Err(Error::TagNotFound(TAG_COMPRESSION))
        ));
    }

    #[test]
    fn test_thumbnail_not_jpeg_compressed() {
        let thumb = [0xAA; 16];
        let mut buf = vec![0xFF, 0xD8];
        // Compression 1 = uncompressed TIFF preview.
        buf.extend(app1_segment(ByteOrder::Little, 1, Some(&thumb), 1));
        buf.extend_from_slice(&[0xFF, 0xD9]);
        let segment = ExifSegment::parse(&buf).unwrap();
        assert!(matches!(segment.thumbnail(&buf), Err(Error::NotAJpegThumbnail)));
    }

    #[test]
    fn test_set_thumbnail_grows_buffer() {
        let old_thumb = [0x11; 16];
        let new_thumb: Vec<u8> = (0..64).collect();
        let mut buf = exif_jpeg(ByteOrder::Little, 1, Some(&old_thumb));
        let original_len = buf.len();
        let segment = ExifSegment::parse(&buf).unwrap();

        segment.set_thumbnail(&mut buf, &new_thumb).unwrap();

        assert_eq!(buf.len(), original_len + 64 - 16);
        assert_eq!(segment.thumbnail(&buf).unwrap(), &new_thumb[..]);
        // The trailing EOI must have shifted, not vanished.
        assert_eq!(&buf[buf.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_set_thumbnail_shrinks_buffer() {
        let old_thumb = [0x11; 64];
        let new_thumb = [0x22; 8];
        let mut buf = exif_jpeg(ByteOrder::Big, 1, Some(&old_thumb));
        let original_len = buf.len();
        let segment = ExifSegment::parse(&buf).unwrap();

        segment.set_thumbnail(&mut buf, &new_thumb).unwrap();

        assert_eq!(buf.len(), original_len - 64 + 8);
        assert_eq!(segment.thumbnail(&buf).unwrap(), &new_thumb[..]);
    }

    #[test]
    fn test_set_thumbnail_updates_app1_length() {
        let old_thumb = [0x11; 16];
        let new_thumb = [0x22; 48];
        let mut buf = exif_jpeg(ByteOrder::Little, 1, Some(&old_thumb));
        let old_app1_length = u16::from_be_bytes([buf[4], buf[5]]);
        let segment = ExifSegment::parse(&buf).unwrap();

        segment.set_thumbnail(&mut buf, &new_thumb).unwrap();

        let new_app1_length = u16::from_be_bytes([buf[4], buf[5]]);
        assert_eq!(new_app1_length, old_app1_length + 48 - 16);
    }

    #[test]
    fn test_set_thumbnail_too_large() {
        let old_thumb = [0x11; 16];
        let huge = vec![0x22; 70_000];
        let mut buf = exif_jpeg(ByteOrder::Little, 1, Some(&old_thumb));
        let segment = ExifSegment::parse(&buf).unwrap();
        assert!(matches!(
            segment.set_thumbnail(&mut buf, &huge),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_set_thumbnail_strips_jfif_wrapper() {
        let old_thumb = [0x11; 16];
        // SOI + minimal APP0 + DQT-ish payload.
        let mut wrapped = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x4A, 0x46];
        wrapped.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x02, 0xFF, 0xD9]);

        let mut buf = exif_jpeg(ByteOrder::Little, 1, Some(&old_thumb));
        let segment = ExifSegment::parse(&buf).unwrap();
        segment.set_thumbnail(&mut buf, &wrapped).unwrap();

        let stored = segment.thumbnail(&buf).unwrap();
        // SOI kept, APP0 gone, stream resumes at the DQT marker.
        assert_eq!(&stored[0..2], &[0xFF, 0xD8]);
        assert_eq!(&stored[2..4], &[0xFF, 0xDB]);
    }

    #[test]
    fn test_strip_jfif_header_passthrough() {
        // No JFIF wrapper: returned unmodified.
        let bare = [0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x02];
        assert!(matches!(strip_jfif_header(&bare), Cow::Borrowed(_)));

        // Not a JPEG at all: also untouched.
        let junk = [0x00, 0x01, 0x02];
        assert!(matches!(strip_jfif_header(&junk), Cow::Borrowed(_)));
    }
}
