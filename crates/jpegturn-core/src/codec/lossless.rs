//! Coefficient-domain transform pipeline backed by mozjpeg.
//!
//! The entropy decode/encode and the MCU-aware block remapping live in
//! mozjpeg's `transupp` extension; this module owns the unsafe plumbing
//! around it. One call to [`transform`] performs the full round trip:
//!
//! ```text
//! jpeg_mem_src -> jpeg_read_header -> jtransform_request_workspace
//!   -> jpeg_read_coefficients -> jpeg_copy_critical_parameters
//!   -> jtransform_adjust_parameters -> jpeg_write_coefficients
//!   -> jcopy_markers_execute -> jtransform_execute_transform
//! ```
//!
//! No IDCT is ever run and no tables are re-optimized, so the output is
//! deterministic for a given input and transform.
//!
//! libjpeg reports fatal errors through `error_exit`, which never returns; we
//! install a handler that unwinds instead, catch the unwind at the public
//! boundary, and rely on the RAII wrappers below to release every C-side
//! allocation on both the success and the error path.

use std::ffi::{c_int, c_uchar, c_ulong, c_void};
use std::ops::Deref;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr::NonNull;

use mozjpeg_sys::{
    jcopy_markers_execute, jcopy_markers_setup, jpeg_common_struct, jpeg_compress_struct,
    jpeg_copy_critical_parameters, jpeg_create_decompress, jpeg_CreateCompress,
    jpeg_decompress_struct, jpeg_destroy_compress, jpeg_destroy_decompress, jpeg_error_mgr,
    jpeg_finish_compress, jpeg_finish_decompress, jpeg_mem_dest, jpeg_mem_src,
    jpeg_read_coefficients, jpeg_read_header, jpeg_simple_progression, jpeg_std_error,
    jpeg_transform_info, jpeg_write_coefficients, jtransform_adjust_parameters,
    jtransform_execute_transform, jtransform_request_workspace, jvirt_barray_ptr, JCOPY_OPTION,
    JCOPY_OPTION_JCOPYOPT_ALL, JCOPY_OPTION_JCOPYOPT_COMMENTS, JCOPY_OPTION_JCOPYOPT_NONE,
    JCROP_CODE_JCROP_FORCE, JCROP_CODE_JCROP_POS, JCROP_CODE_JCROP_UNSET, JPEG_LIB_VERSION,
    JXFORM_CODE, JXFORM_CODE_JXFORM_FLIP_H, JXFORM_CODE_JXFORM_FLIP_V, JXFORM_CODE_JXFORM_NONE,
    JXFORM_CODE_JXFORM_ROT_180, JXFORM_CODE_JXFORM_ROT_270, JXFORM_CODE_JXFORM_ROT_90,
    JXFORM_CODE_JXFORM_TRANSPOSE, JXFORM_CODE_JXFORM_TRANSVERSE,
};

use crate::error::Error;
use crate::transform::{MarkerPolicy, Transform, TransformOptions};

/// Execute one lossless transform on a JPEG byte stream.
///
/// The source buffer is read-only; the result is a freshly owned buffer. The
/// coefficient arrays allocated by the codec live exactly as long as this
/// call.
pub(crate) fn transform(
    src: &[u8],
    transform: Transform,
    options: &TransformOptions,
) -> Result<Vec<u8>, Error> {
    // A libjpeg fatal error (truncated stream, bad markers, ...) unwinds out
    // of the FFI calls; map it to a decode failure here.
    catch_unwind(AssertUnwindSafe(|| run(src, transform, options))).unwrap_or_else(|_| {
        Err(Error::Decode(
            "libjpeg aborted while processing the stream".to_string(),
        ))
    })
}

fn run(src: &[u8], transform: Transform, options: &TransformOptions) -> Result<Vec<u8>, Error> {
    let mut transformoption = transform_info(transform, options);
    let markers = copy_option(options.markers);
    let src_size = src.len() as c_ulong;

    let mut srcinfo = Decompressor::from(src);
    let mut dstinfo = Compressor::from(&mut srcinfo);

    // Safety: these are FFI calls; srcinfo/dstinfo were initialized by
    // jpeg_create_(de)compress and outlive the whole sequence.
    unsafe {
        jpeg_mem_src(&mut srcinfo.cinfo, srcinfo.raw.as_ptr(), src_size);
        jcopy_markers_setup(&mut srcinfo.cinfo, markers);
        jpeg_read_header(&mut srcinfo.cinfo, 1);

        // transupp refuses the workspace only when a perfect transform was
        // requested and the image geometry cannot deliver one.
        if jtransform_request_workspace(&mut srcinfo.cinfo, &mut transformoption) == 0 {
            return Err(Error::ImperfectTransform);
        }
    }

    // Decode to quantized DCT coefficients, no IDCT.
    // Safety: FFI call on the prepared decompressor.
    let src_coef_arrays: *mut jvirt_barray_ptr =
        unsafe { jpeg_read_coefficients(&mut srcinfo.cinfo) };

    // Carry quantization tables and sampling factors over to the encoder,
    // then let transupp swap dimensions / sampling for the transform.
    // Safety: FFI calls; both structs are live.
    unsafe { jpeg_copy_critical_parameters(&srcinfo.cinfo, &mut dstinfo.cinfo) };
    let dst_coef_arrays: *mut jvirt_barray_ptr = unsafe {
        jtransform_adjust_parameters(
            &mut srcinfo.cinfo,
            &mut dstinfo.cinfo,
            src_coef_arrays,
            &mut transformoption,
        )
    };

    if matches!(transform, Transform::Progressive) {
        // Safety: FFI call; dstinfo holds valid compression parameters.
        unsafe { jpeg_simple_progression(&mut dstinfo.cinfo) };
    }

    let mut out = EncodedJpeg::new();
    // Safety: FFI calls; `out` outlives the compressor's use of its pointers.
    unsafe {
        jpeg_mem_dest(&mut dstinfo.cinfo, &mut out.buf, &mut out.size);
        jpeg_write_coefficients(&mut dstinfo.cinfo, dst_coef_arrays);
        jcopy_markers_execute(&mut srcinfo.cinfo, &mut dstinfo.cinfo, markers);
        jtransform_execute_transform(
            &mut srcinfo.cinfo,
            &mut dstinfo.cinfo,
            src_coef_arrays,
            &mut transformoption,
        );
    }

    let finished = dstinfo.finish();

    // The decompressor must stay alive until the compressor is done with the
    // shared coefficient arrays.
    // Safety: FFI call; srcinfo is still live.
    unsafe { jpeg_finish_decompress(&mut srcinfo.cinfo) };

    if finished && !out.is_null() {
        Ok(out.to_vec())
    } else {
        Err(Error::Decode("codec produced no output".to_string()))
    }
}

/// Map a [`Transform`] to the transupp transform code.
fn transform_code(transform: Transform) -> JXFORM_CODE {
    match transform {
        Transform::None | Transform::Grayscale | Transform::Crop(_) | Transform::Progressive => {
            JXFORM_CODE_JXFORM_NONE
        }
        Transform::FlipHorizontal => JXFORM_CODE_JXFORM_FLIP_H,
        Transform::FlipVertical => JXFORM_CODE_JXFORM_FLIP_V,
        Transform::Transpose => JXFORM_CODE_JXFORM_TRANSPOSE,
        Transform::Transverse => JXFORM_CODE_JXFORM_TRANSVERSE,
        Transform::Rotate90 => JXFORM_CODE_JXFORM_ROT_90,
        Transform::Rotate180 => JXFORM_CODE_JXFORM_ROT_180,
        Transform::Rotate270 => JXFORM_CODE_JXFORM_ROT_270,
    }
}

/// Map a [`MarkerPolicy`] to the transupp marker copy option.
fn copy_option(policy: MarkerPolicy) -> JCOPY_OPTION {
    match policy {
        MarkerPolicy::None => JCOPY_OPTION_JCOPYOPT_NONE,
        MarkerPolicy::Comments => JCOPY_OPTION_JCOPYOPT_COMMENTS,
        MarkerPolicy::All => JCOPY_OPTION_JCOPYOPT_ALL,
    }
}

/// Build the transupp request struct for one operation.
///
/// Crop dimensions are always requested with `JCROP_FORCE`: the codec decodes
/// outward to the MCU grid but re-emits the exact pixel rectangle asked for.
fn transform_info(transform: Transform, options: &TransformOptions) -> jpeg_transform_info {
    let crop = match transform {
        Transform::Crop(region) => Some(region),
        _ => None,
    };

    jpeg_transform_info {
        transform: transform_code(transform),
        perfect: c_int::from(options.perfect),
        trim: c_int::from(options.trim),
        force_grayscale: c_int::from(matches!(transform, Transform::Grayscale)),
        crop: c_int::from(crop.is_some()),
        slow_hflip: 0,
        crop_width: crop.map_or(0, |c| c.width),
        crop_width_set: if crop.is_some() {
            JCROP_CODE_JCROP_FORCE
        } else {
            JCROP_CODE_JCROP_UNSET
        },
        crop_height: crop.map_or(0, |c| c.height),
        crop_height_set: if crop.is_some() {
            JCROP_CODE_JCROP_FORCE
        } else {
            JCROP_CODE_JCROP_UNSET
        },
        crop_xoffset: crop.map_or(0, |c| c.x),
        crop_xoffset_set: if crop.is_some() {
            JCROP_CODE_JCROP_POS
        } else {
            JCROP_CODE_JCROP_UNSET
        },
        crop_yoffset: crop.map_or(0, |c| c.y),
        crop_yoffset_set: if crop.is_some() {
            JCROP_CODE_JCROP_POS
        } else {
            JCROP_CODE_JCROP_UNSET
        },
        num_components: 0,
        workspace_coef_arrays: std::ptr::null_mut::<jvirt_barray_ptr>(),
        output_width: 0,
        output_height: 0,
        x_crop_offset: 0,
        y_crop_offset: 0,
        iMCU_sample_width: 0,
        iMCU_sample_height: 0,
    }
}

/// An output buffer allocated by the codec in C-land.
///
/// Exists to guarantee the buffer is freed exactly once, on every exit path,
/// while letting callers view the bytes as a slice.
#[derive(Debug)]
struct EncodedJpeg {
    buf: *mut c_uchar,
    size: c_ulong,
}

impl EncodedJpeg {
    const fn new() -> Self {
        Self {
            buf: std::ptr::null_mut(),
            size: 0,
        }
    }

    const fn is_null(&self) -> bool {
        self.size == 0 || self.buf.is_null()
    }
}

impl Deref for EncodedJpeg {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        if self.is_null() {
            &[]
        } else {
            // Safety: the pointer is non-null and `size` bytes were written
            // by jpeg_mem_dest's memory manager.
            unsafe { std::slice::from_raw_parts(self.buf, self.size as usize) }
        }
    }
}

impl Drop for EncodedJpeg {
    fn drop(&mut self) {
        if !self.buf.is_null() {
            // Safety: the buffer was malloc'd by the codec's memory
            // destination manager.
            unsafe { libc::free(self.buf.cast::<c_void>()) };
            self.buf = std::ptr::null_mut();
        }
    }
}

/// Decompression state plus the borrowed source bytes.
///
/// Wrapping the C struct ensures `jpeg_destroy_decompress` runs on drop,
/// including during an unwind out of a codec error.
struct Decompressor<'a> {
    raw: &'a [u8],
    cinfo: jpeg_decompress_struct,
    err: Box<jpeg_error_mgr>,
}

impl<'a> From<&'a [u8]> for Decompressor<'a> {
    fn from(raw: &'a [u8]) -> Self {
        let mut out = Self {
            raw,
            // Safety: jpeg_create_decompress expects zeroed memory.
            cinfo: unsafe { std::mem::zeroed() },
            err: unwinding_error_mgr(),
        };

        // Safety: error manager is installed before the create call, as
        // libjpeg requires.
        unsafe {
            out.cinfo.common.err = std::ptr::addr_of_mut!(*out.err);
            jpeg_create_decompress(&mut out.cinfo);
        }

        out
    }
}

impl Drop for Decompressor<'_> {
    fn drop(&mut self) {
        // Safety: releases everything the codec allocated for this struct.
        unsafe { jpeg_destroy_decompress(&mut self.cinfo) };
    }
}

/// Compression state for the output stream.
///
/// The error manager is kept behind a raw pointer because the compressor
/// retains the address for its whole lifetime; the box is reclaimed on drop.
struct Compressor {
    cinfo: jpeg_compress_struct,
    err: NonNull<jpeg_error_mgr>,
}

impl From<&mut Decompressor<'_>> for Compressor {
    fn from(src: &mut Decompressor<'_>) -> Self {
        let mut out = Self {
            // Safety: jpeg_CreateCompress expects zeroed memory.
            cinfo: unsafe { std::mem::zeroed() },
            // Safety: Box::into_raw never returns null.
            err: unsafe { NonNull::new_unchecked(Box::into_raw(unwinding_error_mgr())) },
        };

        // Safety: FFI initialization mirroring the decompressor setup.
        unsafe {
            out.cinfo.common.err = out.err.as_ptr();
            jpeg_CreateCompress(&mut out.cinfo, JPEG_LIB_VERSION, std::mem::size_of_val(&out.cinfo));
            out.cinfo.common.progress = std::ptr::null_mut();

            // Keep both managers at the same trace level so neither side
            // emits warnings the other suppresses.
            src.err.trace_level = out.err.as_ref().trace_level;
        }

        out
    }
}

impl Drop for Compressor {
    fn drop(&mut self) {
        // Safety: destroy the codec state, then reclaim the boxed error
        // manager we leaked into it.
        unsafe {
            jpeg_destroy_compress(&mut self.cinfo);
            drop(Box::from_raw(self.err.as_ptr()));
        }
    }
}

impl Compressor {
    /// Finish writing the output stream, consuming the compressor.
    ///
    /// Returns false if the codec recorded an error while finishing.
    fn finish(mut self) -> bool {
        // Safety: FFI call; the struct is destroyed by Drop right after.
        unsafe {
            jpeg_finish_compress(&mut self.cinfo);
            0 == (*self.cinfo.common.err).msg_code
        }
    }
}

/// Build an error manager whose fatal path unwinds instead of calling exit().
fn unwinding_error_mgr() -> Box<jpeg_error_mgr> {
    // Safety: jpeg_std_error fills in a zeroed struct; we then override the
    // two handlers that would otherwise print to stderr or kill the process.
    unsafe {
        let mut err = Box::new(std::mem::zeroed());
        jpeg_std_error(&mut err);
        err.error_exit = Some(unwind_error_exit);
        err.emit_message = Some(silence_message);
        err
    }
}

#[cold]
extern "C-unwind" fn silence_message(_cinfo: &mut jpeg_common_struct, _msg_level: c_int) {}

#[cold]
extern "C-unwind" fn unwind_error_exit(_cinfo: &mut jpeg_common_struct) {
    std::panic::resume_unwind(Box::new(()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_code_mapping() {
        assert_eq!(transform_code(Transform::None), JXFORM_CODE_JXFORM_NONE);
        assert_eq!(transform_code(Transform::Grayscale), JXFORM_CODE_JXFORM_NONE);
        assert_eq!(transform_code(Transform::Progressive), JXFORM_CODE_JXFORM_NONE);
        assert_eq!(transform_code(Transform::Rotate90), JXFORM_CODE_JXFORM_ROT_90);
        assert_eq!(transform_code(Transform::Rotate180), JXFORM_CODE_JXFORM_ROT_180);
        assert_eq!(transform_code(Transform::Rotate270), JXFORM_CODE_JXFORM_ROT_270);
        assert_eq!(transform_code(Transform::FlipHorizontal), JXFORM_CODE_JXFORM_FLIP_H);
        assert_eq!(transform_code(Transform::FlipVertical), JXFORM_CODE_JXFORM_FLIP_V);
        assert_eq!(transform_code(Transform::Transpose), JXFORM_CODE_JXFORM_TRANSPOSE);
        assert_eq!(transform_code(Transform::Transverse), JXFORM_CODE_JXFORM_TRANSVERSE);
    }

    #[test]
    fn test_transform_info_for_crop() {
        use crate::transform::CropRegion;

        let info = transform_info(
            Transform::Crop(CropRegion { x: 16, y: 8, width: 100, height: 50 }),
            &TransformOptions::default(),
        );

        assert_eq!(info.transform, JXFORM_CODE_JXFORM_NONE);
        assert_eq!(info.crop, 1);
        assert_eq!(info.crop_width, 100);
        assert_eq!(info.crop_width_set, JCROP_CODE_JCROP_FORCE);
        assert_eq!(info.crop_height, 50);
        assert_eq!(info.crop_height_set, JCROP_CODE_JCROP_FORCE);
        assert_eq!(info.crop_xoffset, 16);
        assert_eq!(info.crop_xoffset_set, JCROP_CODE_JCROP_POS);
        assert_eq!(info.crop_yoffset, 8);
        assert_eq!(info.crop_yoffset_set, JCROP_CODE_JCROP_POS);
    }

    #[test]
    fn test_transform_info_without_crop() {
        let info = transform_info(
            Transform::Rotate90,
            &TransformOptions { perfect: true, trim: false, markers: MarkerPolicy::All },
        );

        assert_eq!(info.transform, JXFORM_CODE_JXFORM_ROT_90);
        assert_eq!(info.perfect, 1);
        assert_eq!(info.trim, 0);
        assert_eq!(info.crop, 0);
        assert_eq!(info.crop_width_set, JCROP_CODE_JCROP_UNSET);
    }

    #[test]
    fn test_grayscale_sets_flag() {
        let info = transform_info(Transform::Grayscale, &TransformOptions::default());
        assert_eq!(info.force_grayscale, 1);
        assert_eq!(info.transform, JXFORM_CODE_JXFORM_NONE);
    }

    #[test]
    fn test_garbage_input_is_decode_error() {
        let result = transform(b"not a jpeg", Transform::Rotate90, &TransformOptions::default());
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_empty_input_is_decode_error() {
        let result = transform(&[], Transform::None, &TransformOptions::default());
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
