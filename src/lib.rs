//! Peak detection for one-dimensional chromatographic traces.
//!
//! The pipeline removes baseline noise, proposes candidate peaks, walks
//! outward from each candidate to its flanking valleys, integrates the area
//! between them and drops peaks that are too small or too narrow. The Rust
//! API lives in [`utilities`]; this file adds a C ABI that reports peaks as
//! JSON.
use core::ffi::c_int;
use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    ptr, slice,
};

pub mod utilities;
use utilities::{
    detect_peaks::{DetectPeaksOptions, UnresolvedBoundary, detect_peaks as detect_peaks_rs},
    filter_peaks::FilterPeaksOptions,
    find_peaks::FindPeaksOptions,
    gsd::ShapeOptions,
    locate_peaks::PeakLocator,
    remove_noise::{RemoveNoiseOptions, remove_noise as remove_noise_rs},
    structs::DataXY,
};

pub const OK: c_int = 0;
pub const ERR_INVALID_ARGS: c_int = 1;
pub const ERR_PANIC: c_int = 2;
pub const ERR_DETECT: c_int = 3;
pub const ERR_SERIALIZE: c_int = 4;

#[repr(C)]
pub struct Buf {
    pub ptr: *mut u8,
    pub len: usize,
}

/// Flat option block for C callers. Non-finite or negative numbers and
/// non-positive integers select the default for that field.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CDetectPeaksOptions {
    pub remove_noise: c_int,
    pub noise_tolerance: f64,
    pub window_size: c_int,
    pub integral_threshold: f64,
    pub width_threshold: c_int,
    pub shape_decomposition: c_int,
    pub discard_unresolved: c_int,
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn alloc(size: usize) -> *mut u8 {
    if size == 0 {
        return core::ptr::null_mut();
    }
    let mut v = Vec::<u8>::with_capacity(size);
    let p = v.as_mut_ptr();
    core::mem::forget(v);
    p
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_(ptr_raw: *mut u8, size: usize) {
    if !ptr_raw.is_null() {
        let _ = unsafe { Vec::<u8>::from_raw_parts(ptr_raw, size, size) };
    }
}

/// Runs the detection pipeline and writes the peaks as a JSON array into
/// `out_json`. The buffer belongs to the caller and is released with
/// [`free_`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn detect_peaks(
    x_ptr: *const f64,
    y_ptr: *const f64,
    len: usize,
    options: *const CDetectPeaksOptions,
    out_json: *mut Buf,
) -> c_int {
    if x_ptr.is_null() || y_ptr.is_null() || out_json.is_null() || len < 2 {
        return ERR_INVALID_ARGS;
    }
    let run = || -> Result<(), c_int> {
        let xs = unsafe { slice::from_raw_parts(x_ptr, len) };
        let ys = unsafe { slice::from_raw_parts(y_ptr, len) };
        let data = DataXY {
            x: xs.to_vec(),
            y: ys.to_vec(),
        };
        let opts = build_detect_peaks_options(options);
        let peaks = detect_peaks_rs(&data, &opts).map_err(|_| ERR_DETECT)?;
        let s = serde_json::to_string(&peaks).map_err(|_| ERR_SERIALIZE)?;
        write_buf(out_json, s.into_bytes().into_boxed_slice());
        Ok(())
    };
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(())) => OK,
        Ok(Err(code)) => code,
        Err(_) => ERR_PANIC,
    }
}

/// Writes the denoised intensities into `out_y` as native-endian `f64`s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn remove_noise(
    y_ptr: *const f64,
    len: usize,
    tolerance: f64,
    out_y: *mut Buf,
) -> c_int {
    if y_ptr.is_null() || out_y.is_null() {
        return ERR_INVALID_ARGS;
    }
    let res = catch_unwind(AssertUnwindSafe(|| {
        let ys = unsafe { slice::from_raw_parts(y_ptr, len) };
        let defaults = RemoveNoiseOptions::default();
        let opts = RemoveNoiseOptions {
            tolerance: if tolerance.is_finite() && tolerance >= 0.0 {
                tolerance
            } else {
                defaults.tolerance
            },
            ..defaults
        };
        let out = remove_noise_rs(ys, opts);
        write_buf(out_y, f64_slice_to_u8_box(&out));
    }));
    match res {
        Ok(()) => OK,
        Err(_) => ERR_PANIC,
    }
}

fn f64_slice_to_u8_box(v: &[f64]) -> Box<[u8]> {
    v.iter()
        .flat_map(|f| f.to_ne_bytes())
        .collect::<Vec<u8>>()
        .into_boxed_slice()
}

#[inline]
fn odd_at_least(v: usize, min_: usize, def_: usize) -> usize {
    let v = if v == 0 { def_ } else { v };
    let v = v.max(min_);
    if v % 2 == 0 { v | 1 } else { v }
}

#[inline]
fn pos_usize(raw: c_int, def_: usize) -> usize {
    if raw > 0 { raw as usize } else { def_ }
}

// Box<[u8]> has the same layout as the (ptr, len) pair handed to `free_`.
fn write_buf(out: *mut Buf, bytes: Box<[u8]>) {
    let len = bytes.len();
    let ptr_bytes = Box::into_raw(bytes) as *mut u8;
    unsafe {
        ptr::write_unaligned(
            out,
            Buf {
                ptr: ptr_bytes,
                len,
            },
        )
    };
}

fn build_detect_peaks_options(options: *const CDetectPeaksOptions) -> DetectPeaksOptions {
    if options.is_null() {
        return DetectPeaksOptions::default();
    }
    let o = unsafe { *options };
    let defaults = DetectPeaksOptions::default();

    let remove_noise = (o.remove_noise != 0).then(|| RemoveNoiseOptions {
        tolerance: if o.noise_tolerance.is_finite() && o.noise_tolerance >= 0.0 {
            o.noise_tolerance
        } else {
            RemoveNoiseOptions::default().tolerance
        },
        ..Default::default()
    });

    let find_defaults = FindPeaksOptions::default();
    let ws = odd_at_least(
        pos_usize(o.window_size, find_defaults.window_size),
        5,
        find_defaults.window_size,
    );
    let locator = if o.shape_decomposition != 0 {
        PeakLocator::ShapeDecomposition(ShapeOptions::default())
    } else {
        PeakLocator::DerivativeSlope(FindPeaksOptions {
            window_size: ws,
            ..find_defaults
        })
    };

    let filter_defaults = FilterPeaksOptions::default();
    let integral = if o.integral_threshold.is_finite() && o.integral_threshold >= 0.0 {
        Some(o.integral_threshold)
    } else {
        filter_defaults.integral_threshold
    };
    let width = if o.width_threshold > 0 {
        Some(o.width_threshold as usize)
    } else {
        filter_defaults.width_threshold
    };

    DetectPeaksOptions {
        remove_noise,
        locator,
        get_boundaries_options: defaults.get_boundaries_options,
        filter_peaks_options: Some(FilterPeaksOptions {
            integral_threshold: integral,
            width_threshold: width,
        }),
        unresolved_boundary: if o.discard_unresolved != 0 {
            UnresolvedBoundary::Discard
        } else {
            UnresolvedBoundary::ClampToEdge
        },
    }
}
