use chrompeaks::{
    Buf, CDetectPeaksOptions, ERR_DETECT, ERR_INVALID_ARGS, OK, detect_peaks, free_, remove_noise,
};
use chrompeaks::utilities::detect_peaks::{DetectPeaksOptions, detect_peaks as detect_peaks_rs};
use rstest::rstest;
use std::ptr;

mod helpers;
use helpers::three_bumps;

fn empty_buf() -> Buf {
    Buf {
        ptr: ptr::null_mut(),
        len: 0,
    }
}

fn take_bytes(buf: &Buf) -> Vec<u8> {
    let bytes = unsafe { std::slice::from_raw_parts(buf.ptr, buf.len) }.to_vec();
    unsafe { free_(buf.ptr, buf.len) };
    bytes
}

fn options() -> CDetectPeaksOptions {
    CDetectPeaksOptions {
        remove_noise: 0,
        noise_tolerance: -1.0,
        window_size: 13,
        integral_threshold: 0.004,
        width_threshold: 10,
        shape_decomposition: 0,
        discard_unresolved: 0,
    }
}

#[test]
fn detect_peaks_writes_json() {
    let d = three_bumps();
    let opts = options();
    let mut out = empty_buf();
    let code = unsafe { detect_peaks(d.x.as_ptr(), d.y.as_ptr(), d.len(), &opts, &mut out) };
    assert_eq!(code, OK);

    let json: serde_json::Value =
        serde_json::from_slice(&take_bytes(&out)).expect("valid json");
    let peaks = json.as_array().expect("array");
    assert_eq!(peaks.len(), 3);
    for (p, mu) in peaks.iter().zip([50.0, 100.0, 150.0]) {
        let rt = p["retentionTime"].as_f64().expect("number");
        assert!((rt - mu).abs() <= 1.0, "{rt}");
        assert!(p["fromIndex"].as_u64().is_some());
        assert!(p["percentage"].as_f64().is_some());
    }
}

#[test]
fn shape_decomposition_flag_switches_locator() {
    let d = three_bumps();
    let opts = CDetectPeaksOptions {
        shape_decomposition: 1,
        ..options()
    };
    let mut out = empty_buf();
    let code = unsafe { detect_peaks(d.x.as_ptr(), d.y.as_ptr(), d.len(), &opts, &mut out) };
    assert_eq!(code, OK);
    let json: serde_json::Value =
        serde_json::from_slice(&take_bytes(&out)).expect("valid json");
    assert_eq!(json.as_array().map(Vec::len), Some(3));
}

#[rstest]
#[case(-1.0, 0)]
#[case(f64::NAN, -5)]
#[case(f64::INFINITY, 0)]
fn out_of_range_thresholds_fall_back_to_filter_defaults(
    #[case] integral_threshold: f64,
    #[case] width_threshold: i32,
) {
    let d = three_bumps();
    let opts = CDetectPeaksOptions {
        integral_threshold,
        width_threshold,
        ..options()
    };
    let mut out = empty_buf();
    let code = unsafe { detect_peaks(d.x.as_ptr(), d.y.as_ptr(), d.len(), &opts, &mut out) };
    assert_eq!(code, OK);

    let expected = detect_peaks_rs(
        &d,
        &DetectPeaksOptions {
            remove_noise: None,
            ..Default::default()
        },
    )
    .expect("valid input");
    assert!(expected.iter().all(|p| p.percentage.is_some()));
    let expected = serde_json::to_string(&expected).expect("serializable");
    assert_eq!(String::from_utf8(take_bytes(&out)).expect("utf-8"), expected);
}

#[test]
fn null_options_use_defaults() {
    let xs: Vec<f64> = (0..50).map(f64::from).collect();
    let ys = vec![4.0; 50];
    let mut out = empty_buf();
    let code =
        unsafe { detect_peaks(xs.as_ptr(), ys.as_ptr(), xs.len(), ptr::null(), &mut out) };
    assert_eq!(code, OK);
    assert_eq!(take_bytes(&out), b"[]");
}

#[test]
fn rejects_null_pointers_and_short_input() {
    let xs = [0.0, 1.0, 2.0];
    let mut out = empty_buf();
    let opts = options();
    unsafe {
        assert_eq!(
            detect_peaks(ptr::null(), xs.as_ptr(), 3, &opts, &mut out),
            ERR_INVALID_ARGS
        );
        assert_eq!(
            detect_peaks(xs.as_ptr(), xs.as_ptr(), 3, &opts, ptr::null_mut()),
            ERR_INVALID_ARGS
        );
        assert_eq!(
            detect_peaks(xs.as_ptr(), xs.as_ptr(), 1, &opts, &mut out),
            ERR_INVALID_ARGS
        );
        assert_eq!(remove_noise(ptr::null(), 3, 1.0, &mut out), ERR_INVALID_ARGS);
    }
    assert!(out.ptr.is_null());
}

#[test]
fn detection_failure_is_reported() {
    let xs = [0.0, 2.0, 1.0, 3.0];
    let ys = [1.0; 4];
    let mut out = empty_buf();
    let opts = options();
    let code = unsafe { detect_peaks(xs.as_ptr(), ys.as_ptr(), 4, &opts, &mut out) };
    assert_eq!(code, ERR_DETECT);
    assert!(out.ptr.is_null());
}

#[test]
fn remove_noise_writes_native_f64s() {
    let ys: Vec<f64> = (0..40)
        .map(|i| if i == 20 { 1000.0 } else { 10.0 + (i % 3) as f64 })
        .collect();
    let mut out = empty_buf();
    let code = unsafe { remove_noise(ys.as_ptr(), ys.len(), 50.0, &mut out) };
    assert_eq!(code, OK);

    let bytes = take_bytes(&out);
    assert_eq!(bytes.len(), ys.len() * 8);
    let values: Vec<f64> = bytes
        .chunks_exact(8)
        .map(|c| f64::from_ne_bytes(c.try_into().expect("8 bytes")))
        .collect();
    assert_eq!(values[20], 1000.0);
    assert!(values.iter().filter(|&&v| v == 0.0).count() > 20);
}
