// tests/helpers.rs
use chrompeaks::utilities::structs::DataXY;

/// Get one Gaussian value at x (bell curve). `base` lifts the whole curve.
#[allow(dead_code)]
#[inline]
pub fn gaussian_value(x: f64, mu: f64, sigma: f64, amp: f64, base: f64) -> f64 {
    base + amp * (-0.5 * ((x - mu) / sigma).powi(2)).exp()
}

/// Build a signal made of one or more Gaussians `(mu, sigma, amp)`, plus a constant `base` and optional small fake `noise`.
#[allow(dead_code)]
pub fn gaussian_mixture(xs: &[f64], peaks: &[(f64, f64, f64)], base: f64, noise: f64) -> Vec<f64> {
    xs.iter()
        .map(|&x| {
            let mut y = base;
            for &(mu, sigma, amp) in peaks {
                y += gaussian_value(x, mu, sigma, amp, 0.0);
            }
            if noise > 0.0 {
                let z = ((x * 137.13).sin() + (x * 73.7).cos()) * 0.5;
                y += z * noise;
            }
            y
        })
        .collect()
}

/// Unit-step grid `start, start + 1, ..., end`.
#[allow(dead_code)]
pub fn unit_grid(start: usize, end: usize) -> Vec<f64> {
    (start..=end).map(|i| i as f64).collect()
}

/// Three Gaussians (sigma 10) at 50, 100 and 150 on a unit grid from 20 to
/// 180; valleys sit near 75 and 125.
#[allow(dead_code)]
pub fn three_bumps() -> DataXY {
    let xs = unit_grid(20, 180);
    let ys = gaussian_mixture(
        &xs,
        &[(50.0, 10.0, 1000.0), (100.0, 10.0, 1000.0), (150.0, 10.0, 1000.0)],
        0.0,
        0.0,
    );
    DataXY { x: xs, y: ys }
}

/// Small deterministic wiggle in [-0.5, 0.5] you can use as repeatable “noise”.
#[allow(dead_code)]
pub fn jitter(i: u32) -> f64 {
    let mut x = i.wrapping_mul(1664525).wrapping_add(1013904223);
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    (x as f64 / (u32::MAX as f64)) - 0.5
}

/// Check two numbers are close within a simple absolute tolerance.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Build a `DataXY` from x and y vectors.
#[allow(dead_code)]
pub fn data_xy(xs: Vec<f64>, ys: Vec<f64>) -> DataXY {
    DataXY { x: xs, y: ys }
}

// Deterministic uniform values in [lo, hi]
#[allow(dead_code)]
pub fn uniform_vec(n: usize, lo: f64, hi: f64, seed: u64) -> Vec<f64> {
    assert!(hi > lo);
    let mut out = Vec::with_capacity(n);
    let mut s = seed | 1; // odd
    for _ in 0..n {
        s = s
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let u = ((s >> 11) as f64) * (1.0 / (1u64 << 53) as f64);
        out.push(lo + (hi - lo) * u);
    }
    out
}

#[allow(dead_code)]
pub fn nonzero_count(ys: &[f64]) -> usize {
    ys.iter().filter(|&&v| v != 0.0).count()
}
