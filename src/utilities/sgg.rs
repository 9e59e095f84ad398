//! Generalized Savitzky-Golay filter for smoothing and differentiating
//! traces sampled on a (possibly non-uniform) grid.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::utilities::errors::PeakError;
use crate::utilities::utilities::mean_step;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SggOptions {
    pub window_size: usize,
    pub derivative: usize,
    pub polynomial: usize,
}

impl Default for SggOptions {
    fn default() -> Self {
        Self {
            window_size: 9,
            derivative: 0,
            polynomial: 3,
        }
    }
}

/// Smooths `ys` (or computes its `derivative`-th derivative along `xs`).
/// The result has the same length as the input; the first and last
/// `window_size / 2` samples use the asymmetric weights of the edge windows.
pub fn sgg(ys: &[f64], xs: &[f64], opts: SggOptions) -> Result<Vec<f64>, PeakError> {
    let window_size = opts.window_size;
    let derivative = opts.derivative;
    let polynomial = opts.polynomial;
    let n = ys.len();

    if n == 0 {
        return Err(PeakError::TooShort { len: 0, min: 5 });
    }
    if xs.len() != n {
        return Err(PeakError::LengthMismatch { x: xs.len(), y: n });
    }
    if window_size % 2 == 0 || window_size < 5 || window_size > n {
        return Err(PeakError::InvalidWindow {
            window: window_size,
            len: n,
        });
    }
    if polynomial < 1 {
        return Err(PeakError::InvalidPolynomial(polynomial));
    }
    if polynomial >= 6 {
        warn!(
            "polynomial order {polynomial} is higher than 5, the fit may oscillate unless the data arises from such a model"
        );
    }

    let half = window_size / 2;
    let hs = get_hs(xs, half, derivative);
    let weights = full_weights(window_size, polynomial, derivative);

    let mut ans = vec![0.0f64; n];

    for i in 0..half {
        let wl = &weights[half - i - 1];
        let wr = &weights[half + i + 1];

        let mut dl = 0.0f64;
        let mut dr = 0.0f64;

        for l in 0..window_size {
            dl += wl[l] * ys[l];
            dr += wr[l] * ys[n - window_size + l];
        }

        let idx_l = half - i - 1;
        let idx_r = n - half + i;

        ans[idx_l] = dl / hs[idx_l];
        ans[idx_r] = dr / hs[idx_r];
    }

    let wc = &weights[half];
    for i in window_size..=n {
        let mut d = 0.0f64;
        for l in 0..window_size {
            d += wc[l] * ys[l + i - window_size];
        }
        let idx = i - half - 1;
        ans[idx] = d / hs[idx];
    }

    Ok(ans)
}

/// Sets derivative samples that are pure floating point noise for the scale
/// of `ys` to exactly zero, so a flat trace has a flat derivative.
pub fn zero_round_off(mut dy: Vec<f64>, ys: &[f64], xs: &[f64], derivative: usize) -> Vec<f64> {
    let scale = ys.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let floor = 1e-12 * scale / mean_step(xs).powi(derivative as i32);
    for v in dy.iter_mut() {
        if v.abs() <= floor {
            *v = 0.0;
        }
    }
    dy
}

fn get_hs(xs: &[f64], half: usize, derivative: usize) -> Vec<f64> {
    let n = xs.len();
    if derivative == 0 || n < 2 {
        return vec![1.0f64; n];
    }

    let mut pref = vec![0.0f64; n];
    for i in 0..(n - 1) {
        pref[i + 1] = pref[i] + (xs[i + 1] - xs[i]);
    }

    let mut hs = vec![1.0f64; n];
    for c in 0..n {
        let start = c.saturating_sub(half);
        let end_excl = (c + half).min(n - 1);
        let count = end_excl.saturating_sub(start);
        let avg = if count > 0 {
            (pref[end_excl] - pref[start]) / (count as f64)
        } else {
            1.0
        };
        hs[c] = avg.powi(derivative as i32);
    }
    hs
}

fn full_weights(m: usize, n: usize, s: usize) -> Vec<Vec<f64>> {
    let half = (m / 2) as i32;
    let n_i = n as i32;
    let s_i = s as i32;

    let mut gi: Vec<Vec<f64>> = Vec::with_capacity(m);
    for idx in 0..m {
        let i_off = idx as i32 - half;
        let tbl = gram_table(i_off, half, n_i, 0);
        gi.push((0..=n).map(|k| tbl[k][0]).collect());
    }

    let mut gt: Vec<Vec<f64>> = Vec::with_capacity(m);
    for idx in 0..m {
        let t_off = idx as i32 - half;
        let tbl = gram_table(t_off, half, n_i, s_i);
        gt.push((0..=n).map(|k| tbl[k][s]).collect());
    }

    let two_m = 2 * half;
    let mut coef = vec![0.0f64; n + 1];
    for k in 0..=n_i {
        let num = gen_fact(two_m, k);
        let den = gen_fact(two_m + k + 1, k + 1);
        coef[k as usize] = (2 * k + 1) as f64 * (num / den);
    }

    let mut w = vec![vec![0.0f64; m]; m];
    for t_idx in 0..m {
        for j_idx in 0..m {
            let mut sum = 0.0f64;
            for k in 0..=n {
                sum += coef[k] * gi[j_idx][k] * gt[t_idx][k];
            }
            w[t_idx][j_idx] = sum;
        }
    }
    w
}

// Gram polynomials and their derivatives up to order `s_max`, evaluated at `i`.
fn gram_table(i: i32, m: i32, n_max: i32, s_max: i32) -> Vec<Vec<f64>> {
    let nm = (n_max as usize) + 1;
    let sm = (s_max as usize) + 1;
    let mut g = vec![vec![0.0f64; sm]; nm];
    g[0][0] = 1.0;

    for k in 1..=n_max {
        let kf = k as f64;
        let denom = kf * (2 * m - k + 1) as f64;
        let a = (4 * k - 2) as f64 / denom;
        let b = ((k - 1) as f64 * (2 * m + k) as f64) / denom;

        for s in 0..=s_max {
            let s_usize = s as usize;
            let term1 = (i as f64) * g[(k - 1) as usize][s_usize];
            let term2 = if s > 0 {
                (s as f64) * g[(k - 1) as usize][s_usize - 1]
            } else {
                0.0
            };
            let term3 = if k >= 2 {
                g[(k - 2) as usize][s_usize]
            } else {
                0.0
            };
            g[k as usize][s_usize] = a * (term1 + term2) - b * term3;
        }
    }
    g
}

fn gen_fact(a: i32, b: i32) -> f64 {
    if a >= b {
        let mut acc = 1.0f64;
        for j in (a - b + 1)..=a {
            acc *= j as f64;
        }
        acc
    } else {
        1.0
    }
}
