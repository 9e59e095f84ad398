use std::cmp::Ordering;

#[inline]
pub fn closest_index(xs: &[f64], v: f64) -> usize {
    if xs.is_empty() {
        return 0;
    }
    let (mut lo, mut hi) = (0usize, xs.len());
    // lower_bound(v)
    while lo < hi {
        let mid = (lo + hi) / 2;
        if xs[mid] < v {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == 0 {
        0
    } else if lo >= xs.len() {
        xs.len() - 1
    } else if (v - xs[lo - 1]).abs() <= (xs[lo] - v).abs() {
        lo - 1
    } else {
        lo
    }
}

#[inline]
pub fn mean_step(xs: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0usize;
    for w in xs.windows(2) {
        let d = (w[1] - w[0]).abs();
        if d.is_finite() && d > 0.0 {
            sum += d;
            c += 1;
        }
    }
    if c == 0 {
        f64::EPSILON.max(0.01)
    } else {
        (sum / c as f64).max(f64::EPSILON)
    }
}

/// Median of `values`, averaging the two middle samples for even lengths.
/// Returns `NaN` for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    if n % 2 == 1 {
        v[n / 2]
    } else {
        0.5 * (v[n / 2 - 1] + v[n / 2])
    }
}

/// Sample standard deviation (`n - 1` in the denominator).
pub fn standard_deviation(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let mut ss = 0.0f64;
    for &v in values {
        let d = v - mean;
        ss += d * d;
    }
    (ss / (n - 1) as f64).sqrt()
}

/// Index and value of the largest `ys[i]` for `i` in `[from, to)`, first
/// occurrence on ties. `None` when the clipped range is empty.
pub fn max_in_range(ys: &[f64], from: usize, to: usize) -> Option<(usize, f64)> {
    let to = to.min(ys.len());
    if from >= to {
        return None;
    }
    let mut best = from;
    for i in (from + 1)..to {
        if ys[i] > ys[best] {
            best = i;
        }
    }
    Some((best, ys[best]))
}
