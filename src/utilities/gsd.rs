//! Global spectral deconvolution: peak positions and widths from the
//! curvature of the smoothed trace, plus the broadening step that turns each
//! shape into an integration range.

use serde::{Deserialize, Serialize};

use crate::utilities::errors::PeakError;
use crate::utilities::integrate::integrate_range;
use crate::utilities::sgg::{SggOptions, sgg, zero_round_off};
use crate::utilities::structs::{DataXY, ShapeCandidate};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GsdOptions {
    pub window_size: usize,
    pub polynomial: usize,
    /// Smooth `y` before reading peak heights.
    pub smooth_y: bool,
    /// Peaks at or below this height are ignored.
    pub noise_level: f64,
    /// Peaks lower than this fraction of the highest sample are ignored.
    pub min_max_ratio: f64,
}

impl Default for GsdOptions {
    fn default() -> Self {
        Self {
            window_size: 17,
            polynomial: 3,
            smooth_y: false,
            noise_level: 0.0,
            min_max_ratio: 0.00025,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BroadenPeaksOptions {
    pub factor: f64,
    pub overlap: bool,
}

impl Default for BroadenPeaksOptions {
    fn default() -> Self {
        Self {
            factor: 7.0,
            overlap: false,
        }
    }
}

/// Options for turning a trace into [`ShapeCandidate`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeOptions {
    pub gsd: GsdOptions,
    pub broaden: BroadenPeaksOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GsdPeak {
    pub x: f64,
    pub y: f64,
    /// Distance between the inflection points around the apex.
    pub width: f64,
    pub from: f64,
    pub to: f64,
}

/// Locates peaks as local minima of the (negative) second derivative that are
/// bracketed by an inflection point on each side. Sorted by `x`.
pub fn gsd(data: &DataXY, options: GsdOptions) -> Result<Vec<GsdPeak>, PeakError> {
    let x = &data.x;
    let sg = |derivative: usize| {
        sgg(
            &data.y,
            x,
            SggOptions {
                window_size: options.window_size,
                derivative,
                polynomial: options.polynomial,
            },
        )
    };
    let y = if options.smooth_y {
        sg(0)?
    } else {
        data.y.clone()
    };
    let ddy = zero_round_off(sg(2)?, &data.y, x, 2);

    let n = y.len();
    let max_y = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_height = options.noise_level.max(options.min_max_ratio * max_y);

    // ddy sign changes bracket every concave region
    let mut inflections: Vec<usize> = Vec::new();
    for i in 0..n.saturating_sub(1) {
        if (ddy[i] >= 0.0) != (ddy[i + 1] >= 0.0) {
            inflections.push(i);
        }
    }

    let mut peaks = Vec::new();
    for i in 1..n.saturating_sub(1) {
        let is_minimum = ddy[i] < 0.0 && ddy[i] < ddy[i - 1] && ddy[i] <= ddy[i + 1];
        if !is_minimum || y[i] <= min_height {
            continue;
        }
        let right_pos = inflections.partition_point(|&k| k < i);
        if right_pos == 0 || right_pos >= inflections.len() {
            continue;
        }
        let left = inflections[right_pos - 1];
        let right = inflections[right_pos];
        let from = crossing(x, &ddy, left);
        let to = crossing(x, &ddy, right);
        peaks.push(GsdPeak {
            x: x[i],
            y: y[i],
            width: (to - from).abs(),
            from,
            to,
        });
    }
    Ok(peaks)
}

// Linear interpolation of the zero crossing between samples `i` and `i + 1`.
fn crossing(x: &[f64], ddy: &[f64], i: usize) -> f64 {
    let denom = ddy[i] - ddy[i + 1];
    if denom == 0.0 {
        return 0.5 * (x[i] + x[i + 1]);
    }
    x[i] + (x[i + 1] - x[i]) * (ddy[i] / denom)
}

/// Widens every peak to `factor` times its half-width on each side. Unless
/// `overlap` is set, neighbours whose ranges intersect share the midpoint of
/// the intersection.
pub fn broaden_peaks(peaks: &[GsdPeak], options: BroadenPeaksOptions) -> Vec<GsdPeak> {
    let mut out: Vec<GsdPeak> = peaks
        .iter()
        .map(|p| GsdPeak {
            from: p.x - p.width / 2.0 * options.factor,
            to: p.x + p.width / 2.0 * options.factor,
            ..*p
        })
        .collect();

    if !options.overlap {
        for i in 0..out.len().saturating_sub(1) {
            if out[i].to > out[i + 1].from {
                let mid = (out[i].to + out[i + 1].from) / 2.0;
                out[i].to = mid;
                out[i + 1].from = mid;
            }
        }
    }
    for p in out.iter_mut() {
        p.width = p.to - p.from;
    }
    out
}

/// Runs [`gsd`] and [`broaden_peaks`], then integrates each broadened range
/// clamped to the trace.
pub fn shape_candidates(
    data: &DataXY,
    options: ShapeOptions,
) -> Result<Vec<ShapeCandidate>, PeakError> {
    let peaks = gsd(data, options.gsd)?;
    let (first, last) = match (data.x.first(), data.x.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return Ok(Vec::new()),
    };

    Ok(broaden_peaks(&peaks, options.broaden)
        .iter()
        .map(|p| ShapeCandidate {
            retention_time: p.x,
            intensity: p.y,
            integral: integrate_range(
                data,
                p.from.clamp(first, last),
                p.to.clamp(first, last),
            ),
        })
        .collect())
}
