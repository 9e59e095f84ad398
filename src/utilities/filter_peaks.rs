use log::debug;
use serde::{Deserialize, Serialize};

use crate::utilities::structs::Peak;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterPeaksOptions {
    /// Minimum share of the summed integral; `None` skips the pass.
    pub integral_threshold: Option<f64>,
    /// A peak must span more than this many points; `None` skips the pass.
    pub width_threshold: Option<usize>,
}

impl Default for FilterPeaksOptions {
    fn default() -> Self {
        Self {
            integral_threshold: Some(0.004),
            width_threshold: Some(10),
        }
    }
}

/// Drops peaks whose share of the total integral is below
/// `integral_threshold`, then those spanning `width_threshold` points or
/// fewer. Survivors of the integral pass are returned with `percentage` set
/// to that share; the input is left untouched.
///
/// The share is relative to the peaks passed in, so filtering an already
/// filtered list again yields different percentages.
pub fn filter_peaks(peaks: &[Peak], options: FilterPeaksOptions) -> Vec<Peak> {
    let sum_of_integrals: f64 = match options.integral_threshold {
        Some(_) => peaks.iter().map(|p| p.integral).sum(),
        None => 0.0,
    };

    let mut result: Vec<Peak> = Vec::with_capacity(peaks.len());
    let (mut by_integral, mut by_width) = (0usize, 0usize);
    for peak in peaks {
        let mut kept = peak.clone();
        if let Some(threshold) = options.integral_threshold {
            let ratio = if sum_of_integrals != 0.0 {
                peak.integral / sum_of_integrals
            } else {
                0.0
            };
            if ratio < threshold {
                by_integral += 1;
                continue;
            }
            kept = peak.with_percentage(ratio);
        }
        if let Some(threshold) = options.width_threshold {
            if peak.to_index.saturating_sub(peak.from_index) <= threshold {
                by_width += 1;
                continue;
            }
        }
        result.push(kept);
    }

    debug!(
        "filter_peaks: kept {} of {}, {by_integral} below integral share, {by_width} too narrow",
        result.len(),
        peaks.len()
    );
    result
}
