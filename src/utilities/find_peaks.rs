use serde::{Deserialize, Serialize};

use crate::utilities::errors::PeakError;
use crate::utilities::sgg::{SggOptions, sgg, zero_round_off};
use crate::utilities::structs::DataXY;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindPeaksOptions {
    pub window_size: usize,
    pub polynomial: usize,
    pub derivative: usize,
    /// Added to every `x` gap so a slope never divides by zero.
    pub epsilon: f64,
}

impl Default for FindPeaksOptions {
    fn default() -> Self {
        Self {
            window_size: 13,
            polynomial: 3,
            derivative: 1,
            epsilon: 1e-5,
        }
    }
}

/// Returns the `x` positions where the smoothed derivative closes a
/// rise-then-fall excursion, in ascending order.
///
/// Recording starts while the derivative is positive and still increasing;
/// the first sample after that where it is negative and decreasing is
/// reported. An excursion that never closes before the end is dropped.
pub fn find_peaks(data: &DataXY, options: FindPeaksOptions) -> Result<Vec<f64>, PeakError> {
    let x = &data.x;
    let dy = sgg(
        &data.y,
        x,
        SggOptions {
            window_size: options.window_size,
            derivative: options.derivative,
            polynomial: options.polynomial,
        },
    )?;
    let dy = zero_round_off(dy, &data.y, x, options.derivative);

    let mut peaks = Vec::new();
    let mut is_recording = false;
    for i in 0..dy.len().saturating_sub(1) {
        let delta_x = x[i + 1] - x[i];
        let delta_y = dy[i + 1] - dy[i];
        let slope = delta_y / (delta_x + options.epsilon);
        if slope > 0.0 && dy[i] > 0.0 {
            is_recording = true;
        }
        if is_recording && slope < 0.0 && dy[i] < 0.0 {
            is_recording = false;
            peaks.push(x[i]);
        }
    }
    Ok(peaks)
}
