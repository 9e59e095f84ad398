use log::trace;
use serde::{Deserialize, Serialize};

use crate::utilities::utilities::{median, standard_deviation};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoveNoiseOptions {
    /// Half-width of the band around the median that is treated as noise.
    pub tolerance: f64,
    /// Refinement stops once the noise band holds fewer values than this.
    pub min_noise_points: usize,
}

impl Default for RemoveNoiseOptions {
    fn default() -> Self {
        Self {
            tolerance: 200.0,
            min_noise_points: 11,
        }
    }
}

/// Iteratively zeroes every value that cannot be told apart from the
/// baseline. Each pass estimates the noise band around the median of the
/// surviving (nonzero) values and clears everything below
/// `median(band) + sd(band)`. Stops when a pass clears nothing, when every
/// value is zero, or when the band gets too small to trust.
///
/// Zeroed values are never restored, so the loop runs at most `y.len()`
/// passes.
pub fn remove_noise(y: &[f64], options: RemoveNoiseOptions) -> Vec<f64> {
    let RemoveNoiseOptions {
        tolerance,
        min_noise_points,
    } = options;
    let mut result = y.to_vec();
    let mut pass = 0usize;

    loop {
        let values: Vec<f64> = result.iter().copied().filter(|&v| v != 0.0).collect();
        if values.is_empty() {
            break;
        }
        let m = median(&values);
        let noise: Vec<f64> = values
            .iter()
            .copied()
            .filter(|&v| v >= m - tolerance && v <= m + tolerance)
            .collect();
        if noise.len() < min_noise_points {
            trace!(
                "remove_noise: pass {pass} stops, noise band has {} values",
                noise.len()
            );
            break;
        }

        let threshold = median(&noise) + standard_deviation(&noise);
        let mut counter = 0usize;
        for v in result.iter_mut() {
            if *v != 0.0 && *v < threshold {
                *v = 0.0;
                counter += 1;
            }
        }
        trace!("remove_noise: pass {pass} threshold {threshold} cleared {counter} values");
        pass += 1;
        if counter == 0 {
            break;
        }
    }

    result
}
