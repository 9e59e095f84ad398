use serde::{Deserialize, Serialize};

use crate::utilities::{
    closest_index,
    errors::PeakError,
    sgg::{SggOptions, sgg},
    structs::{Boundaries, Boundary, DataXY},
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoundariesOptions {
    pub epsilon: f64,
    pub window_size: usize,
    pub polynomial: usize,
}

impl Default for BoundariesOptions {
    fn default() -> Self {
        Self {
            epsilon: 1e-5,
            window_size: 13,
            polynomial: 3,
        }
    }
}

/// Finds the valleys flanking the sample closest to `peak_x`.
///
/// The trace is smoothed first; then each side is walked outward one sample
/// at a time, starting next to the center, until the smoothed signal starts
/// rising again. A side that reaches the series edge first is
/// [`Boundary::Unresolved`].
pub fn get_boundaries(
    data: &DataXY,
    peak_x: f64,
    options: BoundariesOptions,
) -> Result<Boundaries, PeakError> {
    let idx = closest_index(&data.x, peak_x);
    let smooth_y = sgg(
        &data.y,
        &data.x,
        SggOptions {
            window_size: options.window_size,
            derivative: 0,
            polynomial: options.polynomial,
        },
    )?;

    Ok(Boundaries {
        from: step_boundary(&data.x, &smooth_y, idx, -1, options.epsilon),
        to: step_boundary(&data.x, &smooth_y, idx, 1, options.epsilon),
    })
}

fn step_boundary(x: &[f64], y: &[f64], idx: usize, inc: isize, epsilon: f64) -> Boundary {
    let n = x.len() as isize;
    let mut p = idx as isize + inc;
    while p >= 0 && p < n - 1 {
        let q = p + inc;
        if q < 0 {
            break;
        }
        let i = p as usize;
        let j = q as usize;
        let slope = (y[j] - y[i]) / (x[j] - x[i] + epsilon);
        if (inc > 0 && slope >= 0.0) || (inc < 0 && slope <= 0.0) {
            return Boundary::Resolved {
                index: i,
                value: x[i],
            };
        }
        p += inc;
    }
    Boundary::Unresolved
}
