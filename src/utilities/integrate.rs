use crate::utilities::structs::DataXY;
use crate::utilities::utilities::closest_index;

/// Area under the curve as the plain sum of `y[i]` for `i` in
/// `[from_index, to_index)`. This is a left Riemann sum with unit steps, not a
/// trapezoid rule. Indices past the end are clipped.
pub fn integrate(data: &DataXY, from_index: usize, to_index: usize) -> f64 {
    let to = to_index.min(data.y.len());
    if from_index >= to {
        return 0.0;
    }
    data.y[from_index..to].iter().sum()
}

/// Same as [`integrate`] with the bounds given as `x` values, each mapped to
/// its nearest sample.
pub fn integrate_range(data: &DataXY, from: f64, to: f64) -> f64 {
    let from_index = closest_index(&data.x, from);
    let to_index = closest_index(&data.x, to);
    integrate(data, from_index, to_index)
}
