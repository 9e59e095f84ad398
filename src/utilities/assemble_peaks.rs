use crate::utilities::integrate::integrate;
use crate::utilities::structs::{Boundaries, Candidate, DataXY, Peak};
use crate::utilities::utilities::max_in_range;

/// Builds the peak record for one candidate. An unresolved side is clamped to
/// the first or last sample.
///
/// Bare positions take their retention time, intensity and area from the
/// samples in `[from_index, to_index)`; shape candidates keep the values they
/// were reported with.
pub fn assemble_peak(data: &DataXY, candidate: &Candidate, boundaries: &Boundaries) -> Peak {
    let last = data.x.len().saturating_sub(1);
    let from_index = boundaries.from.index().unwrap_or(0);
    let to_index = boundaries.to.index().unwrap_or(last);
    let from = data.x.get(from_index).copied().unwrap_or(0.0);
    let to = data.x.get(to_index).copied().unwrap_or(0.0);

    let (retention_time, intensity, integral) = match candidate {
        Candidate::Position(_) => {
            let (rt, intensity) = match max_in_range(&data.y, from_index, to_index) {
                Some((i, v)) => (data.x[i], v),
                None => (0.0, 0.0),
            };
            (rt, intensity, integrate(data, from_index, to_index))
        }
        Candidate::Shape(s) => (s.retention_time, s.intensity, s.integral),
    };

    Peak {
        from,
        from_index,
        to,
        to_index,
        retention_time,
        integral,
        intensity,
        width: to - from,
        number_of_points: to_index.saturating_sub(from_index),
        percentage: None,
    }
}

/// One peak per `(candidate, boundaries)` pair, in input order.
pub fn assemble_peaks(data: &DataXY, resolved: &[(Candidate, Boundaries)]) -> Vec<Peak> {
    resolved
        .iter()
        .map(|(c, b)| assemble_peak(data, c, b))
        .collect()
}
