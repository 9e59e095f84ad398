use crate::utilities::detect_peaks::{DetectPeaksOptions, detect_peaks};
use crate::utilities::errors::PeakError;
use crate::utilities::structs::{DataXY, Peak, Roi};

/// The detected peak closest to `roi.rt`, preferring peaks inside
/// `roi.rt ± roi.window` and the taller one on ties. `None` when nothing was
/// detected.
pub fn get_peak(
    data: &DataXY,
    roi: Roi,
    options: &DetectPeaksOptions,
) -> Result<Option<Peak>, PeakError> {
    let peaks = detect_peaks(data, options)?;
    if peaks.is_empty() {
        return Ok(None);
    }

    let target = roi.rt;
    let w = if roi.window.is_finite() && roi.window > 0.0 {
        roi.window
    } else {
        0.0
    };

    let mut best = None;
    if w > 0.0 {
        best = closest(
            peaks
                .iter()
                .filter(|p| (p.retention_time - target).abs() <= w),
            target,
        );
    }
    if best.is_none() {
        best = closest(peaks.iter(), target);
    }

    Ok(best.cloned())
}

fn closest<'a>(peaks: impl Iterator<Item = &'a Peak>, target: f64) -> Option<&'a Peak> {
    let mut best: Option<&Peak> = None;
    for p in peaks {
        match best {
            None => best = Some(p),
            Some(b) => {
                let db = (b.retention_time - target).abs();
                let dp = (p.retention_time - target).abs();
                if dp < db || ((dp - db).abs() <= f64::EPSILON && p.intensity > b.intensity) {
                    best = Some(p);
                }
            }
        }
    }
    best
}
