use log::debug;
use serde::{Deserialize, Serialize};

use crate::utilities::assemble_peaks::assemble_peaks;
use crate::utilities::errors::PeakError;
use crate::utilities::filter_peaks::{FilterPeaksOptions, filter_peaks};
use crate::utilities::get_boundaries::{BoundariesOptions, get_boundaries};
use crate::utilities::locate_peaks::{CandidateSource, PeakLocator};
use crate::utilities::remove_noise::{RemoveNoiseOptions, remove_noise};
use crate::utilities::structs::{DataXY, Peak};

/// What to do with a candidate whose boundary walk ran off the trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnresolvedBoundary {
    /// Keep the peak, extending it to the first/last sample.
    #[default]
    ClampToEdge,
    /// Skip the candidate.
    Discard,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectPeaksOptions {
    pub remove_noise: Option<RemoveNoiseOptions>,
    pub locator: PeakLocator,
    pub get_boundaries_options: BoundariesOptions,
    pub filter_peaks_options: Option<FilterPeaksOptions>,
    pub unresolved_boundary: UnresolvedBoundary,
}

impl Default for DetectPeaksOptions {
    fn default() -> Self {
        Self {
            remove_noise: Some(RemoveNoiseOptions::default()),
            locator: PeakLocator::default(),
            get_boundaries_options: BoundariesOptions::default(),
            filter_peaks_options: Some(FilterPeaksOptions::default()),
            unresolved_boundary: UnresolvedBoundary::default(),
        }
    }
}

/// Detects the peaks of a trace: optional noise removal, candidate
/// localization, boundary walk, assembly and filtering. Peaks come back in
/// candidate order.
///
/// Fails fast on malformed input (mismatched lengths, fewer than two points,
/// non-finite values, `x` not strictly increasing) and on smoothing windows
/// that do not fit the trace.
pub fn detect_peaks(data: &DataXY, options: &DetectPeaksOptions) -> Result<Vec<Peak>, PeakError> {
    data.validate()?;

    let denoised;
    let data = match options.remove_noise {
        Some(o) => {
            denoised = DataXY {
                x: data.x.clone(),
                y: remove_noise(&data.y, o),
            };
            &denoised
        }
        None => data,
    };

    let candidates = options.locator.candidates(data)?;
    debug!("detect_peaks: {} candidates", candidates.len());

    let mut resolved = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let boundaries = get_boundaries(
            data,
            candidate.position(),
            options.get_boundaries_options,
        )?;
        if !boundaries.is_resolved() && options.unresolved_boundary == UnresolvedBoundary::Discard
        {
            debug!(
                "detect_peaks: discarding candidate at {} with an open boundary",
                candidate.position()
            );
            continue;
        }
        resolved.push((candidate, boundaries));
    }

    let peaks = assemble_peaks(data, &resolved);
    Ok(match options.filter_peaks_options {
        Some(o) => filter_peaks(&peaks, o),
        None => peaks,
    })
}
