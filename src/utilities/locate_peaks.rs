use serde::{Deserialize, Serialize};

use crate::utilities::errors::PeakError;
use crate::utilities::find_peaks::{FindPeaksOptions, find_peaks};
use crate::utilities::gsd::{ShapeOptions, shape_candidates};
use crate::utilities::structs::{Candidate, DataXY};

/// Something that proposes peak candidates for a trace.
pub trait CandidateSource {
    fn candidates(&self, data: &DataXY) -> Result<Vec<Candidate>, PeakError>;
}

impl CandidateSource for FindPeaksOptions {
    fn candidates(&self, data: &DataXY) -> Result<Vec<Candidate>, PeakError> {
        Ok(find_peaks(data, *self)?
            .into_iter()
            .map(Candidate::Position)
            .collect())
    }
}

impl CandidateSource for ShapeOptions {
    fn candidates(&self, data: &DataXY) -> Result<Vec<Candidate>, PeakError> {
        Ok(shape_candidates(data, *self)?
            .into_iter()
            .map(Candidate::Shape)
            .collect())
    }
}

/// Which localization strategy the pipeline uses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "camelCase")]
pub enum PeakLocator {
    /// Sign changes of the smoothed first derivative; candidates are bare
    /// positions.
    DerivativeSlope(FindPeaksOptions),
    /// Curvature-based shape decomposition; candidates carry their own
    /// height, width and area.
    ShapeDecomposition(ShapeOptions),
}

impl Default for PeakLocator {
    fn default() -> Self {
        PeakLocator::DerivativeSlope(FindPeaksOptions::default())
    }
}

impl CandidateSource for PeakLocator {
    fn candidates(&self, data: &DataXY) -> Result<Vec<Candidate>, PeakError> {
        match self {
            PeakLocator::DerivativeSlope(o) => o.candidates(data),
            PeakLocator::ShapeDecomposition(o) => o.candidates(data),
        }
    }
}
