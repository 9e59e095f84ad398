use serde::{Deserialize, Serialize};

use crate::utilities::errors::PeakError;

/// A sampled trace: `y[i]` measured at position `x[i]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataXY {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DataXY {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Checks the shape every detection stage relies on: equal lengths, at
    /// least two points, finite values and strictly increasing `x`.
    pub fn validate(&self) -> Result<(), PeakError> {
        let n = self.x.len();
        if n != self.y.len() {
            return Err(PeakError::LengthMismatch {
                x: n,
                y: self.y.len(),
            });
        }
        if n < 2 {
            return Err(PeakError::TooShort { len: n, min: 2 });
        }
        for i in 0..n {
            if !self.x[i].is_finite() || !self.y[i].is_finite() {
                return Err(PeakError::NonFinite { index: i });
            }
            if i > 0 && self.x[i] <= self.x[i - 1] {
                return Err(PeakError::NotIncreasing { index: i });
            }
        }
        Ok(())
    }
}

/// Expected retention time and the half-width searched around it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    pub rt: f64,
    pub window: f64,
}

/// One side of a peak. `Unresolved` means the walk reached the series edge
/// without seeing the slope turn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Boundary {
    Resolved { index: usize, value: f64 },
    Unresolved,
}

impl Boundary {
    pub fn index(&self) -> Option<usize> {
        match self {
            Boundary::Resolved { index, .. } => Some(*index),
            Boundary::Unresolved => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Boundary::Resolved { value, .. } => Some(*value),
            Boundary::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Boundary::Resolved { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Boundaries {
    pub from: Boundary,
    pub to: Boundary,
}

impl Boundaries {
    pub fn is_resolved(&self) -> bool {
        self.from.is_resolved() && self.to.is_resolved()
    }
}

/// A peak reported by shape decomposition, already carrying its own apex,
/// height and area. Its extent still comes from the boundary walk.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeCandidate {
    pub retention_time: f64,
    pub intensity: f64,
    pub integral: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Candidate {
    Position(f64),
    Shape(ShapeCandidate),
}

impl Candidate {
    pub fn position(&self) -> f64 {
        match self {
            Candidate::Position(x) => *x,
            Candidate::Shape(s) => s.retention_time,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Peak {
    pub from: f64,
    pub from_index: usize,
    pub to: f64,
    pub to_index: usize,
    pub retention_time: f64,
    pub integral: f64,
    pub intensity: f64,
    pub width: f64,
    pub number_of_points: usize,
    /// Share of the total integral, set by the integral filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Peak {
    pub fn with_percentage(&self, percentage: f64) -> Peak {
        Peak {
            percentage: Some(percentage),
            ..self.clone()
        }
    }
}
