use thiserror::Error;

/// Everything that can go wrong before a trace reaches peak detection.
#[derive(Debug, Error)]
pub enum PeakError {
    #[error("x and y must have the same length ({x} != {y})")]
    LengthMismatch { x: usize, y: usize },
    #[error("series has {len} points, at least {min} are required")]
    TooShort { len: usize, min: usize },
    #[error("x is not strictly increasing at index {index}")]
    NotIncreasing { index: usize },
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },
    #[error("invalid window size {window} for {len} points (must be odd, at least 5 and at most the data length)")]
    InvalidWindow { window: usize, len: usize },
    #[error("polynomial order must be a positive integer, got {0}")]
    InvalidPolynomial(usize),
    #[error("could not build the thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
