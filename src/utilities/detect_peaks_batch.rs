use rayon::{ThreadPoolBuilder, prelude::*};

use crate::utilities::{
    detect_peaks::{DetectPeaksOptions, detect_peaks},
    errors::PeakError,
    structs::{DataXY, Peak},
};

/// Runs [`detect_peaks`] on every trace, on `cores` threads when there is
/// more than one trace to share. Each trace gets its own result, so one bad
/// trace does not hide the others.
pub fn detect_peaks_batch(
    series: &[DataXY],
    options: &DetectPeaksOptions,
    cores: usize,
) -> Result<Vec<Result<Vec<Peak>, PeakError>>, PeakError> {
    let f = |data: &DataXY| detect_peaks(data, options);
    if cores <= 1 || series.len() < 2 {
        Ok(series.iter().map(f).collect())
    } else {
        let pool = ThreadPoolBuilder::new().num_threads(cores).build()?;
        Ok(pool.install(|| series.par_iter().map(f).collect()))
    }
}
