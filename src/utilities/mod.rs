pub mod assemble_peaks;
pub use assemble_peaks::{assemble_peak, assemble_peaks};

pub mod detect_peaks;
pub use detect_peaks::{DetectPeaksOptions, UnresolvedBoundary, detect_peaks};

pub mod detect_peaks_batch;
pub use detect_peaks_batch::detect_peaks_batch;

pub mod errors;
pub use errors::PeakError;

pub mod filter_peaks;
pub use filter_peaks::{FilterPeaksOptions, filter_peaks};

pub mod find_peaks;
pub use find_peaks::{FindPeaksOptions, find_peaks};

pub mod get_boundaries;
pub use get_boundaries::{BoundariesOptions, get_boundaries};

pub mod get_peak;
pub use get_peak::get_peak;

pub mod gsd;
pub use gsd::{BroadenPeaksOptions, GsdOptions, ShapeOptions, broaden_peaks, gsd};

pub mod integrate;
pub use integrate::{integrate, integrate_range};

pub mod locate_peaks;
pub use locate_peaks::{CandidateSource, PeakLocator};

pub mod remove_noise;
pub use remove_noise::{RemoveNoiseOptions, remove_noise};

pub mod sgg;

pub mod structs;

pub mod utilities;
pub use utilities::{closest_index, max_in_range, mean_step, median, standard_deviation};
