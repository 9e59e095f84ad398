use chrompeaks::utilities::filter_peaks::{FilterPeaksOptions, filter_peaks};
use chrompeaks::utilities::structs::Peak;
use rstest::rstest;

mod helpers;
use helpers::approx_eq;

fn peak(from_index: usize, to_index: usize, integral: f64) -> Peak {
    Peak {
        from: from_index as f64,
        from_index,
        to: to_index as f64,
        to_index,
        retention_time: (from_index + to_index) as f64 / 2.0,
        integral,
        intensity: integral / 10.0,
        width: (to_index - from_index) as f64,
        number_of_points: to_index - from_index,
        percentage: None,
    }
}

fn sample() -> Vec<Peak> {
    vec![
        peak(0, 40, 5000.0),
        peak(50, 52, 3000.0),
        peak(60, 90, 10.0),
        peak(100, 130, 1990.0),
    ]
}

#[test]
fn integral_share_drops_small_and_annotates_survivors() {
    let peaks = sample();
    let out = filter_peaks(
        &peaks,
        FilterPeaksOptions {
            integral_threshold: Some(0.004),
            width_threshold: None,
        },
    );
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|p| p.percentage.is_some_and(|r| r >= 0.004)));
    assert!(approx_eq(out[0].percentage.unwrap_or_default(), 0.5, 1e-12));
    assert!(out.iter().all(|p| p.integral != 10.0));
}

#[test]
fn width_pass_requires_more_points_than_threshold() {
    let peaks = vec![peak(0, 10, 1.0), peak(20, 31, 1.0)];
    let out = filter_peaks(
        &peaks,
        FilterPeaksOptions {
            integral_threshold: None,
            width_threshold: Some(10),
        },
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].from_index, 20);
    assert_eq!(out[0].percentage, None);
}

#[test]
fn both_passes_must_hold() {
    let out = filter_peaks(&sample(), FilterPeaksOptions::default());
    let kept: Vec<usize> = out.iter().map(|p| p.from_index).collect();
    assert_eq!(kept, vec![0, 100]);
    for p in &out {
        assert!(p.to_index - p.from_index > 10);
        assert!(p.percentage.is_some_and(|r| r >= 0.004));
    }
}

#[test]
fn disabled_passes_keep_everything_untouched() {
    let peaks = sample();
    let out = filter_peaks(
        &peaks,
        FilterPeaksOptions {
            integral_threshold: None,
            width_threshold: None,
        },
    );
    assert_eq!(out, peaks);
}

#[test]
fn input_is_not_mutated() {
    let peaks = sample();
    let _ = filter_peaks(&peaks, FilterPeaksOptions::default());
    assert!(peaks.iter().all(|p| p.percentage.is_none()));
}

// shares are relative to the list being filtered, not to a fixed total
#[test]
fn refiltering_renormalizes_percentages() {
    let opts = FilterPeaksOptions {
        integral_threshold: Some(0.004),
        width_threshold: Some(10),
    };
    let once = filter_peaks(&sample(), opts);
    let twice = filter_peaks(&once, opts);
    assert_eq!(once.len(), twice.len());
    let before: f64 = once.iter().filter_map(|p| p.percentage).sum();
    let after: f64 = twice.iter().filter_map(|p| p.percentage).sum();
    assert!(before < 0.999);
    assert!(approx_eq(after, 1.0, 1e-12));
}

#[test]
fn percentages_match_integral_ratios() {
    let peaks = sample();
    let total: f64 = peaks.iter().map(|p| p.integral).sum();
    let out = filter_peaks(
        &peaks,
        FilterPeaksOptions {
            integral_threshold: Some(0.004),
            width_threshold: None,
        },
    );
    let shares: f64 = out.iter().filter_map(|p| p.percentage).sum();
    let ratios: f64 = out.iter().map(|p| p.integral / total).sum();
    assert!(approx_eq(shares, ratios, 1e-12));
}

#[test]
fn zero_total_drops_everything() {
    let peaks = vec![peak(0, 40, 0.0), peak(50, 90, 0.0)];
    assert!(filter_peaks(&peaks, FilterPeaksOptions::default()).is_empty());
}

#[rstest]
#[case(Some(0), 4)]
#[case(Some(2), 3)]
#[case(Some(30), 1)]
#[case(Some(40), 0)]
#[case(None, 4)]
fn width_threshold_cases(#[case] width_threshold: Option<usize>, #[case] expected: usize) {
    let out = filter_peaks(
        &sample(),
        FilterPeaksOptions {
            integral_threshold: None,
            width_threshold,
        },
    );
    assert_eq!(out.len(), expected);
}
