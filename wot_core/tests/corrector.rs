use rstest::rstest;
use wot_core::{
    CorrectionCfg, FuelMap, GridAccumulator, LogSample, TunerError, correct, correct_cell,
};

fn sample(rpm_idx: i64, load_idx: i64, afr: f64) -> LogSample {
    LogSample {
        line: 2,
        time_s: 0.0,
        rpm: 6000.0,
        afr,
        throttle_v: 5.0,
        rpm_idx,
        load_idx,
    }
}

fn cfg(min_samples: u32, target_afr: f64) -> CorrectionCfg {
    CorrectionCfg {
        min_samples,
        target_afr,
    }
}

#[rstest]
#[case(3, 2, 12.0, 12.0, 10.0, 10.0)] // mean == target
#[case(3, 2, 13.2, 12.0, 10.0, 11.0)] // lean -> more fuel
#[case(2, 2, 13.2, 12.0, 10.0, 10.0)] // count == threshold -> unchanged
#[case(0, 0, 99.0, 12.0, 7.5, 7.5)] // empty cell
fn cell_rule(
    #[case] count: u32,
    #[case] min_samples: u32,
    #[case] mean: f64,
    #[case] target: f64,
    #[case] current: f64,
    #[case] expected: f64,
) {
    let got = correct_cell(mean, count, current, &cfg(min_samples, target));
    assert!((got - expected).abs() < 1e-9, "got {got}, expected {expected}");
}

#[rstest]
fn two_by_two_scenario() {
    let mut grid = GridAccumulator::new(2);
    // three samples averaging 12.0 in (load 1, rpm 1)
    for afr in [11.0, 12.0, 13.0] {
        grid.add(&sample(1, 1, afr)).unwrap();
    }
    // a single, very lean sample in (load 2, rpm 2)
    grid.add(&sample(2, 2, 16.0)).unwrap();

    let current = FuelMap::filled(2, 10.0);
    let c = correct(&grid, &current, &cfg(2, 12.0)).unwrap();

    assert!((c.corrected[(0, 0)] - 10.0).abs() < 1e-9);
    assert_eq!(c.corrected[(1, 1)], 10.0);
    assert_eq!(c.corrected[(0, 1)], 10.0);
    assert!((c.logged_afr[(0, 0)] - 12.0).abs() < 1e-9);
    assert_eq!(c.logged_afr[(1, 1)], 0.0);
    assert!(c.delta[(0, 0)].abs() < 1e-9);
    assert_eq!(c.counts, vec![vec![3, 0], vec![0, 1]]);
    assert_eq!(c.cells_corrected(&cfg(2, 12.0)), 1);
}

#[rstest]
fn delta_is_new_minus_old() {
    let mut grid = GridAccumulator::new(2);
    for _ in 0..4 {
        grid.add(&sample(2, 1, 13.2)).unwrap();
    }
    let current = FuelMap::from_rows(vec![vec![8.0, 10.0], vec![9.0, 9.0]]).unwrap();
    let c = correct(&grid, &current, &cfg(2, 12.0)).unwrap();
    assert!((c.corrected[(0, 1)] - 11.0).abs() < 1e-9);
    assert!((c.delta[(0, 1)] - 1.0).abs() < 1e-9);
    assert_eq!(c.delta[(1, 0)], 0.0);
    assert_eq!(c.corrected[(0, 0)], 8.0);
}

#[rstest]
fn shape_mismatch_is_a_config_error() {
    let grid = GridAccumulator::new(3);
    let current = FuelMap::filled(2, 10.0);
    let err = correct(&grid, &current, &cfg(2, 12.0)).unwrap_err();
    assert!(matches!(err, TunerError::Config(_)));
}

#[rstest]
fn ragged_rows_are_rejected() {
    let err = FuelMap::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    assert!(matches!(err, TunerError::Config(ref m) if m.contains("row 2")));
}
