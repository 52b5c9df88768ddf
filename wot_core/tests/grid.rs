use rstest::rstest;
use wot_core::{GridAccumulator, GridCell, LogSample, TunerError};

fn sample(line: u64, rpm_idx: i64, load_idx: i64, afr: f64) -> LogSample {
    LogSample {
        line,
        time_s: line as f64,
        rpm: 6000.0,
        afr,
        throttle_v: 5.0,
        rpm_idx,
        load_idx,
    }
}

#[rstest]
fn running_mean_matches_arithmetic_mean() {
    let mut cell = GridCell::default();
    for v in [11.0, 12.0, 13.0, 12.5] {
        cell.push(v);
    }
    assert_eq!(cell.count, 4);
    assert!((cell.mean().unwrap() - 12.125).abs() < 1e-12);
}

#[rstest]
fn empty_cell_has_no_mean() {
    assert_eq!(GridCell::default().mean(), None);
}

#[rstest]
fn load_index_selects_row_and_rpm_index_selects_column() {
    let mut grid = GridAccumulator::new(3);
    grid.add(&sample(2, 3, 1, 12.0)).unwrap();
    let cell = grid.cell(0, 2).unwrap();
    assert_eq!(cell.count, 1);
    assert_eq!(grid.cell(2, 0).unwrap().count, 0);
    assert_eq!(grid.counts(), vec![vec![0, 0, 1], vec![0, 0, 0], vec![0, 0, 0]]);
}

#[rstest]
#[case(0, 1)]
#[case(1, 0)]
#[case(4, 1)]
#[case(1, 4)]
#[case(-1, 2)]
fn out_of_range_bins_abort(#[case] rpm_idx: i64, #[case] load_idx: i64) {
    let mut grid = GridAccumulator::new(3);
    let err = grid.add(&sample(7, rpm_idx, load_idx, 12.0)).unwrap_err();
    assert_eq!(
        err,
        TunerError::IndexRange {
            line: 7,
            rpm_idx,
            load_idx,
            size: 3
        }
    );
    assert_eq!(grid.total_samples(), 0);
}

#[rstest]
fn boundary_bins_are_valid() {
    let mut grid = GridAccumulator::new(3);
    grid.add(&sample(2, 1, 1, 12.0)).unwrap();
    grid.add(&sample(3, 3, 3, 12.0)).unwrap();
    assert_eq!(grid.total_samples(), 2);
}

#[rstest]
fn extend_stops_at_first_error() {
    let mut grid = GridAccumulator::new(2);
    let stream = vec![
        Ok(sample(2, 1, 1, 12.0)),
        Ok(sample(3, 5, 1, 12.0)),
        Ok(sample(4, 2, 2, 12.0)),
    ];
    let err = grid.extend_from(stream).unwrap_err();
    assert!(matches!(err, TunerError::IndexRange { line: 3, .. }));
    assert_eq!(grid.total_samples(), 1);
}

#[rstest]
fn extend_counts_added_samples() {
    let mut grid = GridAccumulator::new(2);
    let added = grid
        .extend_from((0..5).map(|i| Ok(sample(i, 2, 1, 12.0 + i as f64))))
        .unwrap();
    assert_eq!(added, 5);
    let cell = grid.cell(0, 1).unwrap();
    assert_eq!(cell.count, 5);
    assert!((cell.mean_afr - 14.0).abs() < 1e-12);
}
