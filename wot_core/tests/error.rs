use wot_core::{LogFormatError, TunerError};

#[test]
fn log_format_errors_convert_and_display_context() {
    let err: TunerError = LogFormatError::BadField {
        line: 12,
        column: "AFR".into(),
        value: "--".into(),
    }
    .into();
    let msg = err.to_string();
    assert!(msg.starts_with("log format error"));
    assert!(msg.contains("line 12"));
    assert!(msg.contains("'AFR'"));
}

#[test]
fn index_range_names_both_indices_and_size() {
    let err = TunerError::IndexRange {
        line: 40,
        rpm_idx: 17,
        load_idx: 2,
        size: 16,
    };
    let msg = err.to_string();
    assert!(msg.contains("line 40"));
    assert!(msg.contains("rpm index 17"));
    assert!(msg.contains("1..=16"));
}

#[test]
fn typed_error_survives_eyre_context() {
    use eyre::WrapErr;
    let res: Result<(), TunerError> = Err(TunerError::Io("disk full".into()));
    let report = res.wrap_err("write new fuel map").unwrap_err();
    let found = report
        .chain()
        .find_map(|e| e.downcast_ref::<TunerError>())
        .cloned();
    assert_eq!(found, Some(TunerError::Io("disk full".into())));
}
