//! Human-readable error descriptions and structured JSON error formatting.

use serde_json::json;
use wot_core::{LogFormatError, TunerError};

fn tuner_error(err: &eyre::Report) -> Option<&TunerError> {
    err.chain().find_map(|e| e.downcast_ref::<TunerError>())
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(te) = tuner_error(err) {
        return match te {
            TunerError::Config(msg) => format!(
                "What happened: The tuner configuration is invalid ({msg}).\nLikely causes: Missing or misspelled key, label count not matching fuelTableSize, or an unparsable number.\nHow to fix: Edit the configuration file (see --config) and rerun."
            ),
            TunerError::LogFormat(LogFormatError::MissingColumn(col)) => format!(
                "What happened: The ECU log has no column named '{col}'.\nLikely causes: The log was exported with different channel names, or the *Header settings do not match.\nHow to fix: Set the matching *Header key in the configuration to the log's column name."
            ),
            TunerError::LogFormat(LogFormatError::Unreadable(msg)) => format!(
                "What happened: The ECU log could not be read ({msg}).\nLikely causes: Wrong path or a file that is not CSV.\nHow to fix: Check the log path and export the log as comma-separated text."
            ),
            TunerError::LogFormat(lf) => format!(
                "What happened: The ECU log is malformed ({lf}).\nLikely causes: A truncated or hand-edited row.\nHow to fix: Remove or repair the offending line and rerun."
            ),
            TunerError::IndexRange { size, .. } => format!(
                "What happened: {te}.\nLikely causes: The log was recorded with a different table layout than fuelTableSize={size}.\nHow to fix: Set fuelTableSize and the label lists to match the ECU's fuel table."
            ),
            TunerError::Io(msg) => format!(
                "What happened: The new fuel map could not be written ({msg}).\nLikely causes: Missing directory or no write permission.\nHow to fix: Choose a writable --output path."
            ),
        };
    }

    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes per error category; anything untyped is 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match tuner_error(err) {
        Some(TunerError::Config(_)) => 2,
        Some(TunerError::LogFormat(_)) => 3,
        Some(TunerError::IndexRange { .. }) => 4,
        Some(TunerError::Io(_)) => 5,
        None => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    match tuner_error(err) {
        Some(TunerError::Config(_)) => "Config",
        Some(TunerError::LogFormat(_)) => "LogFormat",
        Some(TunerError::IndexRange { .. }) => "IndexRange",
        Some(TunerError::Io(_)) => "Io",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    let mut obj = json!({ "reason": reason_name(err), "message": humanize(err) });
    if let Some(TunerError::IndexRange {
        line,
        rpm_idx,
        load_idx,
        size,
    }) = tuner_error(err)
    {
        obj["details"] = json!({
            "line": line,
            "rpm_idx": rpm_idx,
            "load_idx": load_idx,
            "size": size,
        });
    }
    obj.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(te: TunerError) -> eyre::Report {
        eyre::Report::new(te).wrap_err("analyze log.csv")
    }

    #[test]
    fn exit_codes_follow_category_through_context() {
        assert_eq!(exit_code_for_error(&wrapped(TunerError::Config("x".into()))), 2);
        assert_eq!(
            exit_code_for_error(&wrapped(TunerError::LogFormat(
                LogFormatError::MissingColumn("TPS".into())
            ))),
            3
        );
        assert_eq!(
            exit_code_for_error(&wrapped(TunerError::IndexRange {
                line: 4,
                rpm_idx: 0,
                load_idx: 1,
                size: 2
            })),
            4
        );
        assert_eq!(exit_code_for_error(&wrapped(TunerError::Io("x".into()))), 5);
        assert_eq!(exit_code_for_error(&eyre::eyre!("plain")), 1);
    }

    #[test]
    fn humanize_names_missing_column() {
        let msg = humanize(&wrapped(TunerError::LogFormat(LogFormatError::MissingColumn(
            "TPS".into(),
        ))));
        assert!(msg.contains("'TPS'"));
        assert!(msg.starts_with("What happened"));
    }

    #[test]
    fn json_error_carries_index_details() {
        let err = wrapped(TunerError::IndexRange {
            line: 7,
            rpm_idx: 3,
            load_idx: 1,
            size: 2,
        });
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(v["reason"], "IndexRange");
        assert_eq!(v["details"]["line"], 7);
        assert_eq!(v["details"]["rpm_idx"], 3);
    }
}
