use wot_config::{load_properties, load_toml};

const VALID_PROPERTIES: &str = r#"
# Two-by-two table
fuelTableSize=2
rpmLabels=1000, 2000
loadLabels=50, 100
timeHeader=Time
rpmHeader=RPM
afrHeader=AFR
throttleHeader=TPS
rpmIdxHeader=MapN
loadIdxHeader=MapP
wotVolt=4.5
accelEnrichSeconds=0.5
minNumberOfSamples=2
wotTargetAfr=12.0
"#;

#[test]
fn accepts_valid_properties() {
    let cfg = load_properties(VALID_PROPERTIES).expect("parse properties");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.fuel_table_size, 2);
    assert_eq!(cfg.rpm_labels, vec![1000, 2000]);
    assert_eq!(cfg.load_labels, vec![50, 100]);
    assert_eq!(cfg.rpm_idx_header, "MapN");
    assert_eq!(cfg.min_number_of_samples, 2);
    assert!((cfg.wot_target_afr - 12.0).abs() < f64::EPSILON);
}

#[test]
fn rejects_label_count_mismatch() {
    let text = VALID_PROPERTIES.replace("rpmLabels=1000, 2000", "rpmLabels=1000, 2000, 3000");
    let cfg = load_properties(&text).expect("parse properties");
    let err = cfg.validate().expect_err("should reject 3 labels for size 2");
    assert!(format!("{err}").contains("rpmLabels has 3 entries"));
}

#[test]
fn rejects_non_positive_target_afr() {
    let text = VALID_PROPERTIES.replace("wotTargetAfr=12.0", "wotTargetAfr=0");
    let cfg = load_properties(&text).expect("parse properties");
    let err = cfg.validate().expect_err("should reject target 0");
    assert!(format!("{err}").contains("wotTargetAfr must be > 0"));
}

#[test]
fn rejects_negative_settling() {
    let text = VALID_PROPERTIES.replace("accelEnrichSeconds=0.5", "accelEnrichSeconds=-1");
    let cfg = load_properties(&text).expect("parse properties");
    let err = cfg.validate().expect_err("should reject negative settling");
    assert!(format!("{err}").contains("accelEnrichSeconds"));
}

#[test]
fn missing_key_is_reported_by_name() {
    let text = VALID_PROPERTIES.replace("afrHeader=AFR\n", "");
    let err = load_properties(&text).expect_err("afrHeader is required");
    assert!(format!("{err}").contains("missing property 'afrHeader'"));
}

#[test]
fn non_numeric_value_is_reported() {
    let text = VALID_PROPERTIES.replace("wotVolt=4.5", "wotVolt=high");
    let err = load_properties(&text).expect_err("wotVolt must be numeric");
    assert!(format!("{err}").contains("'wotVolt'"));
}

#[test]
fn toml_accepts_arrays_and_comma_strings() {
    let toml = r#"
fuelTableSize = 2
rpmLabels = [1000, 2000]
loadLabels = "50,100"
timeHeader = "Time"
rpmHeader = "RPM"
afrHeader = "AFR"
throttleHeader = "TPS"
rpmIdxHeader = "MapN"
loadIdxHeader = "MapP"
wotVolt = 4.5
accelEnrichSeconds = 0.5
minNumberOfSamples = 2
wotTargetAfr = 12.0
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.rpm_labels, vec![1000, 2000]);
    assert_eq!(cfg.load_labels, vec![50, 100]);
}

#[test]
fn toml_and_properties_agree() {
    let toml = r#"
fuelTableSize = 2
rpmLabels = [1000, 2000]
loadLabels = [50, 100]
timeHeader = "Time"
rpmHeader = "RPM"
afrHeader = "AFR"
throttleHeader = "TPS"
rpmIdxHeader = "MapN"
loadIdxHeader = "MapP"
wotVolt = 4.5
accelEnrichSeconds = 0.5
minNumberOfSamples = 2
wotTargetAfr = 12.0
"#;
    let from_toml = load_toml(toml).expect("parse TOML");
    let from_props = load_properties(VALID_PROPERTIES).expect("parse properties");
    assert_eq!(from_toml, from_props);
}

#[test]
fn java_properties_forms_load_the_same_config() {
    let text = r#"
  # indented comment: not a key
fuelTableSize 2
rpmLabels = 1000,\
            2000
loadLabels:50, 100
timeHeader: Time
rpmHeader RPM
afrHeader=AFR
throttleHeader=TPS
rpmIdxHeader=MapN
loadIdxHeader=MapP
wotVolt=4.5
accelEnrichSeconds=0.5
minNumberOfSamples=2
wotTargetAfr=12.0
"#;
    let cfg = load_properties(text).expect("parse properties");
    let reference = load_properties(VALID_PROPERTIES).expect("parse properties");
    assert_eq!(cfg, reference);
}
