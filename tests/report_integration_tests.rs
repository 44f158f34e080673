// Report Integration Tests
//
// Purpose: Load observation tables from disk with Polars and check the
// composed batch report end to end
// Run with: cargo test --test report_integration_tests

use crop_diagnostics::diagnostics::{
    compose_reports, load_observation_table, observations_from_frame, NetYieldLabel,
    WitheredLabel, YieldLabel,
};
use crop_diagnostics::DiagnosticError;
use std::path::PathBuf;

// Helper: write a CSV fixture into a per-test temp file
fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("crop_diagnostics_tests");
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

#[test]
fn test_csv_batch_report() {
    let path = write_fixture(
        "batch.csv",
        "plant,type,withered_crops,crop_yield,net_yield,planted_qty\n\
         maize,1,5,7.5,12,\n\
         cassava,0,2,1,20,20\n\
         beans,0,0.5,-1,-2,10\n",
    );

    let df = load_observation_table(&path).unwrap();
    assert_eq!(df.height(), 3);

    let observations = observations_from_frame(&df).unwrap();
    let batch = compose_reports(&observations).unwrap();

    assert_eq!(
        batch.withered,
        vec![WitheredLabel::Critical, WitheredLabel::Manageable, WitheredLabel::Excellent]
    );
    assert_eq!(
        batch.crop_yield,
        vec![YieldLabel::Satisfactory, YieldLabel::Satisfactory, YieldLabel::Disastrous]
    );
    assert_eq!(
        batch.net_yield,
        vec![NetYieldLabel::Excellent, NetYieldLabel::Average, NetYieldLabel::NegativeLoss]
    );
    assert_eq!(batch.last_plant(), Some("beans"));

    let json = batch.to_json();
    assert_eq!(json["plant"], "beans");
    assert_eq!(json["reports"].as_array().unwrap().len(), 3);
}

#[test]
fn test_csv_with_unknown_type_fails_whole_batch() {
    let path = write_fixture(
        "unknown_type.csv",
        "plant,type,withered_crops,crop_yield,net_yield,planted_qty\n\
         maize,1,5,7.5,12,\n\
         sorghum,2,1,1,1,1\n",
    );

    let df = load_observation_table(&path).unwrap();
    let err = observations_from_frame(&df).unwrap_err();
    assert_eq!(
        err,
        DiagnosticError::UnrecognizedCategory { index: 1, value: "2".to_string() }
    );
}

#[test]
fn test_csv_with_blank_required_value() {
    let path = write_fixture(
        "blank_value.csv",
        "plant,type,withered_crops,crop_yield,net_yield\n\
         maize,1,,7.5,12\n",
    );

    let df = load_observation_table(&path).unwrap();
    match observations_from_frame(&df).unwrap_err() {
        DiagnosticError::MalformedInput { field, index, .. } => {
            assert_eq!(field, "withered_crops");
            assert_eq!(index, Some(0));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_missing_file_is_an_error() {
    let path = std::env::temp_dir().join("crop_diagnostics_tests/does_not_exist.csv");
    assert!(load_observation_table(&path).is_err());
}
