//! Integration tests for batch evaluation and settings files.

use std::fs;
use std::path::PathBuf;

use dosecalc_cli::batch::{BatchError, BatchRecord, BatchSummary, run_batch, write_batch_csv};
use dosecalc_cli::settings::{
    OutputFormat, PatientDefaults, Settings, SettingsError, load_settings, load_settings_for_init,
    save_settings,
};
use dosecalc_model::{CreatinineUnit, RenalCategory, Sex};

const INPUT: &str = "\
kind,weight_kg,base_excess,age_years,creatinine,sex,creatinine_unit,notes
bicarbonate,70,-8,,,,,first
crcl,72,,60,1.0,,,
potassium,60,,,,,,
insulin,70,,,,,,
crcl,55,,80,200,female,umol/L,
";

fn output_rows(records: &[BatchRecord]) -> Vec<csv::StringRecord> {
    let mut buffer = Vec::new();
    write_batch_csv(&mut buffer, records).unwrap();
    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "row",
            "kind",
            "status",
            "value",
            "unit",
            "renal_category",
            "annotations",
            "error"
        ]
    );
    reader.records().map(Result::unwrap).collect()
}

#[test]
fn batch_rows_map_one_to_one() {
    let records = run_batch(INPUT.as_bytes(), &PatientDefaults::default()).unwrap();
    assert_eq!(records.len(), 5);
    let rows = output_rows(&records);
    assert_eq!(rows.len(), 5);

    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][1], "bicarbonate");
    assert_eq!(&rows[0][2], "value");
    assert_eq!(&rows[0][3], "336.0");
    assert_eq!(&rows[0][4], "mL");
    assert!(rows[0][6].starts_with("warning: Dose above 100.0 mL"));

    assert_eq!(&rows[1][2], "value");
    assert_eq!(&rows[1][3], "80.00");
    assert_eq!(&rows[1][5], "normal");

    assert_eq!(&rows[2][2], "invalid");
    assert_eq!(&rows[2][3], "");
    assert_eq!(&rows[2][7], "potassium level (mmol/L) is required");

    assert_eq!(&rows[3][1], "insulin");
    assert_eq!(&rows[3][2], "error");
    assert_eq!(&rows[3][7], "Unknown calculator: insulin");

    assert_eq!(&rows[4][2], "value");
    assert_eq!(&rows[4][5], "moderate");
}

#[test]
fn batch_summary_counts() {
    let records = run_batch(INPUT.as_bytes(), &PatientDefaults::default()).unwrap();
    let summary = BatchSummary::from_records(&records);
    assert_eq!(summary.rows, 5);
    assert_eq!(summary.values, 3);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.withheld, 0);
    assert_eq!(summary.row_errors, 1);
}

#[test]
fn defaults_apply_to_rows_without_overrides() {
    let input = "kind,age_years,weight_kg,creatinine\ncrcl,80,55,200\n";
    let defaults = PatientDefaults {
        sex: Sex::Female,
        creatinine_unit: CreatinineUnit::UmolPerL,
    };
    let records = run_batch(input.as_bytes(), &defaults).unwrap();
    let result = records[0].result.as_ref().unwrap();
    let renal = result.renal.as_ref().unwrap();
    assert_eq!(renal.category, RenalCategory::Moderate);
    assert!((result.numeric_value().unwrap() - 17.2196).abs() < 1e-3);
}

#[test]
fn bad_sex_cell_fails_only_its_row() {
    let input = "kind,weight_kg,sex\nsteroid,70,unknown\nsteroid,70,\n";
    let records = run_batch(input.as_bytes(), &PatientDefaults::default()).unwrap();
    assert!(records[0].result.is_none());
    assert_eq!(records[0].error.as_deref(), Some("Unknown sex: unknown"));
    assert_eq!(
        records[1].result.as_ref().and_then(|r| r.numeric_value()),
        Some(2100.0)
    );
}

#[test]
fn missing_kind_column_is_an_error() {
    let input = "weight_kg\n70\n";
    let error = run_batch(input.as_bytes(), &PatientDefaults::default()).unwrap_err();
    assert!(matches!(error, BatchError::MissingColumn("kind")));
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("dosecalc-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn saved_settings_load_back() {
    let path = scratch_path("saved/settings.toml");
    let mut settings = Settings::default();
    settings.defaults.sex = Sex::Female;
    settings.output.format = OutputFormat::Json;

    save_settings(&settings, &path).unwrap();
    let loaded = load_settings(Some(&path)).unwrap();
    assert_eq!(loaded, settings);

    let _ = fs::remove_file(&path);
}

#[test]
fn explicit_settings_path_must_exist() {
    let path = scratch_path("absent/settings.toml");
    let error = load_settings(Some(&path)).unwrap_err();
    assert!(matches!(error, SettingsError::Read { .. }));
}

#[test]
fn explicit_settings_path_must_parse() {
    let path = scratch_path("broken/settings.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[defaults]\nsex = \"unknown\"\n").unwrap();
    let error = load_settings(Some(&path)).unwrap_err();
    assert!(matches!(error, SettingsError::Parse { .. }));
    let _ = fs::remove_file(&path);
}

#[test]
fn init_starts_from_defaults_when_explicit_file_is_absent() {
    let path = scratch_path("init/nested/settings.toml");
    let settings = load_settings_for_init(Some(&path)).unwrap();
    assert_eq!(settings, Settings::default());

    save_settings(&settings, &path).unwrap();
    assert!(path.exists());
    assert_eq!(load_settings(Some(&path)).unwrap(), settings);
    let _ = fs::remove_file(&path);
}

#[test]
fn init_keeps_existing_explicit_file() {
    let path = scratch_path("init-existing/settings.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[defaults]\nsex = \"female\"\n").unwrap();
    let settings = load_settings_for_init(Some(&path)).unwrap();
    assert_eq!(settings.defaults.sex, Sex::Female);
    let _ = fs::remove_file(&path);
}

#[test]
fn read_error_message_names_the_file_once() {
    let path = scratch_path("absent-message/settings.toml");
    let error = load_settings(Some(&path)).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("absent-message"));
    assert!(std::error::Error::source(&error).is_some());
    assert!(!message.contains(&std::error::Error::source(&error).unwrap().to_string()));
}
