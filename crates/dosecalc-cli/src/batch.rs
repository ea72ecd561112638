//! Batch evaluation of patient rows from CSV.
//!
//! The input header names a calculator column (`kind`), any of the numeric
//! input fields (`weight_kg`, `age_years`, ...) and optionally `sex` and
//! `creatinine_unit`. Blank cells are treated as missing. Unknown columns are
//! ignored with a warning.
//!
//! A bad `kind`, `sex` or `creatinine_unit` cell fails only its own row. Cells
//! that are not valid UTF-8 are decoded lossily, so a garbled number becomes an
//! invalid input rather than a read error.

use std::io;

use dosecalc_engine::{calculate, format_value};
use dosecalc_model::{
    CalculationResult, CalculatorKind, CreatinineUnit, InputField, NumericField, Sex,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::logging::redact_value;
use crate::settings::PatientDefaults;

const KIND_COLUMN: &str = "kind";
const SEX_COLUMN: &str = "sex";
const UNIT_COLUMN: &str = "creatinine_unit";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read batch CSV")]
    Csv(#[from] csv::Error),

    #[error("batch CSV is missing the required '{0}' column")]
    MissingColumn(&'static str),

    #[error("failed to write batch output")]
    Io(#[from] io::Error),
}

/// Outcome of one input row.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub values: usize,
    pub invalid: usize,
    pub withheld: usize,
    pub row_errors: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[BatchRecord]) -> Self {
        let mut summary = Self {
            rows: records.len(),
            ..Self::default()
        };
        for record in records {
            match &record.result {
                Some(result) if result.is_invalid() => summary.invalid += 1,
                Some(result) if result.is_withheld() => summary.withheld += 1,
                Some(_) => summary.values += 1,
                None => summary.row_errors += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Kind,
    Sex,
    Unit,
    Field(InputField),
    Ignored,
}

fn classify_header(name: &str) -> Column {
    let normalized = name.trim().to_ascii_lowercase();
    match normalized.as_str() {
        KIND_COLUMN => Column::Kind,
        SEX_COLUMN => Column::Sex,
        UNIT_COLUMN => Column::Unit,
        other => match other.parse::<InputField>() {
            Ok(field) => Column::Field(field),
            Err(_) => {
                warn!(column = name, "ignoring unknown batch column");
                Column::Ignored
            }
        },
    }
}

/// Read and evaluate every row of a batch CSV.
pub fn run_batch<R: io::Read>(
    reader: R,
    defaults: &PatientDefaults,
) -> Result<Vec<BatchRecord>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns: Vec<Column> = csv_reader
        .byte_headers()?
        .iter()
        .map(|name| classify_header(&String::from_utf8_lossy(name)))
        .collect();
    if !columns.iter().any(|c| matches!(c, Column::Kind)) {
        return Err(BatchError::MissingColumn(KIND_COLUMN));
    }

    let mut records = Vec::new();
    for (index, row) in csv_reader.byte_records().enumerate() {
        let row = row?;
        let record = evaluate_row(index + 1, &columns, &row, defaults);
        records.push(record);
    }
    info!(rows = records.len(), "batch evaluated");
    Ok(records)
}

fn evaluate_row(
    row_number: usize,
    columns: &[Column],
    row: &csv::ByteRecord,
    defaults: &PatientDefaults,
) -> BatchRecord {
    let mut inputs = defaults.inputs();
    let mut kind_text = String::new();
    let mut problems = Vec::new();

    for (column, raw) in columns.iter().zip(row.iter()) {
        let cell = String::from_utf8_lossy(raw);
        let cell = cell.as_ref();
        match column {
            Column::Kind => kind_text = cell.to_string(),
            Column::Sex if !cell.is_empty() => match cell.parse::<Sex>() {
                Ok(sex) => inputs.sex = sex,
                Err(message) => problems.push(message),
            },
            Column::Unit if !cell.is_empty() => match cell.parse::<CreatinineUnit>() {
                Ok(unit) => inputs.creatinine_unit = unit,
                Err(message) => problems.push(message),
            },
            Column::Field(field) => {
                trace!(
                    row = row_number,
                    field = field.as_str(),
                    value = redact_value(cell),
                    "batch cell"
                );
                inputs.set(*field, NumericField::parse(cell));
            }
            Column::Sex | Column::Unit | Column::Ignored => {}
        }
    }

    let kind = match kind_text.parse::<CalculatorKind>() {
        Ok(kind) => Some(kind),
        Err(message) => {
            problems.push(message);
            None
        }
    };

    match kind {
        Some(kind) if problems.is_empty() => {
            let result = calculate(kind, &inputs);
            debug!(row = row_number, kind = %kind, status = result.outcome.status(), "row evaluated");
            BatchRecord {
                row: row_number,
                kind: kind.as_str().to_string(),
                result: Some(result),
                error: None,
            }
        }
        _ => {
            warn!(row = row_number, "batch row skipped: {}", problems.join("; "));
            BatchRecord {
                row: row_number,
                kind: kind_text,
                result: None,
                error: Some(problems.join("; ")),
            }
        }
    }
}

#[derive(Serialize)]
struct OutputRow<'a> {
    row: usize,
    kind: &'a str,
    status: &'a str,
    value: String,
    unit: &'a str,
    renal_category: &'a str,
    annotations: String,
    error: String,
}

/// Write evaluated rows as CSV, one output row per input row.
pub fn write_batch_csv<W: io::Write>(writer: W, records: &[BatchRecord]) -> Result<(), BatchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        let row = match &record.result {
            Some(result) => OutputRow {
                row: record.row,
                kind: &record.kind,
                status: result.outcome.status(),
                value: result
                    .numeric_value()
                    .map(format_value)
                    .unwrap_or_default(),
                unit: &result.unit,
                renal_category: result.renal.as_ref().map_or("", |r| r.category.as_str()),
                annotations: result
                    .annotations
                    .iter()
                    .map(|a| format!("{}: {}", a.severity, a.message))
                    .collect::<Vec<_>>()
                    .join("; "),
                error: result
                    .invalid_reason()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            },
            None => OutputRow {
                row: record.row,
                kind: &record.kind,
                status: "error",
                value: String::new(),
                unit: "",
                renal_category: "",
                annotations: String::new(),
                error: record.error.clone().unwrap_or_default(),
            },
        };
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosecalc_model::InvalidReason;

    #[test]
    fn header_classification() {
        assert!(matches!(classify_header("Kind"), Column::Kind));
        assert!(matches!(
            classify_header(" weight_kg "),
            Column::Field(InputField::WeightKg)
        ));
        assert!(matches!(classify_header("notes"), Column::Ignored));
    }

    #[test]
    fn non_utf8_cell_fails_only_its_row() {
        let csv: &[u8] = b"kind,weight_kg\nsteroid,70\nsteroid,\xff\xfe\nsteroid,80\n";
        let records = run_batch(csv, &PatientDefaults::default()).unwrap();
        assert_eq!(records.len(), 3);
        let values: Vec<Option<f64>> = records
            .iter()
            .map(|record| record.result.as_ref().and_then(CalculationResult::numeric_value))
            .collect();
        assert_eq!(values, vec![Some(2100.0), None, Some(2400.0)]);
        let garbled = records[1].result.as_ref().unwrap();
        assert!(garbled.is_invalid());
        assert_eq!(
            garbled.invalid_reason().map(InvalidReason::field),
            Some(InputField::WeightKg)
        );
    }

    #[test]
    fn summary_counts_outcomes() {
        let csv = "kind,weight_kg,potassium_level\n\
                   steroid,70,\n\
                   potassium,70,2.0\n\
                   steroid,,\n\
                   insulin,70,\n";
        let records = run_batch(csv.as_bytes(), &PatientDefaults::default()).unwrap();
        let summary = BatchSummary::from_records(&records);
        assert_eq!(
            summary,
            BatchSummary {
                rows: 4,
                values: 1,
                invalid: 1,
                withheld: 1,
                row_errors: 1,
            }
        );
    }
}
