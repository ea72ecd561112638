use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, trace};

use dosecalc_cli::batch::{BatchSummary, run_batch, write_batch_csv};
use dosecalc_cli::logging::redact_value;
use dosecalc_cli::settings::{
    OutputFormat, Settings, render_settings, save_settings, settings_path,
};
use dosecalc_engine::calculate;
use dosecalc_model::{
    CalculationResult, CalculatorKind, InputField, NumericField, PatientInputs, RenalAssessment,
    RenalCategory,
};
use dosecalc_standards::recommendations;

use crate::cli::{BatchArgs, Command, ConfigArgs, TableArgs};
use crate::summary::{dosing_table, print_batch_summary, print_result};

/// Build the input snapshot for a calculator command.
///
/// Settings supply sex and creatinine unit unless the command overrides them.
/// Returns `None` for commands that do not run a calculator.
pub fn build_inputs(command: &Command, settings: &Settings) -> Option<PatientInputs> {
    let mut inputs = settings.defaults.inputs();
    let mut set = |field: InputField, text: Option<&String>| {
        let value = text.map_or(NumericField::Missing, |text| NumericField::parse(text));
        trace!(
            field = field.as_str(),
            value = redact_value(text.map_or("", String::as_str)),
            "argument"
        );
        inputs.set(field, value);
    };
    match command {
        Command::Bicarbonate(args) => {
            set(InputField::WeightKg, args.weight.as_ref());
            set(InputField::BaseExcess, args.base_excess.as_ref());
        }
        Command::Potassium(args) => {
            set(InputField::WeightKg, args.weight.as_ref());
            set(InputField::PotassiumLevel, args.level.as_ref());
        }
        Command::Concentration(args) => {
            set(InputField::DrugMassMg, args.mass.as_ref());
            set(InputField::VolumeMl, args.volume.as_ref());
        }
        Command::Steroid(args) => {
            set(InputField::WeightKg, args.weight.as_ref());
        }
        Command::Crcl(args) => {
            set(InputField::AgeYears, args.age.as_ref());
            set(InputField::WeightKg, args.weight.as_ref());
            set(InputField::Creatinine, args.creatinine.as_ref());
            if let Some(unit) = args.unit {
                inputs.creatinine_unit = unit.into();
            }
            if let Some(sex) = args.sex {
                inputs.sex = sex.into();
            }
        }
        Command::Table(_) | Command::Batch(_) | Command::Config(_) => return None,
    }
    Some(inputs)
}

pub fn run_calculator(
    kind: CalculatorKind,
    inputs: &PatientInputs,
    format: OutputFormat,
) -> Result<CalculationResult> {
    let span = info_span!("calculate", kind = %kind);
    let _guard = span.enter();
    let result = calculate(kind, inputs);
    match format {
        OutputFormat::Table => print_result(&result),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).context("serialize result")?;
            println!("{json}");
        }
    }
    Ok(result)
}

pub fn run_table(args: &TableArgs, format: OutputFormat) -> Result<()> {
    let categories: Vec<RenalCategory> = match args.category {
        Some(category) => vec![category.into()],
        None => RenalCategory::ALL.to_vec(),
    };
    match format {
        OutputFormat::Table => println!("{}", dosing_table(&categories)),
        OutputFormat::Json => {
            let assessments: Vec<RenalAssessment> = categories
                .into_iter()
                .map(|category| RenalAssessment {
                    category,
                    recommendations: recommendations(category),
                })
                .collect();
            let json =
                serde_json::to_string_pretty(&assessments).context("serialize dosing table")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_batch_file(
    args: &BatchArgs,
    settings: &Settings,
    format: OutputFormat,
) -> Result<BatchSummary> {
    let span = info_span!("batch", input = %args.input.display());
    let _guard = span.enter();
    let file = File::open(&args.input)
        .with_context(|| format!("open batch input {}", args.input.display()))?;
    let records = run_batch(BufReader::new(file), &settings.defaults)
        .with_context(|| format!("read batch input {}", args.input.display()))?;

    if let Some(path) = &args.output_file {
        let file =
            File::create(path).with_context(|| format!("create {}", path.display()))?;
        write_batch_csv(file, &records).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "batch results written");
    } else {
        match format {
            OutputFormat::Table => {
                write_batch_csv(io::stdout().lock(), &records).context("write batch results")?;
            }
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&records).context("serialize batch results")?;
                println!("{json}");
            }
        }
    }

    let summary = BatchSummary::from_records(&records);
    info!(
        rows = summary.rows,
        values = summary.values,
        invalid = summary.invalid,
        withheld = summary.withheld,
        row_errors = summary.row_errors,
        "batch complete"
    );
    if matches!(format, OutputFormat::Table) {
        print_batch_summary(&summary);
    }
    Ok(summary)
}

pub fn run_config(args: &ConfigArgs, settings: &Settings, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => settings_path().ok_or_else(|| anyhow!("could not determine the settings path"))?,
    };
    if args.init {
        save_settings(settings, &path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }
    let state = if path.exists() { "" } else { " (not created)" };
    println!("Settings file: {}{state}", path.display());
    println!();
    print!("{}", render_settings(settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dosecalc_model::{CreatinineUnit, Sex};

    use crate::cli::Cli;

    fn inputs_for(args: &[&str], settings: &Settings) -> Option<PatientInputs> {
        let cli = Cli::try_parse_from(args).unwrap();
        build_inputs(&cli.command, settings)
    }

    #[test]
    fn bicarbonate_arguments_fill_fields() {
        let inputs = inputs_for(
            &["dosecalc", "bicarbonate", "--weight", "70", "--base-excess", "-8"],
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(inputs.weight_kg, NumericField::Value(70.0));
        assert_eq!(inputs.base_excess, NumericField::Value(-8.0));
        assert!(inputs.potassium_level.is_missing());
    }

    #[test]
    fn garbled_argument_is_invalid_field() {
        let inputs = inputs_for(
            &["dosecalc", "steroid", "--weight", "seventy"],
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(inputs.weight_kg, NumericField::Invalid);
        assert!(calculate(CalculatorKind::Steroid, &inputs).is_invalid());
    }

    #[test]
    fn settings_defaults_apply_unless_overridden() {
        let mut settings = Settings::default();
        settings.defaults.sex = Sex::Female;
        settings.defaults.creatinine_unit = CreatinineUnit::UmolPerL;

        let inputs = inputs_for(&["dosecalc", "crcl", "--age", "60"], &settings).unwrap();
        assert_eq!(inputs.sex, Sex::Female);
        assert_eq!(inputs.creatinine_unit, CreatinineUnit::UmolPerL);

        let inputs = inputs_for(
            &["dosecalc", "crcl", "--sex", "male", "--unit", "mg-dl"],
            &settings,
        )
        .unwrap();
        assert_eq!(inputs.sex, Sex::Male);
        assert_eq!(inputs.creatinine_unit, CreatinineUnit::MgPerDl);
    }

    #[test]
    fn non_calculator_commands_have_no_inputs() {
        assert!(inputs_for(&["dosecalc", "table"], &Settings::default()).is_none());
        assert!(inputs_for(&["dosecalc", "config"], &Settings::default()).is_none());
    }
}
