//! CLI argument definitions for the dosing calculators.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dosecalc_model::{CalculatorKind, CreatinineUnit, RenalCategory, Sex};

use dosecalc_cli::settings::OutputFormat;

#[derive(Parser)]
#[command(
    name = "dosecalc",
    version,
    about = "Bedside dosage calculators",
    long_about = "Bedside dosage calculators.\n\n\
                  Bicarbonate deficit, potassium correction, drug concentration,\n\
                  steroid loading dose and Cockcroft-Gault creatinine clearance\n\
                  with renal dosing guidance for five reference antibiotics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Result format (overrides the configured format).
    #[arg(long = "output", value_enum, global = true)]
    pub output: Option<OutputFormatArg>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sodium bicarbonate 8.4% for a metabolic acidosis.
    Bicarbonate(BicarbonateArgs),

    /// Potassium replacement for hypokalemia.
    Potassium(PotassiumArgs),

    /// Drug concentration in mcg/mL.
    Concentration(ConcentrationArgs),

    /// Methylprednisolone loading dose.
    Steroid(SteroidArgs),

    /// Cockcroft-Gault creatinine clearance with renal dosing guidance.
    Crcl(CrclArgs),

    /// Print the renal dosing reference table.
    Table(TableArgs),

    /// Evaluate patient rows from a CSV file.
    Batch(BatchArgs),

    /// Show the effective settings and where they are stored.
    Config(ConfigArgs),
}

impl Command {
    /// The calculator a command runs, if it runs one.
    pub fn calculator_kind(&self) -> Option<CalculatorKind> {
        match self {
            Self::Bicarbonate(_) => Some(CalculatorKind::Bicarbonate),
            Self::Potassium(_) => Some(CalculatorKind::Potassium),
            Self::Concentration(_) => Some(CalculatorKind::Concentration),
            Self::Steroid(_) => Some(CalculatorKind::Steroid),
            Self::Crcl(_) => Some(CalculatorKind::CreatinineClearance),
            Self::Table(_) | Self::Batch(_) | Self::Config(_) => None,
        }
    }
}

// Numeric values are taken as text so that a garbled number becomes an
// invalid result instead of a usage error.

#[derive(Args)]
pub struct BicarbonateArgs {
    /// Body weight in kg.
    #[arg(long, value_name = "KG", allow_hyphen_values = true)]
    pub weight: Option<String>,

    /// Base excess in mmol/L (usually negative).
    #[arg(long = "base-excess", value_name = "MMOL_L", allow_hyphen_values = true)]
    pub base_excess: Option<String>,
}

#[derive(Args)]
pub struct PotassiumArgs {
    /// Body weight in kg.
    #[arg(long, value_name = "KG", allow_hyphen_values = true)]
    pub weight: Option<String>,

    /// Serum potassium in mmol/L.
    #[arg(long, value_name = "MMOL_L", allow_hyphen_values = true)]
    pub level: Option<String>,
}

#[derive(Args)]
pub struct ConcentrationArgs {
    /// Drug mass in mg.
    #[arg(long, value_name = "MG", allow_hyphen_values = true)]
    pub mass: Option<String>,

    /// Diluent volume in mL.
    #[arg(long, value_name = "ML", allow_hyphen_values = true)]
    pub volume: Option<String>,
}

#[derive(Args)]
pub struct SteroidArgs {
    /// Body weight in kg.
    #[arg(long, value_name = "KG", allow_hyphen_values = true)]
    pub weight: Option<String>,
}

#[derive(Args)]
pub struct CrclArgs {
    /// Age in years.
    #[arg(long, value_name = "YEARS", allow_hyphen_values = true)]
    pub age: Option<String>,

    /// Body weight in kg.
    #[arg(long, value_name = "KG", allow_hyphen_values = true)]
    pub weight: Option<String>,

    /// Serum creatinine in the unit given by --unit.
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    pub creatinine: Option<String>,

    /// Creatinine unit (default from settings).
    #[arg(long, value_enum)]
    pub unit: Option<CreatinineUnitArg>,

    /// Patient sex (default from settings).
    #[arg(long, value_enum)]
    pub sex: Option<SexArg>,
}

#[derive(Args)]
pub struct TableArgs {
    /// Show a single renal category.
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,
}

#[derive(Args)]
pub struct BatchArgs {
    /// CSV file with a `kind` column and input field columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write CSV results to a file instead of printing them.
    #[arg(long = "output-file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective settings to the settings file.
    #[arg(long)]
    pub init: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CreatinineUnitArg {
    MgDl,
    UmolL,
}

impl From<CreatinineUnitArg> for CreatinineUnit {
    fn from(arg: CreatinineUnitArg) -> Self {
        match arg {
            CreatinineUnitArg::MgDl => Self::MgPerDl,
            CreatinineUnitArg::UmolL => Self::UmolPerL,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Self::Male,
            SexArg::Female => Self::Female,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl From<CategoryArg> for RenalCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Normal => Self::Normal,
            CategoryArg::Mild => Self::Mild,
            CategoryArg::Moderate => Self::Moderate,
            CategoryArg::Severe => Self::Severe,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Table => Self::Table,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
