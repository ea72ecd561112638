use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::input::InputField;

/// The five independent calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    /// Sodium bicarbonate deficit, mL of 8.4% solution.
    Bicarbonate,
    /// Potassium replacement amount, mmol.
    Potassium,
    /// Drug concentration, mcg/mL.
    Concentration,
    /// Steroid loading dose, mg.
    Steroid,
    /// Cockcroft-Gault creatinine clearance, mL/min.
    #[serde(rename = "crcl")]
    CreatinineClearance,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 5] = [
        Self::Bicarbonate,
        Self::Potassium,
        Self::Concentration,
        Self::Steroid,
        Self::CreatinineClearance,
    ];

    /// Stable identifier, as accepted on the command line and in batch files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bicarbonate => "bicarbonate",
            Self::Potassium => "potassium",
            Self::Concentration => "concentration",
            Self::Steroid => "steroid",
            Self::CreatinineClearance => "crcl",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bicarbonate => "Bicarbonate deficit",
            Self::Potassium => "Potassium correction",
            Self::Concentration => "Drug concentration",
            Self::Steroid => "Steroid loading dose",
            Self::CreatinineClearance => "Creatinine clearance (Cockcroft-Gault)",
        }
    }

    /// Unit of the primary result value.
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Bicarbonate => "mL",
            Self::Potassium => "mmol",
            Self::Concentration => "mcg/mL",
            Self::Steroid => "mg",
            Self::CreatinineClearance => "mL/min",
        }
    }

    /// Numeric inputs the calculator reads.
    pub const fn required_fields(&self) -> &'static [InputField] {
        match self {
            Self::Bicarbonate => &[InputField::WeightKg, InputField::BaseExcess],
            Self::Potassium => &[InputField::WeightKg, InputField::PotassiumLevel],
            Self::Concentration => &[InputField::DrugMassMg, InputField::VolumeMl],
            Self::Steroid => &[InputField::WeightKg],
            Self::CreatinineClearance => &[
                InputField::AgeYears,
                InputField::WeightKg,
                InputField::Creatinine,
            ],
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bicarbonate" | "bicarb" => Ok(Self::Bicarbonate),
            "potassium" => Ok(Self::Potassium),
            "concentration" => Ok(Self::Concentration),
            "steroid" => Ok(Self::Steroid),
            "crcl" | "creatinine_clearance" => Ok(Self::CreatinineClearance),
            _ => Err(format!("Unknown calculator: {s}")),
        }
    }
}
