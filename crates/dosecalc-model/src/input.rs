//! Patient parameters as supplied by the caller.
//!
//! Every numeric parameter is carried as a [`NumericField`] so that a blank
//! or garbled entry survives until a calculator decides whether it needs it.
//! Parsing never fails: bad text becomes [`NumericField::Invalid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// State of a single numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum NumericField {
    /// Not supplied, or supplied as blank text.
    #[default]
    Missing,
    /// Supplied but not a finite number.
    Invalid,
    /// A finite number.
    Value(f64),
}

impl NumericField {
    /// Parse free-form text.
    ///
    /// Surrounding whitespace is ignored. Blank text is `Missing`; anything
    /// that does not parse, or parses to NaN or an infinity, is `Invalid`.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => Self::from_f64(value),
            Err(_) => Self::Invalid,
        }
    }

    /// Wrap a raw number, rejecting non-finite values.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Invalid
        }
    }

    /// Returns the number when present and finite.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing | Self::Invalid => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Option<f64>> for NumericField {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::from_f64)
    }
}

impl From<&str> for NumericField {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Names of the numeric patient parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    WeightKg,
    AgeYears,
    Creatinine,
    BaseExcess,
    PotassiumLevel,
    DrugMassMg,
    VolumeMl,
}

impl InputField {
    pub const ALL: [InputField; 7] = [
        Self::WeightKg,
        Self::AgeYears,
        Self::Creatinine,
        Self::BaseExcess,
        Self::PotassiumLevel,
        Self::DrugMassMg,
        Self::VolumeMl,
    ];

    /// Machine name, also used as the batch CSV column header.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeightKg => "weight_kg",
            Self::AgeYears => "age_years",
            Self::Creatinine => "creatinine",
            Self::BaseExcess => "base_excess",
            Self::PotassiumLevel => "potassium_level",
            Self::DrugMassMg => "drug_mass_mg",
            Self::VolumeMl => "volume_ml",
        }
    }

    /// Human-readable label used in messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WeightKg => "weight (kg)",
            Self::AgeYears => "age (years)",
            Self::Creatinine => "serum creatinine",
            Self::BaseExcess => "base excess (mmol/L)",
            Self::PotassiumLevel => "potassium level (mmol/L)",
            Self::DrugMassMg => "drug mass (mg)",
            Self::VolumeMl => "volume (mL)",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| format!("Unknown input field: {s}"))
    }
}

/// Patient sex, used for the Cockcroft-Gault correction factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    #[default]
    Male,
}

impl Sex {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "female" => Ok(Self::Female),
            "m" | "male" => Ok(Self::Male),
            _ => Err(format!("Unknown sex: {s}")),
        }
    }
}

/// Unit in which serum creatinine was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CreatinineUnit {
    /// Conventional units, mg/dL.
    #[default]
    #[serde(rename = "mg/dL")]
    MgPerDl,
    /// SI units, µmol/L.
    #[serde(rename = "umol/L")]
    UmolPerL,
}

impl CreatinineUnit {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MgPerDl => "mg/dL",
            Self::UmolPerL => "µmol/L",
        }
    }
}

impl fmt::Display for CreatinineUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreatinineUnit {
    type Err = String;

    /// Accepts the common spellings, e.g. `mg/dL`, `mg-dl`, `umol/L`, `µmol/l`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .replace('µ', "u")
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        match normalized.as_str() {
            "mgdl" => Ok(Self::MgPerDl),
            "umoll" => Ok(Self::UmolPerL),
            _ => Err(format!("Unknown creatinine unit: {s}")),
        }
    }
}

/// Input snapshot for a single calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInputs {
    pub weight_kg: NumericField,
    pub age_years: NumericField,
    pub creatinine: NumericField,
    pub base_excess: NumericField,
    pub potassium_level: NumericField,
    pub drug_mass_mg: NumericField,
    pub volume_ml: NumericField,
    pub sex: Sex,
    pub creatinine_unit: CreatinineUnit,
}

impl PatientInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: InputField) -> NumericField {
        match field {
            InputField::WeightKg => self.weight_kg,
            InputField::AgeYears => self.age_years,
            InputField::Creatinine => self.creatinine,
            InputField::BaseExcess => self.base_excess,
            InputField::PotassiumLevel => self.potassium_level,
            InputField::DrugMassMg => self.drug_mass_mg,
            InputField::VolumeMl => self.volume_ml,
        }
    }

    pub fn set(&mut self, field: InputField, value: NumericField) {
        let slot = match field {
            InputField::WeightKg => &mut self.weight_kg,
            InputField::AgeYears => &mut self.age_years,
            InputField::Creatinine => &mut self.creatinine,
            InputField::BaseExcess => &mut self.base_excess,
            InputField::PotassiumLevel => &mut self.potassium_level,
            InputField::DrugMassMg => &mut self.drug_mass_mg,
            InputField::VolumeMl => &mut self.volume_ml,
        };
        *slot = value;
    }

    /// Set a field, builder style.
    #[must_use]
    pub fn with(mut self, field: InputField, value: impl Into<NumericField>) -> Self {
        self.set(field, value.into());
        self
    }

    #[must_use]
    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    #[must_use]
    pub fn with_creatinine_unit(mut self, unit: CreatinineUnit) -> Self {
        self.creatinine_unit = unit;
        self
    }
}
