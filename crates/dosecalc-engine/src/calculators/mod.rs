//! The five dosage calculators.
//!
//! Each calculator is a unit struct implementing [`Calculator`] and a free
//! function doing the actual work. [`calculator_for`] maps a
//! [`CalculatorKind`] to its implementation.
//!
//! | Kind          | Formula                                          | Unit   |
//! |---------------|--------------------------------------------------|--------|
//! | bicarbonate   | weight × \|BE\| × 2 × 0.3                        | mL     |
//! | potassium     | weight × 1.74 / level                            | mmol   |
//! | concentration | mass × 1000 / volume                             | mcg/mL |
//! | steroid       | 30 × weight                                      | mg     |
//! | crcl          | (140 − age) × weight × F / (72 × creatinine)     | mL/min |
//!
//! # Failure policy
//!
//! - Missing or non-finite input: [`Outcome::Invalid`], no annotations.
//! - Input outside its domain (e.g. a zero divisor): [`Outcome::Invalid`].
//!   Beyond the divisors, every weight must be greater than 0, drug mass must
//!   not be negative, base excess must not be 0 and age must not be negative.
//! - Potassium below the safety floor: [`Outcome::Withheld`] plus an error
//!   annotation.
//! - Threshold crossings: the value is returned with info/warning annotations.
//!
//! [`Outcome::Invalid`]: dosecalc_model::Outcome::Invalid
//! [`Outcome::Withheld`]: dosecalc_model::Outcome::Withheld

mod bicarbonate;
mod clearance;
mod common;
mod concentration;
mod potassium;
mod steroid;

pub use bicarbonate::bicarbonate_deficit;
pub use clearance::{cockcroft_gault, creatinine_clearance, creatinine_to_mg_per_dl};
pub use concentration::drug_concentration;
pub use potassium::potassium_correction;
pub use steroid::steroid_loading_dose;

use dosecalc_model::{CalculationResult, CalculatorKind, PatientInputs};

/// A single dosage calculator.
pub trait Calculator: Send + Sync {
    /// The calculator this implementation handles.
    fn kind(&self) -> CalculatorKind;

    /// Compute a result from an input snapshot. Never panics on bad input.
    fn calculate(&self, inputs: &PatientInputs) -> CalculationResult;
}

pub struct BicarbonateDeficit;

impl Calculator for BicarbonateDeficit {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Bicarbonate
    }

    fn calculate(&self, inputs: &PatientInputs) -> CalculationResult {
        bicarbonate_deficit(inputs)
    }
}

pub struct PotassiumCorrection;

impl Calculator for PotassiumCorrection {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Potassium
    }

    fn calculate(&self, inputs: &PatientInputs) -> CalculationResult {
        potassium_correction(inputs)
    }
}

pub struct DrugConcentration;

impl Calculator for DrugConcentration {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Concentration
    }

    fn calculate(&self, inputs: &PatientInputs) -> CalculationResult {
        drug_concentration(inputs)
    }
}

pub struct SteroidLoadingDose;

impl Calculator for SteroidLoadingDose {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Steroid
    }

    fn calculate(&self, inputs: &PatientInputs) -> CalculationResult {
        steroid_loading_dose(inputs)
    }
}

pub struct CreatinineClearance;

impl Calculator for CreatinineClearance {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::CreatinineClearance
    }

    fn calculate(&self, inputs: &PatientInputs) -> CalculationResult {
        creatinine_clearance(inputs)
    }
}

/// Returns the calculator implementing `kind`.
pub fn calculator_for(kind: CalculatorKind) -> &'static dyn Calculator {
    match kind {
        CalculatorKind::Bicarbonate => &BicarbonateDeficit,
        CalculatorKind::Potassium => &PotassiumCorrection,
        CalculatorKind::Concentration => &DrugConcentration,
        CalculatorKind::Steroid => &SteroidLoadingDose,
        CalculatorKind::CreatinineClearance => &CreatinineClearance,
    }
}
