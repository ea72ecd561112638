//! Dosing calculator engine.
//!
//! Five stateless calculators, each a pure function from a
//! [`PatientInputs`] snapshot to a [`CalculationResult`]. Input problems are
//! reported inside the result, never as an `Err` or a panic.
//!
//! ```ignore
//! use dosecalc_engine::calculate;
//! use dosecalc_model::{CalculatorKind, InputField, PatientInputs};
//!
//! let inputs = PatientInputs::new()
//!     .with(InputField::WeightKg, 70.0)
//!     .with(InputField::BaseExcess, -8.0);
//! let result = calculate(CalculatorKind::Bicarbonate, &inputs);
//! assert_eq!(result.numeric_value(), Some(336.0));
//! ```

#![deny(unsafe_code)]

pub mod calculators;
pub mod format;

pub use crate::calculators::{
    BicarbonateDeficit, Calculator, CreatinineClearance, DrugConcentration, PotassiumCorrection,
    SteroidLoadingDose, bicarbonate_deficit, calculator_for, cockcroft_gault,
    creatinine_clearance, creatinine_to_mg_per_dl, drug_concentration, potassium_correction,
    steroid_loading_dose,
};
pub use crate::format::{NO_RESULT, format_field, format_result, format_value};

use dosecalc_model::{CalculationResult, CalculatorKind, PatientInputs};
use tracing::debug;

/// Run the calculator for `kind` against an input snapshot.
pub fn calculate(kind: CalculatorKind, inputs: &PatientInputs) -> CalculationResult {
    let result = calculator_for(kind).calculate(inputs);
    debug!(
        kind = %kind,
        status = result.outcome.status(),
        annotations = result.annotations.len(),
        "calculation complete"
    );
    result
}
