use dosecalc_model::{
    Annotation, CalculationResult, CalculatorKind, InputField, InvalidReason, PatientInputs,
};

use super::common::{Computed, finite, require, require_positive, settle};
use crate::format::format_value;

/// mmol of potassium per kg of body weight, before dividing by the level.
const REPLACEMENT_FACTOR: f64 = 1.74;
/// Below this serum level (mmol/L) no replacement amount is shown.
pub(crate) const SAFETY_FLOOR_MMOL_L: f64 = 2.5;
/// Amounts above this (mmol) exceed a safe single infusion.
pub(crate) const MAX_INFUSION_MMOL: f64 = 40.0;

/// Potassium replacement amount in mmol.
///
/// `amount = weight × 1.74 / level`. A level in `[0, 2.5)` withholds the
/// result entirely whatever the weight; large amounts only warn.
pub fn potassium_correction(inputs: &PatientInputs) -> CalculationResult {
    settle(CalculatorKind::Potassium, compute(inputs))
}

fn compute(inputs: &PatientInputs) -> Computed {
    let level = require(inputs, InputField::PotassiumLevel)?;
    if (0.0..SAFETY_FLOOR_MMOL_L).contains(&level) {
        return Ok(CalculationResult::withheld(
            CalculatorKind::Potassium,
            format!(
                "Potassium below {} mmol/L is critically low: seek senior review and \
                 replace under cardiac monitoring; no calculated amount is given",
                format_value(SAFETY_FLOOR_MMOL_L)
            ),
        ));
    }
    if level <= 0.0 {
        return Err(InvalidReason::constraint(
            InputField::PotassiumLevel,
            "must be greater than 0",
        ));
    }
    let weight = require_positive(inputs, InputField::WeightKg)?;
    let amount = finite(weight * REPLACEMENT_FACTOR / level, InputField::WeightKg)?;

    let mut result = CalculationResult::value(CalculatorKind::Potassium, amount);
    if amount > MAX_INFUSION_MMOL {
        result = result.annotate(Annotation::warning(format!(
            "Amount above {} mmol: split the replacement and do not exceed the maximum infusion rate",
            format_value(MAX_INFUSION_MMOL)
        )));
    }
    Ok(result)
}
