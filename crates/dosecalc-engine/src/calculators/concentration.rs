use dosecalc_model::{Annotation, CalculationResult, CalculatorKind, InputField, PatientInputs};

use super::common::{Computed, finite, require_non_negative, require_positive, settle};

const MCG_PER_MG: f64 = 1000.0;
/// Concentrations above this (mcg/mL) are flagged as high.
pub(crate) const HIGH_CONCENTRATION: f64 = 1000.0;
/// Concentrations below this (mcg/mL) are flagged as low.
pub(crate) const LOW_CONCENTRATION: f64 = 100.0;

/// Drug concentration in mcg/mL: `mass_mg × 1000 / volume_ml`.
pub fn drug_concentration(inputs: &PatientInputs) -> CalculationResult {
    settle(CalculatorKind::Concentration, compute(inputs))
}

fn compute(inputs: &PatientInputs) -> Computed {
    let mass = require_non_negative(inputs, InputField::DrugMassMg)?;
    let volume = require_positive(inputs, InputField::VolumeMl)?;
    let concentration = finite(mass * MCG_PER_MG / volume, InputField::DrugMassMg)?;

    let result = CalculationResult::value(CalculatorKind::Concentration, concentration);
    let result = if concentration > HIGH_CONCENTRATION {
        result.annotate(Annotation::info(
            "High concentration: consider further dilution or central venous access",
        ))
    } else if concentration < LOW_CONCENTRATION {
        result.annotate(Annotation::info(
            "Low concentration: check the infusion volume is appropriate",
        ))
    } else {
        result
    };
    Ok(result)
}
