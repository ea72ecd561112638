use dosecalc_model::{Annotation, CalculationResult, CalculatorKind, InputField, PatientInputs};

use super::common::{Computed, finite, require_positive, settle};
use crate::format::format_value;

const MG_PER_KG: f64 = 30.0;
/// Reference stock concentration used to express the dose as a volume.
pub(crate) const STOCK_MG_PER_ML: f64 = 125.0;

/// Steroid loading dose in mg: `30 × weight`.
///
/// The draw-up volume at 125 mg/mL is always attached as an info annotation.
pub fn steroid_loading_dose(inputs: &PatientInputs) -> CalculationResult {
    settle(CalculatorKind::Steroid, compute(inputs))
}

fn compute(inputs: &PatientInputs) -> Computed {
    let weight = require_positive(inputs, InputField::WeightKg)?;
    let dose = finite(MG_PER_KG * weight, InputField::WeightKg)?;
    let volume = dose / STOCK_MG_PER_ML;

    Ok(
        CalculationResult::value(CalculatorKind::Steroid, dose).annotate(Annotation::info(
            format!(
                "Volume: {} mL at {} mg/mL",
                format_value(volume),
                format_value(STOCK_MG_PER_ML)
            ),
        )),
    )
}
