use dosecalc_model::{
    Annotation, CalculationResult, CalculatorKind, InputField, InvalidReason, PatientInputs,
};

use super::common::{Computed, finite, require, require_positive, settle};
use crate::format::format_value;

/// Extracellular fraction of body weight used for the bicarbonate space.
const BICARBONATE_SPACE: f64 = 0.3;
/// Doubling applied to the deficit.
const DEFICIT_MULTIPLIER: f64 = 2.0;
/// Doses above this volume (mL of 8.4% solution) get a warning.
pub(crate) const LARGE_DOSE_ML: f64 = 100.0;

/// Sodium bicarbonate deficit in mL of 8.4% solution.
///
/// `dose = weight × |base excess| × 2 × 0.3`. Only the magnitude of the base
/// excess matters; a zero base excess has no deficit to correct.
pub fn bicarbonate_deficit(inputs: &PatientInputs) -> CalculationResult {
    settle(CalculatorKind::Bicarbonate, compute(inputs))
}

fn compute(inputs: &PatientInputs) -> Computed {
    let weight = require_positive(inputs, InputField::WeightKg)?;
    let deficit = require(inputs, InputField::BaseExcess)?.abs();
    if deficit <= 0.0 {
        return Err(InvalidReason::constraint(
            InputField::BaseExcess,
            "must not be 0",
        ));
    }
    let dose = finite(
        weight * deficit * DEFICIT_MULTIPLIER * BICARBONATE_SPACE,
        InputField::WeightKg,
    )?;

    let mut result = CalculationResult::value(CalculatorKind::Bicarbonate, dose);
    if dose > LARGE_DOSE_ML {
        result = result.annotate(Annotation::warning(format!(
            "Dose above {} mL: give half, then repeat the blood gas before the remainder",
            format_value(LARGE_DOSE_ML)
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosecalc_model::Severity;

    fn inputs(weight: f64, base_excess: f64) -> PatientInputs {
        PatientInputs::new()
            .with(InputField::WeightKg, weight)
            .with(InputField::BaseExcess, base_excess)
    }

    #[test]
    fn negative_base_excess_uses_magnitude() {
        let result = bicarbonate_deficit(&inputs(70.0, -8.0));
        let dose = result.numeric_value().unwrap();
        assert!((dose - 336.0).abs() < 1e-9);
        assert_eq!(result.max_severity(), Some(Severity::Warning));
    }

    #[test]
    fn small_dose_has_no_annotation() {
        let result = bicarbonate_deficit(&inputs(10.0, 5.0));
        assert!((result.numeric_value().unwrap() - 30.0).abs() < 1e-9);
        assert!(result.annotations.is_empty());
    }

    #[test]
    fn warning_starts_above_threshold() {
        let below = bicarbonate_deficit(&inputs(83.0, 2.0));
        assert!(below.numeric_value().unwrap() < LARGE_DOSE_ML);
        assert!(below.annotations.is_empty());

        let above = bicarbonate_deficit(&inputs(84.0, 2.0));
        assert!(above.numeric_value().unwrap() > LARGE_DOSE_ML);
        assert_eq!(above.annotation_count(Severity::Warning), 1);
    }

    #[test]
    fn limit_is_exclusive() {
        // With a base excess of -1 the product never lands on exactly 100.0;
        // these weights give the doses on either side of it.
        let at_limit = bicarbonate_deficit(&inputs(166.666_666_666_666_66, -1.0));
        assert!(at_limit.numeric_value().unwrap() <= LARGE_DOSE_ML);
        assert!(at_limit.annotations.is_empty());

        let past_limit = bicarbonate_deficit(&inputs(166.666_666_666_666_69, -1.0));
        assert!(past_limit.numeric_value().unwrap() > LARGE_DOSE_ML);
        assert_eq!(past_limit.annotation_count(Severity::Warning), 1);
    }

    #[test]
    fn zero_base_excess_is_invalid() {
        let result = bicarbonate_deficit(&inputs(70.0, 0.0));
        assert_eq!(
            result.invalid_reason().map(InvalidReason::field),
            Some(InputField::BaseExcess)
        );
        assert!(result.annotations.is_empty());
    }

    #[test]
    fn non_finite_base_excess_is_invalid() {
        let result = bicarbonate_deficit(&inputs(70.0, f64::NAN));
        assert_eq!(
            result.invalid_reason(),
            Some(&InvalidReason::NotFinite {
                field: InputField::BaseExcess
            })
        );
    }
}
