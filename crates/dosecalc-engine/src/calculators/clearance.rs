use dosecalc_model::{
    CalculationResult, CalculatorKind, CreatinineUnit, InputField, InvalidReason, PatientInputs,
    RenalAssessment, RenalCategory, Sex,
};
use dosecalc_standards::recommendations;

use super::common::{Computed, finite, require, require_positive, settle};

/// µmol/L of creatinine per mg/dL.
pub const CREATININE_UMOL_PER_MG: f64 = 88.4;
const AGE_CEILING: f64 = 140.0;
const SERUM_FACTOR: f64 = 72.0;
const FEMALE_FACTOR: f64 = 0.85;

/// Convert a serum creatinine reading to mg/dL.
pub fn creatinine_to_mg_per_dl(value: f64, unit: CreatinineUnit) -> f64 {
    match unit {
        CreatinineUnit::MgPerDl => value,
        CreatinineUnit::UmolPerL => value / CREATININE_UMOL_PER_MG,
    }
}

/// Cockcroft-Gault estimate in mL/min, clamped at zero.
///
/// `((140 − age) × weight × F) / (72 × creatinine)` with `F = 0.85` for
/// female patients and 1 otherwise. Inputs are assumed already validated.
pub fn cockcroft_gault(age_years: f64, weight_kg: f64, creatinine_mg_dl: f64, sex: Sex) -> f64 {
    let sex_factor = match sex {
        Sex::Female => FEMALE_FACTOR,
        Sex::Male => 1.0,
    };
    let crcl = ((AGE_CEILING - age_years) * weight_kg * sex_factor)
        / (SERUM_FACTOR * creatinine_mg_dl);
    crcl.max(0.0)
}

/// Creatinine clearance with renal category and antibiotic dosing guidance.
///
/// The category is derived from the unrounded clearance value.
pub fn creatinine_clearance(inputs: &PatientInputs) -> CalculationResult {
    settle(CalculatorKind::CreatinineClearance, compute(inputs))
}

fn compute(inputs: &PatientInputs) -> Computed {
    let age = require(inputs, InputField::AgeYears)?;
    if age < 0.0 {
        return Err(InvalidReason::constraint(
            InputField::AgeYears,
            "must not be negative",
        ));
    }
    let weight = require_positive(inputs, InputField::WeightKg)?;
    let creatinine = require_positive(inputs, InputField::Creatinine)?;
    let creatinine_mg_dl = creatinine_to_mg_per_dl(creatinine, inputs.creatinine_unit);
    let crcl = finite(
        cockcroft_gault(age, weight, creatinine_mg_dl, inputs.sex),
        InputField::Creatinine,
    )?;

    let category = RenalCategory::from_clearance(crcl);
    Ok(
        CalculationResult::value(CalculatorKind::CreatinineClearance, crcl).with_renal(
            RenalAssessment {
                category,
                recommendations: recommendations(category),
            },
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosecalc_model::Drug;

    fn inputs(age: f64, weight: f64, creatinine: f64) -> PatientInputs {
        PatientInputs::new()
            .with(InputField::AgeYears, age)
            .with(InputField::WeightKg, weight)
            .with(InputField::Creatinine, creatinine)
    }

    #[test]
    fn male_reference_case() {
        let result = creatinine_clearance(&inputs(60.0, 70.0, 1.2));
        let crcl = result.numeric_value().unwrap();
        assert!((crcl - 5600.0 / 86.4).abs() < 1e-9);
        let renal = result.renal.expect("renal assessment");
        assert_eq!(renal.category, RenalCategory::Normal);
        assert_eq!(renal.recommendations.len(), Drug::ALL.len());
    }

    #[test]
    fn female_factor_applies() {
        let male = creatinine_clearance(&inputs(60.0, 70.0, 1.2));
        let female = creatinine_clearance(&inputs(60.0, 70.0, 1.2).with_sex(Sex::Female));
        let ratio = female.numeric_value().unwrap() / male.numeric_value().unwrap();
        assert!((ratio - FEMALE_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn si_units_are_converted() {
        let si = inputs(60.0, 70.0, 88.4).with_creatinine_unit(CreatinineUnit::UmolPerL);
        let conventional = inputs(60.0, 70.0, 1.0);
        assert_eq!(
            creatinine_clearance(&si).numeric_value(),
            creatinine_clearance(&conventional).numeric_value()
        );
    }

    #[test]
    fn age_over_ceiling_clamps_to_zero() {
        let result = creatinine_clearance(&inputs(150.0, 70.0, 1.0));
        assert_eq!(result.numeric_value(), Some(0.0));
        assert_eq!(
            result.renal.map(|r| r.category),
            Some(RenalCategory::Severe)
        );
    }

    #[test]
    fn domain_constraints() {
        assert!(creatinine_clearance(&inputs(-1.0, 70.0, 1.0)).is_invalid());
        assert!(creatinine_clearance(&inputs(60.0, 0.0, 1.0)).is_invalid());
        assert!(creatinine_clearance(&inputs(60.0, 70.0, 0.0)).is_invalid());
        assert!(creatinine_clearance(&inputs(0.0, 70.0, 1.0)).numeric_value().is_some());
    }

    #[test]
    fn invalid_result_has_no_renal_assessment() {
        let result = creatinine_clearance(&inputs(60.0, 70.0, -2.0));
        assert!(result.renal.is_none());
        assert!(result.annotations.is_empty());
    }
}
