//! Property tests for calculator invariants.

use dosecalc_engine::{bicarbonate_deficit, creatinine_clearance, potassium_correction};
use dosecalc_model::{
    CreatinineUnit, InputField, NumericField, PatientInputs, RenalCategory, Sex,
};
use proptest::prelude::*;

fn bicarbonate_dose(weight: f64, base_excess: f64) -> f64 {
    let inputs = PatientInputs::new()
        .with(InputField::WeightKg, weight)
        .with(InputField::BaseExcess, base_excess);
    bicarbonate_deficit(&inputs)
        .numeric_value()
        .expect("valid inputs give a value")
}

fn sex_strategy() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Female), Just(Sex::Male)]
}

proptest! {
    #[test]
    fn bicarbonate_increases_with_weight(
        weight in 0.5f64..300.0,
        extra in 0.01f64..50.0,
        base_excess in 0.5f64..40.0,
    ) {
        prop_assert!(bicarbonate_dose(weight + extra, base_excess) > bicarbonate_dose(weight, base_excess));
    }

    #[test]
    fn bicarbonate_increases_with_base_excess(
        weight in 0.5f64..300.0,
        base_excess in 0.5f64..40.0,
        extra in 0.01f64..20.0,
    ) {
        prop_assert!(bicarbonate_dose(weight, base_excess + extra) > bicarbonate_dose(weight, base_excess));
    }

    #[test]
    fn low_potassium_is_always_withheld(
        level in 0.0f64..2.5,
        weight in proptest::option::of(-500.0f64..500.0),
    ) {
        let inputs = PatientInputs::new()
            .with(InputField::WeightKg, NumericField::from(weight))
            .with(InputField::PotassiumLevel, level);
        let result = potassium_correction(&inputs);
        prop_assert!(result.is_withheld());
        prop_assert_eq!(result.annotations.len(), 1);
    }

    #[test]
    fn clearance_is_never_negative(
        age in 0.0f64..300.0,
        weight in 0.5f64..300.0,
        creatinine in 0.05f64..20.0,
        sex in sex_strategy(),
    ) {
        let inputs = PatientInputs::new()
            .with(InputField::AgeYears, age)
            .with(InputField::WeightKg, weight)
            .with(InputField::Creatinine, creatinine)
            .with_sex(sex);
        let result = creatinine_clearance(&inputs);
        let crcl = result.numeric_value().expect("valid inputs give a value");
        prop_assert!(crcl >= 0.0);
        let category = result.renal.map(|r| r.category);
        prop_assert_eq!(category, Some(RenalCategory::from_clearance(crcl)));
    }

    #[test]
    fn si_and_conventional_units_agree(
        age in 0.0f64..120.0,
        weight in 0.5f64..300.0,
        sex in sex_strategy(),
    ) {
        let base = PatientInputs::new()
            .with(InputField::AgeYears, age)
            .with(InputField::WeightKg, weight)
            .with_sex(sex);
        let conventional = base.with(InputField::Creatinine, 1.0);
        let si = base
            .with(InputField::Creatinine, 88.4)
            .with_creatinine_unit(CreatinineUnit::UmolPerL);
        prop_assert_eq!(
            creatinine_clearance(&conventional).numeric_value(),
            creatinine_clearance(&si).numeric_value()
        );
    }
}
