#![deny(unsafe_code)]

pub mod drug;
pub mod error;
pub mod input;
pub mod kind;
pub mod renal;
pub mod result;

pub use drug::Drug;
pub use error::InvalidReason;
pub use input::{CreatinineUnit, InputField, NumericField, PatientInputs, Sex};
pub use kind::CalculatorKind;
pub use renal::RenalCategory;
pub use result::{
    Annotation, CalculationResult, DosingRecommendation, Outcome, RenalAssessment, Severity,
};
