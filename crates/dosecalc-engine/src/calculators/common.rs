use dosecalc_model::{
    CalculationResult, CalculatorKind, InputField, InvalidReason, NumericField, PatientInputs,
};

pub(super) type Computed = Result<CalculationResult, InvalidReason>;

/// Collapse a computation into a result, turning the error into an invalid outcome.
pub(super) fn settle(kind: CalculatorKind, computed: Computed) -> CalculationResult {
    computed.unwrap_or_else(|reason| CalculationResult::invalid(kind, reason))
}

pub(super) fn require(inputs: &PatientInputs, field: InputField) -> Result<f64, InvalidReason> {
    match inputs.field(field) {
        NumericField::Value(value) => Ok(value),
        NumericField::Missing => Err(InvalidReason::Missing { field }),
        NumericField::Invalid => Err(InvalidReason::NotFinite { field }),
    }
}

pub(super) fn require_positive(
    inputs: &PatientInputs,
    field: InputField,
) -> Result<f64, InvalidReason> {
    let value = require(inputs, field)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidReason::constraint(field, "must be greater than 0"))
    }
}

pub(super) fn require_non_negative(
    inputs: &PatientInputs,
    field: InputField,
) -> Result<f64, InvalidReason> {
    let value = require(inputs, field)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidReason::constraint(field, "must not be negative"))
    }
}

/// Reject results that overflowed to infinity on extreme inputs.
pub(super) fn finite(value: f64, field: InputField) -> Result<f64, InvalidReason> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidReason::constraint(field, "is out of range"))
    }
}
