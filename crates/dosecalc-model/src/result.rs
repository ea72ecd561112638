//! Calculation results and their annotations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::drug::Drug;
use crate::error::InvalidReason;
use crate::kind::CalculatorKind;
use crate::renal::RenalCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guidance attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub severity: Severity,
    pub message: String,
}

impl Annotation {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

/// What a calculation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum Outcome {
    /// A finite result value in the calculator's unit.
    Value(f64),
    /// An input was missing, non-finite or out of its domain.
    Invalid(InvalidReason),
    /// A safety rule suppressed the value; an error annotation explains why.
    Withheld,
}

impl Outcome {
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Invalid(_) => "invalid",
            Self::Withheld => "withheld",
        }
    }
}

/// Dose range and frequency for one drug at one renal category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DosingRecommendation {
    pub drug: Drug,
    pub dose_range: String,
    pub frequency: String,
}

/// Renal category and dosing guidance attached to a clearance result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenalAssessment {
    pub category: RenalCategory,
    /// One entry per reference drug, in [`Drug::ALL`] order.
    pub recommendations: Vec<DosingRecommendation>,
}

impl RenalAssessment {
    pub fn recommendation(&self, drug: Drug) -> Option<&DosingRecommendation> {
        self.recommendations.iter().find(|rec| rec.drug == drug)
    }
}

/// Result of one calculator invocation.
///
/// An invalid result never carries annotations; the reason lives in
/// [`Outcome::Invalid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub kind: CalculatorKind,
    pub outcome: Outcome,
    pub unit: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renal: Option<RenalAssessment>,
}

impl CalculationResult {
    pub fn value(kind: CalculatorKind, value: f64) -> Self {
        Self::with_outcome(kind, Outcome::Value(value))
    }

    pub fn invalid(kind: CalculatorKind, reason: InvalidReason) -> Self {
        Self::with_outcome(kind, Outcome::Invalid(reason))
    }

    /// A suppressed result, explained by an error annotation.
    pub fn withheld(kind: CalculatorKind, message: impl Into<String>) -> Self {
        let mut result = Self::with_outcome(kind, Outcome::Withheld);
        result.annotations.push(Annotation::error(message));
        result
    }

    fn with_outcome(kind: CalculatorKind, outcome: Outcome) -> Self {
        Self {
            kind,
            outcome,
            unit: kind.unit().to_string(),
            annotations: Vec::new(),
            renal: None,
        }
    }

    /// Attach an annotation. Ignored on invalid results.
    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        if !self.is_invalid() {
            self.annotations.push(annotation);
        }
        self
    }

    /// Attach a renal assessment. Ignored unless the result has a value.
    #[must_use]
    pub fn with_renal(mut self, renal: RenalAssessment) -> Self {
        if self.numeric_value().is_some() {
            self.renal = Some(renal);
        }
        self
    }

    pub fn numeric_value(&self) -> Option<f64> {
        match self.outcome {
            Outcome::Value(value) => Some(value),
            Outcome::Invalid(_) | Outcome::Withheld => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.outcome, Outcome::Invalid(_))
    }

    pub fn is_withheld(&self) -> bool {
        matches!(self.outcome, Outcome::Withheld)
    }

    pub fn invalid_reason(&self) -> Option<&InvalidReason> {
        match &self.outcome {
            Outcome::Invalid(reason) => Some(reason),
            Outcome::Value(_) | Outcome::Withheld => None,
        }
    }

    /// Highest annotation severity, if any annotation is present.
    pub fn max_severity(&self) -> Option<Severity> {
        self.annotations.iter().map(|a| a.severity).max()
    }

    pub fn annotation_count(&self, severity: Severity) -> usize {
        self.annotations
            .iter()
            .filter(|a| a.severity == severity)
            .count()
    }
}
