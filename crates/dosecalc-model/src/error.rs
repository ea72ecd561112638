use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::InputField;

/// Why a calculation produced no value.
///
/// Carried as data inside [`crate::Outcome::Invalid`]; calculators never
/// return it as an `Err` to their caller.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvalidReason {
    #[error("{field} is required")]
    Missing { field: InputField },

    #[error("{field} is not a finite number")]
    NotFinite { field: InputField },

    #[error("{field} {message}")]
    Constraint { field: InputField, message: String },
}

impl InvalidReason {
    pub fn constraint(field: InputField, message: impl Into<String>) -> Self {
        Self::Constraint {
            field,
            message: message.into(),
        }
    }

    /// The input that caused the failure.
    pub fn field(&self) -> InputField {
        match self {
            Self::Missing { field } | Self::NotFinite { field } | Self::Constraint { field, .. } => {
                *field
            }
        }
    }
}
