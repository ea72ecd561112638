//! Renal function categories derived from creatinine clearance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound (inclusive) of the normal band, mL/min.
pub const NORMAL_MIN_CRCL: f64 = 50.0;
/// Lower bound (inclusive) of the mild impairment band, mL/min.
pub const MILD_MIN_CRCL: f64 = 30.0;
/// Lower bound (inclusive) of the moderate impairment band, mL/min.
pub const MODERATE_MIN_CRCL: f64 = 10.0;

/// Renal function bucket used to select dosing adjustments.
///
/// The bands are closed below and open above:
/// - `Normal`: crcl ≥ 50
/// - `Mild`: 30 ≤ crcl < 50
/// - `Moderate`: 10 ≤ crcl < 30
/// - `Severe`: crcl < 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenalCategory {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl RenalCategory {
    /// All categories, from best to worst renal function.
    pub const ALL: [RenalCategory; 4] = [Self::Normal, Self::Mild, Self::Moderate, Self::Severe];

    /// Categorize an unrounded clearance value in mL/min.
    #[must_use]
    pub fn from_clearance(crcl_ml_min: f64) -> Self {
        if crcl_ml_min >= NORMAL_MIN_CRCL {
            Self::Normal
        } else if crcl_ml_min >= MILD_MIN_CRCL {
            Self::Mild
        } else if crcl_ml_min >= MODERATE_MIN_CRCL {
            Self::Moderate
        } else {
            Self::Severe
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    /// Clearance band in mL/min, for display.
    pub const fn range_label(&self) -> &'static str {
        match self {
            Self::Normal => "≥50 mL/min",
            Self::Mild => "30-49 mL/min",
            Self::Moderate => "10-29 mL/min",
            Self::Severe => "<10 mL/min",
        }
    }

    /// Position in [`RenalCategory::ALL`], used to index static tables.
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for RenalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "mild" => Ok(Self::Mild),
            "moderate" => Ok(Self::Moderate),
            "severe" => Ok(Self::Severe),
            _ => Err(format!("Unknown renal category: {s}")),
        }
    }
}
