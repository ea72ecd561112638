//! Reference antibiotics covered by the renal dosing table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drug {
    Amoxicillin,
    Ciprofloxacin,
    Gentamicin,
    Meropenem,
    Vancomycin,
}

impl Drug {
    /// All reference drugs in display order.
    pub const ALL: [Drug; 5] = [
        Self::Amoxicillin,
        Self::Ciprofloxacin,
        Self::Gentamicin,
        Self::Meropenem,
        Self::Vancomycin,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Amoxicillin => "amoxicillin",
            Self::Ciprofloxacin => "ciprofloxacin",
            Self::Gentamicin => "gentamicin",
            Self::Meropenem => "meropenem",
            Self::Vancomycin => "vancomycin",
        }
    }

    /// Position in [`Drug::ALL`], used to index static tables.
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Drug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|drug| drug.name() == normalized)
            .ok_or_else(|| format!("Unknown drug: {s}"))
    }
}
