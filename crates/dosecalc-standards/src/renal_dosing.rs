//! Antibiotic dose adjustments by renal function.
//!
//! The table is compile-time data indexed by [`RenalCategory`] then [`Drug`]:
//! rows follow [`RenalCategory::ALL`] and columns follow [`Drug::ALL`].

use dosecalc_model::{DosingRecommendation, Drug, RenalCategory};

/// Dose range and frequency for one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoseEntry {
    pub dose_range: &'static str,
    pub frequency: &'static str,
}

const fn entry(dose_range: &'static str, frequency: &'static str) -> DoseEntry {
    DoseEntry {
        dose_range,
        frequency,
    }
}

pub const DOSING_TABLE: [[DoseEntry; Drug::ALL.len()]; RenalCategory::ALL.len()] = [
    // Normal
    [
        entry("250-500 mg", "q8h"),
        entry("250-750 mg", "q12h"),
        entry("5-7 mg/kg", "q24h"),
        entry("1 g", "q8h"),
        entry("15-20 mg/kg", "q8-12h"),
    ],
    // Mild
    [
        entry("250-500 mg", "q8h"),
        entry("250-500 mg", "q12h"),
        entry("5-7 mg/kg", "q36h"),
        entry("1 g", "q12h"),
        entry("15 mg/kg", "q24h"),
    ],
    // Moderate
    [
        entry("250-500 mg", "q12h"),
        entry("250-500 mg", "q18h"),
        entry("5-7 mg/kg", "q48h"),
        entry("500 mg", "q12h"),
        entry("15 mg/kg", "q48h"),
    ],
    // Severe
    [
        entry("250-500 mg", "q24h"),
        entry("250-500 mg", "q24h"),
        entry("2 mg/kg", "redose by level"),
        entry("500 mg", "q24h"),
        entry("15 mg/kg", "redose by level"),
    ],
];

/// Table cell for a drug at a renal category.
pub fn dose_entry(category: RenalCategory, drug: Drug) -> DoseEntry {
    DOSING_TABLE[category.index()][drug.index()]
}

/// Recommendations for every reference drug at a renal category, in
/// [`Drug::ALL`] order.
pub fn recommendations(category: RenalCategory) -> Vec<DosingRecommendation> {
    Drug::ALL
        .into_iter()
        .map(|drug| {
            let entry = dose_entry(category, drug);
            DosingRecommendation {
                drug,
                dose_range: entry.dose_range.to_string(),
                frequency: entry.frequency.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_is_filled() {
        for row in DOSING_TABLE {
            for cell in row {
                assert!(!cell.dose_range.is_empty());
                assert!(!cell.frequency.is_empty());
            }
        }
    }

    #[test]
    fn recommendations_cover_all_drugs_in_order() {
        for category in RenalCategory::ALL {
            let recs = recommendations(category);
            let drugs: Vec<Drug> = recs.iter().map(|rec| rec.drug).collect();
            assert_eq!(drugs, Drug::ALL.to_vec());
        }
    }

    #[test]
    fn spot_check_cells() {
        assert_eq!(
            dose_entry(RenalCategory::Normal, Drug::Meropenem),
            entry("1 g", "q8h")
        );
        assert_eq!(
            dose_entry(RenalCategory::Moderate, Drug::Gentamicin).frequency,
            "q48h"
        );
        assert_eq!(
            dose_entry(RenalCategory::Severe, Drug::Vancomycin).frequency,
            "redose by level"
        );
    }
}
