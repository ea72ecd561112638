#![deny(unsafe_code)]

pub mod renal_dosing;

pub use crate::renal_dosing::{DOSING_TABLE, DoseEntry, dose_entry, recommendations};
