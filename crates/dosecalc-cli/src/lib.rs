//! CLI library components for the dosing calculators.

pub mod batch;
pub mod logging;
pub mod settings;
