//! Unit conversion for reading columns
//!
//! ## Overview
//!
//! Analysts may enter a column of readings in a unit other than the
//! parameter's canonical one (e.g. ppb readings against a ppm
//! parameter). [`convert`] maps a value between units for the three
//! families the workbench supports:
//!
//! - Concentration: ppm ↔ ppb
//! - Mass concentration: mg/m³ ↔ µg/m³ (and notation variants)
//! - Temperature: Celsius, Kelvin, Fahrenheit
//!
//! ## Conversion policy
//!
//! Unit strings are compared case-insensitively after trimming, so
//! `"PPM"`, `" ppm "` and `"ppm"` are the same unit. An unrecognized
//! pair is a silent no-op: the value passes through unchanged rather
//! than poisoning the sample with an error. This is the accepted
//! policy for the workbench, not a failure mode.
//!
//! The mass-concentration family matches on the `mg`/`ug` substrings
//! rather than exact tokens so that `mg/m3`, `mg/m^3` and `mg/Nm3`
//! spellings all convert. Substring matching is intentionally narrow;
//! do not widen it without a concrete unit inventory to test against.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::constants::{CELSIUS_TO_KELVIN_OFFSET, PPB_PER_PPM, UG_PER_MG};

/// Convert `value` from `from_unit` to `to_unit`.
///
/// Identical units (after trimming and lowercasing), empty unit
/// strings, and unsupported pairs all return the input unchanged.
pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> f64 {
    let from = from_unit.trim().to_lowercase();
    let to = to_unit.trim().to_lowercase();

    if from.is_empty() || to.is_empty() || from == to {
        return value;
    }

    // Concentration: ppm <-> ppb
    if from == "ppm" && to == "ppb" {
        return value * PPB_PER_PPM;
    }
    if from == "ppb" && to == "ppm" {
        return value / PPB_PER_PPM;
    }

    // Mass concentration: substring match tolerates "mg/m3" vs "mg/m^3"
    if from.contains("mg") && to.contains("ug") {
        return value * UG_PER_MG;
    }
    if from.contains("ug") && to.contains("mg") {
        return value / UG_PER_MG;
    }

    // Temperature: C, K, F (K <-> F composed via Celsius)
    match (from.as_str(), to.as_str()) {
        ("c", "k") => value + CELSIUS_TO_KELVIN_OFFSET,
        ("k", "c") => value - CELSIUS_TO_KELVIN_OFFSET,
        ("c", "f") => value * 9.0 / 5.0 + 32.0,
        ("f", "c") => (value - 32.0) * 5.0 / 9.0,
        ("k", "f") => (value - CELSIUS_TO_KELVIN_OFFSET) * 9.0 / 5.0 + 32.0,
        ("f", "k") => (value - 32.0) * 5.0 / 9.0 + CELSIUS_TO_KELVIN_OFFSET,
        // Unknown pair: pass the value through unchanged.
        _ => value,
    }
}

/// Convert a possibly-absent cell value. Absent converts to 0.
pub fn convert_cell(value: Option<f64>, from_unit: &str, to_unit: &str) -> f64 {
    match value {
        Some(v) => convert(v, from_unit, to_unit),
        None => 0.0,
    }
}

/// Units an analyst may select for a column whose parameter uses `base_unit`.
///
/// Units outside the three supported families get no alternatives.
pub fn selectable_units(base_unit: &str) -> Vec<String> {
    let base = base_unit.trim().to_lowercase();
    if base == "ppb" || base == "ppm" {
        vec!["ppb".to_string(), "ppm".to_string()]
    } else if base.contains("ug") || base.contains("mg") {
        vec!["ug/m3".to_string(), "mg/m3".to_string()]
    } else if matches!(base.as_str(), "c" | "k" | "f") {
        vec!["C".to_string(), "K".to_string(), "F".to_string()]
    } else {
        vec![base_unit.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_conversion() {
        assert_eq!(convert(5.0, "ppm", "ppm"), 5.0);
        assert_eq!(convert(5.0, "PPM", " ppm "), 5.0);
        assert_eq!(convert(5.0, "", "ppb"), 5.0);
        assert_eq!(convert(5.0, "ppb", ""), 5.0);
    }

    #[test]
    fn concentration_family() {
        assert_eq!(convert(1.0, "ppm", "ppb"), 1000.0);
        assert_eq!(convert(1000.0, "ppb", "ppm"), 1.0);
    }

    #[test]
    fn mass_concentration_tolerates_variants() {
        assert_eq!(convert(1.0, "mg/m3", "ug/m3"), 1000.0);
        assert_eq!(convert(1.0, "mg/m^3", "ug/m3"), 1000.0);
        assert_eq!(convert(1000.0, "ug/m^3", "mg/m3"), 1.0);
    }

    #[test]
    fn temperature_family() {
        assert_eq!(convert(0.0, "C", "K"), 273.15);
        assert_eq!(convert(273.15, "K", "C"), 0.0);
        assert_eq!(convert(100.0, "C", "F"), 212.0);
        assert_eq!(convert(32.0, "F", "C"), 0.0);
        assert_eq!(convert(273.15, "K", "F"), 32.0);
        assert_eq!(convert(32.0, "F", "K"), 273.15);
    }

    #[test]
    fn unknown_pair_is_a_no_op() {
        assert_eq!(convert(5.0, "foo", "bar"), 5.0);
        assert_eq!(convert(5.0, "ppm", "hPa"), 5.0);
    }

    #[test]
    fn absent_cell_converts_to_zero() {
        assert_eq!(convert_cell(None, "ppm", "ppb"), 0.0);
        assert_eq!(convert_cell(Some(1.0), "ppm", "ppb"), 1000.0);
    }

    #[test]
    fn selectable_units_per_family() {
        assert_eq!(selectable_units("ppm"), vec!["ppb", "ppm"]);
        assert_eq!(selectable_units("ug/m3"), vec!["ug/m3", "mg/m3"]);
        assert_eq!(selectable_units("C"), vec!["C", "K", "F"]);
        assert_eq!(selectable_units("%"), vec!["%"]);
    }
}
