//! Constants for the metrolab core
//!
//! Centralized numeric values used by the conversion and uncertainty
//! code. Conversion factors follow the definitions in the relevant
//! standards; uncertainty divisors follow the GUM (JCGM 100:2008)
//! conventions for rectangular distributions.

// ===== UNIT CONVERSION =====

/// Parts-per-billion per part-per-million.
///
/// Both are dimensionless volume ratios; the factor is exact.
pub const PPB_PER_PPM: f64 = 1000.0;

/// Micrograms per milligram, for mass-concentration columns (mg/m³ ↔ µg/m³).
pub const UG_PER_MG: f64 = 1000.0;

/// Offset between the Celsius and Kelvin scales.
///
/// Source: SI Brochure, 9th edition (2019)
pub const CELSIUS_TO_KELVIN_OFFSET: f64 = 273.15;

// ===== UNCERTAINTY BUDGET =====

/// √3, the divisor converting a rectangular-distribution half-width into
/// a standard uncertainty.
///
/// Source: GUM (JCGM 100:2008), §4.3.7
pub const RECTANGULAR_DIVISOR: f64 = 1.732_050_807_568_877_2;

/// Coverage factor applied to the combined standard uncertainty to form
/// the expanded uncertainty (k = 2, ≈95% confidence).
///
/// Deliberately independent of any certificate k-factor, which only
/// scales the certificate component of the budget.
pub const COVERAGE_FACTOR_95: f64 = 2.0;

/// Fallback coverage factor when a calibration certificate states none.
pub const DEFAULT_K_FACTOR: f64 = 2.0;

// ===== WORKBENCH =====

/// Number of reading rows a fresh workbench grid offers.
pub const DEFAULT_GRID_ROWS: usize = 10;

/// Auditor label stamped on every produced result.
pub const DEFAULT_AUDITOR: &str = "Lab Operator";

/// Name given to a workbench session before the analyst picks one.
pub const UNTITLED_PROJECT: &str = "Untitled Project";
