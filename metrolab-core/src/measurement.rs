//! Uncertainty calculation per the GUM method
//!
//! ## Overview
//!
//! [`run_analysis`] turns one parameter's readings plus a calibration
//! snapshot into an [`AnalysisResult`]: the mean in the parameter's
//! canonical unit, the expanded measurement uncertainty, the trust
//! interval, and a PASS/WARN/FAIL classification against the
//! parameter's limits.
//!
//! ## Uncertainty budget
//!
//! The budget combines one statistical and four instrument components,
//! all treated as independent:
//!
//! ```text
//! uA     = stdev(readings) / sqrt(n)      (standard error, 0 for n < 2)
//! uCal   = cert_unc / k                   (certificate, k from the snapshot)
//! uRes   = resolution / sqrt(3)           (rectangular)
//! uDrift = drift / sqrt(3)                (rectangular)
//! uAcc   = accuracy / sqrt(3)             (rectangular)
//!
//! uC   = sqrt(uA² + uCal² + uRes² + uDrift² + uAcc²)
//! uExp = 2.0 * uC
//! ```
//!
//! The expansion factor is fixed at k = 2 (≈95% confidence) regardless
//! of the certificate's own k-factor, which only scales the
//! certificate component. That asymmetry matches the laboratory's
//! established procedure; do not change it without a requirements
//! decision.
//!
//! ## Classification
//!
//! Limits are strict: a mean exactly at a limit passes it. A limit of
//! zero means no threshold, so a parameter with both limits unset is
//! always PASS. Limits compare against the mean, not against the trust
//! interval bounds.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use crate::calibration::CalibrationSnapshot;
use crate::constants::{COVERAGE_FACTOR_95, DEFAULT_AUDITOR, RECTANGULAR_DIVISOR};
use crate::stats;
use crate::time::Timestamp;
use crate::units;

/// Identity of a parameter, assigned by the store.
pub type ParamId = u32;

/// A measured quality parameter and its reporting limits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    /// Store-assigned identity.
    pub id: ParamId,
    /// Display name, e.g. "CO" or "PM2.5".
    pub name: String,
    /// Canonical unit readings are converted into before statistics.
    pub unit: String,
    /// Warn threshold in the canonical unit; 0 means no threshold.
    pub warn_limit: f64,
    /// Critical threshold in the canonical unit; 0 means no threshold.
    pub crit_limit: f64,
}

impl Parameter {
    /// Classify a mean against this parameter's limits.
    ///
    /// Comparison is strict (`>`), so a mean exactly at a limit does
    /// not trip it.
    pub fn status_for(&self, mean: f64) -> Status {
        if self.crit_limit != 0.0 && mean > self.crit_limit {
            Status::Fail
        } else if self.warn_limit != 0.0 && mean > self.warn_limit {
            Status::Warn
        } else {
            Status::Pass
        }
    }
}

/// Classification of a result against the parameter's limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Mean at or below every set limit.
    Pass,
    /// Mean above the warn limit but not the critical limit.
    Warn,
    /// Mean above the critical limit.
    Fail,
}

impl Status {
    /// Report label for this status.
    pub const fn name(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
        }
    }
}

/// The individual standard-uncertainty components of one analysis.
///
/// Exposed so hosts can render a full uncertainty budget table next to
/// the result.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UncertaintyBudget {
    /// Type-A component: standard error of the mean.
    pub u_a: f64,
    /// Certificate component: `cert_unc / k`.
    pub u_cal: f64,
    /// Resolution component (rectangular).
    pub u_res: f64,
    /// Drift component (rectangular).
    pub u_drift: f64,
    /// Accuracy component (rectangular).
    pub u_acc: f64,
}

impl UncertaintyBudget {
    /// Build the budget for a converted sample and a calibration snapshot.
    pub fn from_sample(converted: &[f64], snapshot: &CalibrationSnapshot) -> Self {
        Self {
            u_a: stats::standard_error(converted),
            u_cal: snapshot.cert_unc / snapshot.effective_k(),
            u_res: snapshot.resolution / RECTANGULAR_DIVISOR,
            u_drift: snapshot.drift / RECTANGULAR_DIVISOR,
            u_acc: snapshot.accuracy / RECTANGULAR_DIVISOR,
        }
    }

    /// Combined standard uncertainty: root-sum-of-squares of the
    /// components, all treated as independent.
    pub fn combined(&self) -> f64 {
        libm::sqrt(
            self.u_a * self.u_a
                + self.u_cal * self.u_cal
                + self.u_res * self.u_res
                + self.u_drift * self.u_drift
                + self.u_acc * self.u_acc,
        )
    }

    /// Expanded uncertainty at the fixed k = 2 coverage factor.
    pub fn expanded(&self) -> f64 {
        self.combined() * COVERAGE_FACTOR_95
    }
}

/// One completed analysis of a parameter. Immutable once created;
/// identity is assigned by the store when the record is appended.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Project the analysis ran under.
    pub project: String,
    /// Name of the analyzed parameter.
    pub param: String,
    /// Mean of the converted readings, in the canonical unit.
    pub mean: f64,
    /// Expanded uncertainty (k = 2), in the canonical unit.
    pub u_exp: f64,
    /// Lower trust-interval bound, `mean - u_exp`.
    pub min_trust: f64,
    /// Upper trust-interval bound, `mean + u_exp`.
    pub max_trust: f64,
    /// Classification against the parameter's limits.
    pub status: Status,
    /// When the analysis ran, milliseconds since the epoch.
    pub timestamp: Timestamp,
    /// Auditor label recorded with the result.
    pub auditor: String,
    /// Raw readings as entered, before unit conversion.
    pub readings: Vec<f64>,
    /// The calibration values that fed the budget.
    pub snapshot: CalibrationSnapshot,
}

/// Run the uncertainty analysis for one parameter.
///
/// `readings` are raw values in `input_unit`; they are converted to the
/// parameter's canonical unit before any statistics. The caller
/// guarantees at least one reading — the orchestrator skips parameters
/// with an empty sample.
pub fn run_analysis(
    project: &str,
    parameter: &Parameter,
    snapshot: &CalibrationSnapshot,
    readings: &[f64],
    input_unit: &str,
    timestamp: Timestamp,
) -> AnalysisResult {
    let converted: Vec<f64> = readings
        .iter()
        .map(|&r| units::convert(r, input_unit, &parameter.unit))
        .collect();

    let mean = stats::mean(&converted);
    let budget = UncertaintyBudget::from_sample(&converted, snapshot);
    let u_exp = budget.expanded();

    AnalysisResult {
        project: project.to_owned(),
        param: parameter.name.clone(),
        mean,
        u_exp,
        min_trust: mean - u_exp,
        max_trust: mean + u_exp,
        status: parameter.status_for(mean),
        timestamp,
        auditor: DEFAULT_AUDITOR.to_owned(),
        // Raw readings are kept for the audit trail; the mean above is
        // in the canonical unit.
        readings: readings.to_vec(),
        snapshot: snapshot.clone(),
    }
}
