//! Calibration records, audit snapshots, and resolution
//!
//! ## Overview
//!
//! A [`Calibration`] is a mutable store record describing one
//! instrument calibration for a parameter. At most one record per
//! parameter is `active` at a time; the store enforces that invariant
//! when saving.
//!
//! A [`CalibrationSnapshot`] is the immutable copy of the numeric
//! calibration fields that actually feeds an analysis. Snapshots are
//! embedded in session overrides and in produced results so the audit
//! trail survives later edits to the calibration list; they never
//! reference a record by id.
//!
//! ## Resolution precedence
//!
//! [`resolve`] decides which calibration data applies to a parameter,
//! in strict order:
//!
//! 1. A session override snapshot, used verbatim (provenance preserved).
//! 2. The parameter's active global record, tagged [`Provenance::Global`].
//! 3. Nothing — the orchestrator skips the parameter.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::constants::DEFAULT_K_FACTOR;
use crate::measurement::ParamId;
use crate::time::Timestamp;

/// Identity of a calibration record, assigned by the store.
pub type CalibrationId = u32;

/// Session override map: parameter id → snapshot used instead of the
/// active global calibration.
pub type CalibrationOverrides = BTreeMap<ParamId, CalibrationSnapshot>;

/// One instrument calibration for a parameter.
///
/// All uncertainty fields are expressed in the parameter's canonical
/// unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    /// Store-assigned identity.
    pub id: CalibrationId,
    /// Parameter this calibration belongs to.
    pub param_id: ParamId,
    /// Reference device name.
    pub device: String,
    /// Device serial number.
    pub serial: String,
    /// Calibration date in milliseconds since the epoch.
    pub date: Timestamp,
    /// Expanded uncertainty stated on the certificate.
    pub cert_unc: f64,
    /// Coverage factor stated on the certificate.
    pub k_factor: f64,
    /// Instrument resolution (half-width of the rounding interval).
    pub resolution: f64,
    /// Drift since the previous calibration.
    pub drift: f64,
    /// Instrument accuracy specification.
    pub accuracy: f64,
    /// Whether this is the parameter's current global calibration.
    pub active: bool,
}

/// Fields of a calibration to be saved; id and active flag are assigned
/// by the store.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationDraft {
    /// Parameter the calibration belongs to.
    pub param_id: ParamId,
    /// Reference device name.
    pub device: String,
    /// Device serial number.
    pub serial: String,
    /// Calibration date in milliseconds since the epoch.
    pub date: Timestamp,
    /// Expanded uncertainty stated on the certificate.
    pub cert_unc: f64,
    /// Coverage factor stated on the certificate.
    pub k_factor: f64,
    /// Instrument resolution.
    pub resolution: f64,
    /// Drift since the previous calibration.
    pub drift: f64,
    /// Instrument accuracy specification.
    pub accuracy: f64,
}

/// Where a snapshot's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Provenance {
    /// Copied from the parameter's active global calibration.
    Global,
    /// Copied from a historical (inactive) calibration record.
    History,
    /// Entered manually for this session.
    Custom,
}

impl Provenance {
    /// Human-readable tag for display and audit logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Provenance::Global => "GLOBAL",
            Provenance::History => "HISTORY",
            Provenance::Custom => "CUSTOM",
        }
    }
}

/// Immutable copy of the calibration values feeding one analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationSnapshot {
    /// Reference device name.
    pub device: String,
    /// Device serial number.
    pub serial: String,
    /// Expanded uncertainty stated on the certificate.
    pub cert_unc: f64,
    /// Coverage factor stated on the certificate.
    pub k_factor: f64,
    /// Instrument resolution.
    pub resolution: f64,
    /// Drift since the previous calibration.
    pub drift: f64,
    /// Instrument accuracy specification.
    pub accuracy: f64,
    /// Where these values came from.
    pub source: Provenance,
}

impl CalibrationSnapshot {
    fn from_record(cal: &Calibration, source: Provenance) -> Self {
        Self {
            device: cal.device.clone(),
            serial: cal.serial.clone(),
            cert_unc: cal.cert_unc,
            k_factor: cal.k_factor,
            resolution: cal.resolution,
            drift: cal.drift,
            accuracy: cal.accuracy,
            source,
        }
    }

    /// Snapshot of an active global calibration.
    pub fn global(cal: &Calibration) -> Self {
        Self::from_record(cal, Provenance::Global)
    }

    /// Snapshot of a historical record the analyst chose to reuse.
    pub fn historical(cal: &Calibration) -> Self {
        Self::from_record(cal, Provenance::History)
    }

    /// Blank manual-entry snapshot with the default coverage factor.
    pub fn custom() -> Self {
        Self {
            device: String::new(),
            serial: String::new(),
            cert_unc: 0.0,
            k_factor: DEFAULT_K_FACTOR,
            resolution: 0.0,
            drift: 0.0,
            accuracy: 0.0,
            source: Provenance::Custom,
        }
    }

    /// Coverage factor to divide the certificate uncertainty by.
    ///
    /// Certificates occasionally omit the k-factor; a zero falls back
    /// to the conventional k = 2.
    pub fn effective_k(&self) -> f64 {
        if self.k_factor == 0.0 {
            DEFAULT_K_FACTOR
        } else {
            self.k_factor
        }
    }
}

/// Resolve the calibration data feeding an analysis of `param_id`, or
/// `None` when the parameter has neither an override nor an active
/// global record. A missing calibration is not an error; the
/// orchestrator simply skips the parameter.
pub fn resolve(
    param_id: ParamId,
    overrides: &CalibrationOverrides,
    calibrations: &[Calibration],
) -> Option<CalibrationSnapshot> {
    if let Some(snapshot) = overrides.get(&param_id) {
        return Some(snapshot.clone());
    }
    calibrations
        .iter()
        .find(|c| c.param_id == param_id && c.active)
        .map(CalibrationSnapshot::global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn record(param_id: ParamId, cert_unc: f64, active: bool) -> Calibration {
        Calibration {
            id: 1,
            param_id,
            device: "GasCal 1100".to_string(),
            serial: "A-042".to_string(),
            date: 1_700_000_000_000,
            cert_unc,
            k_factor: 2.0,
            resolution: 0.1,
            drift: 0.05,
            accuracy: 0.2,
            active,
        }
    }

    #[test]
    fn override_takes_precedence_over_active_record() {
        let mut overrides = CalibrationOverrides::new();
        let mut snapshot = CalibrationSnapshot::historical(&record(7, 9.9, false));
        snapshot.cert_unc = 1.25;
        overrides.insert(7, snapshot);

        let calibrations = [record(7, 2.0, true)];
        let resolved = resolve(7, &overrides, &calibrations).unwrap();
        assert_eq!(resolved.cert_unc, 1.25);
        assert_eq!(resolved.source, Provenance::History);
    }

    #[test]
    fn falls_back_to_active_record_with_global_provenance() {
        let overrides = CalibrationOverrides::new();
        let calibrations = [record(7, 2.0, false), record(7, 3.0, true)];

        let resolved = resolve(7, &overrides, &calibrations).unwrap();
        assert_eq!(resolved.cert_unc, 3.0);
        assert_eq!(resolved.source, Provenance::Global);
    }

    #[test]
    fn no_override_and_no_active_record_resolves_to_none() {
        let overrides = CalibrationOverrides::new();
        let calibrations = [record(7, 2.0, false)];

        assert!(resolve(7, &overrides, &calibrations).is_none());
        assert!(resolve(8, &overrides, &[]).is_none());
    }

    #[test]
    fn custom_snapshot_defaults() {
        let snapshot = CalibrationSnapshot::custom();
        assert_eq!(snapshot.source, Provenance::Custom);
        assert_eq!(snapshot.k_factor, 2.0);
        assert_eq!(snapshot.cert_unc, 0.0);
    }

    #[test]
    fn zero_k_factor_falls_back_to_default() {
        let mut snapshot = CalibrationSnapshot::custom();
        snapshot.k_factor = 0.0;
        assert_eq!(snapshot.effective_k(), 2.0);

        snapshot.k_factor = 3.0;
        assert_eq!(snapshot.effective_k(), 3.0);
    }

    #[test]
    fn provenance_names() {
        assert_eq!(Provenance::Global.name(), "GLOBAL");
        assert_eq!(Provenance::History.name(), "HISTORY");
        assert_eq!(Provenance::Custom.name(), "CUSTOM");
    }
}
