//! Session state store
//!
//! ## Overview
//!
//! [`SessionStore`] owns the durable session state: the parameter
//! list, calibration records, result history, and saved projects. It
//! is an explicit context object handed to the workbench — never
//! ambient global state — so the calculation core stays testable in
//! isolation.
//!
//! The store is the single writer for identities: parameters,
//! calibrations, results, and projects all get monotonically
//! increasing ids here. It also enforces the calibration invariant:
//! at most one active record per parameter, maintained atomically on
//! save (deactivate-then-append).
//!
//! Results are append-only history, prepended most-recent-first, and
//! are independent of projects once created.

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::calibration::{Calibration, CalibrationDraft, CalibrationId};
use crate::errors::{StoreError, StoreResult};
use crate::measurement::{AnalysisResult, ParamId, Parameter};
use crate::workbench::{Project, ProjectId};

/// Identity of a stored result, assigned on append.
pub type ResultId = u32;

/// A result together with its store-assigned identity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultRecord {
    /// Store-assigned identity, monotonically increasing.
    pub id: ResultId,
    /// The immutable analysis result.
    pub result: AnalysisResult,
}

/// Owner of parameters, calibrations, result history, and projects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionStore {
    parameters: Vec<Parameter>,
    calibrations: Vec<Calibration>,
    results: Vec<ResultRecord>,
    projects: Vec<Project>,
    next_param_id: ParamId,
    next_calibration_id: CalibrationId,
    next_result_id: ResultId,
    next_project_id: ProjectId,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
            calibrations: Vec::new(),
            results: Vec::new(),
            projects: Vec::new(),
            next_param_id: 1,
            next_calibration_id: 1,
            next_result_id: 1,
            next_project_id: 1,
        }
    }

    /// Create a store seeded with the stock air-quality parameters.
    pub fn with_default_parameters() -> Self {
        let mut store = Self::new();
        for (name, unit, warn_limit, crit_limit) in [
            ("H2S", "ppb", 10.0, 20.0),
            ("SO2", "ppb", 75.0, 100.0),
            ("NO2", "ppb", 40.0, 80.0),
            ("PM2.5", "ug/m3", 35.0, 50.0),
            ("PM10", "ug/m3", 150.0, 200.0),
            ("TVOC", "ppb", 200.0, 500.0),
            ("CO", "ppm", 9.0, 15.0),
            ("O3", "ppb", 50.0, 80.0),
            ("Temperature", "C", 45.0, 50.0),
            ("Humidity", "%", 85.0, 90.0),
        ] {
            store.add_parameter(name, unit, warn_limit, crit_limit);
        }
        store
    }

    // ===== Parameters =====

    /// The parameter list, in workbench column order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Look up a parameter by id.
    pub fn parameter(&self, param_id: ParamId) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.id == param_id)
    }

    /// Add a parameter and return its assigned id.
    pub fn add_parameter(&mut self, name: &str, unit: &str, warn_limit: f64, crit_limit: f64) -> ParamId {
        let id = self.next_param_id;
        self.next_param_id += 1;
        self.parameters.push(Parameter {
            id,
            name: name.to_string(),
            unit: unit.to_string(),
            warn_limit,
            crit_limit,
        });
        id
    }

    /// Update a parameter's warn and critical limits in place.
    pub fn set_limits(&mut self, param_id: ParamId, warn_limit: f64, crit_limit: f64) -> StoreResult<()> {
        let param = self
            .parameters
            .iter_mut()
            .find(|p| p.id == param_id)
            .ok_or(StoreError::UnknownParameter { param_id })?;
        param.warn_limit = warn_limit;
        param.crit_limit = crit_limit;
        Ok(())
    }

    /// Remove a parameter and every calibration that belongs to it.
    pub fn remove_parameter(&mut self, param_id: ParamId) -> StoreResult<()> {
        if self.parameter(param_id).is_none() {
            return Err(StoreError::UnknownParameter { param_id });
        }
        self.parameters.retain(|p| p.id != param_id);
        self.calibrations.retain(|c| c.param_id != param_id);
        Ok(())
    }

    // ===== Calibrations =====

    /// All calibration records, active and historical.
    pub fn calibrations(&self) -> &[Calibration] {
        &self.calibrations
    }

    /// The active calibration for a parameter, if one exists.
    pub fn active_calibration_for(&self, param_id: ParamId) -> Option<&Calibration> {
        self.calibrations
            .iter()
            .find(|c| c.param_id == param_id && c.active)
    }

    /// A parameter's calibrations, newest first by calibration date,
    /// for historical reuse.
    pub fn calibrations_for(&self, param_id: ParamId) -> Vec<&Calibration> {
        let mut records: Vec<&Calibration> = self
            .calibrations
            .iter()
            .filter(|c| c.param_id == param_id)
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Save a new calibration as the parameter's active one.
    ///
    /// All prior records for the parameter are deactivated in the same
    /// call, so the at-most-one-active invariant holds at every return.
    pub fn save_calibration(&mut self, draft: CalibrationDraft) -> StoreResult<CalibrationId> {
        if self.parameter(draft.param_id).is_none() {
            return Err(StoreError::UnknownParameter { param_id: draft.param_id });
        }

        for cal in self.calibrations.iter_mut() {
            if cal.param_id == draft.param_id {
                cal.active = false;
            }
        }

        let id = self.next_calibration_id;
        self.next_calibration_id += 1;
        log_debug!("calibration {} saved for parameter {}", id, draft.param_id);
        self.calibrations.push(Calibration {
            id,
            param_id: draft.param_id,
            device: draft.device,
            serial: draft.serial,
            date: draft.date,
            cert_unc: draft.cert_unc,
            k_factor: draft.k_factor,
            resolution: draft.resolution,
            drift: draft.drift,
            accuracy: draft.accuracy,
            active: true,
        });
        Ok(id)
    }

    /// Delete a calibration record.
    pub fn remove_calibration(&mut self, calibration_id: CalibrationId) -> StoreResult<()> {
        let before = self.calibrations.len();
        self.calibrations.retain(|c| c.id != calibration_id);
        if self.calibrations.len() == before {
            return Err(StoreError::UnknownCalibration { calibration_id });
        }
        Ok(())
    }

    // ===== Results =====

    /// Result history, most recent first.
    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    /// Assign ids to a batch of results and prepend them to history,
    /// preserving batch order within the prepended block.
    pub fn add_results(&mut self, results: Vec<AnalysisResult>) {
        log_debug!("appending {} results to history", results.len());
        let mut records: Vec<ResultRecord> = results
            .into_iter()
            .map(|result| {
                let id = self.next_result_id;
                self.next_result_id += 1;
                ResultRecord { id, result }
            })
            .collect();
        records.extend(self.results.drain(..));
        self.results = records;
    }

    // ===== Projects =====

    /// Saved projects, most recently created first.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Look up a saved project by id.
    pub fn project(&self, project_id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// Reserve a fresh project id.
    pub fn allocate_project_id(&mut self) -> ProjectId {
        let id = self.next_project_id;
        self.next_project_id += 1;
        id
    }

    /// Save a project snapshot, replacing any existing snapshot with
    /// the same id or prepending a new one.
    pub fn save_project(&mut self, project: Project) {
        if let Some(existing) = self.projects.iter_mut().find(|p| p.id == project.id) {
            *existing = project;
        } else {
            self.projects.insert(0, project);
        }
    }

    /// Delete a saved project.
    pub fn delete_project(&mut self, project_id: ProjectId) -> StoreResult<()> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != project_id);
        if self.projects.len() == before {
            return Err(StoreError::UnknownProject { project_id });
        }
        Ok(())
    }
}
