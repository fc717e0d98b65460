//! Analysis workbench and batch orchestration
//!
//! ## Overview
//!
//! [`Workbench`] holds the session-scoped working state an analyst
//! edits between runs: project name, grid row count, the reading grid,
//! and the calibration override map. [`run_batch`] is the orchestrator
//! that walks parameters × grid columns and assembles one result per
//! parameter that has both calibration data and at least one valid
//! reading.
//!
//! The orchestrator reads from the store but never mutates it; it
//! returns freshly built results, and the host decides whether to
//! append them to history. Degenerate inputs (no calibration, no valid
//! readings, an entirely empty grid) narrow the output — possibly to
//! the empty vector — rather than raising.
//!
//! A [`Project`] is a durable snapshot of workbench state (grid, unit
//! selections, overrides) that can be reloaded later; results, once
//! created, are independent of projects.

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::calibration::{self, Calibration, CalibrationOverrides, CalibrationSnapshot};
use crate::constants::{DEFAULT_GRID_ROWS, UNTITLED_PROJECT};
use crate::grid::ReadingGrid;
use crate::measurement::{run_analysis, AnalysisResult, ParamId, Parameter};
use crate::store::SessionStore;
use crate::time::{Clock, Timestamp};

/// Identity of a saved project, assigned by the store.
pub type ProjectId = u32;

/// Durable snapshot of workbench state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    /// Store-assigned identity.
    pub id: ProjectId,
    /// Project name as entered by the analyst.
    pub name: String,
    /// Last save time, milliseconds since the epoch.
    pub last_modified: Timestamp,
    /// Grid cells and per-column unit selections at save time.
    pub grid: ReadingGrid,
    /// Calibration overrides at save time.
    pub overrides: CalibrationOverrides,
}

/// Session-scoped working state for one analyst.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbench {
    /// Project name for the next run and save.
    pub project_name: String,
    /// Number of reading rows offered per column.
    pub rows: usize,
    /// The reading grid being edited.
    pub grid: ReadingGrid,
    /// Per-parameter calibration overrides for this session.
    pub overrides: CalibrationOverrides,
    current_project: Option<ProjectId>,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbench {
    /// Create a fresh workbench with an empty grid.
    pub fn new() -> Self {
        Self {
            project_name: UNTITLED_PROJECT.to_string(),
            rows: DEFAULT_GRID_ROWS,
            grid: ReadingGrid::new(),
            overrides: CalibrationOverrides::new(),
            current_project: None,
        }
    }

    /// Discard all working state and detach from any loaded project.
    pub fn reset(&mut self) {
        self.project_name = UNTITLED_PROJECT.to_string();
        self.grid.clear();
        self.overrides.clear();
        self.current_project = None;
    }

    /// The loaded project's id, if the session came from a saved project.
    pub fn current_project(&self) -> Option<ProjectId> {
        self.current_project
    }

    /// Install a session override for a parameter.
    pub fn set_override(&mut self, param_id: ParamId, snapshot: CalibrationSnapshot) {
        self.overrides.insert(param_id, snapshot);
    }

    /// Remove a parameter's session override, falling back to the
    /// active global calibration on the next run.
    pub fn clear_override(&mut self, param_id: ParamId) {
        self.overrides.remove(&param_id);
    }

    /// Adopt a historical calibration record as this session's
    /// override for its parameter.
    pub fn adopt_historical(&mut self, cal: &Calibration) {
        self.set_override(cal.param_id, CalibrationSnapshot::historical(cal));
    }

    /// Run the analysis batch over the current grid.
    ///
    /// Reads parameters and calibrations from the store; never writes
    /// to it. Append the returned results via
    /// [`SessionStore::add_results`] if they should enter history.
    pub fn run(&self, store: &SessionStore, clock: &impl Clock) -> Vec<AnalysisResult> {
        run_batch(
            &self.project_name,
            store.parameters(),
            &self.grid,
            &self.overrides,
            self.rows,
            store.calibrations(),
            clock.now(),
        )
    }

    /// Snapshot the working state into the store.
    ///
    /// Reuses the loaded project's id, or allocates a fresh one for an
    /// unsaved session. A blank name saves as "Untitled Project".
    pub fn save_project(&mut self, store: &mut SessionStore, clock: &impl Clock) -> ProjectId {
        let name = self.project_name.trim();
        let name = if name.is_empty() { UNTITLED_PROJECT } else { name };
        let id = match self.current_project {
            Some(id) => id,
            None => store.allocate_project_id(),
        };

        store.save_project(Project {
            id,
            name: name.to_string(),
            last_modified: clock.now(),
            grid: self.grid.clone(),
            overrides: self.overrides.clone(),
        });
        self.current_project = Some(id);
        id
    }

    /// Restore working state from a saved project.
    pub fn load_project(&mut self, project: &Project) {
        self.project_name = project.name.clone();
        self.grid = project.grid.clone();
        self.overrides = project.overrides.clone();
        self.current_project = Some(project.id);
    }
}

/// Run one analysis per parameter over the grid.
///
/// Column index equals the parameter's position in `parameters`. A
/// parameter is skipped — silently — when no calibration resolves for
/// it or when its column holds no valid readings. Returns the empty
/// vector when nothing qualifies; the caller surfaces that as a
/// "no data" condition, not a failure.
pub fn run_batch(
    project: &str,
    parameters: &[Parameter],
    grid: &ReadingGrid,
    overrides: &CalibrationOverrides,
    rows: usize,
    calibrations: &[Calibration],
    timestamp: Timestamp,
) -> Vec<AnalysisResult> {
    let mut results = Vec::new();

    for (col, param) in parameters.iter().enumerate() {
        let Some(snapshot) = calibration::resolve(param.id, overrides, calibrations) else {
            log_debug!("skipping {}: no calibration available", param.name);
            continue;
        };

        let readings = grid.column_readings(col, rows);
        if readings.is_empty() {
            log_debug!("skipping {}: no valid readings", param.name);
            continue;
        }

        let input_unit = grid.unit_for(col, &param.unit);
        results.push(run_analysis(
            project,
            param,
            &snapshot,
            &readings,
            input_unit,
            timestamp,
        ));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationDraft;
    use crate::measurement::Status;
    use crate::time::FixedClock;

    fn store_with_co() -> (SessionStore, ParamId) {
        let mut store = SessionStore::new();
        let co = store.add_parameter("CO", "ppm", 9.0, 15.0);
        store
            .save_calibration(CalibrationDraft {
                param_id: co,
                device: "GasCal 1100".to_string(),
                serial: "A-042".to_string(),
                date: 1_700_000_000_000,
                cert_unc: 0.5,
                k_factor: 2.0,
                resolution: 0.1,
                drift: 0.0,
                accuracy: 0.0,
            })
            .unwrap();
        (store, co)
    }

    #[test]
    fn parameters_without_calibration_produce_no_result() {
        let mut store = SessionStore::new();
        store.add_parameter("CO", "ppm", 9.0, 15.0);

        let mut bench = Workbench::new();
        bench.grid.set_cell(0, 0, "8");

        assert!(bench.run(&store, &FixedClock::new(0)).is_empty());
    }

    #[test]
    fn parameters_without_readings_produce_no_result() {
        let (store, _) = store_with_co();
        let bench = Workbench::new();

        assert!(bench.run(&store, &FixedClock::new(0)).is_empty());
    }

    #[test]
    fn column_index_follows_parameter_order() {
        let (mut store, _) = store_with_co();
        let o3 = store.add_parameter("O3", "ppb", 50.0, 80.0);
        store
            .save_calibration(CalibrationDraft {
                param_id: o3,
                device: "OzoCal 5".to_string(),
                serial: "B-007".to_string(),
                date: 1_700_000_000_000,
                cert_unc: 1.0,
                k_factor: 2.0,
                resolution: 0.5,
                drift: 0.0,
                accuracy: 0.0,
            })
            .unwrap();

        let mut bench = Workbench::new();
        // Column 1 belongs to O3; CO's column 0 stays empty.
        bench.grid.set_cell(1, 0, "60");

        let results = bench.run(&store, &FixedClock::new(5000));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].param, "O3");
        assert_eq!(results[0].status, Status::Warn);
        assert_eq!(results[0].timestamp, 5000);
    }

    #[test]
    fn override_snapshot_feeds_the_result() {
        let (store, co) = store_with_co();

        let mut bench = Workbench::new();
        bench.grid.set_cell(0, 0, "8");
        let mut snapshot = CalibrationSnapshot::custom();
        snapshot.cert_unc = 3.5;
        bench.set_override(co, snapshot);

        let results = bench.run(&store, &FixedClock::new(0));
        assert_eq!(results[0].snapshot.cert_unc, 3.5);

        // Clearing the override falls back to the global record.
        bench.clear_override(co);
        let results = bench.run(&store, &FixedClock::new(0));
        assert_eq!(results[0].snapshot.cert_unc, 0.5);
    }

    #[test]
    fn adopt_historical_tags_history_provenance() {
        let (mut store, co) = store_with_co();
        store
            .save_calibration(CalibrationDraft {
                param_id: co,
                device: "GasCal 1100".to_string(),
                serial: "A-042".to_string(),
                date: 1_710_000_000_000,
                cert_unc: 0.4,
                k_factor: 2.0,
                resolution: 0.1,
                drift: 0.0,
                accuracy: 0.0,
            })
            .unwrap();

        let mut bench = Workbench::new();
        let history = store.calibrations_for(co);
        // Pick the older, now-inactive record.
        bench.adopt_historical(history[1]);

        let adopted = bench.overrides.get(&co).unwrap();
        assert_eq!(adopted.source, crate::calibration::Provenance::History);
        assert_eq!(adopted.cert_unc, 0.5);
    }

    #[test]
    fn per_column_unit_applies_to_that_column() {
        let (store, _) = store_with_co();

        let mut bench = Workbench::new();
        bench.grid.set_unit(0, "ppb");
        bench.grid.set_cell(0, 0, "8000");
        bench.grid.set_cell(0, 1, "9000");
        bench.grid.set_cell(0, 2, "10000");

        let results = bench.run(&store, &FixedClock::new(0));
        assert_eq!(results[0].mean, 9.0);
    }

    #[test]
    fn save_project_reuses_id_and_load_restores_state() {
        let (mut store, co) = store_with_co();
        let mut clock = FixedClock::new(1000);

        let mut bench = Workbench::new();
        bench.project_name = "Stack survey 12".to_string();
        bench.grid.set_cell(0, 0, "8");
        bench.set_override(co, CalibrationSnapshot::custom());

        let id = bench.save_project(&mut store, &clock);
        assert_eq!(bench.current_project(), Some(id));
        assert_eq!(store.projects().len(), 1);

        // A second save of the same session replaces the snapshot.
        clock.advance(500);
        bench.grid.set_cell(0, 1, "9");
        let second = bench.save_project(&mut store, &clock);
        assert_eq!(second, id);
        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.projects()[0].last_modified, 1500);

        // Loading into a fresh workbench restores the grid and overrides.
        let mut restored = Workbench::new();
        restored.load_project(store.project(id).unwrap());
        assert_eq!(restored.project_name, "Stack survey 12");
        assert_eq!(restored.grid.cell(0, 1), Some("9"));
        assert!(restored.overrides.contains_key(&co));
    }

    #[test]
    fn blank_project_name_saves_as_untitled() {
        let (mut store, _) = store_with_co();
        let mut bench = Workbench::new();
        bench.project_name = "   ".to_string();

        let id = bench.save_project(&mut store, &FixedClock::new(0));
        assert_eq!(store.project(id).unwrap().name, "Untitled Project");
    }

    #[test]
    fn reset_clears_state_and_detaches_project() {
        let (mut store, co) = store_with_co();
        let mut bench = Workbench::new();
        bench.grid.set_cell(0, 0, "8");
        bench.set_override(co, CalibrationSnapshot::custom());
        bench.save_project(&mut store, &FixedClock::new(0));

        bench.reset();
        assert!(bench.grid.is_empty());
        assert!(bench.overrides.is_empty());
        assert_eq!(bench.current_project(), None);
        assert_eq!(bench.project_name, "Untitled Project");
    }
}
