//! Measurement-uncertainty engine for laboratory air-quality analysis
//!
//! Computes combined and expanded measurement uncertainty per the GUM
//! method for repeated instrument readings, resolves which calibration
//! data applies to each parameter, and classifies results against
//! warn/critical limits — the calculation core of an ISO 17025-style
//! analysis workbench.
//!
//! The core is synchronous and performs no I/O: callers hand it fully
//! formed in-memory state and receive new values back. Degenerate
//! input (junk cells, unknown units, missing calibrations) degrades
//! silently to a smaller — possibly empty — result set instead of
//! raising.
//!
//! ```
//! use metrolab_core::{CalibrationDraft, FixedClock, SessionStore, Status, Workbench};
//!
//! let mut store = SessionStore::new();
//! let co = store.add_parameter("CO", "ppm", 9.0, 15.0);
//! store.save_calibration(CalibrationDraft {
//!     param_id: co,
//!     device: "GasCal 1100".into(),
//!     serial: "A-042".into(),
//!     date: 1_700_000_000_000,
//!     cert_unc: 0.5,
//!     k_factor: 2.0,
//!     resolution: 0.1,
//!     drift: 0.0,
//!     accuracy: 0.0,
//! }).unwrap();
//!
//! let mut bench = Workbench::new();
//! bench.grid.set_cell(0, 0, "8");
//! bench.grid.set_cell(0, 1, "9");
//! bench.grid.set_cell(0, 2, "10");
//!
//! let results = bench.run(&store, &FixedClock::new(1_700_000_000_000));
//! assert_eq!(results[0].mean, 9.0);
//! assert_eq!(results[0].status, Status::Pass);
//!
//! store.add_results(results);
//! assert_eq!(store.results().len(), 1);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod calibration;
pub mod constants;
pub mod errors;
pub mod grid;
pub mod measurement;
pub mod stats;
pub mod store;
pub mod time;
pub mod units;
pub mod workbench;

// Public API
pub use calibration::{
    Calibration, CalibrationDraft, CalibrationId, CalibrationOverrides, CalibrationSnapshot,
    Provenance,
};
pub use errors::{StoreError, StoreResult};
pub use grid::ReadingGrid;
pub use measurement::{run_analysis, AnalysisResult, ParamId, Parameter, Status, UncertaintyBudget};
pub use store::{ResultId, ResultRecord, SessionStore};
pub use time::{Clock, FixedClock, Timestamp};
pub use workbench::{run_batch, Project, ProjectId, Workbench};

#[cfg(feature = "std")]
pub use time::SystemClock;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
