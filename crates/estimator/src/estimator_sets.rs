//! Deterministic session ordering via `SystemSet` phases.
//!
//! Every estimator system runs in the `Update` schedule inside one of these
//! sets, so a submission sent before a tick is recorded, summarized and
//! reported within that same tick.
//!
//! ```text
//! Intake  →  Compute  →  Report
//! ```
//!
//! * **Intake** – Read submission events, convert them and append to the
//!   log; start distance lookups.
//! * **Compute** – Recompute summaries from the log when it or the config
//!   changed; collect finished distance lookups.
//! * **Report** – Emit band-change events and gather notices. Only reads
//!   state written by the earlier phases.

use bevy::prelude::*;

/// Ordered phases for estimator systems in the `Update` schedule.
///
/// Configured as a chain by [`crate::EstimatorPlugin`]. Systems within the
/// same phase may add `.after()` / `.before()` constraints between themselves.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstimatorSet {
    /// Submissions in: impact entries, electricity readings, route requests.
    Intake,
    /// Summaries and route results.
    Compute,
    /// Band changes and notices out.
    Report,
}
