//! Session state: the impact log, summaries and notices of one user session,
//! hosted in a headless Bevy `App`.
//!
//! ## Flow per update
//!
//! | Phase   | Systems                                                    |
//! |---------|------------------------------------------------------------|
//! | Intake  | `record_submissions`, `record_electricity_readings`        |
//! | Compute | `refresh_summaries`                                        |
//! | Report  | `report_band_changes`, then `collect_notices`              |
//!
//! Summaries are derived values. They are recomputed from the log only when
//! the log, the config or the session clock changed, and never edited
//! directly.
//!
//! ## Events
//!
//! - in: `SubmitImpact`, `SubmitElectricityReading` (and `RouteRequest`,
//!   handled by the routes plugin)
//! - out: `ImpactRecorded`, `BudgetBandChanged`, `Notice`

use bevy::prelude::*;

pub mod clock;
pub mod events;
pub mod notices;
pub mod protocol;
pub mod systems;

mod tests;

pub use clock::SessionClock;
pub use events::{
    BudgetBandChanged, BudgetKind, ImpactRecorded, SubmitElectricityReading, SubmitImpact,
};
pub use notices::{collect_notices, Notice, NoticeLevel, NoticeLog};
pub use protocol::{
    make_response, ResponsePayload, SessionCommand, SessionReport, SessionResponse,
    PROTOCOL_VERSION,
};
pub use systems::{
    record_electricity_readings, record_submissions, refresh_summaries, report_band_changes,
    BudgetBands,
};

use crate::aggregate::ImpactLog;
use crate::carbon::CarbonSummary;
use crate::electricity::ElectricityHistory;
use crate::water::WaterSummary;
use crate::waste::WasteSummary;
use crate::EstimatorSet;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionClock>()
            .init_resource::<ImpactLog>()
            .init_resource::<ElectricityHistory>()
            .init_resource::<CarbonSummary>()
            .init_resource::<WaterSummary>()
            .init_resource::<WasteSummary>()
            .init_resource::<BudgetBands>()
            .init_resource::<NoticeLog>()
            .add_event::<SubmitImpact>()
            .add_event::<SubmitElectricityReading>()
            .add_event::<ImpactRecorded>()
            .add_event::<BudgetBandChanged>()
            .add_event::<Notice>()
            .add_systems(
                Update,
                (
                    (record_submissions, record_electricity_readings)
                        .in_set(EstimatorSet::Intake),
                    refresh_summaries.in_set(EstimatorSet::Compute),
                    (report_band_changes, collect_notices)
                        .chain()
                        .in_set(EstimatorSet::Report),
                ),
            );
    }
}
