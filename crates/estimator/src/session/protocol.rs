//! JSON-lines protocol for the headless session runner.
//!
//! Each stdin line is one [`SessionCommand`] tagged by `"cmd"`; each stdout
//! line is one [`SessionResponse`] carrying `"protocol_version"` and a
//! `"type"`-tagged payload. The I/O loop itself lives in the app crate.

use bevy::prelude::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::clock::SessionClock;
use super::notices::{Notice, NoticeLog};
use crate::aggregate::{ImpactEntry, ImpactLog};
use crate::air_quality::AirQualityReport;
use crate::carbon::CarbonSummary;
use crate::config::EstimatorConfig;
use crate::electricity::{ElectricityHistory, ElectricityOverview, MonthlyUsage, YearMonth};
use crate::error::ImpactError;
use crate::routes::{LatestRoutes, RouteComparison, RouteMode};
use crate::water::WaterSummary;
use crate::waste::WasteSummary;

/// Bump when the command or response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Commands (stdin -> session)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Log an activity, e.g. `{"cmd":"submit","category":"car","quantity":10}`.
    Submit {
        category: String,
        quantity: f64,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    /// Record a monthly meter reading.
    Electricity {
        #[serde(default)]
        month: Option<YearMonth>,
        units: f64,
    },
    /// Compare travel modes between two places.
    Route {
        origin: String,
        destination: String,
        #[serde(default)]
        modes: Option<Vec<RouteMode>>,
    },
    /// Report every summary.
    Summary,
    /// Assess an AQI reading.
    AirQuality { aqi: f64 },
    /// Pin the session clock.
    SetTime { at: DateTime<Utc> },
    /// Advance the app by `ticks` updates.
    Step {
        #[serde(default = "default_ticks")]
        ticks: u32,
    },
    Quit,
}

fn default_ticks() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Responses (session -> stdout)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePayload {
    Ready,
    Recorded {
        entry: ImpactEntry,
        notices: Vec<Notice>,
    },
    ElectricityRecorded {
        usage: MonthlyUsage,
        notices: Vec<Notice>,
    },
    Routes {
        origin: String,
        destination: String,
        comparison: RouteComparison,
        notices: Vec<Notice>,
    },
    Summary {
        report: Box<SessionReport>,
    },
    AirQuality {
        report: AirQualityReport,
    },
    Ok,
    StepComplete {
        ticks: u32,
        notices: Vec<Notice>,
    },
    Error {
        message: String,
        notices: Vec<Notice>,
    },
    Goodbye,
}

pub fn make_response(payload: ResponsePayload) -> SessionResponse {
    SessionResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

pub fn error_response(message: impl Into<String>, notices: Vec<Notice>) -> SessionResponse {
    make_response(ResponsePayload::Error {
        message: message.into(),
        notices,
    })
}

// ---------------------------------------------------------------------------
// Session report
// ---------------------------------------------------------------------------

/// Everything the dashboard shows, in one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub today: NaiveDate,
    pub entries: usize,
    pub carbon: CarbonSummary,
    pub water: WaterSummary,
    pub waste: WasteSummary,
    pub electricity: ElectricityOverview,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<RouteComparison>,
}

impl SessionReport {
    /// Snapshot the session resources. Summaries reflect the last update.
    pub fn collect(world: &World) -> Result<Self, ImpactError> {
        let config = world
            .get_resource::<EstimatorConfig>()
            .cloned()
            .unwrap_or_default();
        let electricity = world
            .get_resource::<ElectricityHistory>()
            .cloned()
            .unwrap_or_default()
            .overview(&config.tariff, config.limits.monthly_electricity_budget)?;

        Ok(Self {
            today: world
                .get_resource::<SessionClock>()
                .copied()
                .unwrap_or_default()
                .today(),
            entries: world.get_resource::<ImpactLog>().map_or(0, |l| l.len()),
            carbon: world
                .get_resource::<CarbonSummary>()
                .cloned()
                .unwrap_or_default(),
            water: world
                .get_resource::<WaterSummary>()
                .cloned()
                .unwrap_or_default(),
            waste: world
                .get_resource::<WasteSummary>()
                .cloned()
                .unwrap_or_default(),
            electricity,
            routes: world
                .get_resource::<LatestRoutes>()
                .and_then(|r| r.comparison.clone()),
        })
    }
}

/// Notices received since `seen`, for attaching to a response.
pub fn notices_since(world: &World, seen: usize) -> Vec<Notice> {
    world
        .get_resource::<NoticeLog>()
        .map(|log| log.since(seen).to_vec())
        .unwrap_or_default()
}
