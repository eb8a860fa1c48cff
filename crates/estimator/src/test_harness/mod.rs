//! # TestSession: headless integration test harness for the estimator
//!
//! Wraps `bevy::app::App` + `EstimatorPlugin` with a pinned clock so daily
//! summaries are reproducible, and adds builder, query and assertion helpers.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;
use chrono::{DateTime, TimeZone, Utc};

use crate::config::EstimatorConfig;
use crate::routes::DistanceSource;
use crate::session::SessionClock;
use crate::EstimatorPlugin;

/// A headless Bevy App wrapping `EstimatorPlugin` for integration testing.
///
/// Use builder methods to configure the session, submit activities, then call
/// `tick()` and query/assert on the resulting ECS state.
pub struct TestSession {
    app: App,
}

/// Monday 2025-11-03, 12:00 UTC. The default "now" of every test session.
pub fn default_test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap()
}

impl TestSession {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Default config, clock pinned to [`default_test_time`], and a fixed
    /// 5 km distance provider.
    pub fn new() -> Self {
        Self::with_config(EstimatorConfig::default())
    }

    pub fn with_config(config: EstimatorConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Overrides go in BEFORE the plugin so its init_resource calls keep them.
        app.insert_resource(config);
        app.insert_resource(SessionClock::pinned(default_test_time()));
        app.insert_resource(DistanceSource::fixed(5.0));
        app.add_plugins(EstimatorPlugin);

        // First update settles the initial summaries.
        app.update();

        Self { app }
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}
