//! Builder and input methods for `TestSession`.

use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::config::EstimatorConfig;
use crate::electricity::YearMonth;
use crate::factors::ImpactCategory;
use crate::routes::{DistanceProvider, DistanceSource, RouteMode, RouteRequest};
use crate::session::{SessionClock, SubmitElectricityReading, SubmitImpact};

use super::TestSession;

impl TestSession {
    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Replace the distance provider used by route lookups.
    pub fn with_distance(mut self, provider: impl DistanceProvider) -> Self {
        self.app
            .world_mut()
            .insert_resource(DistanceSource::new(provider));
        self
    }

    /// Pin the session clock to `at`.
    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.set_time(at);
        self
    }

    pub fn set_time(&mut self, at: DateTime<Utc>) {
        self.app.world_mut().resource_mut::<SessionClock>().pin(at);
    }

    /// Edit the live config. Summaries refresh on the next tick.
    pub fn update_config(&mut self, edit: impl FnOnce(&mut EstimatorConfig)) {
        edit(&mut self.app.world_mut().resource_mut::<EstimatorConfig>());
    }

    // -----------------------------------------------------------------------
    // Inputs (each is applied on the next tick)
    // -----------------------------------------------------------------------

    pub fn submit(&mut self, category: ImpactCategory, quantity: f64) -> &mut Self {
        self.send(SubmitImpact::new(category, quantity))
    }

    pub fn submit_at(
        &mut self,
        category: ImpactCategory,
        quantity: f64,
        at: DateTime<Utc>,
    ) -> &mut Self {
        self.send(SubmitImpact::new(category, quantity).at(at))
    }

    /// Submit by category key, e.g. `"transport.car"` or `"chicken"`.
    pub fn submit_key(&mut self, key: &str, quantity: f64) -> &mut Self {
        let submission = SubmitImpact::parse(key, quantity)
            .unwrap_or_else(|err| panic!("bad category key {key:?}: {err}"));
        self.send(submission)
    }

    pub fn record_electricity(&mut self, month: Option<YearMonth>, units: f64) -> &mut Self {
        self.send(SubmitElectricityReading { month, units })
    }

    pub fn request_route(&mut self, origin: &str, destination: &str) -> &mut Self {
        self.send(RouteRequest::new(origin, destination))
    }

    pub fn request_route_modes(
        &mut self,
        origin: &str,
        destination: &str,
        modes: &[RouteMode],
    ) -> &mut Self {
        self.send(RouteRequest::new(origin, destination).with_modes(modes))
    }

    pub fn send<E: Event>(&mut self, event: E) -> &mut Self {
        self.app.world_mut().send_event(event);
        self
    }
}
