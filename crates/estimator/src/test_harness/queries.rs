//! Query and tick methods for `TestSession`.

use bevy::prelude::*;

use crate::aggregate::ImpactLog;
use crate::carbon::CarbonSummary;
use crate::electricity::ElectricityHistory;
use crate::routes::LatestRoutes;
use crate::session::{BudgetBands, Notice, NoticeLog, SessionReport};
use crate::water::WaterSummary;
use crate::waste::WasteSummary;

use super::TestSession;

/// Upper bound on updates spent waiting for route lookups.
const MAX_SETTLE_TICKS: u32 = 500;

impl TestSession {
    // -----------------------------------------------------------------------
    // Ticking
    // -----------------------------------------------------------------------

    /// Run N full app updates.
    ///
    /// A `yield_now()` between updates gives `AsyncComputeTaskPool` threads a
    /// chance to progress when the test drives the app in a tight loop.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
            std::thread::yield_now();
        }
    }

    /// Tick until no route lookup is in flight. Panics if lookups never settle.
    pub fn settle_routes(&mut self) {
        // Requests sent since the last tick are only picked up by an update.
        self.tick(1);
        for _ in 0..MAX_SETTLE_TICKS {
            if self.latest_routes().in_flight == 0 {
                return;
            }
            self.tick(1);
        }
        panic!(
            "route lookups still in flight after {MAX_SETTLE_TICKS} ticks: {}",
            self.latest_routes().in_flight
        );
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn log(&self) -> &ImpactLog {
        self.resource::<ImpactLog>()
    }

    pub fn carbon(&self) -> &CarbonSummary {
        self.resource::<CarbonSummary>()
    }

    pub fn water(&self) -> &WaterSummary {
        self.resource::<WaterSummary>()
    }

    pub fn waste(&self) -> &WasteSummary {
        self.resource::<WasteSummary>()
    }

    pub fn electricity(&self) -> &ElectricityHistory {
        self.resource::<ElectricityHistory>()
    }

    pub fn latest_routes(&self) -> &LatestRoutes {
        self.resource::<LatestRoutes>()
    }

    pub fn bands(&self) -> &BudgetBands {
        self.resource::<BudgetBands>()
    }

    pub fn notices(&self) -> &[Notice] {
        self.resource::<NoticeLog>().notices()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.resource::<NoticeLog>().last()
    }

    pub fn report(&self) -> SessionReport {
        SessionReport::collect(self.app.world()).unwrap()
    }

    /// Drain every pending event of type `E`.
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        self.app
            .world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }
}
