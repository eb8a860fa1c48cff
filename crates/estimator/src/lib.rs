use bevy::prelude::*;

pub mod aggregate;
pub mod air_quality;
pub mod carbon;
pub mod classify;
pub mod config;
pub mod converters;
pub mod electricity;
pub mod error;
pub mod estimator_sets;
pub mod factors;
pub mod routes;
pub mod session;
pub mod waste;
pub mod water;

#[cfg(test)]
pub mod test_harness;

pub use config::EstimatorConfig;
pub use error::{ConfigError, ImpactError};
pub use estimator_sets::EstimatorSet;
pub use factors::{ImpactCategory, ImpactDomain};

/// Everything a headless estimator session needs: config, the impact log and
/// its summaries, notices and the route comparator.
///
/// Insert an [`EstimatorConfig`] (and optionally a `SessionClock` or a
/// `DistanceSource`) before adding the plugin to override the defaults.
pub struct EstimatorPlugin;

impl Plugin for EstimatorPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                EstimatorSet::Intake,
                EstimatorSet::Compute,
                EstimatorSet::Report,
            )
                .chain(),
        )
        .init_resource::<EstimatorConfig>();

        app.add_plugins((session::SessionPlugin, routes::RoutesPlugin));

        let config = app.world().resource::<EstimatorConfig>();
        info!(
            "Estimator ready: carbon limit {} kg/day, water limit {} L/day",
            config.limits.daily_carbon_kg, config.limits.daily_water_liters
        );
    }
}
