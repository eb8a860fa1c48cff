//! Route comparator: CO2, cost, time and eco score per travel mode.
//!
//! ## Mode profiles
//!
//! | Mode    | CO2 (g/km) | Cost (/km) | Speed (km/h) |
//! |---------|-----------:|-----------:|-------------:|
//! | Car     | 120        | 12         | 25           |
//! | Bus     | 45         | 2          | 18           |
//! | Metro   | 30         | 3          | 35           |
//! | Bicycle | 0          | 0          | 15           |
//! | Walking | 0          | 0          | 5            |
//!
//! ## Evaluation
//!
//! For a distance `d` km each mode gets `co2 = round(g_per_km * d)`,
//! `cost = round(cost_per_km * d)` and `time = round(d / speed * 60)` minutes.
//! The eco score is `10 - floor(g_per_km / 15)`, minus 2 for trips over an
//! hour, clamped to 1..=10.
//!
//! ## Recommendation
//!
//! Among options of at most 60 minutes: highest score, then lowest cost, then
//! earliest position. When every option takes longer than an hour the first
//! requested mode is recommended. Exactly one option is recommended.
//!
//! ## Session integration
//!
//! `RouteRequest` events start a distance lookup on the async task pool. The
//! result lands in `LatestRoutes` a tick or more later, together with a
//! success or error `Notice`.

use bevy::prelude::*;

pub mod comparator;
pub mod constants;
pub mod distance;
pub mod systems;
pub mod types;


pub use comparator::{compare_profiles, compare_routes, eco_score, evaluate_mode};
pub use distance::{
    validate_endpoints, DistanceFuture, DistanceProvider, DistanceSource, FixedDistanceProvider,
    MockDistanceProvider,
};
pub use systems::{
    collect_route_results, start_route_lookups, LatestRoutes, RouteRequest,
    MISSING_ENDPOINTS_MESSAGE,
};
pub use types::{ModeProfile, RouteComparison, RouteMode, RouteOption};

use crate::error::ImpactError;
use crate::EstimatorSet;

/// Resolve a distance with `provider` and compare `modes` over it.
pub async fn lookup_and_compare(
    provider: &dyn DistanceProvider,
    origin: &str,
    destination: &str,
    modes: &[RouteMode],
) -> Result<RouteComparison, ImpactError> {
    let km = provider.distance_km(origin, destination).await?;
    compare_routes(km, modes)
}

// =============================================================================
// Plugin
// =============================================================================

pub struct RoutesPlugin;

impl Plugin for RoutesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LatestRoutes>()
            .init_resource::<DistanceSource>()
            .add_event::<RouteRequest>()
            .add_systems(
                Update,
                (
                    start_route_lookups.in_set(EstimatorSet::Intake),
                    collect_route_results.in_set(EstimatorSet::Compute),
                ),
            );
    }
}
