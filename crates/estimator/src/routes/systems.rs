use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
use serde::Serialize;

use super::comparator::compare_routes;
use super::distance::{validate_endpoints, DistanceSource};
use super::types::{RouteComparison, RouteMode};
use crate::error::ImpactError;
use crate::session::Notice;

/// Toast shown when either endpoint is blank.
pub const MISSING_ENDPOINTS_MESSAGE: &str = "Please enter both start and end locations";

/// Ask for a comparison between two places.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub modes: Vec<RouteMode>,
}

impl RouteRequest {
    /// Compare every mode.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            modes: RouteMode::ALL.to_vec(),
        }
    }

    pub fn with_modes(mut self, modes: &[RouteMode]) -> Self {
        self.modes = modes.to_vec();
        self
    }
}

/// An in-flight distance lookup. Lives on its own entity until it resolves.
#[derive(Component)]
pub struct ComputingRoute {
    task: Task<Result<f64, ImpactError>>,
    ticket: u64,
    origin: String,
    destination: String,
    modes: Vec<RouteMode>,
}

/// The most recent completed comparison.
///
/// Requests are numbered as they arrive. A result only replaces the current
/// one when its ticket is newer, so a slow early lookup never overwrites a
/// later answer.
#[derive(Resource, Debug, Clone, Default, Serialize)]
pub struct LatestRoutes {
    pub origin: String,
    pub destination: String,
    pub comparison: Option<RouteComparison>,
    /// Ticket of the request that produced `comparison`.
    pub generation: u64,
    pub last_error: Option<String>,
    /// Lookups started but not yet collected.
    pub in_flight: usize,
    next_ticket: u64,
}

impl LatestRoutes {
    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }
}

/// Validate route requests and start their distance lookups on the
/// `AsyncComputeTaskPool`.
pub fn start_route_lookups(
    mut commands: Commands,
    mut requests: EventReader<RouteRequest>,
    source: Res<DistanceSource>,
    mut latest: ResMut<LatestRoutes>,
    mut notices: EventWriter<Notice>,
) {
    let pool = AsyncComputeTaskPool::get();
    for request in requests.read() {
        if let Err(err) = validate_endpoints(&request.origin, &request.destination) {
            warn!("Rejected route request: {err}");
            latest.last_error = Some(err.to_string());
            notices.send(Notice::error(MISSING_ENDPOINTS_MESSAGE));
            continue;
        }

        let ticket = latest.issue_ticket();
        latest.in_flight += 1;
        let lookup = source.distance_km(&request.origin, &request.destination);
        commands.spawn(ComputingRoute {
            task: pool.spawn(lookup),
            ticket,
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            modes: request.modes.clone(),
        });
        debug!(
            "Route lookup #{ticket} started: {} -> {}",
            request.origin, request.destination
        );
    }
}

/// Poll in-flight lookups and compare modes for each resolved distance.
pub fn collect_route_results(
    mut commands: Commands,
    mut query: Query<(Entity, &mut ComputingRoute)>,
    mut latest: ResMut<LatestRoutes>,
    mut notices: EventWriter<Notice>,
) {
    for (entity, mut computing) in &mut query {
        let Some(result) = block_on(futures_lite::future::poll_once(&mut computing.task)) else {
            continue;
        };
        commands.entity(entity).despawn();
        latest.in_flight = latest.in_flight.saturating_sub(1);

        // A newer lookup already landed; neither its result nor its failure applies.
        if computing.ticket < latest.generation {
            debug!("Discarding stale route lookup #{}", computing.ticket);
            continue;
        }

        let outcome = result.and_then(|km| compare_routes(km, &computing.modes));
        match outcome {
            Ok(comparison) => {
                info!(
                    "Route calculated: {} -> {} = {} km",
                    computing.origin, computing.destination, comparison.distance_km
                );
                notices.send(Notice::success(format!(
                    "Route calculated: {} km",
                    comparison.distance_km
                )));
                latest.origin = computing.origin.clone();
                latest.destination = computing.destination.clone();
                latest.comparison = Some(comparison);
                latest.generation = computing.ticket;
                latest.last_error = None;
            }
            Err(err) => {
                warn!("Route lookup #{} failed: {err}", computing.ticket);
                notices.send(Notice::error(format!("Route lookup failed: {err}")));
                latest.last_error = Some(err.to_string());
            }
        }
    }
}
