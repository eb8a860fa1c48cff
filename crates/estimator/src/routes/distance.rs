//! Distance lookup between two named places.
//!
//! Real geocoding is out of scope; [`MockDistanceProvider`] stands in for it
//! with a seeded pseudo-random distance and an optional simulated latency.
//! Lookups are futures so the session layer can run them on the async task
//! pool and keep ticking while they are pending.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::MockDistanceConfig;
use crate::error::ImpactError;

/// Boxed, sendable distance lookup in km.
pub type DistanceFuture = Pin<Box<dyn Future<Output = Result<f64, ImpactError>> + Send + 'static>>;

/// Source of trip distances.
pub trait DistanceProvider: Send + Sync + 'static {
    fn distance_km(&self, origin: &str, destination: &str) -> DistanceFuture;
}

/// Both endpoints must contain something other than whitespace.
pub fn validate_endpoints(origin: &str, destination: &str) -> Result<(), ImpactError> {
    if origin.trim().is_empty() {
        return Err(ImpactError::invalid_text("origin", origin, "must not be blank"));
    }
    if destination.trim().is_empty() {
        return Err(ImpactError::invalid_text(
            "destination",
            destination,
            "must not be blank",
        ));
    }
    Ok(())
}

fn ready(result: Result<f64, ImpactError>) -> DistanceFuture {
    Box::pin(async move { result })
}

// =============================================================================
// Mock provider
// =============================================================================

/// Uniform random distance in `[min_km, max_km]`, rounded to 0.1 km.
///
/// The sequence of distances depends only on the seed and the order of
/// lookups, never on the place names.
pub struct MockDistanceProvider {
    rng: Mutex<ChaCha8Rng>,
    min_km: f64,
    max_km: f64,
    pending_polls: u32,
}

impl MockDistanceProvider {
    pub fn new(config: &MockDistanceConfig) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(config.seed)),
            min_km: config.min_km,
            max_km: config.max_km,
            pending_polls: config.pending_polls,
        }
    }

    fn sample(&self) -> f64 {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let raw: f64 = rng.gen_range(self.min_km..=self.max_km);
        ((raw * 10.0).round() / 10.0).clamp(self.min_km, self.max_km)
    }
}

impl Default for MockDistanceProvider {
    fn default() -> Self {
        Self::new(&MockDistanceConfig::default())
    }
}

impl DistanceProvider for MockDistanceProvider {
    fn distance_km(&self, origin: &str, destination: &str) -> DistanceFuture {
        if let Err(e) = validate_endpoints(origin, destination) {
            return ready(Err(e));
        }
        let km = self.sample();
        let polls = self.pending_polls;
        Box::pin(async move {
            for _ in 0..polls {
                futures_lite::future::yield_now().await;
            }
            Ok(km)
        })
    }
}

// =============================================================================
// Fixed provider
// =============================================================================

/// Always answers with the same distance. Used by tests and the demo.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistanceProvider {
    pub km: f64,
}

impl DistanceProvider for FixedDistanceProvider {
    fn distance_km(&self, origin: &str, destination: &str) -> DistanceFuture {
        ready(validate_endpoints(origin, destination).map(|()| self.km))
    }
}

// =============================================================================
// Resource
// =============================================================================

/// The provider used by the session's route lookups.
#[derive(Resource, Clone)]
pub struct DistanceSource(pub Arc<dyn DistanceProvider>);

impl DistanceSource {
    pub fn new(provider: impl DistanceProvider) -> Self {
        Self(Arc::new(provider))
    }

    pub fn mock(config: &MockDistanceConfig) -> Self {
        Self::new(MockDistanceProvider::new(config))
    }

    pub fn fixed(km: f64) -> Self {
        Self::new(FixedDistanceProvider { km })
    }

    pub fn distance_km(&self, origin: &str, destination: &str) -> DistanceFuture {
        self.0.distance_km(origin, destination)
    }
}

impl FromWorld for DistanceSource {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<crate::config::EstimatorConfig>()
            .map(|c| c.mock_distance)
            .unwrap_or_default();
        Self::mock(&config)
    }
}
