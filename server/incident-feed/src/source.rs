//! Source traits the pipeline reads from, plus an in-memory snapshot source.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::FeedError;
use crate::types::{IncidentRecord, LocationRecord, Snapshot};

/// Supplies the set of locations to query.
#[async_trait]
pub trait LocationSource: Send + Sync {
  async fn locations(&self) -> Result<Vec<LocationRecord>, FeedError>;
}

/// Supplies the incidents recorded at one location.
#[async_trait]
pub trait IncidentSource: Send + Sync {
  async fn incidents_by_location(
    &self,
    location_id: i64,
  ) -> Result<Vec<IncidentRecord>, FeedError>;
}

/// In-memory source backed by a dataset snapshot.
///
/// Serves the CLI binary, the gateway, and tests. Optional per-call latency
/// simulates a remote collaborator.
#[derive(Debug, Clone)]
pub struct StaticSource {
  snapshot: Snapshot,
  latency: Option<Duration>,
}

impl StaticSource {
  pub fn new(snapshot: Snapshot) -> Self {
    Self {
      snapshot,
      latency: None,
    }
  }

  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = Some(latency);
    self
  }

  async fn simulate_latency(&self) {
    if let Some(d) = self.latency {
      tokio::time::sleep(d).await;
    }
  }
}

#[async_trait]
impl LocationSource for StaticSource {
  async fn locations(&self) -> Result<Vec<LocationRecord>, FeedError> {
    self.simulate_latency().await;
    Ok(self.snapshot.locations.clone())
  }
}

#[async_trait]
impl IncidentSource for StaticSource {
  async fn incidents_by_location(
    &self,
    location_id: i64,
  ) -> Result<Vec<IncidentRecord>, FeedError> {
    self.simulate_latency().await;
    Ok(
      self
        .snapshot
        .incidents
        .get(&location_id)
        .cloned()
        .unwrap_or_default(),
    )
  }
}
