//! Fan-out aggregation: every location's incidents, concatenated in location
//! order.

use futures::future;

use crate::config::FanOut;
use crate::error::FeedError;
use crate::source::{IncidentSource, LocationSource};
use crate::types::IncidentRecord;

/// Fetch the locations once, then every location's incidents.
///
/// Output preserves location order and, within a location, source order.
/// Any single fetch failure fails the whole aggregation; there is no
/// per-location suppression. No dedup or sorting happens here.
pub async fn collect(
  locations: &dyn LocationSource,
  incidents: &dyn IncidentSource,
  fan_out: FanOut,
) -> Result<Vec<IncidentRecord>, FeedError> {
  let locs = locations.locations().await?;

  match fan_out {
    FanOut::Sequential => {
      let mut all = Vec::new();
      for loc in &locs {
        all.extend(incidents.incidents_by_location(loc.id).await?);
      }
      Ok(all)
    }
    FanOut::Concurrent => {
      // try_join_all yields results in input (location) order regardless of
      // completion order, so the ordering contract holds without a re-sort.
      let fetches = locs
        .iter()
        .map(|loc| incidents.incidents_by_location(loc.id));
      let per_location = future::try_join_all(fetches).await?;
      Ok(per_location.into_iter().flatten().collect())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use std::collections::HashMap;
  use std::time::Duration;

  use crate::types::LocationRecord;

  struct FixedLocations(Vec<LocationRecord>);

  #[async_trait]
  impl LocationSource for FixedLocations {
    async fn locations(&self) -> Result<Vec<LocationRecord>, FeedError> {
      Ok(self.0.clone())
    }
  }

  struct FailingLocations;

  #[async_trait]
  impl LocationSource for FailingLocations {
    async fn locations(&self) -> Result<Vec<LocationRecord>, FeedError> {
      Err(FeedError::source("locations", "connection refused"))
    }
  }

  /// Scripted incident source: per-location records, optional per-location
  /// delay (to make completion order differ from location order), optional
  /// failing location.
  struct ScriptedIncidents {
    by_location: HashMap<i64, Vec<IncidentRecord>>,
    delay_ms: HashMap<i64, u64>,
    fail_for: Option<i64>,
  }

  #[async_trait]
  impl IncidentSource for ScriptedIncidents {
    async fn incidents_by_location(
      &self,
      location_id: i64,
    ) -> Result<Vec<IncidentRecord>, FeedError> {
      if let Some(&ms) = self.delay_ms.get(&location_id) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
      }
      if self.fail_for == Some(location_id) {
        return Err(FeedError::source("incidents", "timeout"));
      }
      Ok(self.by_location.get(&location_id).cloned().unwrap_or_default())
    }
  }

  fn record(id: &str, location_id: i64) -> IncidentRecord {
    IncidentRecord {
      id: id.into(),
      name: format!("incident {}", id),
      datetime: "2024-01-01T10:00:00Z".into(),
      priority: 2,
      location_id,
    }
  }

  fn locations(ids: &[i64]) -> FixedLocations {
    FixedLocations(
      ids
        .iter()
        .map(|&id| LocationRecord {
          id,
          name: format!("location {}", id),
        })
        .collect(),
    )
  }

  fn scripted(entries: &[(i64, &[&str])]) -> ScriptedIncidents {
    ScriptedIncidents {
      by_location: entries
        .iter()
        .map(|&(loc, ids)| (loc, ids.iter().map(|id| record(id, loc)).collect()))
        .collect(),
      delay_ms: HashMap::new(),
      fail_for: None,
    }
  }

  fn ids(records: &[IncidentRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
  }

  #[tokio::test]
  async fn sequential_preserves_location_and_source_order() {
    let incidents = scripted(&[(1, &["a", "b"]), (2, &["c"])]);
    let all = collect(&locations(&[1, 2]), &incidents, FanOut::Sequential)
      .await
      .unwrap();
    assert_eq!(ids(&all), vec!["a", "b", "c"]);
  }

  #[tokio::test(start_paused = true)]
  async fn concurrent_gathers_back_into_location_order() {
    // Location 1 completes last; output must still lead with its incidents.
    let mut incidents = scripted(&[(1, &["a"]), (2, &["b"]), (3, &["c"])]);
    incidents.delay_ms = HashMap::from([(1, 50), (2, 5), (3, 1)]);

    let all = collect(&locations(&[1, 2, 3]), &incidents, FanOut::Concurrent)
      .await
      .unwrap();
    assert_eq!(ids(&all), vec!["a", "b", "c"]);
  }

  #[tokio::test]
  async fn location_source_failure_is_fatal() {
    let incidents = scripted(&[(1, &["a"])]);
    let err = collect(&FailingLocations, &incidents, FanOut::Sequential)
      .await
      .unwrap_err();
    assert!(matches!(err, FeedError::SourceUnavailable { .. }));
  }

  #[tokio::test]
  async fn one_failing_location_fails_the_whole_aggregation() {
    for fan_out in [FanOut::Sequential, FanOut::Concurrent] {
      let mut incidents = scripted(&[(1, &["a"]), (2, &["b"])]);
      incidents.fail_for = Some(2);
      let err = collect(&locations(&[1, 2]), &incidents, fan_out)
        .await
        .unwrap_err();
      assert!(matches!(err, FeedError::SourceUnavailable { .. }));
    }
  }

  #[tokio::test]
  async fn zero_locations_yields_empty_aggregation() {
    let incidents = scripted(&[]);
    let all = collect(&locations(&[]), &incidents, FanOut::Concurrent)
      .await
      .unwrap();
    assert!(all.is_empty());
  }
}
