//! Core types for the incident feed (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the sources return)
// ---------------------------------------------------------------------------

/// One location as returned by the location source. Unknown fields are
/// silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
  pub id: i64,
  pub name: String,
}

/// One incident as returned by the incident source for a location.
///
/// `datetime` stays a raw string here; parsing happens at normalization so a
/// bad value degrades to a warning instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
  pub id: String,
  pub name: String,
  pub datetime: String,
  pub priority: i64,
  #[serde(rename = "locationId")]
  pub location_id: i64,
}

/// A full dataset snapshot: the locations plus the incidents each would
/// serve. Input format of the CLI binary and the gateway's data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
  pub locations: Vec<LocationRecord>,
  #[serde(default)]
  pub incidents: HashMap<i64, Vec<IncidentRecord>>,
}

// ---------------------------------------------------------------------------
// Priority (ordinal severity, lower = more severe)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
  High,
  Medium,
  Low,
  /// Ordinal outside the recognized set {1, 2, 3}; kept in the feed with the
  /// "Unknown" label, sorting after every recognized priority.
  Unrecognized(i64),
}

impl Priority {
  pub fn from_ordinal(n: i64) -> Self {
    match n {
      1 => Self::High,
      2 => Self::Medium,
      3 => Self::Low,
      other => Self::Unrecognized(other),
    }
  }

  pub fn ordinal(self) -> i64 {
    match self {
      Self::High => 1,
      Self::Medium => 2,
      Self::Low => 3,
      Self::Unrecognized(n) => n,
    }
  }

  /// Display label understood by the presentation layer.
  pub fn label(self) -> &'static str {
    match self {
      Self::High => "High",
      Self::Medium => "Medium",
      Self::Low => "Low",
      Self::Unrecognized(_) => "Unknown",
    }
  }

  pub fn is_recognized(self) -> bool {
    !matches!(self, Self::Unrecognized(_))
  }

  /// Totally ordered sort key: recognized ordinals first (numerically), then
  /// every unrecognized ordinal (numerically among themselves).
  pub fn rank_key(self) -> (u8, i64) {
    match self {
      Self::Unrecognized(n) => (1, n),
      known => (0, known.ordinal()),
    }
  }
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// Canonical incident after normalization + validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
  pub id: String,
  pub name: String,
  /// Raw datetime as received; passed through to consumers untouched.
  pub datetime: String,
  /// Parsed instant; None when the raw string is not valid RFC 3339.
  pub when: Option<DateTime<Utc>>,
  pub priority: Priority,
  pub location_id: i64,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// One element of the ranked feed, as consumers see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
  pub id: String,
  pub name: String,
  pub datetime: String,
  pub priority: i64,
  pub priority_label: &'static str,
  #[serde(rename = "locationId")]
  pub location_id: i64,
}

impl FeedItem {
  pub fn from_incident(incident: &Incident) -> Self {
    Self {
      id: incident.id.clone(),
      name: incident.name.clone(),
      datetime: incident.datetime.clone(),
      priority: incident.priority.ordinal(),
      priority_label: incident.priority.label(),
      location_id: incident.location_id,
    }
  }
}

/// Non-fatal data problem surfaced alongside a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQualityWarning {
  pub incident_id: String,
  pub field: &'static str,
  pub value: String,
  pub reason: String,
}

/// The result of one successful pipeline run. Owned by the caller; holds no
/// reference back to the sources.
#[derive(Debug, Clone)]
pub struct RunReport {
  /// Ranked incidents: priority ascending, then recency descending.
  pub incidents: Vec<Incident>,
  pub warnings: Vec<DataQualityWarning>,
}

impl RunReport {
  pub fn items(&self) -> Vec<FeedItem> {
    self.incidents.iter().map(FeedItem::from_incident).collect()
  }
}

/// Structured error output for the CLI stream.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  pub kind: FailureKind,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>, kind: FailureKind) -> Self {
    Self {
      error: true,
      message: message.into(),
      kind,
    }
  }
}

// ---------------------------------------------------------------------------
// Pipeline state
// ---------------------------------------------------------------------------

/// Failure classification published in the Failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
  SourceUnavailable,
  InvariantViolation,
  Timeout,
  Busy,
}

/// Lifecycle of the pipeline. Succeeded carries the ranked list, so a stale
/// list can never coexist with Loading or Failed.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
  Idle,
  Loading,
  Succeeded(Vec<Incident>),
  Failed(FailureKind),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn priority_from_ordinal_maps_known_set() {
    assert_eq!(Priority::from_ordinal(1), Priority::High);
    assert_eq!(Priority::from_ordinal(2), Priority::Medium);
    assert_eq!(Priority::from_ordinal(3), Priority::Low);
    assert_eq!(Priority::from_ordinal(7), Priority::Unrecognized(7));
  }

  #[test]
  fn priority_labels_match_display_map() {
    assert_eq!(Priority::High.label(), "High");
    assert_eq!(Priority::Medium.label(), "Medium");
    assert_eq!(Priority::Low.label(), "Low");
    assert_eq!(Priority::Unrecognized(0).label(), "Unknown");
  }

  #[test]
  fn unrecognized_sorts_after_every_recognized_priority() {
    assert!(Priority::Low.rank_key() < Priority::Unrecognized(0).rank_key());
    assert!(Priority::Low.rank_key() < Priority::Unrecognized(99).rank_key());
    assert!(Priority::Unrecognized(4).rank_key() < Priority::Unrecognized(9).rank_key());
  }

  #[test]
  fn incident_record_uses_camel_case_location_key() {
    let json = r#"{"id":"a","name":"Leak","datetime":"2024-01-01T10:00:00Z","priority":2,"locationId":1}"#;
    let record: IncidentRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.location_id, 1);
    assert_eq!(record.priority, 2);
  }

  #[test]
  fn snapshot_incidents_default_to_empty() {
    let json = r#"{"locations":[{"id":1,"name":"Plant A"}]}"#;
    let snapshot: Snapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snapshot.locations.len(), 1);
    assert!(snapshot.incidents.is_empty());
  }
}
