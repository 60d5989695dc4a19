//! Normalize wire records into canonical incidents.
//!
//! Fatal: empty id (the uniqueness contract cannot be upheld). Non-fatal,
//! warned: unparseable datetime (sorts last within its priority band) and
//! priority ordinal outside {1, 2, 3} (labeled Unknown, sorts after every
//! recognized priority).

use chrono::{DateTime, Utc};

use crate::error::FeedError;
use crate::types::{DataQualityWarning, Incident, IncidentRecord, Priority};

/// Convert aggregated wire records into canonical incidents, preserving
/// input order and collecting data-quality warnings.
pub fn normalize_all(
  records: &[IncidentRecord],
) -> Result<(Vec<Incident>, Vec<DataQualityWarning>), FeedError> {
  let mut incidents = Vec::with_capacity(records.len());
  let mut warnings = Vec::new();
  for record in records {
    incidents.push(normalize(record, &mut warnings)?);
  }
  Ok((incidents, warnings))
}

fn normalize(
  record: &IncidentRecord,
  warnings: &mut Vec<DataQualityWarning>,
) -> Result<Incident, FeedError> {
  if record.id.trim().is_empty() {
    return Err(FeedError::invariant("id", "must not be empty"));
  }

  let when = match DateTime::parse_from_rfc3339(&record.datetime) {
    Ok(dt) => Some(dt.with_timezone(&Utc)),
    Err(e) => {
      warnings.push(DataQualityWarning {
        incident_id: record.id.clone(),
        field: "datetime",
        value: record.datetime.clone(),
        reason: format!("invalid RFC3339: {}", e),
      });
      None
    }
  };

  let priority = Priority::from_ordinal(record.priority);
  if !priority.is_recognized() {
    warnings.push(DataQualityWarning {
      incident_id: record.id.clone(),
      field: "priority",
      value: record.priority.to_string(),
      reason: "ordinal outside 1..=3, labeled Unknown".to_string(),
    });
  }

  Ok(Incident {
    id: record.id.clone(),
    name: record.name.clone(),
    datetime: record.datetime.clone(),
    when,
    priority,
    location_id: record.location_id,
  })
}
