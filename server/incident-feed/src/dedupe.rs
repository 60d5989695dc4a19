//! Collapse to one incident per id (last write wins).

use std::collections::HashMap;

use crate::types::Incident;

/// Later occurrences overwrite earlier ones for the same id.
///
/// Output order is unspecified; the ranker establishes all ordering
/// downstream. Empty in, empty out.
pub fn dedupe(incidents: Vec<Incident>) -> Vec<Incident> {
  let mut by_id: HashMap<String, Incident> = HashMap::with_capacity(incidents.len());
  for incident in incidents {
    by_id.insert(incident.id.clone(), incident);
  }
  by_id.into_values().collect()
}
