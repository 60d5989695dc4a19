//! Feed ordering: priority ascending, then recency descending.

use std::cmp::Ordering;

use crate::types::Incident;

/// Total-order comparator for the feed.
///
/// Keys, in order:
/// 1. priority rank, ascending (unrecognized ordinals after all recognized);
/// 2. parsed instant, descending (newer first; unparseable datetimes last,
///    as if they were the oldest possible instant);
/// 3. id, ascending.
///
/// The id key makes ties deterministic across runs and independent of the
/// order the sources returned the records in.
pub fn rank_cmp(a: &Incident, b: &Incident) -> Ordering {
  a.priority
    .rank_key()
    .cmp(&b.priority.rank_key())
    .then_with(|| match (a.when, b.when) {
      (Some(ta), Some(tb)) => tb.cmp(&ta),
      (Some(_), None) => Ordering::Less,
      (None, Some(_)) => Ordering::Greater,
      (None, None) => Ordering::Equal,
    })
    .then_with(|| a.id.cmp(&b.id))
}

/// Sort the deduplicated incidents into final feed order.
pub fn rank(mut incidents: Vec<Incident>) -> Vec<Incident> {
  incidents.sort_by(rank_cmp);
  incidents
}
