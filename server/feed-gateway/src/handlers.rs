//! HTTP handlers for the feed gateway.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  Json,
};
use serde::Serialize;
use std::sync::Arc;

use incident_feed::types::{DataQualityWarning, FeedItem, IncidentRecord, LocationRecord};
use incident_feed::{FeedError, FeedPipeline, IncidentSource, LocationSource};

use crate::state::AppState;

#[derive(Serialize)]
pub struct FeedResponse {
  pub incidents: Vec<FeedItem>,
  pub warnings: Vec<DataQualityWarning>,
}

pub async fn health() -> &'static str {
  "ok"
}

pub async fn locations(
  State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocationRecord>>, StatusCode> {
  match state.source.locations().await {
    Ok(locations) => Ok(Json(locations)),
    Err(e) => {
      eprintln!("locations: source error: {}", e);
      Err(StatusCode::BAD_GATEWAY)
    }
  }
}

pub async fn location_incidents(
  State(state): State<Arc<AppState>>,
  Path(location_id): Path<i64>,
) -> Result<Json<Vec<IncidentRecord>>, StatusCode> {
  match state.source.incidents_by_location(location_id).await {
    Ok(incidents) => Ok(Json(incidents)),
    Err(e) => {
      eprintln!("location_incidents: source error: {}", e);
      Err(StatusCode::BAD_GATEWAY)
    }
  }
}

/// Run the full pipeline and return the ranked feed.
///
/// A fresh pipeline per request keeps run-local state un-shared, so
/// concurrent requests never contend on a Loading state.
pub async fn feed(
  State(state): State<Arc<AppState>>,
) -> Result<Json<FeedResponse>, StatusCode> {
  let mut pipeline = FeedPipeline::new(
    state.source.clone(),
    state.source.clone(),
    state.config.clone(),
  );

  match pipeline.run().await {
    Ok(report) => Ok(Json(FeedResponse {
      incidents: report.items(),
      warnings: report.warnings,
    })),
    Err(e) => {
      eprintln!("feed: pipeline error: {}", e);
      Err(match e {
        FeedError::SourceUnavailable { .. } => StatusCode::BAD_GATEWAY,
        FeedError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
      })
    }
  }
}
