//! Binary entrypoint for the feed gateway.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use feed_gateway::AppState;
use incident_feed::{Config, Snapshot, StaticSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let data_path = std::env::var("FEED_DATA").expect("FEED_DATA must be set");
  let port: u16 = std::env::var("PORT")
    .unwrap_or_else(|_| "5006".into())
    .parse()
    .expect("PORT must be a valid u16");

  let raw = std::fs::read_to_string(&data_path)?;
  let snapshot: Snapshot = serde_json::from_str(&raw)?;
  let state = Arc::new(AppState {
    source: Arc::new(StaticSource::new(snapshot)),
    config: Config::default(),
  });

  let app = Router::new()
    .route("/health", get(feed_gateway::health))
    .route("/locations", get(feed_gateway::locations))
    .route(
      "/locations/:id/incidents",
      get(feed_gateway::location_incidents),
    )
    .route("/feed", get(feed_gateway::feed))
    .layer(CorsLayer::permissive())
    .with_state(state);

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  println!("feed-gateway listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
