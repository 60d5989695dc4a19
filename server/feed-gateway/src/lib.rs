//! Incident Feed Gateway
//!
//! HTTP service that serves the ranked incident feed over a snapshot
//! dataset. Bind to 127.0.0.1 by default (internal only).

mod handlers;
mod state;

pub use handlers::{feed, health, location_incidents, locations};
pub use state::AppState;
