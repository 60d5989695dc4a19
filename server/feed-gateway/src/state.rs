//! Shared handler state.

use std::sync::Arc;

use incident_feed::{Config, StaticSource};

pub struct AppState {
  pub source: Arc<StaticSource>,
  pub config: Config,
}
