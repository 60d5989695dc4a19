//! Pipeline coordinator: aggregate → normalize → dedupe → rank, with
//! explicit lifecycle state.

use std::sync::Arc;

use crate::aggregate;
use crate::config::Config;
use crate::dedupe;
use crate::error::FeedError;
use crate::normalize;
use crate::rank;
use crate::source::{IncidentSource, LocationSource};
use crate::types::{PipelineState, RunReport};

/// The feed pipeline. One run() produces the full ranked feed or fails as a
/// whole; no partial list is ever published.
pub struct FeedPipeline {
  locations: Arc<dyn LocationSource>,
  incidents: Arc<dyn IncidentSource>,
  config: Config,
  state: PipelineState,
}

impl FeedPipeline {
  pub fn new(
    locations: Arc<dyn LocationSource>,
    incidents: Arc<dyn IncidentSource>,
    config: Config,
  ) -> Self {
    Self {
      locations,
      incidents,
      config,
      state: PipelineState::Idle,
    }
  }

  pub fn with_defaults(
    locations: Arc<dyn LocationSource>,
    incidents: Arc<dyn IncidentSource>,
  ) -> Self {
    Self::new(locations, incidents, Config::default())
  }

  /// Current lifecycle state. Succeeded carries the last ranked list.
  pub fn state(&self) -> &PipelineState {
    &self.state
  }

  /// Run the full pipeline once.
  ///
  /// Rejected with AlreadyRunning (state untouched) while a run is in
  /// flight. On success the state becomes Succeeded with the ranked list;
  /// on any failure — including an elapsed `Config::run_timeout` — it
  /// becomes Failed with the error's classification. A failed run never
  /// publishes a partial list.
  pub async fn run(&mut self) -> Result<RunReport, FeedError> {
    if matches!(self.state, PipelineState::Loading) {
      return Err(FeedError::AlreadyRunning);
    }
    self.state = PipelineState::Loading;

    let staged = self.execute();
    let result = match self.config.run_timeout {
      Some(cap) => match tokio::time::timeout(cap, staged).await {
        Ok(result) => result,
        Err(_) => Err(FeedError::Timeout(cap.as_millis() as u64)),
      },
      None => staged.await,
    };

    match result {
      Ok(report) => {
        self.state = PipelineState::Succeeded(report.incidents.clone());
        Ok(report)
      }
      Err(err) => {
        self.state = PipelineState::Failed(err.kind());
        Err(err)
      }
    }
  }

  async fn execute(&self) -> Result<RunReport, FeedError> {
    let raw = aggregate::collect(
      self.locations.as_ref(),
      self.incidents.as_ref(),
      self.config.fan_out,
    )
    .await?;
    let (incidents, warnings) = normalize::normalize_all(&raw)?;
    let unique = dedupe::dedupe(incidents);
    let ranked = rank::rank(unique);
    Ok(RunReport {
      incidents: ranked,
      warnings,
    })
  }
}
