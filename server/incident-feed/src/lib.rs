//! Incident feed aggregation core.
//!
//! Retrieves incident records from every known location, collapses
//! duplicates by id (last write wins), and ranks the result by priority
//! ascending, then recency descending. One async run() with explicit
//! Idle/Loading/Succeeded/Failed state; all-or-nothing failure semantics.
//!
//! No DB, no retries, no transport; sources are injected behind async
//! traits.

pub mod aggregate;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod source;
pub mod types;

pub use config::{Config, FanOut};
pub use error::FeedError;
pub use pipeline::FeedPipeline;
pub use source::{IncidentSource, LocationSource, StaticSource};
pub use types::{FeedItem, Incident, PipelineState, RunReport, Snapshot};
