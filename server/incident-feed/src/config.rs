//! Pipeline configuration with sane defaults.

use std::time::Duration;

/// How per-location incident fetches are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOut {
  /// One location at a time, in location order.
  Sequential,
  /// All locations at once; results are gathered back into location order.
  Concurrent,
}

/// Tunable pipeline behavior.
#[derive(Debug, Clone)]
pub struct Config {
  pub fan_out: FanOut,
  /// Cap on one whole run; None disables the cap.
  pub run_timeout: Option<Duration>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      fan_out: FanOut::Concurrent,
      run_timeout: None,
    }
  }
}
