//! Binary entrypoint: read one dataset snapshot (JSON) from stdin, write the
//! ranked feed as JSON lines to stdout.
//!
//! Output lines are FeedItems in feed order. Data-quality warnings go to
//! stderr as JSON lines. A fatal failure writes one ErrorOutput line to
//! stdout and exits 1.

use std::io::{self, Read, Write};
use std::sync::Arc;

use incident_feed::types::ErrorOutput;
use incident_feed::{FeedError, FeedPipeline, Snapshot, StaticSource};

#[tokio::main]
async fn main() {
  let mut input = String::new();
  if let Err(e) = io::stdin().read_to_string(&mut input) {
    let _ = writeln!(io::stderr(), "incident-feed: read error: {}", e);
    std::process::exit(1);
  }

  let snapshot: Snapshot = match serde_json::from_str(&input).map_err(FeedError::from) {
    Ok(s) => s,
    Err(e) => {
      let kind = e.kind();
      fail(ErrorOutput::new(e.to_string(), kind));
    }
  };

  let source = Arc::new(StaticSource::new(snapshot));
  let mut pipeline = FeedPipeline::with_defaults(source.clone(), source);

  match pipeline.run().await {
    Ok(report) => {
      let stdout = io::stdout();
      let mut out = io::BufWriter::new(stdout.lock());
      for item in report.items() {
        let _ = serde_json::to_writer(&mut out, &item);
        let _ = writeln!(out);
      }
      let _ = out.flush();

      let stderr = io::stderr();
      let mut warn_out = io::BufWriter::new(stderr.lock());
      for warning in &report.warnings {
        let _ = serde_json::to_writer(&mut warn_out, warning);
        let _ = writeln!(warn_out);
      }
      let _ = warn_out.flush();
    }
    Err(e) => {
      let kind = e.kind();
      fail(ErrorOutput::new(e.to_string(), kind));
    }
  }
}

fn fail(output: ErrorOutput) -> ! {
  let mut out = io::stdout();
  let _ = serde_json::to_writer(&mut out, &output);
  let _ = writeln!(out);
  std::process::exit(1);
}
