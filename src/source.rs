use crate::aircraft::{parse_entries, snapshot_entries, AircraftRecord};
use crate::error::{source_unavailable, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Where snapshots come from
pub trait DataSource {
    /// Fetch the current set of tracked aircraft. Failure means the source is
    /// unavailable; individual bad entries are dropped, not reported.
    fn fetch_snapshot(&self) -> Result<Vec<AircraftRecord>>;
}

/// dump1090 JSON endpoint over HTTP
pub struct HttpSource {
    agent: ureq::Agent,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DataSource for HttpSource {
    fn fetch_snapshot(&self) -> Result<Vec<AircraftRecord>> {
        let response = self
            .agent
            .get(&self.url)
            .call()
            .map_err(|e| source_unavailable(&self.url, e))?;

        let doc: Value = response
            .into_json()
            .map_err(|e| source_unavailable(&self.url, format!("invalid JSON: {}", e)))?;

        let records = decode_snapshot(&doc).ok_or_else(|| {
            source_unavailable(&self.url, "JSON is neither an aircraft list nor an object with one")
        })?;
        debug!(url = %self.url, count = records.len(), "snapshot fetched");
        Ok(records)
    }
}

/// Parse a snapshot document; None if it has no recognizable aircraft list
pub fn decode_snapshot(doc: &Value) -> Option<Vec<AircraftRecord>> {
    snapshot_entries(doc).map(|entries| parse_entries(entries))
}
