//! Log endpoints (`/log/*`).

use crate::client::QbitClient;
use crate::error::Result;
use crate::types::{LogEntry, LogParams, PeerLogEntry};

/// Borrowed view over the `/log/*` endpoint group.
pub struct Log<'a> {
    client: &'a QbitClient,
}

impl QbitClient {
    /// Server log endpoints.
    pub fn log(&self) -> Log<'_> {
        Log { client: self }
    }
}

impl Log<'_> {
    /// `POST /log/main` — main server log, filtered by [`LogParams`].
    pub fn main(&self, params: &LogParams) -> Result<Vec<LogEntry>> {
        let mut form = Vec::new();
        if let Some(v) = params.normal {
            form.push(("normal", v.to_string()));
        }
        if let Some(v) = params.info {
            form.push(("info", v.to_string()));
        }
        if let Some(v) = params.warning {
            form.push(("warning", v.to_string()));
        }
        if let Some(v) = params.critical {
            form.push(("critical", v.to_string()));
        }
        if let Some(v) = params.last_known_id {
            form.push(("last_known_id", v.to_string()));
        }
        let resp = self.client.request("/log/main", &form)?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /log/peers` — peer ban log. Pass `-1` for the full backlog, or
    /// the id of the last entry already seen.
    pub fn peers(&self, last_known_id: i64) -> Result<Vec<PeerLogEntry>> {
        let resp = self
            .client
            .request("/log/peers", &[("last_known_id", last_known_id.to_string())])?;
        Ok(serde_json::from_value(resp)?)
    }
}
