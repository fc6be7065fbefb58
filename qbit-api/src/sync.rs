//! Sync endpoints (`/sync/*`).
//!
//! These power the WebUI's live view: each call takes the response id (`rid`)
//! of the previous call and the server answers with a delta against that
//! state. The payload shape is an open server-defined dictionary, so both
//! endpoints return raw JSON.

use crate::client::QbitClient;
use crate::error::Result;
use serde_json::Value;

/// Borrowed view over the `/sync/*` endpoint group.
pub struct Sync<'a> {
    client: &'a QbitClient,
}

impl QbitClient {
    /// Incremental sync endpoints.
    pub fn sync(&self) -> Sync<'_> {
        Sync { client: self }
    }
}

impl Sync<'_> {
    /// `POST /sync/maindata` — global state delta since `rid` (0 for a full
    /// snapshot). The response carries the next `rid` to pass.
    pub fn maindata(&self, rid: u64) -> Result<Value> {
        self.client.request("/sync/maindata", &[("rid", rid.to_string())])
    }

    /// `POST /sync/torrentPeers` — peer list delta for one torrent since
    /// `rid` (0 for a full snapshot).
    pub fn torrent_peers(&self, hash: &str, rid: u64) -> Result<Value> {
        self.client.request(
            "/sync/torrentPeers",
            &[("hash", hash.to_owned()), ("rid", rid.to_string())],
        )
    }
}
