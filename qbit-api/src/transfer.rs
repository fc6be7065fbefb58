//! Global transfer endpoints (`/transfer/*`).

use crate::client::{QbitClient, join};
use crate::error::Result;
use crate::types::TransferInfo;

/// Borrowed view over the `/transfer/*` endpoint group.
pub struct Transfer<'a> {
    client: &'a QbitClient,
}

impl QbitClient {
    /// Global transfer endpoints.
    pub fn transfer(&self) -> Transfer<'_> {
        Transfer { client: self }
    }
}

impl Transfer<'_> {
    /// `POST /transfer/info` — global transfer statistics.
    pub fn info(&self) -> Result<TransferInfo> {
        let resp = self.client.request("/transfer/info", &[])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /transfer/speedLimitsMode` — whether alternative speed limits
    /// are currently active.
    pub fn speed_limits_mode(&self) -> Result<bool> {
        let resp = self.client.request("/transfer/speedLimitsMode", &[])?;
        Ok(serde_json::from_value::<i64>(resp)? == 1)
    }

    /// `POST /transfer/toggleSpeedLimitsMode` — flip alternative speed
    /// limits on or off.
    pub fn toggle_speed_limits_mode(&self) -> Result<()> {
        self.client.request("/transfer/toggleSpeedLimitsMode", &[])?;
        Ok(())
    }

    /// `POST /transfer/downloadLimit` — global download limit in bytes/s
    /// (0 = unlimited).
    pub fn download_limit(&self) -> Result<i64> {
        let resp = self.client.request("/transfer/downloadLimit", &[])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /transfer/setDownloadLimit` — set the global download limit in
    /// bytes/s (0 = unlimited).
    pub fn set_download_limit(&self, limit: i64) -> Result<()> {
        self.client
            .request("/transfer/setDownloadLimit", &[("limit", limit.to_string())])?;
        Ok(())
    }

    /// `POST /transfer/uploadLimit` — global upload limit in bytes/s
    /// (0 = unlimited).
    pub fn upload_limit(&self) -> Result<i64> {
        let resp = self.client.request("/transfer/uploadLimit", &[])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /transfer/setUploadLimit` — set the global upload limit in
    /// bytes/s (0 = unlimited).
    pub fn set_upload_limit(&self, limit: i64) -> Result<()> {
        self.client
            .request("/transfer/setUploadLimit", &[("limit", limit.to_string())])?;
        Ok(())
    }

    /// `POST /transfer/banPeers` — ban peers, each given as `host:port`.
    pub fn ban_peers(&self, peers: &[&str]) -> Result<()> {
        self.client
            .request("/transfer/banPeers", &[("peers", join(peers, "|"))])?;
        Ok(())
    }
}
