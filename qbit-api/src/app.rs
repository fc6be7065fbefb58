//! Application endpoints (`/app/*`).
//!
//! Version queries, server preferences and shutdown. `app/preferences` is a
//! several-hundred-key object whose exact shape tracks the server version, so
//! it is exposed as raw JSON rather than a struct that would go stale.

use crate::client::{QbitClient, into_text};
use crate::error::Result;
use crate::types::BuildInfo;
use serde_json::Value;

/// Borrowed view over the `/app/*` endpoint group.
pub struct App<'a> {
    client: &'a QbitClient,
}

impl QbitClient {
    /// Application endpoints.
    pub fn app(&self) -> App<'_> {
        App { client: self }
    }
}

impl App<'_> {
    /// `POST /app/version` — application version, e.g. `v4.6.1`.
    pub fn version(&self) -> Result<String> {
        Ok(into_text(self.client.request("/app/version", &[])?))
    }

    /// `POST /app/webapiVersion` — WebUI API version, e.g. `2.9.3`.
    pub fn webapi_version(&self) -> Result<String> {
        Ok(into_text(self.client.request("/app/webapiVersion", &[])?))
    }

    /// `POST /app/buildInfo` — library versions the server was built with.
    pub fn build_info(&self) -> Result<BuildInfo> {
        let resp = self.client.request("/app/buildInfo", &[])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /app/shutdown` — shut the qBittorrent instance down.
    pub fn shutdown(&self) -> Result<()> {
        self.client.request("/app/shutdown", &[])?;
        Ok(())
    }

    /// `POST /app/preferences` — full server preferences object.
    pub fn preferences(&self) -> Result<Value> {
        self.client.request("/app/preferences", &[])
    }

    /// `POST /app/setPreferences` — update server preferences.
    ///
    /// `prefs` is a partial preferences object; only the keys present are
    /// changed. It is sent JSON-stringified in the `json` form field, as the
    /// API requires.
    pub fn set_preferences(&self, prefs: &Value) -> Result<()> {
        self.client
            .request("/app/setPreferences", &[("json", prefs.to_string())])?;
        Ok(())
    }

    /// `POST /app/defaultSavePath` — default download directory.
    pub fn default_save_path(&self) -> Result<String> {
        Ok(into_text(self.client.request("/app/defaultSavePath", &[])?))
    }
}
