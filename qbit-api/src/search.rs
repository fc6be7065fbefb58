//! Plugin search endpoints (`/search/*`).
//!
//! Searches run server-side in plugin workers: `start` returns a job id,
//! `status`/`results` poll it, `stop`/`delete` end it. The status payload is
//! returned as raw JSON because `search/status` answers with a list when no
//! id is given and this module unwraps the single element when one is.

use crate::client::{QbitClient, join};
use crate::error::Result;
use crate::types::{SearchPlugin, SearchResultEntry};
use serde::Deserialize;
use serde_json::Value;

/// Response of `search/start`: `{"id": n}`.
#[derive(Deserialize)]
struct StartedJob {
    id: u64,
}

/// Borrowed view over the `/search/*` endpoint group.
pub struct Search<'a> {
    client: &'a QbitClient,
}

impl QbitClient {
    /// Plugin search endpoints.
    pub fn search(&self) -> Search<'_> {
        Search { client: self }
    }
}

impl Search<'_> {
    /// `POST /search/start` — start a search job and return its id.
    ///
    /// `plugins` and `categories` accept `&["all"]` or `&["enabled"]` as the
    /// API's wildcard values.
    pub fn start(&self, pattern: &str, plugins: &[&str], categories: &[&str]) -> Result<u64> {
        let resp = self.client.request(
            "/search/start",
            &[
                ("pattern", pattern.to_owned()),
                ("plugins", join(plugins, "|")),
                ("category", join(categories, "|")),
            ],
        )?;
        let job: StartedJob = serde_json::from_value(resp)?;
        Ok(job.id)
    }

    /// `POST /search/stop` — stop a running search job.
    pub fn stop(&self, id: u64) -> Result<()> {
        self.client.request("/search/stop", &[("id", id.to_string())])?;
        Ok(())
    }

    /// `POST /search/status` — status of one job (`Some(id)`, returns its
    /// single status object, `null` if unknown) or of all jobs (`None`,
    /// returns the full list).
    pub fn status(&self, id: Option<u64>) -> Result<Value> {
        let mut params = Vec::new();
        if let Some(id) = id {
            params.push(("id", id.to_string()));
        }
        let resp = self.client.request("/search/status", &params)?;
        Ok(match id {
            Some(_) => resp.get(0).cloned().unwrap_or(Value::Null),
            None => resp,
        })
    }

    /// `POST /search/results` — results of a search job. `limit` 0 means no
    /// limit; negative `offset` counts from the end.
    pub fn results(&self, id: u64, limit: i64, offset: i64) -> Result<Vec<SearchResultEntry>> {
        let resp = self.client.request(
            "/search/results",
            &[
                ("id", id.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )?;
        Ok(serde_json::from_value(resp["results"].clone())?)
    }

    /// `POST /search/delete` — delete a search job and its results.
    pub fn delete(&self, id: u64) -> Result<()> {
        self.client.request("/search/delete", &[("id", id.to_string())])?;
        Ok(())
    }

    /// `POST /search/plugins` — installed search plugins.
    pub fn plugins(&self) -> Result<Vec<SearchPlugin>> {
        let resp = self.client.request("/search/plugins", &[])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /search/installPlugin` — install plugins from URLs or local
    /// file paths.
    pub fn install_plugin(&self, sources: &[&str]) -> Result<()> {
        self.client
            .request("/search/installPlugin", &[("sources", join(sources, "|"))])?;
        Ok(())
    }

    /// `POST /search/uninstallPlugin` — uninstall plugins by name.
    pub fn uninstall_plugin(&self, names: &[&str]) -> Result<()> {
        self.client
            .request("/search/uninstallPlugin", &[("names", join(names, "|"))])?;
        Ok(())
    }

    /// `POST /search/enablePlugin` — enable or disable plugins by name.
    pub fn enable_plugin(&self, names: &[&str], enable: bool) -> Result<()> {
        self.client.request(
            "/search/enablePlugin",
            &[("names", join(names, "|")), ("enable", enable.to_string())],
        )?;
        Ok(())
    }

    /// `POST /search/updatePlugins` — update all installed plugins.
    pub fn update_plugins(&self) -> Result<()> {
        self.client.request("/search/updatePlugins", &[])?;
        Ok(())
    }
}
