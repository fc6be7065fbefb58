//! Torrent management endpoints (`/torrents/*`).
//!
//! Bulk operations take `hashes: &[&str]`; pass `&["all"]` to address every
//! torrent, as the API allows. Multi-value fields use the delimiters the
//! server expects: `|` for hashes, peers, tracker urls and file ids, `,` for
//! tags, newline for add-URLs, and the pre-encoded `%0A` for category
//! removal.

use crate::client::{QbitClient, join};
use crate::error::Result;
use crate::types::{
    AddTorrent, AddTorrentOptions, Category, TorrentContent, TorrentInfo, TorrentListParams,
    TorrentProperties, Tracker, WebSeed,
};
use reqwest::blocking::multipart::{Form, Part};
use std::collections::HashMap;

/// Content type tagged onto every raw `.torrent` part of an add request.
const TORRENT_MIME: &str = "application/x-bittorrent";

/// Borrowed view over the `/torrents/*` endpoint group.
pub struct Torrents<'a> {
    client: &'a QbitClient,
}

impl QbitClient {
    /// Torrent management endpoints.
    pub fn torrents(&self) -> Torrents<'_> {
        Torrents { client: self }
    }
}

impl Torrents<'_> {
    /// `POST /torrents/info` — list torrents, optionally filtered.
    pub fn info(&self, params: &TorrentListParams) -> Result<Vec<TorrentInfo>> {
        let mut form = Vec::new();
        if let Some(category) = &params.category {
            form.push(("category", urlencoding::encode(category).into_owned()));
        }
        if let Some(tag) = &params.tag {
            form.push(("tag", urlencoding::encode(tag).into_owned()));
        }
        if let Some(hashes) = &params.hashes {
            form.push(("hashes", join(hashes, "|")));
        }
        let resp = self.client.request("/torrents/info", &form)?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/properties` — detailed properties of one torrent.
    pub fn properties(&self, hash: &str) -> Result<TorrentProperties> {
        let resp = self
            .client
            .request("/torrents/properties", &[("hash", hash.to_owned())])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/trackers` — trackers of one torrent.
    pub fn trackers(&self, hash: &str) -> Result<Vec<Tracker>> {
        let resp = self
            .client
            .request("/torrents/trackers", &[("hash", hash.to_owned())])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/webseeds` — web seeds of one torrent.
    pub fn webseeds(&self, hash: &str) -> Result<Vec<WebSeed>> {
        let resp = self
            .client
            .request("/torrents/webseeds", &[("hash", hash.to_owned())])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/files` — files of one torrent, optionally limited to
    /// the given file indexes.
    pub fn files(&self, hash: &str, indexes: Option<&[i64]>) -> Result<Vec<TorrentContent>> {
        let mut form = vec![("hash", hash.to_owned())];
        if let Some(indexes) = indexes {
            let indexes: Vec<String> = indexes.iter().map(ToString::to_string).collect();
            form.push(("indexes", join(&indexes, "|")));
        }
        let resp = self.client.request("/torrents/files", &form)?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/pieceStates` — download state of every piece
    /// (0=pending, 1=downloading, 2=done).
    pub fn piece_states(&self, hash: &str) -> Result<Vec<i64>> {
        let resp = self
            .client
            .request("/torrents/pieceStates", &[("hash", hash.to_owned())])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/pieceHashes` — SHA-1 hash of every piece.
    pub fn piece_hashes(&self, hash: &str) -> Result<Vec<String>> {
        let resp = self
            .client
            .request("/torrents/pieceHashes", &[("hash", hash.to_owned())])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/pause` — pause torrents.
    pub fn pause(&self, hashes: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/pause", &[("hashes", join(hashes, "|"))])?;
        Ok(())
    }

    /// `POST /torrents/resume` — resume torrents.
    pub fn resume(&self, hashes: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/resume", &[("hashes", join(hashes, "|"))])?;
        Ok(())
    }

    /// `POST /torrents/delete` — remove torrents, optionally deleting the
    /// downloaded data.
    pub fn delete(&self, hashes: &[&str], delete_files: bool) -> Result<()> {
        self.client.request(
            "/torrents/delete",
            &[
                ("hashes", join(hashes, "|")),
                ("deleteFiles", delete_files.to_string()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/recheck` — re-verify downloaded data.
    pub fn recheck(&self, hashes: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/recheck", &[("hashes", join(hashes, "|"))])?;
        Ok(())
    }

    /// `POST /torrents/reannounce` — re-announce to all trackers.
    pub fn reannounce(&self, hashes: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/reannounce", &[("hashes", join(hashes, "|"))])?;
        Ok(())
    }

    /// `POST /torrents/editTracker` — replace a tracker URL on one torrent.
    pub fn edit_tracker(&self, hash: &str, orig_url: &str, new_url: &str) -> Result<()> {
        self.client.request(
            "/torrents/editTracker",
            &[
                ("hash", hash.to_owned()),
                ("origUrl", orig_url.to_owned()),
                ("newUrl", new_url.to_owned()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/removeTracker` — remove tracker URLs from one
    /// torrent.
    pub fn remove_tracker(&self, hash: &str, urls: &[&str]) -> Result<()> {
        self.client.request(
            "/torrents/removeTracker",
            &[("hash", hash.to_owned()), ("urls", join(urls, "|"))],
        )?;
        Ok(())
    }

    /// `POST /torrents/addPeers` — add peers (`host:port`) to torrents.
    pub fn add_peers(&self, hashes: &[&str], peers: &[&str]) -> Result<()> {
        self.client.request(
            "/torrents/addPeers",
            &[("hashes", join(hashes, "|")), ("peers", join(peers, "|"))],
        )?;
        Ok(())
    }

    /// `POST /torrents/increasePrio` — move torrents up in the queue.
    pub fn increase_prio(&self, hashes: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/increasePrio", &[("hashes", join(hashes, "|"))])?;
        Ok(())
    }

    /// `POST /torrents/decreasePrio` — move torrents down in the queue.
    pub fn decrease_prio(&self, hashes: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/decreasePrio", &[("hashes", join(hashes, "|"))])?;
        Ok(())
    }

    /// `POST /torrents/topPrio` — move torrents to the top of the queue.
    pub fn top_prio(&self, hashes: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/topPrio", &[("hashes", join(hashes, "|"))])?;
        Ok(())
    }

    /// `POST /torrents/bottomPrio` — move torrents to the bottom of the
    /// queue.
    pub fn bottom_prio(&self, hashes: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/bottomPrio", &[("hashes", join(hashes, "|"))])?;
        Ok(())
    }

    /// `POST /torrents/filePrio` — set the priority of files within one
    /// torrent (`ids` are file indexes from [`files`](Self::files)).
    pub fn file_prio(&self, hash: &str, ids: &[i64], priority: i64) -> Result<()> {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        self.client.request(
            "/torrents/filePrio",
            &[
                ("hash", hash.to_owned()),
                ("id", join(&ids, "|")),
                ("priority", priority.to_string()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/downloadLimit` — per-torrent download limits in
    /// bytes/s, keyed by hash (-1 = unset).
    pub fn download_limit(&self, hashes: &[&str]) -> Result<HashMap<String, i64>> {
        let resp = self
            .client
            .request("/torrents/downloadLimit", &[("hashes", join(hashes, "|"))])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/setDownloadLimit` — set per-torrent download limits
    /// in bytes/s (0 = unlimited).
    pub fn set_download_limit(&self, hashes: &[&str], limit: i64) -> Result<()> {
        self.client.request(
            "/torrents/setDownloadLimit",
            &[("hashes", join(hashes, "|")), ("limit", limit.to_string())],
        )?;
        Ok(())
    }

    /// `POST /torrents/setShareLimits` — set ratio and seeding-time limits
    /// (-1 = no limit, -2 = use global).
    pub fn set_share_limits(
        &self,
        hashes: &[&str],
        ratio_limit: f64,
        seeding_time_limit: i64,
    ) -> Result<()> {
        self.client.request(
            "/torrents/setShareLimits",
            &[
                ("hashes", join(hashes, "|")),
                ("ratioLimit", ratio_limit.to_string()),
                ("seedingTimeLimit", seeding_time_limit.to_string()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/uploadLimit` — per-torrent upload limits in bytes/s,
    /// keyed by hash (-1 = unset).
    pub fn upload_limit(&self, hashes: &[&str]) -> Result<HashMap<String, i64>> {
        let resp = self
            .client
            .request("/torrents/uploadLimit", &[("hashes", join(hashes, "|"))])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/setUploadLimit` — set per-torrent upload limits in
    /// bytes/s (0 = unlimited).
    pub fn set_upload_limit(&self, hashes: &[&str], limit: i64) -> Result<()> {
        self.client.request(
            "/torrents/setUploadLimit",
            &[("hashes", join(hashes, "|")), ("limit", limit.to_string())],
        )?;
        Ok(())
    }

    /// `POST /torrents/setLocation` — move torrents to a new save path.
    pub fn set_location(&self, hashes: &[&str], location: &str) -> Result<()> {
        self.client.request(
            "/torrents/setLocation",
            &[
                ("hashes", join(hashes, "|")),
                ("location", location.to_owned()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/rename` — rename one torrent.
    pub fn rename(&self, hash: &str, name: &str) -> Result<()> {
        self.client.request(
            "/torrents/rename",
            &[("hash", hash.to_owned()), ("name", name.to_owned())],
        )?;
        Ok(())
    }

    /// `POST /torrents/setCategory` — assign torrents to a category (empty
    /// string clears it).
    pub fn set_category(&self, hashes: &[&str], category: &str) -> Result<()> {
        self.client.request(
            "/torrents/setCategory",
            &[
                ("hashes", join(hashes, "|")),
                ("category", category.to_owned()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/categories` — all categories, keyed by name.
    pub fn categories(&self) -> Result<HashMap<String, Category>> {
        let resp = self.client.request("/torrents/categories", &[])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/createCategory` — create a category.
    pub fn create_category(&self, category: &str, save_path: &str) -> Result<()> {
        self.client.request(
            "/torrents/createCategory",
            &[
                ("category", category.to_owned()),
                ("savePath", save_path.to_owned()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/editCategory` — change a category's save path.
    pub fn edit_category(&self, category: &str, save_path: &str) -> Result<()> {
        self.client.request(
            "/torrents/editCategory",
            &[
                ("category", category.to_owned()),
                ("savePath", save_path.to_owned()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/removeCategories` — delete categories. The API takes
    /// the names joined with a pre-encoded newline (`%0A`).
    pub fn remove_categories(&self, categories: &[&str]) -> Result<()> {
        self.client.request(
            "/torrents/removeCategories",
            &[("categories", join(categories, "%0A"))],
        )?;
        Ok(())
    }

    /// `POST /torrents/addTags` — add tags (comma-joined) to torrents.
    pub fn add_tags(&self, hashes: &[&str], tags: &[&str]) -> Result<()> {
        self.client.request(
            "/torrents/addTags",
            &[("hashes", join(hashes, "|")), ("tags", join(tags, ","))],
        )?;
        Ok(())
    }

    /// `POST /torrents/removeTags` — remove tags from torrents.
    pub fn remove_tags(&self, hashes: &[&str], tags: &[&str]) -> Result<()> {
        self.client.request(
            "/torrents/removeTags",
            &[("hashes", join(hashes, "|")), ("tags", join(tags, ","))],
        )?;
        Ok(())
    }

    /// `POST /torrents/tags` — every tag known to the server.
    pub fn tags(&self) -> Result<Vec<String>> {
        let resp = self.client.request("/torrents/tags", &[])?;
        Ok(serde_json::from_value(resp)?)
    }

    /// `POST /torrents/createTags` — create tags without assigning them.
    pub fn create_tags(&self, tags: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/createTags", &[("tags", join(tags, ","))])?;
        Ok(())
    }

    /// `POST /torrents/deleteTags` — delete tags everywhere.
    pub fn delete_tags(&self, tags: &[&str]) -> Result<()> {
        self.client
            .request("/torrents/deleteTags", &[("tags", join(tags, ","))])?;
        Ok(())
    }

    /// `POST /torrents/setAutoManagement` — toggle automatic torrent
    /// management.
    pub fn set_auto_management(&self, hashes: &[&str], enable: bool) -> Result<()> {
        self.client.request(
            "/torrents/setAutoManagement",
            &[("hashes", join(hashes, "|")), ("enable", enable.to_string())],
        )?;
        Ok(())
    }

    /// `POST /torrents/toggleSequentialDownload` — flip sequential download.
    pub fn toggle_sequential_download(&self, hashes: &[&str]) -> Result<()> {
        self.client.request(
            "/torrents/toggleSequentialDownload",
            &[("hashes", join(hashes, "|"))],
        )?;
        Ok(())
    }

    /// `POST /torrents/toggleFirstLastPiecePrio` — flip first/last piece
    /// priority.
    pub fn toggle_first_last_piece_prio(&self, hashes: &[&str]) -> Result<()> {
        self.client.request(
            "/torrents/toggleFirstLastPiecePrio",
            &[("hashes", join(hashes, "|"))],
        )?;
        Ok(())
    }

    /// `POST /torrents/setForceStart` — bypass queue and speed limits.
    pub fn set_force_start(&self, hashes: &[&str], value: bool) -> Result<()> {
        self.client.request(
            "/torrents/setForceStart",
            &[("hashes", join(hashes, "|")), ("value", value.to_string())],
        )?;
        Ok(())
    }

    /// `POST /torrents/setSuperSeeding` — toggle super-seeding mode.
    pub fn set_super_seeding(&self, hashes: &[&str], value: bool) -> Result<()> {
        self.client.request(
            "/torrents/setSuperSeeding",
            &[("hashes", join(hashes, "|")), ("value", value.to_string())],
        )?;
        Ok(())
    }

    /// `POST /torrents/renameFile` — rename a file within a torrent.
    pub fn rename_file(&self, hash: &str, old_path: &str, new_path: &str) -> Result<()> {
        self.client.request(
            "/torrents/renameFile",
            &[
                ("hash", hash.to_owned()),
                ("oldPath", old_path.to_owned()),
                ("newPath", new_path.to_owned()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/renameFolder` — rename a folder within a torrent.
    pub fn rename_folder(&self, hash: &str, old_path: &str, new_path: &str) -> Result<()> {
        self.client.request(
            "/torrents/renameFolder",
            &[
                ("hash", hash.to_owned()),
                ("oldPath", old_path.to_owned()),
                ("newPath", new_path.to_owned()),
            ],
        )?;
        Ok(())
    }

    /// `POST /torrents/add` — add torrents from links and/or raw `.torrent`
    /// payloads. See [`AddTorrent`] for the accepted shapes.
    pub fn add(&self, torrent: AddTorrent) -> Result<()> {
        let form = match torrent {
            AddTorrent::Url(url) => Form::new().text("urls", url),
            AddTorrent::Urls(urls) => Form::new().text("urls", join(&urls, "\n")),
            AddTorrent::Options(options) => add_form(options)?,
        };
        self.client.dispatch("/torrents/add", Some(form))?;
        Ok(())
    }
}

/// Build the multipart form for the options shape of `torrents/add`.
///
/// The `dummy=true` marker field is required by the server to accept a
/// multipart submission that may consist of file parts only.
fn add_form(options: AddTorrentOptions) -> Result<Form> {
    let mut form = Form::new();
    if !options.urls.is_empty() {
        form = form.text("urls", join(&options.urls, "\n"));
    }
    for file in options.torrents {
        let part = Part::bytes(file.data)
            .file_name(file.file_name)
            .mime_str(TORRENT_MIME)?;
        form = form.part("torrents", part);
    }
    if !options.tags.is_empty() {
        form = form.text("tags", join(&options.tags, ","));
    }
    if let Some(v) = options.savepath {
        form = form.text("savepath", v);
    }
    if let Some(v) = options.cookie {
        form = form.text("cookie", v);
    }
    if let Some(v) = options.category {
        form = form.text("category", v);
    }
    if let Some(v) = options.skip_checking {
        form = form.text("skip_checking", v.to_string());
    }
    if let Some(v) = options.paused {
        form = form.text("paused", v.to_string());
    }
    if let Some(v) = options.root_folder {
        form = form.text("root_folder", v.to_string());
    }
    if let Some(v) = options.rename {
        form = form.text("rename", v);
    }
    if let Some(v) = options.up_limit {
        form = form.text("upLimit", v.to_string());
    }
    if let Some(v) = options.dl_limit {
        form = form.text("dlLimit", v.to_string());
    }
    if let Some(v) = options.ratio_limit {
        form = form.text("ratioLimit", v.to_string());
    }
    if let Some(v) = options.seeding_time_limit {
        form = form.text("seedingTimeLimit", v.to_string());
    }
    if let Some(v) = options.auto_tmm {
        form = form.text("autoTMM", v.to_string());
    }
    if let Some(v) = options.sequential_download {
        form = form.text("sequentialDownload", v.to_string());
    }
    if let Some(v) = options.first_last_piece_prio {
        form = form.text("firstLastPiecePrio", v.to_string());
    }
    form = form.text("dummy", "true");
    Ok(form)
}
