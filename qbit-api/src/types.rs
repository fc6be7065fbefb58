//! Data types for qBittorrent WebUI API requests and responses.
//!
//! Response types are deserialized from the raw JSON returned by the
//! endpoints. Field names follow Rust conventions (`snake_case`) with serde
//! renames where the API uses camelCase. Every response struct is
//! `#[serde(default)]`-tolerant: qBittorrent adds and removes fields across
//! versions, and a missing field must not fail the whole decode.

use serde::{Deserialize, Serialize};

/// qBittorrent build information.
///
/// Returned by [`App::build_info`](crate::app::App::build_info)
/// (`POST /app/buildInfo`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    /// Qt version the server was built against.
    pub qt: String,
    /// libtorrent version.
    pub libtorrent: String,
    /// Boost version.
    pub boost: String,
    /// OpenSSL version.
    pub openssl: String,
    /// zlib version.
    pub zlib: String,
    /// 32 or 64.
    pub bitness: u32,
}

/// One line of the main server log.
///
/// Returned by [`Log::main`](crate::log::Log::main) (`POST /log/main`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    /// Monotonically increasing entry id.
    pub id: u64,
    /// Log line text.
    pub message: String,
    /// Seconds since epoch.
    pub timestamp: u64,
    /// Severity: 1=normal, 2=info, 4=warning, 8=critical.
    #[serde(rename = "type")]
    pub level: u8,
}

/// One line of the peer (ban) log.
///
/// Returned by [`Log::peers`](crate::log::Log::peers) (`POST /log/peers`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerLogEntry {
    pub id: u64,
    /// Peer address as `ip:port`.
    pub ip: String,
    pub timestamp: u64,
    /// Whether the peer was blocked (vs unblocked).
    pub blocked: bool,
    /// Ban reason, empty when unblocked.
    pub reason: String,
}

/// Filter parameters for [`Log::main`](crate::log::Log::main).
///
/// Unset fields are omitted from the request and take the server defaults
/// (all severities included, full backlog).
#[derive(Debug, Clone, Default)]
pub struct LogParams {
    /// Include normal messages.
    pub normal: Option<bool>,
    /// Include info messages.
    pub info: Option<bool>,
    /// Include warning messages.
    pub warning: Option<bool>,
    /// Include critical messages.
    pub critical: Option<bool>,
    /// Only return entries with id greater than this.
    pub last_known_id: Option<i64>,
}

/// Global transfer statistics.
///
/// Returned by [`Transfer::info`](crate::transfer::Transfer::info)
/// (`POST /transfer/info`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferInfo {
    /// `connected`, `firewalled` or `disconnected`.
    pub connection_status: String,
    /// DHT node count.
    pub dht_nodes: u64,
    /// Bytes downloaded this session.
    pub dl_info_data: u64,
    /// Current download speed, bytes/s.
    pub dl_info_speed: u64,
    /// Download rate limit, bytes/s (0 = unlimited).
    pub dl_rate_limit: u64,
    /// Bytes uploaded this session.
    pub up_info_data: u64,
    /// Current upload speed, bytes/s.
    pub up_info_speed: u64,
    /// Upload rate limit, bytes/s (0 = unlimited).
    pub up_rate_limit: u64,
}

/// One torrent in the transfer list.
///
/// Returned by [`Torrents::info`](crate::torrents::Torrents::info)
/// (`POST /torrents/info`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentInfo {
    /// Torrent hash (v1 info-hash, or truncated v2).
    pub hash: String,
    /// Display name.
    pub name: String,
    /// Magnet link for this torrent.
    pub magnet_uri: String,
    /// Total size of selected files, bytes.
    pub size: i64,
    /// Total size including unselected files, bytes.
    pub total_size: i64,
    /// Fraction completed, 0.0 to 1.0.
    pub progress: f64,
    /// Bytes left to download.
    pub amount_left: i64,
    /// Bytes downloaded.
    pub downloaded: i64,
    /// Bytes uploaded.
    pub uploaded: i64,
    /// Share ratio, capped at 9999 by the server.
    pub ratio: f64,
    /// Download speed, bytes/s.
    pub dlspeed: i64,
    /// Upload speed, bytes/s.
    pub upspeed: i64,
    /// Download limit, bytes/s (-1 = unset).
    pub dl_limit: i64,
    /// Upload limit, bytes/s (-1 = unset).
    pub up_limit: i64,
    /// Seconds until completion as estimated by the server.
    pub eta: i64,
    /// State string (`downloading`, `pausedUP`, `stalledDL`, ...).
    pub state: String,
    /// Assigned category, empty when none.
    pub category: String,
    /// Comma-separated tag list.
    pub tags: String,
    /// Save path on the server.
    pub save_path: String,
    /// Unix time the torrent was added.
    pub added_on: i64,
    /// Unix time the torrent completed (-1 if incomplete).
    pub completion_on: i64,
    /// Connected seeds.
    pub num_seeds: i64,
    /// Seeds in the swarm.
    pub num_complete: i64,
    /// Connected leechers.
    pub num_leechs: i64,
    /// Leechers in the swarm.
    pub num_incomplete: i64,
    /// Queue priority (0 when queueing is off).
    pub priority: i64,
    /// Automatic torrent management enabled.
    pub auto_tmm: bool,
    /// Force-start override active.
    pub force_start: bool,
    /// Sequential download enabled.
    pub seq_dl: bool,
    /// First/last piece priority enabled.
    pub f_l_piece_prio: bool,
    /// Super-seeding active.
    pub super_seeding: bool,
    /// Seconds active.
    pub time_active: i64,
    /// Unix time of the last transfer activity.
    pub last_activity: i64,
    /// Current tracker URL (empty when none is working).
    pub tracker: String,
}

/// Detailed properties of a single torrent.
///
/// Returned by [`Torrents::properties`](crate::torrents::Torrents::properties)
/// (`POST /torrents/properties`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentProperties {
    pub save_path: String,
    /// Unix time the .torrent was created.
    pub creation_date: i64,
    /// Piece size, bytes.
    pub piece_size: i64,
    pub comment: String,
    pub created_by: String,
    /// Unix time the torrent was added.
    pub addition_date: i64,
    /// Unix time the torrent completed (-1 if incomplete).
    pub completion_date: i64,
    pub total_wasted: i64,
    pub total_uploaded: i64,
    pub total_downloaded: i64,
    pub total_size: i64,
    pub up_limit: i64,
    pub dl_limit: i64,
    pub dl_speed: i64,
    pub up_speed: i64,
    /// Seconds active.
    pub time_elapsed: i64,
    /// Seconds seeding.
    pub seeding_time: i64,
    pub nb_connections: i64,
    pub nb_connections_limit: i64,
    pub share_ratio: f64,
    pub eta: i64,
    pub last_seen: i64,
    pub peers: i64,
    pub peers_total: i64,
    pub seeds: i64,
    pub seeds_total: i64,
    pub pieces_have: i64,
    pub pieces_num: i64,
}

/// One tracker of a torrent.
///
/// Returned by [`Torrents::trackers`](crate::torrents::Torrents::trackers).
/// The first three entries are the virtual DHT/PeX/LSD rows the server
/// prepends (tier -1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracker {
    pub url: String,
    /// 0=disabled, 1=not contacted, 2=working, 3=updating, 4=not working.
    pub status: i64,
    pub tier: i64,
    pub num_peers: i64,
    pub num_seeds: i64,
    pub num_leeches: i64,
    pub num_downloaded: i64,
    /// Last message from the tracker.
    pub msg: String,
}

/// One HTTP web seed of a torrent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSeed {
    pub url: String,
}

/// One file inside a torrent.
///
/// Returned by [`Torrents::files`](crate::torrents::Torrents::files).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentContent {
    /// File index, stable across calls; used by `filePrio`.
    pub index: i64,
    /// Path relative to the torrent root.
    pub name: String,
    pub size: i64,
    /// Fraction downloaded, 0.0 to 1.0.
    pub progress: f64,
    /// 0=skip, 1=normal, 6=high, 7=maximal.
    pub priority: i64,
    /// First and last piece index of the file.
    pub piece_range: Vec<i64>,
    /// Fraction of pieces available in the swarm (-1 = unknown).
    pub availability: f64,
}

/// A download category.
///
/// Returned inside the map from
/// [`Torrents::categories`](crate::torrents::Torrents::categories).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub name: String,
    #[serde(rename = "savePath")]
    pub save_path: String,
}

/// Filter parameters for [`Torrents::info`](crate::torrents::Torrents::info).
///
/// `category` and `tag` are free text and are percent-encoded before being
/// sent; `hashes` is `|`-joined. Unset fields are omitted and the server
/// returns the unfiltered list.
#[derive(Debug, Clone, Default)]
pub struct TorrentListParams {
    /// Only torrents in this category (empty string = uncategorized).
    pub category: Option<String>,
    /// Only torrents carrying this tag (empty string = untagged).
    pub tag: Option<String>,
    /// Only these torrent hashes.
    pub hashes: Option<Vec<String>>,
}

/// Payload for [`Torrents::add`](crate::torrents::Torrents::add).
///
/// The three constructors mirror the shapes the endpoint accepts: a single
/// link, a batch of links, or the full options form with raw `.torrent`
/// payloads and per-torrent settings.
#[derive(Debug, Clone)]
pub enum AddTorrent {
    /// One HTTP/magnet link.
    Url(String),
    /// Several links, sent newline-joined in one request.
    Urls(Vec<String>),
    /// Links and/or raw `.torrent` files plus add-time options.
    Options(AddTorrentOptions),
}

/// Options form for [`AddTorrent::Options`].
///
/// Field names map one-to-one onto the wire fields of `torrents/add`;
/// unset options are omitted and take the server defaults.
#[derive(Debug, Clone, Default)]
pub struct AddTorrentOptions {
    /// HTTP/magnet links, newline-joined on the wire.
    pub urls: Vec<String>,
    /// Raw `.torrent` file payloads.
    pub torrents: Vec<TorrentFileData>,
    /// Tags to assign, comma-joined on the wire.
    pub tags: Vec<String>,
    /// Download folder (`savepath`).
    pub savepath: Option<String>,
    /// Cookie sent when fetching the torrent from a URL.
    pub cookie: Option<String>,
    /// Category to assign.
    pub category: Option<String>,
    /// Skip hash checking (`skip_checking`).
    pub skip_checking: Option<bool>,
    /// Add in paused state.
    pub paused: Option<bool>,
    /// Create the root folder (`root_folder`).
    pub root_folder: Option<bool>,
    /// Rename the torrent on add.
    pub rename: Option<String>,
    /// Upload limit, bytes/s (`upLimit`).
    pub up_limit: Option<i64>,
    /// Download limit, bytes/s (`dlLimit`).
    pub dl_limit: Option<i64>,
    /// Share ratio limit (`ratioLimit`).
    pub ratio_limit: Option<f64>,
    /// Seeding time limit, minutes (`seedingTimeLimit`).
    pub seeding_time_limit: Option<i64>,
    /// Automatic torrent management (`autoTMM`).
    pub auto_tmm: Option<bool>,
    /// Sequential download (`sequentialDownload`).
    pub sequential_download: Option<bool>,
    /// First/last piece priority (`firstLastPiecePrio`).
    pub first_last_piece_prio: Option<bool>,
}

/// An in-memory `.torrent` file attached to an add request.
#[derive(Debug, Clone)]
pub struct TorrentFileData {
    /// File name reported in the multipart part (purely informational).
    pub file_name: String,
    /// Raw bencoded torrent bytes.
    pub data: Vec<u8>,
}

/// One result row of a plugin search.
///
/// Returned by [`Search::results`](crate::search::Search::results)
/// (`POST /search/results`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultEntry {
    /// Torrent or magnet link.
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Size in bytes; -1 when the plugin could not determine it.
    #[serde(rename = "fileSize")]
    pub file_size: f64,
    #[serde(rename = "nbSeeders")]
    pub nb_seeders: i64,
    #[serde(rename = "nbLeechers")]
    pub nb_leechers: i64,
    /// Description page on the source site.
    #[serde(rename = "descrLink")]
    pub descr_link: String,
    /// Base URL of the source site.
    #[serde(rename = "siteUrl")]
    pub site_url: String,
}

/// An installed search plugin.
///
/// Returned by [`Search::plugins`](crate::search::Search::plugins)
/// (`POST /search/plugins`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPlugin {
    /// Plugin id used in `search/start` and the plugin management calls.
    pub name: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub enabled: bool,
    pub url: String,
    pub version: String,
    /// Category list; shape differs between server versions (plain strings
    /// vs `{id, name}` objects), so it is left undecoded.
    #[serde(rename = "supportedCategories")]
    pub supported_categories: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torrent_info_tolerates_missing_fields() {
        let value = serde_json::json!({
            "hash": "abcdef",
            "name": "debian.iso",
            "progress": 0.25,
            "state": "downloading"
        });
        let info: TorrentInfo = serde_json::from_value(value).unwrap();
        assert_eq!(info.hash, "abcdef");
        assert_eq!(info.name, "debian.iso");
        assert!((info.progress - 0.25).abs() < f64::EPSILON);
        assert_eq!(info.state, "downloading");
        assert_eq!(info.dlspeed, 0);
        assert!(info.tags.is_empty());
    }

    #[test]
    fn log_entry_decodes_type_field() {
        let value = serde_json::json!({
            "id": 7,
            "message": "qBittorrent v4.6.1 started",
            "timestamp": 1_700_000_000u64,
            "type": 1
        });
        let entry: LogEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.level, 1);
    }

    #[test]
    fn search_plugin_decodes_camel_case() {
        let value = serde_json::json!({
            "enabled": true,
            "fullName": "Piratebay",
            "name": "piratebay",
            "supportedCategories": ["all", "movies"],
            "url": "https://example.org",
            "version": "1.0"
        });
        let plugin: SearchPlugin = serde_json::from_value(value).unwrap();
        assert!(plugin.enabled);
        assert_eq!(plugin.full_name, "Piratebay");
        assert_eq!(plugin.supported_categories[0], "all");
    }
}
