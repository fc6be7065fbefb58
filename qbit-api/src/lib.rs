//! qBittorrent WebUI API client library.
//!
//! A typed binding for the qBittorrent WebUI API v2: session handling plus
//! thin wrappers over every endpoint group (`auth`, `app`, `log`, `sync`,
//! `transfer`, `torrents`, `search`).
//!
//! # Authentication
//!
//! The client logs in lazily with the credentials given at construction; the
//! session cookie is captured from the login response and attached to every
//! later call. No explicit login step is needed:
//!
//! ```no_run
//! use qbit_api::QbitClient;
//! use qbit_api::types::TorrentListParams;
//!
//! let client = QbitClient::new("http://localhost:8080", "admin", "adminadmin").unwrap();
//! for torrent in client.torrents().info(&TorrentListParams::default()).unwrap() {
//!     println!("{} {:3.0}%", torrent.name, torrent.progress * 100.0);
//! }
//! ```
//!
//! # Endpoint group mapping
//!
//! | Accessor                   | Path prefix      | Coverage                         |
//! |----------------------------|------------------|----------------------------------|
//! | [`QbitClient::auth`]       | `/auth/*`        | login, logout                    |
//! | [`QbitClient::app`]        | `/app/*`         | versions, preferences, shutdown  |
//! | [`QbitClient::log`]        | `/log/*`         | main log, peer log               |
//! | [`QbitClient::sync`]       | `/sync/*`        | maindata, torrentPeers           |
//! | [`QbitClient::transfer`]   | `/transfer/*`    | speeds, limits, peer bans        |
//! | [`QbitClient::torrents`]   | `/torrents/*`    | full torrent lifecycle           |
//! | [`QbitClient::search`]     | `/search/*`      | search jobs, plugin management   |
//!
//! Endpoints without a wrapper can be reached through
//! [`QbitClient::request`] directly.

pub mod app;
pub mod auth;
pub mod client;
pub mod error;
pub mod log;
pub mod search;
pub mod sync;
pub mod torrents;
pub mod transfer;
pub mod types;

pub use client::QbitClient;
pub use error::{QbitError, Result};
pub use types::{AddTorrent, AddTorrentOptions, TorrentFileData};
