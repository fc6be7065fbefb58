//! Error types for the qBittorrent WebUI API client.

use thiserror::Error;

/// Errors that can occur when talking to a qBittorrent WebUI.
#[derive(Debug, Error)]
pub enum QbitError {
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-200 HTTP status.
    ///
    /// qBittorrent signals most failures this way:
    /// - `403` — session expired or WebUI access forbidden
    /// - `404` — unknown torrent hash
    /// - `409` — conflicting request (e.g. category does not exist)
    #[error("API request to {url} failed with status {status}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// The fully resolved URL the request was sent to.
        url: String,
    },

    /// An implicit login completed without the server issuing a `SID` cookie
    /// (wrong credentials, or the WebUI has authentication disabled for the
    /// client's IP and issues no session).
    #[error("unable to obtain session token")]
    Auth,

    /// A response decoded as JSON but did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, QbitError>`.
pub type Result<T> = std::result::Result<T, QbitError>;
