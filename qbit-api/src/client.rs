//! HTTP client for the qBittorrent WebUI API.
//!
//! Every call is a `POST https://host/api/v2/{endpoint}` with the parameters
//! encoded as a multipart form (empty body when there are none). The session
//! cookie `SID=<token>` is attached to every request; the token is captured
//! from the `Set-Cookie` header of any response that carries one.
//!
//! # Session lifecycle
//!
//! The client logs in lazily: the first call to any non-login endpoint
//! triggers `auth/login` with the stored credentials. If that login completes
//! without the server issuing a `SID` cookie, the call fails with
//! [`QbitError::Auth`](crate::QbitError::Auth) and is not forwarded.
//! Concurrent first calls are funneled through a single in-flight login.
//!
//! # Response decoding
//!
//! Bodies are parsed as JSON where possible; several endpoints answer with
//! plain text (`Ok.`, version strings) which is returned verbatim as a JSON
//! string value.

use crate::error::{QbitError, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::multipart::Form;
use reqwest::header::{self, HeaderMap};
use serde_json::Value;
use std::sync::{Mutex, PoisonError};

const API_PREFIX: &str = "/api/v2/";
const LOGIN_ENDPOINT: &str = "auth/login";

/// Blocking client for a single qBittorrent WebUI instance.
///
/// Holds the base URL, the WebUI credentials and the current session token.
/// Endpoint groups are reached through accessor methods (`auth()`, `app()`,
/// `log()`, `sync()`, `transfer()`, `torrents()`, `search()`), each of which
/// borrows the client and delegates every call to [`request`](Self::request).
pub struct QbitClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
    /// Current session token; empty until the first successful login.
    sid: Mutex<String>,
    /// Serializes implicit logins so racing first calls log in once.
    auth_gate: Mutex<()>,
}

impl QbitClient {
    /// Create a client for the WebUI at `url` (e.g. `http://localhost:8080`).
    ///
    /// A trailing slash on `url` is stripped. No request is made until the
    /// first API call.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder().build()?;
        let mut base_url = url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self {
            http,
            base_url,
            username: username.into(),
            password: password.into(),
            sid: Mutex::new(String::new()),
            auth_gate: Mutex::new(()),
        })
    }

    /// Send a raw API request to `endpoint` (e.g. `/torrents/info`) with the
    /// given form parameters.
    ///
    /// This is the primitive every endpoint group is built on; it is public
    /// so callers can reach endpoints this crate has no wrapper for.
    ///
    /// Returns the JSON response, or the raw body as a JSON string when the
    /// body is not valid JSON.
    pub fn request(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value> {
        let form = if params.is_empty() {
            None
        } else {
            let mut form = Form::new();
            for (key, value) in params {
                form = form.text(*key, value.clone());
            }
            Some(form)
        };
        self.dispatch(endpoint, form)
    }

    /// Form-level dispatch backing [`request`](Self::request); taken
    /// directly by `torrents/add`, which attaches raw `.torrent` file parts
    /// to the form. Owns the whole session dance described in the module
    /// docs.
    pub(crate) fn dispatch(&self, endpoint: &str, form: Option<Form>) -> Result<Value> {
        let endpoint = endpoint.trim_start_matches('/');
        if endpoint != LOGIN_ENDPOINT && self.sid().is_empty() {
            self.ensure_session()?;
        }

        let url = self.api_url(endpoint);
        let mut req = self
            .http
            .post(&url)
            .header(header::COOKIE, format!("SID={}", self.sid()));
        if let Some(form) = form {
            req = req.multipart(form);
        }

        let resp = req.send()?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(QbitError::Api {
                status: status.as_u16(),
                url,
            });
        }

        if let Some(sid) = extract_sid(resp.headers()) {
            *self.sid.lock().unwrap_or_else(PoisonError::into_inner) = sid;
        }

        let text = resp.text()?;
        Ok(decode_body(text))
    }

    /// Log in with the stored credentials and fail if no session token was
    /// issued. Called implicitly before the first non-login request; at most
    /// one login is in flight at a time.
    fn ensure_session(&self) -> Result<()> {
        let _gate = self.auth_gate.lock().unwrap_or_else(PoisonError::into_inner);
        // A racing caller may have completed the login while we waited.
        if !self.sid().is_empty() {
            return Ok(());
        }
        let form = Form::new()
            .text("username", self.username.clone())
            .text("password", self.password.clone());
        self.dispatch(LOGIN_ENDPOINT, Some(form))?;
        if self.sid().is_empty() {
            return Err(QbitError::Auth);
        }
        Ok(())
    }

    /// Drop the locally cached session token. The next call logs in again.
    pub(crate) fn clear_session(&self) {
        self.sid.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub(crate) fn credentials(&self) -> (String, String) {
        (self.username.clone(), self.password.clone())
    }

    fn sid(&self) -> String {
        self.sid.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{API_PREFIX}{endpoint}", self.base_url)
    }
}

/// Find the first `SID=<value>` in the response's `Set-Cookie` headers.
fn extract_sid(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::SET_COOKIE) {
        let Ok(cookie) = value.to_str() else { continue };
        if let Some(start) = cookie.find("SID=") {
            let rest = &cookie[start + 4..];
            let end = rest.find(';').unwrap_or(rest.len());
            return Some(rest[..end].to_owned());
        }
    }
    None
}

/// JSON-parse a response body, falling back to the raw text for the
/// plain-text endpoints (`Ok.`, `v4.6.1`, save paths, ...).
fn decode_body(text: String) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

/// Join multiple values into the single delimited form field the API expects.
pub(crate) fn join<S: AsRef<str>>(items: &[S], separator: &str) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Unwrap a decoded body into the plain text the endpoint answered with.
pub(crate) fn into_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
