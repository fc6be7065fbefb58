//! Authentication endpoints (`/auth/*`).
//!
//! Explicit login is rarely needed: the dispatcher logs in on its own before
//! the first call that requires a session. Calling
//! [`login`](Auth::login) by hand is useful to validate credentials eagerly
//! or to re-establish a session the server has expired.

use crate::client::{QbitClient, into_text};
use crate::error::Result;

/// Borrowed view over the `/auth/*` endpoint group.
pub struct Auth<'a> {
    client: &'a QbitClient,
}

impl QbitClient {
    /// Authentication endpoints.
    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }
}

impl Auth<'_> {
    /// `POST /auth/login` — authenticate with the client's stored
    /// credentials.
    ///
    /// On success the server issues a `SID` cookie which the dispatcher
    /// captures and attaches to all subsequent calls. Returns the response
    /// body (`Ok.` on success, `Fails.` on bad credentials — the server
    /// answers 200 either way and signals failure by withholding the cookie).
    pub fn login(&self) -> Result<String> {
        let (username, password) = self.client.credentials();
        let resp = self.client.request(
            "/auth/login",
            &[("username", username), ("password", password)],
        )?;
        Ok(into_text(resp))
    }

    /// `POST /auth/logout` — end the session server-side and drop the
    /// locally cached token. The next call logs in again.
    pub fn logout(&self) -> Result<()> {
        self.client.request("/auth/logout", &[])?;
        self.client.clear_session();
        Ok(())
    }
}
