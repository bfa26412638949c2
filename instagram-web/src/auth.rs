//! Login API.
//!
//! Endpoint: `POST /accounts/login/ajax/`
//!
//! Request (form-encoded): `username=...&password=...`
//!
//! Response:
//! ```json
//! { "authenticated": true, "user": true, "status": "ok" }
//! ```
//!
//! A wrong password still answers `200 OK`, with `"authenticated": false`.
//! `"user": false` means the username does not exist. On success the server
//! sets `sessionid`, `ds_user_id` and a rotated `csrftoken`.

use crate::client::InstagramClient;
use crate::config::LOGIN_PATH;
use crate::error::{InstagramError, Result};
use crate::types::LoginStatus;
use reqwest::Method;
use tracing::{info, warn};

impl InstagramClient {
    /// Submit the login form with the current session's CSRF token.
    ///
    /// Usually called through [`InstagramClient::login`], which first runs
    /// the handshake that issues the token.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Authentication`] — the server did not report an
    ///   authenticated session; the session is left unchanged
    /// - [`InstagramError::Request`] — non-200 status (e.g. checkpoint or
    ///   rate limit)
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<LoginStatus> {
        let url = self.url(LOGIN_PATH);
        let params = [("username", username), ("password", password)];
        let exchange = self.send(Method::POST, &url, &params)?;
        let status: LoginStatus = exchange.decode()?;

        if !status.authenticated {
            warn!(username, user_exists = status.user, "login rejected");
            let reason = if status.user {
                "wrong password"
            } else {
                "unknown username"
            };
            return Err(InstagramError::Authentication(reason.into()));
        }

        self.commit(exchange);
        info!(username, user_id = self.user_id().unwrap_or_default(), "logged in");
        Ok(status)
    }
}
