//! Session state — the cookie jar and the CSRF token.
//!
//! The jar holds every cookie the service has set for its host, in the order
//! first seen. Two cookies carry meaning for the client:
//!
//! - `csrftoken` — echoed back as the `x-csrftoken` header on every request
//! - `ds_user_id` — numeric id of the logged-in account
//!
//! The whole jar round-trips through a single `Cookie`-header style string:
//!
//! ```text
//! csrftoken=abc123; ds_user_id=999; sessionid=999%3Axyz
//! ```
//!
//! Callers persist that string themselves (see
//! [`InstagramClient::cookie_string`](crate::InstagramClient::cookie_string))
//! and hand it back to
//! [`InstagramClient::from_cookies`](crate::InstagramClient::from_cookies).

use tracing::{debug, trace};

pub(crate) const CSRF_COOKIE: &str = "csrftoken";
pub(crate) const USER_ID_COOKIE: &str = "ds_user_id";

/// In-memory cookie jar plus the current CSRF token.
///
/// Owned exclusively by one [`InstagramClient`](crate::InstagramClient) and
/// only mutated by requests that completed successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookies: Vec<(String, String)>,
    csrf_token: String,
}

/// A single change requested by a `Set-Cookie` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CookieUpdate {
    Set { name: String, value: String },
    /// The server expired the cookie (`Max-Age=0` or an `Expires` in the past).
    Remove { name: String },
}

impl Session {
    /// Parse a serialized cookie string (`name=value` pairs separated by `;`).
    ///
    /// Surrounding whitespace is ignored and values are kept verbatim,
    /// including any double quotes the server put around them. Pairs without
    /// a name or `=` are skipped. When a name repeats, the last value wins.
    /// The CSRF token is taken from the `csrftoken` cookie, or left empty if
    /// there is none.
    pub fn from_cookie_string(s: &str) -> Self {
        let mut session = Self::default();
        for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() => {
                    session.set(name.trim(), value.trim());
                }
                _ => debug!(pair, "skipping malformed cookie pair"),
            }
        }
        if let Some(token) = session.cookie(CSRF_COOKIE).map(str::to_owned) {
            session.csrf_token = token;
        }
        session
    }

    /// Serialize the jar as `name=value` pairs joined by `"; "`.
    ///
    /// Returns an empty string for an empty jar. Feeding the result back into
    /// [`from_cookie_string`](Self::from_cookie_string) yields an equal jar.
    pub fn cookie_string(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Value of the `Cookie` request header, or `None` if the jar is empty.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            None
        } else {
            Some(self.cookie_string())
        }
    }

    /// Look up a cookie by exact name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The token sent as `x-csrftoken`. Empty until the server issues one.
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Numeric id of the logged-in account, from the `ds_user_id` cookie.
    pub fn user_id(&self) -> Option<&str> {
        self.cookie(USER_ID_COOKIE).filter(|id| !id.is_empty())
    }

    /// Whether the session carries both a CSRF token and a user id.
    ///
    /// This only inspects local state; the server may still have revoked the
    /// session.
    pub fn is_authenticated(&self) -> bool {
        !self.csrf_token.is_empty() && self.user_id().is_some()
    }

    /// Merge the cookies set by a successful response, then refresh the CSRF
    /// token from the jar.
    pub(crate) fn apply(&mut self, updates: Vec<CookieUpdate>) {
        for update in updates {
            match update {
                CookieUpdate::Set { name, value } => {
                    trace!(%name, "cookie set");
                    self.set(&name, &value);
                }
                CookieUpdate::Remove { name } => {
                    trace!(%name, "cookie expired");
                    self.cookies.retain(|(n, _)| *n != name);
                }
            }
        }
        if let Some(token) = self.cookie(CSRF_COOKIE).map(str::to_owned) {
            if token != self.csrf_token {
                debug!("CSRF token refreshed");
                self.csrf_token = token;
            }
        }
    }

    fn set(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.cookies.iter_mut().find(|(n, _)| n == name) {
            value.clone_into(&mut slot.1);
        } else {
            self.cookies.push((name.to_owned(), value.to_owned()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(name: &str, value: &str) -> CookieUpdate {
        CookieUpdate::Set {
            name: name.into(),
            value: value.into(),
        }
    }

    #[test]
    fn parses_csrf_and_user_id() {
        let session = Session::from_cookie_string("csrftoken=abc123; ds_user_id=999");
        assert_eq!(session.csrf_token(), "abc123");
        assert_eq!(session.user_id(), Some("999"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn tolerates_loose_formatting() {
        let session =
            Session::from_cookie_string(" a=1;b=2 ;; junk ; =nameless; c=\"quoted\";d=x=y;");
        assert_eq!(session.cookie_string(), "a=1; b=2; c=\"quoted\"; d=x=y");
        assert_eq!(session.cookie("c"), Some("\"quoted\""));
        assert_eq!(session.cookie("d"), Some("x=y"));
        assert_eq!(session.csrf_token(), "");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn repeated_name_keeps_last_value_in_first_position() {
        let session = Session::from_cookie_string("a=1; b=2; a=3");
        assert_eq!(session.cookie_string(), "a=3; b=2");
    }

    #[test]
    fn export_import_export_is_stable() {
        let original = Session::from_cookie_string(
            "mid=WxYz; csrftoken=abc123;ds_user_id=999; sessionid=999%3Aqwe%3A1",
        );
        let exported = original.cookie_string();
        let reimported = Session::from_cookie_string(&exported);
        assert_eq!(reimported.cookie_string(), exported);
        assert_eq!(reimported, original);
        assert_eq!(reimported.user_id(), original.user_id());
    }

    #[test]
    fn quoted_values_survive_round_trip() {
        let exported = "csrftoken=abc123; rur=\"FRC\\05412345\\0541700000000:01f7\"";
        let session = Session::from_cookie_string(exported);
        assert_eq!(
            session.cookie("rur"),
            Some("\"FRC\\05412345\\0541700000000:01f7\"")
        );
        assert_eq!(session.cookie_string(), exported);
    }

    #[test]
    fn empty_jar_has_no_cookie_header() {
        let session = Session::from_cookie_string("");
        assert_eq!(session.cookie_string(), "");
        assert_eq!(session.cookie_header(), None);
    }

    #[test]
    fn apply_refreshes_csrf_from_new_cookie() {
        let mut session = Session::from_cookie_string("csrftoken=old; ds_user_id=1");
        session.apply(vec![set("csrftoken", "new"), set("mid", "m")]);
        assert_eq!(session.csrf_token(), "new");
        assert_eq!(session.cookie_string(), "csrftoken=new; ds_user_id=1; mid=m");
    }

    #[test]
    fn apply_without_csrf_cookie_keeps_token() {
        let mut session = Session::from_cookie_string("csrftoken=keep");
        session.apply(vec![set("rur", "FRC")]);
        assert_eq!(session.csrf_token(), "keep");
    }

    #[test]
    fn removing_csrf_cookie_keeps_last_token() {
        let mut session = Session::from_cookie_string("csrftoken=keep; ds_user_id=5");
        session.apply(vec![CookieUpdate::Remove {
            name: "csrftoken".into(),
        }]);
        assert_eq!(session.cookie("csrftoken"), None);
        assert_eq!(session.csrf_token(), "keep");
        assert_eq!(session.user_id(), Some("5"));
    }

    #[test]
    fn empty_user_id_is_not_an_id() {
        let session = Session::from_cookie_string("csrftoken=t; ds_user_id=");
        assert_eq!(session.user_id(), None);
        assert!(!session.is_authenticated());
    }
}
