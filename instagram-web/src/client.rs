//! Blocking HTTP client for the Instagram web API.
//!
//! Every call goes through one dispatch routine that:
//!
//! 1. Encodes the parameters (`a=1&b=2`) into the query string for `GET`/`HEAD`
//!    or into the form body for `POST`
//! 2. Attaches the browser-like header set, the `x-csrftoken` header and the
//!    session's `Cookie` header
//! 3. Rejects any status other than `200 OK` with
//!    [`InstagramError::Request`](crate::InstagramError::Request)
//! 4. Decodes the JSON body into the endpoint's result type
//! 5. Only then merges the response's `Set-Cookie` headers into the session
//!    and refreshes the CSRF token
//!
//! A call that fails at any step leaves the session exactly as it was.
//!
//! # Concurrency
//!
//! The client is synchronous and every endpoint takes `&mut self`. To share
//! one session between threads, wrap the client in a `Mutex`; otherwise keep
//! one client per logical session.

use crate::config::ClientConfig;
use crate::error::{InstagramError, Result};
use crate::session::{CookieUpdate, Session};
use reqwest::blocking::{Client, Response};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, COOKIE, ORIGIN, REFERER,
};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::SystemTime;
use tracing::{debug, warn};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Ordered `(name, value)` request parameters.
pub(crate) type Params<'a> = [(&'a str, &'a str)];

/// Session-authenticated client for the Instagram web API.
///
/// Holds a [`reqwest::blocking::Client`], the immutable [`ClientConfig`] and
/// the mutable [`Session`]. Endpoint methods are implemented in separate
/// modules (`auth`, `feed`, `user`, `media`) as `impl InstagramClient` blocks.
#[derive(Debug)]
pub struct InstagramClient {
    http: Client,
    config: ClientConfig,
    /// Normalized web root, always ending in `/`.
    root: String,
    /// `scheme://host[:port]`, sent as `Referer` and `Origin`.
    origin: String,
    /// `host[:port]`, sent as `Authority`.
    authority: String,
    session: Session,
}

/// A response that passed the status check but has not been committed to the
/// session yet.
#[derive(Debug)]
pub(crate) struct Exchange {
    url: String,
    body: String,
    cookies: Vec<CookieUpdate>,
}

impl Exchange {
    /// Deserialize the body into `T`.
    pub(crate) fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            debug!(url = %self.url, error = %e, "response did not match expected shape");
            InstagramError::Decode(e)
        })
    }
}

impl InstagramClient {
    /// Resume a session from a cookie string previously returned by
    /// [`cookie_string`](Self::cookie_string).
    ///
    /// No request is made; an expired session is only detected by the next
    /// endpoint call failing with [`InstagramError::Request`].
    ///
    /// ```
    /// use instagram_web::{ClientConfig, InstagramClient};
    ///
    /// let client = InstagramClient::from_cookies(
    ///     "csrftoken=abc123; ds_user_id=999",
    ///     ClientConfig::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(client.user_id(), Some("999"));
    /// assert_eq!(client.csrf_token(), "abc123");
    /// ```
    pub fn from_cookies(cookies: &str, config: ClientConfig) -> Result<Self> {
        Self::with_session(Session::from_cookie_string(cookies), config)
    }

    /// Log in with a username and password.
    ///
    /// Performs an unauthenticated `HEAD` against the web root to collect a
    /// fresh CSRF token and cookies, then submits the login form. The
    /// credentials are not retained.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Initialization`] — transport setup, the handshake
    ///   or the login request itself failed
    /// - [`InstagramError::Authentication`] — the server rejected the
    ///   credentials
    pub fn login(username: &str, password: &str, config: ClientConfig) -> Result<Self> {
        let mut client = Self::with_session(Session::default(), config)?;
        client.handshake()?;
        client
            .authenticate(username, password)
            .map_err(|e| match e {
                InstagramError::Authentication(_) => e,
                other => InstagramError::initialization_caused_by("login request failed", other),
            })?;
        Ok(client)
    }

    /// Create a client around an explicit [`Session`].
    pub fn with_session(session: Session, config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            InstagramError::initialization(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;
        let host = base.host_str().ok_or_else(|| {
            InstagramError::initialization(format!("base URL {:?} has no host", config.base_url))
        })?;
        let authority = match base.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };
        let origin = base.origin().ascii_serialization();

        let mut root = base.as_str().to_owned();
        if !root.ends_with('/') {
            root.push('/');
        }

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| InstagramError::initialization_caused_by("HTTP client", e.into()))?;

        Ok(Self {
            http,
            config,
            root,
            origin,
            authority,
            session,
        })
    }

    /// Return a reference to the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Numeric id of the logged-in account (`ds_user_id` cookie).
    pub fn user_id(&self) -> Option<&str> {
        self.session.user_id()
    }

    /// Current CSRF token.
    pub fn csrf_token(&self) -> &str {
        self.session.csrf_token()
    }

    /// Serialize the cookie jar for persistence by the caller.
    pub fn cookie_string(&self) -> String {
        self.session.cookie_string()
    }

    /// Whether the session holds a CSRF token and a user id.
    ///
    /// Purely local; see [`Session::is_authenticated`].
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Resolve a path relative to the web root.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path.trim_start_matches('/'))
    }

    /// Dispatch a request, decode the body as `T` and commit the response
    /// cookies.
    pub(crate) fn call<T: DeserializeOwned>(
        &mut self,
        method: Method,
        url: &str,
        params: &Params<'_>,
    ) -> Result<T> {
        let exchange = self.send(method, url, params)?;
        let value = exchange.decode()?;
        self.commit(exchange);
        Ok(value)
    }

    /// Issue a request and check its status without touching the session.
    pub(crate) fn send(&self, method: Method, url: &str, params: &Params<'_>) -> Result<Exchange> {
        let encoded = encode_params(params);
        let sends_body = method != Method::GET && method != Method::HEAD;

        let mut req = if sends_body || encoded.is_empty() {
            self.http.request(method.clone(), url)
        } else {
            self.http.request(method.clone(), format!("{url}?{encoded}"))
        };

        req = req
            .header(ACCEPT, "*/*")
            .header(ACCEPT_LANGUAGE, "en-US")
            .header(CONNECTION, "close")
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header("x-csrftoken", self.session.csrf_token())
            .header("x-requested-with", "XMLHttpRequest")
            .header("x-instagram-ajax", "1")
            .header(REFERER, &self.origin)
            .header("authority", &self.authority)
            .header(ORIGIN, &self.origin);

        if let Some(cookie) = self.session.cookie_header() {
            req = req.header(COOKIE, cookie);
        }
        if sends_body {
            req = req.body(encoded);
        }

        debug!(%method, url, params = params.len(), "dispatching request");
        let resp = req.send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(%method, url, %status, "request rejected");
            return Err(InstagramError::Request {
                status,
                url: url.to_owned(),
            });
        }

        let cookies = cookie_updates(&resp);
        let body = resp.text()?;
        debug!(url, bytes = body.len(), cookies = cookies.len(), "response received");

        Ok(Exchange {
            url: url.to_owned(),
            body,
            cookies,
        })
    }

    /// Merge a successful exchange's cookies into the session.
    pub(crate) fn commit(&mut self, exchange: Exchange) {
        self.session.apply(exchange.cookies);
    }

    /// Collect a fresh CSRF token and anonymous cookies from the web root.
    fn handshake(&mut self) -> Result<()> {
        let root = self.root.clone();
        let exchange = self
            .send(Method::HEAD, &root, &[])
            .map_err(|e| InstagramError::initialization_caused_by("handshake failed", e))?;
        self.commit(exchange);
        if self.session.csrf_token().is_empty() {
            warn!("handshake did not issue a CSRF token");
        }
        Ok(())
    }
}

/// Encode parameters as `name=value` pairs joined by `&`, percent-encoding
/// both sides. Order is preserved.
pub(crate) fn encode_params(params: &Params<'_>) -> String {
    params
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn cookie_updates(resp: &Response) -> Vec<CookieUpdate> {
    let now = SystemTime::now();
    resp.cookies()
        .map(|c| {
            let name = c.name().to_owned();
            let expired = c.max_age().is_some_and(|age| age.is_zero())
                || c.expires().is_some_and(|at| at <= now);
            if expired {
                CookieUpdate::Remove { name }
            } else {
                CookieUpdate::Set {
                    name,
                    value: c.value().to_owned(),
                }
            }
        })
        .collect()
}
