//! Instagram web API client library.
//!
//! Drives the private AJAX/graph endpoints used by `www.instagram.com` with a
//! cookie session, the way a logged-in browser tab does.
//!
//! # Authentication
//!
//! A client is created either by logging in or by resuming a session from a
//! cookie string saved earlier:
//!
//! ```no_run
//! use instagram_web::{ClientConfig, InstagramClient};
//!
//! let mut client = InstagramClient::login("alice", "hunter2", ClientConfig::default()).unwrap();
//! let saved = client.cookie_string();
//!
//! // Later, in another process
//! let mut client = InstagramClient::from_cookies(&saved, ClientConfig::default()).unwrap();
//! let page = client.tag_feed("love", None).unwrap();
//! ```
//!
//! Every request echoes the `csrftoken` cookie as `x-csrftoken`; the token is
//! refreshed whenever a successful response rotates it.
//!
//! # API endpoint mapping
//!
//! | Method                                | Endpoint                      | Description            |
//! |---------------------------------------|-------------------------------|------------------------|
//! | [`InstagramClient::login`]            | `HEAD /`, `POST /accounts/login/ajax/` | Handshake + login |
//! | [`InstagramClient::home_feed`]        | `GET /graphql/query/`         | Own profile query      |
//! | [`InstagramClient::tag_feed`]         | `GET /graphql/query/`         | Posts for a hashtag    |
//! | [`InstagramClient::followers`]        | `GET /graphql/query/`         | Followers of a user    |
//! | [`InstagramClient::following`]        | `GET /graphql/query/`         | Accounts a user follows |
//! | [`InstagramClient::like`]             | `POST /web/likes/{id}/like/`  | Like a post            |
//!
//! # Concurrency
//!
//! Calls are blocking and take `&mut self`. The client performs no retries,
//! rate limiting or background work.

mod auth;
pub mod client;
pub mod config;
pub mod error;
mod feed;
mod media;
pub mod session;
pub mod types;
mod user;

pub use client::InstagramClient;
pub use config::{ClientConfig, POPULAR_TAGS};
pub use error::{InstagramError, Result};
pub use session::Session;
