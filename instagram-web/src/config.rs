//! Client configuration and fixed protocol values.
//!
//! Everything in this module is immutable once a client is built. The query
//! identifiers and paths are protocol constants of the Instagram web app, not
//! values derived at runtime.

use std::time::Duration;

/// Web root of the service.
pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com/";

/// Browser string sent as `User-Agent`. Instagram rejects AJAX calls from
/// user agents it does not recognize as a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_5) \
    AppleWebKit/601.6.17 (KHTML, like Gecko) Version/9.1.1 Safari/601.6.17";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of items requested per page on paginated graph queries.
pub const PAGE_SIZE: u32 = 10;

/// Login form endpoint, relative to the web root.
pub const LOGIN_PATH: &str = "accounts/login/ajax/";

/// Graph query endpoint, relative to the web root.
pub const GRAPHQL_PATH: &str = "graphql/query/";

/// Server-side query templates for the graph endpoint.
///
/// | Variant     | `query_id`          | Parameters                        |
/// |-------------|---------------------|-----------------------------------|
/// | `Home`      | `17861995474116400` | `id`, `fetch_media_item_count`    |
/// | `Hashtag`   | `17875800862117404` | `tag_name`, `first`, `after`      |
/// | `Followers` | `17851374694183129` | `id`, `first`, `after`            |
/// | `Following` | `17874545323001329` | `id`, `first`, `after`            |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryId {
    Home,
    Hashtag,
    Followers,
    Following,
}

impl QueryId {
    /// Return the numeric id sent as the `query_id` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "17861995474116400",
            Self::Hashtag => "17875800862117404",
            Self::Followers => "17851374694183129",
            Self::Following => "17874545323001329",
        }
    }
}

/// Hashtags with consistently high traffic, handy as `tag_feed` inputs.
pub const POPULAR_TAGS: &[&str] = &[
    "love",
    "followback",
    "instagramers",
    "socialenvy",
    "PleaseForgiveMe",
    "tweegram",
    "photooftheday",
    "20likes",
    "amazing",
    "smile",
    "follow4follow",
    "like4like",
    "look",
    "instalike",
    "igers",
    "picoftheday",
    "food",
    "instadaily",
    "instafollow",
    "followme",
    "girl",
    "instagood",
    "bestoftheday",
    "instacool",
    "socialenvyco",
    "follow",
    "colorful",
    "style",
    "swag",
];

/// Settings fixed at client construction.
///
/// ```
/// use std::time::Duration;
/// use instagram_web::ClientConfig;
///
/// let config = ClientConfig::default().with_timeout(Some(Duration::from_secs(5)));
/// assert_eq!(config.timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Web root every endpoint is resolved against. Also the source of the
    /// `Referer`, `Origin` and `Authority` headers.
    pub base_url: String,
    /// Total per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Point the client at another web root (a proxy or a test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_public_site() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.instagram.com/");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.user_agent.contains("Safari"));
    }

    #[test]
    fn query_ids_are_distinct() {
        let ids = [
            QueryId::Home,
            QueryId::Hashtag,
            QueryId::Followers,
            QueryId::Following,
        ]
        .map(QueryId::as_str);
        for (i, a) in ids.iter().enumerate() {
            assert!(a.chars().all(|c| c.is_ascii_digit()));
            assert!(ids[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn popular_tags_have_no_hash_prefix() {
        assert_eq!(POPULAR_TAGS.len(), 29);
        assert!(POPULAR_TAGS.iter().all(|t| !t.starts_with('#')));
    }
}
