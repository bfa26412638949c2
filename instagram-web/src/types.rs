//! Data types for Instagram web API responses.
//!
//! These mirror the JSON returned by the login/like actions and the graph
//! query endpoint. Graph responses nest the interesting part a few levels
//! deep (`data.user.edge_followed_by`); the endpoint modules unwrap that
//! envelope and return the inner [`Connection`].

use serde::{Deserialize, Serialize};

/// Response of the login form.
///
/// API JSON: `{ "authenticated": true, "user": true, "status": "ok" }`.
/// `user` is `false` when the username does not exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: bool,
    #[serde(default)]
    pub status: String,
}

/// Response of the like action. API JSON: `{ "status": "ok" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeStatus {
    pub status: String,
}

impl LikeStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// A user as it appears in follower lists and on the home query.
///
/// API JSON fields: `id`, `profile_pic_url`, `username`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserNode {
    /// Numeric user id, as a string.
    pub id: String,
    #[serde(default)]
    pub profile_pic_url: String,
    #[serde(default)]
    pub username: String,
}

/// A post in a hashtag feed. API JSON fields: `id`, `shortcode`.
///
/// `id` is what [`InstagramClient::like`](crate::InstagramClient::like)
/// expects; `shortcode` is the part after `/p/` in the post's URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaNode {
    pub id: String,
    #[serde(default)]
    pub shortcode: String,
}

/// Pagination state of a [`Connection`].
///
/// API JSON: `{ "has_next_page": true, "end_cursor": "AQB..." }`.
/// `end_cursor` is `null` on the last page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor to pass as `after` for the next page, or `None` on the last page.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_next_page {
            return None;
        }
        self.end_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Wrapper around each item of a [`Connection`]. API JSON: `{ "node": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge<N> {
    pub node: N,
}

/// One page of a paginated graph list.
///
/// API JSON: `{ "count": 1234, "page_info": {...}, "edges": [...] }`.
/// `count` (total across all pages) is absent on hashtag feeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection<N> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<N>>,
}

impl<N> Connection<N> {
    /// Iterate over the nodes of this page.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.edges.iter().map(|e| &e.node)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.page_info.next_cursor()
    }
}

/// Home query result. API JSON path: `data.user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HomeFeed {
    pub user: UserNode,
}

/// One page of a hashtag feed.
///
/// API JSON path: `data.hashtag` with `name` and `edge_hashtag_to_media`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagFeed {
    pub name: String,
    #[serde(rename = "edge_hashtag_to_media")]
    pub media: Connection<MediaNode>,
}

/// The `{ "data": ... }` envelope of every graph response.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphData<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HashtagData {
    pub hashtag: TagFeed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData<T> {
    pub user: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowedBy {
    pub edge_followed_by: Connection<UserNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Follows {
    pub edge_follow: Connection<UserNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn last_page_has_no_cursor() {
        let info: PageInfo =
            serde_json::from_value(json!({ "has_next_page": false, "end_cursor": "AQB" })).unwrap();
        assert_eq!(info.next_cursor(), None);

        let null_cursor: PageInfo =
            serde_json::from_value(json!({ "has_next_page": true, "end_cursor": null })).unwrap();
        assert_eq!(null_cursor.next_cursor(), None);

        let more: PageInfo =
            serde_json::from_value(json!({ "has_next_page": true, "end_cursor": "AQB" })).unwrap();
        assert_eq!(more.next_cursor(), Some("AQB"));
    }

    #[test]
    fn decodes_hashtag_envelope() {
        let body = json!({
            "data": { "hashtag": {
                "name": "love",
                "edge_hashtag_to_media": {
                    "page_info": { "has_next_page": true, "end_cursor": "c1" },
                    "edges": [
                        { "node": { "id": "1", "shortcode": "Ba" } },
                        { "node": { "id": "2", "shortcode": "Bb" } }
                    ]
                }
            }},
            "status": "ok"
        });
        let feed: GraphData<HashtagData> = serde_json::from_value(body).unwrap();
        let feed = feed.data.hashtag;
        assert_eq!(feed.name, "love");
        assert_eq!(feed.media.count, None);
        assert_eq!(feed.media.len(), 2);
        assert_eq!(
            feed.media.nodes().map(|m| m.shortcode.as_str()).collect::<Vec<_>>(),
            ["Ba", "Bb"]
        );
        assert_eq!(feed.media.next_cursor(), Some("c1"));
    }

    #[test]
    fn decodes_follower_envelope() {
        let body = json!({
            "data": { "user": { "edge_followed_by": {
                "count": 42,
                "page_info": { "has_next_page": false, "end_cursor": null },
                "edges": [{ "node": {
                    "id": "7",
                    "profile_pic_url": "https://scontent.example/7.jpg",
                    "username": "seven"
                }}]
            }}}
        });
        let parsed: GraphData<UserData<FollowedBy>> = serde_json::from_value(body).unwrap();
        let page = parsed.data.user.edge_followed_by;
        assert_eq!(page.count, Some(42));
        assert_eq!(page.edges[0].node.username, "seven");
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn missing_envelope_is_an_error() {
        let err = serde_json::from_value::<GraphData<UserData<Follows>>>(
            json!({ "status": "fail", "message": "rate limited" }),
        );
        assert!(err.is_err());
    }

    #[test]
    fn login_status_tolerates_missing_fields() {
        let status: LoginStatus =
            serde_json::from_value(json!({ "authenticated": false, "status": "ok" })).unwrap();
        assert!(!status.authenticated);
        assert!(!status.user);
    }
}
