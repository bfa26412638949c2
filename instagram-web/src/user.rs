//! Follower / following list APIs.
//!
//! Endpoint: `GET /graphql/query/`
//!
//! | Method      | `query_id`          | Connection field   |
//! |-------------|---------------------|--------------------|
//! | `followers` | `17851374694183129` | `edge_followed_by` |
//! | `following` | `17874545323001329` | `edge_follow`      |
//!
//! Request: `query_id=...&id=<user id>&first=10[&after=<cursor>]`
//!
//! Response:
//! ```json
//! {
//!   "data": { "user": { "edge_followed_by": {
//!     "count": 1234,
//!     "page_info": { "has_next_page": true, "end_cursor": "QVFD..." },
//!     "edges": [ { "node": { "id": "42", "profile_pic_url": "...", "username": "someone" } } ]
//!   } } }
//! }
//! ```
//!
//! Private accounts the session does not follow answer with an empty edge
//! list or a non-200 status.

use crate::client::InstagramClient;
use crate::config::{GRAPHQL_PATH, PAGE_SIZE, QueryId};
use crate::error::Result;
use crate::types::{Connection, FollowedBy, Follows, GraphData, UserData, UserNode};
use reqwest::Method;
use serde::de::DeserializeOwned;

impl InstagramClient {
    /// One page of the accounts following `user_id`.
    pub fn followers(&mut self, user_id: &str, after: Option<&str>) -> Result<Connection<UserNode>> {
        let resp: UserData<FollowedBy> = self.user_query(QueryId::Followers, user_id, after)?;
        Ok(resp.user.edge_followed_by)
    }

    /// One page of the accounts `user_id` follows.
    pub fn following(&mut self, user_id: &str, after: Option<&str>) -> Result<Connection<UserNode>> {
        let resp: UserData<Follows> = self.user_query(QueryId::Following, user_id, after)?;
        Ok(resp.user.edge_follow)
    }

    /// [`followers`](Self::followers) of the logged-in account.
    pub fn my_followers(&mut self, after: Option<&str>) -> Result<Connection<UserNode>> {
        let id = self.require_user_id()?;
        self.followers(&id, after)
    }

    /// [`following`](Self::following) of the logged-in account.
    pub fn my_following(&mut self, after: Option<&str>) -> Result<Connection<UserNode>> {
        let id = self.require_user_id()?;
        self.following(&id, after)
    }

    fn user_query<T: DeserializeOwned>(
        &mut self,
        query: QueryId,
        user_id: &str,
        after: Option<&str>,
    ) -> Result<T> {
        let first = PAGE_SIZE.to_string();
        let mut params = vec![
            ("query_id", query.as_str()),
            ("id", user_id),
            ("first", first.as_str()),
        ];
        if let Some(cursor) = after {
            params.push(("after", cursor));
        }
        let url = self.url(GRAPHQL_PATH);
        let resp: GraphData<T> = self.call(Method::GET, &url, &params)?;
        Ok(resp.data)
    }
}
