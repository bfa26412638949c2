//! Home and hashtag feed APIs.
//!
//! Both go through the graph endpoint `GET /graphql/query/`.
//!
//! ## `home_feed`
//!
//! Request: `query_id=17861995474116400&id=<own id>&fetch_media_item_count=10`
//!
//! Response:
//! ```json
//! { "data": { "user": { "id": "999", "profile_pic_url": "...", "username": "me" } } }
//! ```
//!
//! ## `tag_feed`
//!
//! Request: `query_id=17875800862117404&tag_name=love&first=10[&after=<cursor>]`
//!
//! Response:
//! ```json
//! {
//!   "data": { "hashtag": {
//!     "name": "love",
//!     "edge_hashtag_to_media": {
//!       "page_info": { "has_next_page": true, "end_cursor": "AQB..." },
//!       "edges": [ { "node": { "id": "1789...", "shortcode": "BcX..." } } ]
//!     }
//!   } }
//! }
//! ```

use crate::client::InstagramClient;
use crate::config::{GRAPHQL_PATH, PAGE_SIZE, QueryId};
use crate::error::{InstagramError, Result};
use crate::types::{GraphData, HashtagData, HomeFeed, TagFeed};
use reqwest::Method;

impl InstagramClient {
    /// Fetch the logged-in account's home query.
    ///
    /// # Errors
    ///
    /// [`InstagramError::Authentication`] if the session has no `ds_user_id`.
    pub fn home_feed(&mut self) -> Result<HomeFeed> {
        let id = self.require_user_id()?;
        let count = PAGE_SIZE.to_string();
        let params = [
            ("query_id", QueryId::Home.as_str()),
            ("id", id.as_str()),
            ("fetch_media_item_count", count.as_str()),
        ];
        let url = self.url(GRAPHQL_PATH);
        let resp: GraphData<HomeFeed> = self.call(Method::GET, &url, &params)?;
        Ok(resp.data)
    }

    /// Fetch one page of recent posts for `tag` (without the leading `#`).
    ///
    /// Pass the previous page's
    /// [`next_cursor`](crate::types::Connection::next_cursor) as `after` to
    /// continue.
    pub fn tag_feed(&mut self, tag: &str, after: Option<&str>) -> Result<TagFeed> {
        let first = PAGE_SIZE.to_string();
        let mut params = vec![
            ("tag_name", tag),
            ("first", first.as_str()),
            ("query_id", QueryId::Hashtag.as_str()),
        ];
        if let Some(cursor) = after {
            params.push(("after", cursor));
        }
        let url = self.url(GRAPHQL_PATH);
        let resp: GraphData<HashtagData> = self.call(Method::GET, &url, &params)?;
        Ok(resp.data.hashtag)
    }

    pub(crate) fn require_user_id(&self) -> Result<String> {
        self.user_id().map(str::to_owned).ok_or_else(|| {
            InstagramError::Authentication("no ds_user_id cookie in session".into())
        })
    }
}
