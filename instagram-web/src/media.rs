//! Like API.
//!
//! Endpoint: `POST /web/likes/{media_id}/like/` with an empty form body.
//!
//! Response: `{ "status": "ok" }`

use crate::client::InstagramClient;
use crate::error::Result;
use crate::types::LikeStatus;
use reqwest::Method;

impl InstagramClient {
    /// Like a post by its numeric media id (see
    /// [`MediaNode::id`](crate::types::MediaNode::id)).
    ///
    /// Liking an already-liked post also answers `"ok"`.
    pub fn like(&mut self, media_id: &str) -> Result<LikeStatus> {
        let url = self.url(&format!("web/likes/{}/like/", urlencoding::encode(media_id)));
        self.call(Method::POST, &url, &[])
    }
}
