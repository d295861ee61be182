use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::Comment;

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub contents: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub contents: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            user_id: c.owner.id,
            username: c.owner.username,
            contents: c.contents,
            created_at: c.created_at,
        }
    }
}
