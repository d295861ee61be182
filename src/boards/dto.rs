use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::Board;
use crate::comments::dto::CommentResponse;
use crate::comments::repo_types::sort_newest_first;

/// Text fields of a board as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardRequest {
    pub title: String,
    pub contents: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub msg: String,
    pub status_code: u16,
}

impl MessageResponse {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            status_code: StatusCode::OK.as_u16(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub title: String,
    pub contents: String,
    pub img_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub comment_list: Vec<CommentResponse>,
}

impl From<Board> for BoardResponse {
    fn from(mut b: Board) -> Self {
        sort_newest_first(&mut b.comments);
        Self {
            id: b.id,
            user_id: b.owner.id,
            username: b.owner.username,
            title: b.title,
            contents: b.contents,
            img_url: b.img_url,
            created_at: b.created_at,
            comment_list: b.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}
