use sqlx::FromRow;
use time::OffsetDateTime;

use crate::auth::policy::Owned;
use crate::boards::repo_types::Owner;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub board_id: i64,
    pub owner: Owner,
    pub contents: String,
    pub created_at: OffsetDateTime,
}

impl Owned for Comment {
    fn owner_id(&self) -> i64 {
        self.owner.id
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub board_id: i64,
    pub owner_id: i64,
    pub contents: String,
}

/// Row shape of `comments` joined with the owner's username.
#[derive(Debug, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub board_id: i64,
    pub user_id: i64,
    pub username: String,
    pub contents: String,
    pub created_at: OffsetDateTime,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Self {
            id: r.id,
            board_id: r.board_id,
            owner: Owner {
                id: r.user_id,
                username: r.username,
            },
            contents: r.contents,
            created_at: r.created_at,
        }
    }
}

/// Newest first; equal timestamps keep their relative order.
pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
