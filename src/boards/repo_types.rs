use sqlx::FromRow;
use time::OffsetDateTime;

use crate::auth::policy::Owned;
use crate::comments::repo_types::Comment;

/// Reference to the user who authored a board or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: i64,
    pub username: String,
}

/// A board together with the comments it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub id: i64,
    pub owner: Owner,
    pub title: String,
    pub contents: String,
    pub img_url: String,
    pub created_at: OffsetDateTime,
    pub comments: Vec<Comment>,
}

impl Board {
    /// Replaces the editable fields in place.
    pub fn update(&mut self, title: String, contents: String, img_url: String) {
        self.title = title;
        self.contents = contents;
        self.img_url = img_url;
    }
}

impl Owned for Board {
    fn owner_id(&self) -> i64 {
        self.owner.id
    }
}

/// Data for inserting a board; id and created_at are assigned by storage.
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub owner_id: i64,
    pub title: String,
    pub contents: String,
    pub img_url: String,
}

/// Row shape of `boards` joined with the owner's username.
#[derive(Debug, FromRow)]
pub struct BoardRow {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub title: String,
    pub contents: String,
    pub img_url: String,
    pub created_at: OffsetDateTime,
}

impl BoardRow {
    pub fn into_board(self, comments: Vec<Comment>) -> Board {
        Board {
            id: self.id,
            owner: Owner {
                id: self.user_id,
                username: self.username,
            },
            title: self.title,
            contents: self.contents,
            img_url: self.img_url,
            created_at: self.created_at,
            comments,
        }
    }
}
