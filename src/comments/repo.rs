use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Comment, CommentRow, NewComment};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Comment>>;
    async fn create(&self, new: NewComment) -> anyhow::Result<Comment>;
    /// `Ok(None)` when the comment is gone.
    async fn save(&self, comment: Comment) -> anyhow::Result<Option<Comment>>;
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
}

pub struct PgCommentRepository {
    db: PgPool,
}

impl PgCommentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.board_id, c.user_id, u.username, c.contents, c.created_at
              FROM comments c
              JOIN users u ON u.id = c.user_id
             WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get comment by id")?;
        Ok(row.map(Comment::from))
    }

    async fn create(&self, new: NewComment) -> anyhow::Result<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (board_id, user_id, contents)
                VALUES ($1, $2, $3)
                RETURNING id, board_id, user_id, contents, created_at
            )
            SELECT i.id, i.board_id, i.user_id, u.username, i.contents, i.created_at
              FROM inserted i
              JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(new.board_id)
        .bind(new.owner_id)
        .bind(&new.contents)
        .fetch_one(&self.db)
        .await
        .context("insert comment")?;
        Ok(row.into())
    }

    async fn save(&self, comment: Comment) -> anyhow::Result<Option<Comment>> {
        let res = sqlx::query("UPDATE comments SET contents = $2 WHERE id = $1")
            .bind(comment.id)
            .bind(&comment.contents)
            .execute(&self.db)
            .await
            .context("update comment")?;

        if res.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(comment))
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete comment")?;
        Ok(())
    }
}
