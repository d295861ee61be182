use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Board, BoardRow, NewBoard};
use crate::comments::repo_types::{Comment, CommentRow};

/// Storage contract consumed by the board service.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Every board, newest first, with its comments loaded.
    async fn find_all_order_by_created_at_desc(&self) -> anyhow::Result<Vec<Board>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Board>>;
    /// First save: assigns id and created_at.
    async fn create(&self, new: NewBoard) -> anyhow::Result<Board>;
    /// Persists title, contents and img_url; `Ok(None)` when the board is gone.
    async fn save(&self, board: Board) -> anyhow::Result<Option<Board>>;
    /// Removes the board; its comments go with it.
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
}

pub struct PgBoardRepository {
    db: PgPool,
}

impl PgBoardRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn comments_for(&self, board_ids: &[i64]) -> anyhow::Result<HashMap<i64, Vec<Comment>>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.board_id, c.user_id, u.username, c.contents, c.created_at
              FROM comments c
              JOIN users u ON u.id = c.user_id
             WHERE c.board_id = ANY($1)
             ORDER BY c.id ASC
            "#,
        )
        .bind(board_ids)
        .fetch_all(&self.db)
        .await
        .context("list comments by boards")?;

        let mut by_board: HashMap<i64, Vec<Comment>> = HashMap::new();
        for row in rows {
            by_board.entry(row.board_id).or_default().push(row.into());
        }
        Ok(by_board)
    }
}

#[async_trait]
impl BoardRepository for PgBoardRepository {
    async fn find_all_order_by_created_at_desc(&self) -> anyhow::Result<Vec<Board>> {
        let rows = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT b.id, b.user_id, u.username, b.title, b.contents, b.img_url, b.created_at
              FROM boards b
              JOIN users u ON u.id = b.user_id
             ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list boards")?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut comments = self.comments_for(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let cs = comments.remove(&r.id).unwrap_or_default();
                r.into_board(cs)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Board>> {
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT b.id, b.user_id, u.username, b.title, b.contents, b.img_url, b.created_at
              FROM boards b
              JOIN users u ON u.id = b.user_id
             WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get board by id")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let comments = self.comments_for(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(Some(row.into_board(comments)))
    }

    async fn create(&self, new: NewBoard) -> anyhow::Result<Board> {
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            WITH inserted AS (
                INSERT INTO boards (user_id, title, contents, img_url)
                VALUES ($1, $2, $3, $4)
                RETURNING id, user_id, title, contents, img_url, created_at
            )
            SELECT i.id, i.user_id, u.username, i.title, i.contents, i.img_url, i.created_at
              FROM inserted i
              JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(new.owner_id)
        .bind(&new.title)
        .bind(&new.contents)
        .bind(&new.img_url)
        .fetch_one(&self.db)
        .await
        .context("insert board")?;
        Ok(row.into_board(Vec::new()))
    }

    async fn save(&self, board: Board) -> anyhow::Result<Option<Board>> {
        let res = sqlx::query(
            r#"
            UPDATE boards
               SET title = $2, contents = $3, img_url = $4
             WHERE id = $1
            "#,
        )
        .bind(board.id)
        .bind(&board.title)
        .bind(&board.contents)
        .bind(&board.img_url)
        .execute(&self.db)
        .await
        .context("update board")?;

        if res.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(board))
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        // comments are removed by ON DELETE CASCADE
        sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete board")?;
        Ok(())
    }
}
