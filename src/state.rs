use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::repo::{PgUserRepository, UserRepository};
use crate::boards::repo::{BoardRepository, PgBoardRepository};
use crate::comments::repo::{CommentRepository, PgCommentRepository};
use crate::config::AppConfig;
use crate::storage::{Storage, StorageClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
    pub users: Arc<dyn UserRepository>,
    pub boards: Arc<dyn BoardRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    pub async fn init(config: AppConfig, db: PgPool) -> anyhow::Result<Self> {
        let storage = Arc::new(Storage::new(&config.s3).await?) as Arc<dyn StorageClient>;

        Ok(Self {
            config: Arc::new(config),
            storage,
            users: Arc::new(PgUserRepository::new(db.clone())),
            boards: Arc::new(PgBoardRepository::new(db.clone())),
            comments: Arc::new(PgCommentRepository::new(db)),
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        storage: Arc<dyn StorageClient>,
        users: Arc<dyn UserRepository>,
        boards: Arc<dyn BoardRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            config,
            storage,
            users,
            boards,
            comments,
        }
    }
}
