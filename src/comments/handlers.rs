use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CommentRequest, CommentResponse},
    services,
};
use crate::{
    auth::extractors::CurrentUser, boards::dto::MessageResponse, error::AppResult,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/boards/:id/comments", post(create_comment))
        .route(
            "/boards/:id/comments/:comment_id",
            put(update_comment).delete(delete_comment),
        )
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(board_id): Path<i64>,
    Json(payload): Json<CommentRequest>,
) -> AppResult<Json<CommentResponse>> {
    services::create_comment(&state, &user, board_id, payload)
        .await
        .map(Json)
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn update_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((board_id, comment_id)): Path<(i64, i64)>,
    Json(payload): Json<CommentRequest>,
) -> AppResult<Json<MessageResponse>> {
    services::update_comment(&state, &user, board_id, comment_id, payload)
        .await
        .map(Json)
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((board_id, comment_id)): Path<(i64, i64)>,
) -> AppResult<Json<MessageResponse>> {
    services::delete_comment(&state, &user, board_id, comment_id)
        .await
        .map(Json)
}
