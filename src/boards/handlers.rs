use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{BoardRequest, BoardResponse, MessageResponse},
    services,
};
use crate::{
    auth::extractors::CurrentUser,
    error::{AppError, AppResult},
    images::services::ImageFile,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/boards", get(list_boards).post(create_board))
        .route(
            "/boards/:id",
            get(get_board).put(update_board).delete(delete_board),
        )
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// Multipart form: text fields `title`, `contents` and file field `image`.
async fn read_board_form(mut mp: Multipart) -> AppResult<(BoardRequest, ImageFile)> {
    let mut title = None;
    let mut contents = None;
    let mut image = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("title") => {
                title = Some(field.text().await.map_err(|e| AppError::Validation(e.to_string()))?)
            }
            Some("contents") => {
                contents =
                    Some(field.text().await.map_err(|e| AppError::Validation(e.to_string()))?)
            }
            Some("image") | Some("file") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let body = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                image = Some(ImageFile::new(body, content_type));
            }
            _ => {}
        }
    }

    let title = title.ok_or_else(|| AppError::Validation("title is required".into()))?;
    let contents = contents.ok_or_else(|| AppError::Validation("contents is required".into()))?;
    let image = image.ok_or_else(|| AppError::Validation("image is required".into()))?;
    Ok((BoardRequest { title, contents }, image))
}

#[instrument(skip(state))]
pub async fn list_boards(State(state): State<AppState>) -> AppResult<Json<Vec<BoardResponse>>> {
    services::get_boards(&state).await.map(Json)
}

#[instrument(skip(state))]
pub async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BoardResponse>> {
    services::get_board(&state, id).await.map(Json)
}

#[instrument(skip(state, user, mp), fields(user_id = user.id))]
pub async fn create_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mp: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let (req, image) = read_board_form(mp).await?;
    services::create_board(&state, &user, req, image)
        .await
        .map(Json)
}

#[instrument(skip(state, user, mp), fields(user_id = user.id))]
pub async fn update_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    mp: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let (req, image) = read_board_form(mp).await?;
    services::update_board(&state, &user, id, req, image)
        .await
        .map(Json)
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn delete_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    services::delete_board(&state, &user, id).await.map(Json)
}
