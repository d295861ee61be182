use tracing::{info, warn};

use super::{
    dto::{BoardRequest, BoardResponse, MessageResponse},
    repo_types::{Board, NewBoard},
};
use crate::{
    auth::{policy::can_modify, repo_types::User},
    error::{AppError, AppResult},
    images::services::{discard_image, upload_image, ImageFile},
    state::AppState,
};

pub(crate) async fn load_board(st: &AppState, id: i64) -> AppResult<Board> {
    st.boards
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("board {}", id)))
}

fn authorize(user: &User, board: &Board, action: &str) -> AppResult<()> {
    if can_modify(user, board) {
        return Ok(());
    }
    warn!(user_id = user.id, board_id = board.id, action, "board access denied");
    Err(AppError::Forbidden(
        "only the author or an administrator may change this board".into(),
    ))
}

/// Uploads the image, then stores a new board owned by `user`.
pub async fn create_board(
    st: &AppState,
    user: &User,
    req: BoardRequest,
    image: ImageFile,
) -> AppResult<MessageResponse> {
    let stored = upload_image(st.storage.as_ref(), image).await?;

    let new = NewBoard {
        owner_id: user.id,
        title: req.title,
        contents: req.contents,
        img_url: stored.url.clone(),
    };
    let board = match st.boards.create(new).await {
        Ok(b) => b,
        Err(e) => {
            discard_image(st.storage.as_ref(), &stored).await;
            return Err(e.into());
        }
    };

    info!(board_id = board.id, user_id = user.id, "board created");
    Ok(MessageResponse::ok("board created"))
}

/// All boards, newest first, each with its comments newest first.
pub async fn get_boards(st: &AppState) -> AppResult<Vec<BoardResponse>> {
    let boards = st.boards.find_all_order_by_created_at_desc().await?;
    Ok(boards.into_iter().map(BoardResponse::from).collect())
}

pub async fn get_board(st: &AppState, id: i64) -> AppResult<BoardResponse> {
    let board = load_board(st, id).await?;
    Ok(BoardResponse::from(board))
}

/// Replaces text and image of a board.
///
/// Unlike a plain fetch-upload-check flow, the owner/admin check runs before
/// the upload, so a rejected caller never writes to storage. A board deleted
/// between the fetch and the save is reported as `NotFound` and the fresh
/// upload is discarded.
pub async fn update_board(
    st: &AppState,
    user: &User,
    id: i64,
    req: BoardRequest,
    image: ImageFile,
) -> AppResult<MessageResponse> {
    let mut board = load_board(st, id).await?;
    authorize(user, &board, "update")?;

    let stored = upload_image(st.storage.as_ref(), image).await?;
    board.update(req.title, req.contents, stored.url.clone());
    match st.boards.save(board).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            discard_image(st.storage.as_ref(), &stored).await;
            return Err(AppError::NotFound(format!("board {}", id)));
        }
        Err(e) => {
            discard_image(st.storage.as_ref(), &stored).await;
            return Err(e.into());
        }
    }

    info!(board_id = id, user_id = user.id, "board updated");
    Ok(MessageResponse::ok("board updated"))
}

pub async fn delete_board(st: &AppState, user: &User, id: i64) -> AppResult<MessageResponse> {
    let board = load_board(st, id).await?;
    authorize(user, &board, "delete")?;

    st.boards.delete_by_id(board.id).await?;
    info!(board_id = id, user_id = user.id, "board deleted");
    Ok(MessageResponse::ok("board deleted"))
}
