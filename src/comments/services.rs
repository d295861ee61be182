use tracing::{info, warn};

use super::{
    dto::{CommentRequest, CommentResponse},
    repo_types::{Comment, NewComment},
};
use crate::{
    auth::{policy::can_modify, repo_types::User},
    boards::{dto::MessageResponse, services::load_board},
    error::{AppError, AppResult},
    state::AppState,
};

/// Loads a comment and checks it hangs off the given board.
async fn load_comment(st: &AppState, board_id: i64, comment_id: i64) -> AppResult<Comment> {
    match st.comments.find_by_id(comment_id).await? {
        Some(c) if c.board_id == board_id => Ok(c),
        _ => Err(AppError::NotFound(format!(
            "comment {} on board {}",
            comment_id, board_id
        ))),
    }
}

fn authorize(user: &User, comment: &Comment) -> AppResult<()> {
    if can_modify(user, comment) {
        return Ok(());
    }
    warn!(user_id = user.id, comment_id = comment.id, "comment access denied");
    Err(AppError::Forbidden(
        "only the author or an administrator may change this comment".into(),
    ))
}

pub async fn create_comment(
    st: &AppState,
    user: &User,
    board_id: i64,
    req: CommentRequest,
) -> AppResult<CommentResponse> {
    let board = load_board(st, board_id).await?;
    let comment = st
        .comments
        .create(NewComment {
            board_id: board.id,
            owner_id: user.id,
            contents: req.contents,
        })
        .await?;

    info!(comment_id = comment.id, board_id, user_id = user.id, "comment created");
    Ok(CommentResponse::from(comment))
}

pub async fn update_comment(
    st: &AppState,
    user: &User,
    board_id: i64,
    comment_id: i64,
    req: CommentRequest,
) -> AppResult<MessageResponse> {
    let mut comment = load_comment(st, board_id, comment_id).await?;
    authorize(user, &comment)?;

    comment.contents = req.contents;
    st.comments
        .save(comment)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("comment {}", comment_id)))?;
    info!(comment_id, board_id, user_id = user.id, "comment updated");
    Ok(MessageResponse::ok("comment updated"))
}

pub async fn delete_comment(
    st: &AppState,
    user: &User,
    board_id: i64,
    comment_id: i64,
) -> AppResult<MessageResponse> {
    let comment = load_comment(st, board_id, comment_id).await?;
    authorize(user, &comment)?;

    st.comments.delete_by_id(comment.id).await?;
    info!(comment_id, board_id, user_id = user.id, "comment deleted");
    Ok(MessageResponse::ok("comment deleted"))
}
