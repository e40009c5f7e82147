// DELETE /messages/{id} handler

use tracing::info;
use warp::http::StatusCode;

use super::AppState;
use crate::error::ApiError;
use crate::models::DeleteResponse;

pub const NOT_DELETABLE: &str = "Message not found or not deletable";
pub const DELETED: &str = "Message and bot response deleted successfully";

/// Remove a user message together with its reply
pub async fn delete_message(state: &AppState, id: i64) -> Result<DeleteResponse, ApiError> {
    let mut session = state.store.session().await?;

    let user = session
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_DELETABLE))?;
    let reply = session.find_bot_reply(user.id).await?;

    session.delete_pair(&user, reply.as_ref()).await?;

    Ok(DeleteResponse {
        message: DELETED.to_string(),
    })
}

pub async fn delete_message_handler(id: i64, state: AppState) -> Result<impl warp::Reply, warp::Rejection> {
    info!(id, "DELETE /messages/{}", id);

    let response = delete_message(&state, id).await.map_err(warp::reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        StatusCode::OK,
    ))
}
