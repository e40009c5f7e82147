// PUT /messages/{id} handler

use tracing::{debug, info};
use warp::http::StatusCode;

use super::AppState;
use crate::error::ApiError;
use crate::models::{Message, MessageContentRequest};

pub const NOT_EDITABLE: &str = "Message not found or not editable";

/// Overwrite a user message and regenerate its reply
///
/// Only user rows can be edited. When the row has no reply, nothing is
/// generated.
pub async fn update_message(state: &AppState, id: i64, content: String) -> Result<Message, ApiError> {
    let mut session = state.store.session().await?;

    let mut user = session
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_EDITABLE))?;

    session.update_content(&mut user, &content).await?;

    match session.find_bot_reply(user.id).await? {
        Some(mut reply) => {
            let reply_text = state.gateway.get_reply(&content).await?;
            session.update_content(&mut reply, &reply_text).await?;
        }
        None => debug!(id, "no reply to regenerate"),
    }

    Ok(user)
}

pub async fn update_message_handler(
    id: i64,
    request: MessageContentRequest,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(id, "PUT /messages/{}", id);

    let message = update_message(&state, id, request.content)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&message),
        StatusCode::OK,
    ))
}
