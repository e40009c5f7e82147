// POST /messages handler

use tracing::{info, warn};
use warp::http::StatusCode;

use super::AppState;
use crate::error::ApiError;
use crate::models::{Message, MessageContentRequest};
use crate::store::NewMessage;

/// Store the user text, generate a reply and store it too
///
/// The user row is committed before the completion call. If that call fails
/// the row stays behind without a reply.
pub async fn create_message(state: &AppState, content: String) -> Result<Vec<Message>, ApiError> {
    let mut session = state.store.session().await?;

    let user = session.insert(NewMessage::user(content)).await?;

    let reply_text = match state.gateway.get_reply(&user.content).await {
        Ok(text) => text,
        Err(e) => {
            warn!(id = user.id, error = %e, "user message stored without a reply");
            return Err(e.into());
        }
    };

    let reply = session.insert(NewMessage::reply(reply_text, user.id)).await?;

    Ok(vec![user, reply])
}

pub async fn create_message_handler(
    request: MessageContentRequest,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(chars = request.content.chars().count(), "POST /messages");

    let messages = create_message(&state, request.content)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&messages),
        StatusCode::OK,
    ))
}
