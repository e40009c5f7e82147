// GET /messages handler

use tracing::info;
use warp::http::StatusCode;

use super::AppState;
use crate::error::ApiError;
use crate::models::Message;

/// Every stored row, oldest first
pub async fn list_messages(state: &AppState) -> Result<Vec<Message>, ApiError> {
    let mut session = state.store.session().await?;
    Ok(session.list_all().await?)
}

pub async fn list_messages_handler(state: AppState) -> Result<impl warp::Reply, warp::Rejection> {
    info!("GET /messages");

    let messages = list_messages(&state).await.map_err(warp::reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&messages),
        StatusCode::OK,
    ))
}
