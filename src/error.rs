//! Request-level errors and their HTTP mapping

use std::convert::Infallible;

use thiserror::Error;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::llm::LlmError;
use crate::models::ErrorResponse;
use crate::store;

/// Why a request failed
#[derive(Debug, Error)]
pub enum ApiError {
    /// The id does not name a user message
    #[error("{0}")]
    NotFound(String),

    /// The completion call failed
    #[error("Completion service error: {0}")]
    Gateway(#[from] LlmError),

    /// The store failed
    #[error("Storage error: {0}")]
    Store(#[from] store::Error),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        ApiError::NotFound(detail.into())
    }

    /// HTTP status reported to the client
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text for the `detail` field of the error body
    ///
    /// Upstream and storage failures get fixed text; the full error is logged.
    pub fn detail(&self) -> String {
        match self {
            ApiError::NotFound(detail) => detail.clone(),
            ApiError::Gateway(_) => "Completion service unavailable".to_string(),
            ApiError::Store(_) => "Internal server error".to_string(),
        }
    }
}

/// Turn rejections into `{"detail": ...}` JSON responses
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, detail) = if let Some(api_err) = err.find::<ApiError>() {
        let status = api_err.status_code();
        if status.is_server_error() {
            error!(error = %api_err, "request failed");
        }
        (status, api_err.detail())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected an application/json body".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else {
        warn!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorResponse { detail }),
        status,
    ))
}
