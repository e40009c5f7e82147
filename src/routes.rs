// Route definitions and handlers

use std::convert::Infallible;

use warp::http::header::{self, HeaderMap, HeaderValue};
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::error::handle_rejection;
use crate::handlers::{self, AppState};

pub fn configure_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let messages = warp::path("messages");

    // GET /messages
    let list_messages = messages
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::list_messages_handler);

    // POST /messages
    let create_message = messages
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::create_message_handler);

    // PUT /messages/{id}
    let update_message = messages
        .and(warp::path::param::<i64>())
        .and(warp::path::end())
        .and(warp::put())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::update_message_handler);

    // DELETE /messages/{id}
    let delete_message = messages
        .and(warp::path::param::<i64>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_state(state))
        .and_then(handlers::delete_message_handler);

    // The browser client runs on another origin. warp::cors() only allows
    // listed request headers, so preflights are answered by `preflight` first.
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(ALLOWED_METHODS);

    let api = list_messages
        .or(create_message)
        .or(update_message)
        .or(delete_message)
        .recover(handle_rejection)
        .with(cors);

    preflight().or(api)
}

const ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];

/// OPTIONS /messages[/...] carrying `Access-Control-Request-Method`
fn preflight() -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    warp::path("messages")
        .and(warp::options())
        .and(warp::header::headers_cloned())
        .and_then(|headers: HeaderMap| async move {
            preflight_response(&headers).ok_or_else(warp::reject::not_found)
        })
}

/// Allow any origin, the API's methods and whatever headers were asked for
fn preflight_response(request: &HeaderMap) -> Option<Response> {
    let origin = request.get(header::ORIGIN)?;
    request.get(header::ACCESS_CONTROL_REQUEST_METHOD)?;

    let mut response = warp::reply().into_response();
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    if let Some(requested) = request.get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
    }
    headers.insert(
        header::VARY,
        HeaderValue::from_static("origin, access-control-request-headers"),
    );

    Some(response)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}
