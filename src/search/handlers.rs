use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::dispatcher::SearchDispatcher;
use super::types::SearchParams;

/// Process-wide state shared by every request handler.
///
/// Constructed once at startup; the dispatcher inside owns the shared engine
/// handle and the worker pool.
#[derive(Clone)]
pub struct AppContext {
    pub dispatcher: Arc<SearchDispatcher>,
}

/// `POST /search` — the body is the raw attribute payload.
pub async fn handle_search(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
    body: Bytes,
) -> Response {
    let payload = match String::from_utf8(body.to_vec()) {
        Ok(payload) => payload,
        Err(err) => {
            let body = json!({
                "error": format!("request body is not valid UTF-8: {err}")
            });
            return json_response(StatusCode::BAD_REQUEST, body.to_string());
        }
    };

    let (status, body) = ctx.dispatcher.dispatch(payload, &params).await;
    json_response(status, body)
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
