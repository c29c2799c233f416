use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};

use super::types::{DispatchOptions, SearchParams};
use crate::engine::flags::{combine_flags, SEARCH_BY_ATTRIBUTES_DEFAULT_FLAGS};
use crate::engine::{EngineError, SearchEngine, DEFAULT_SEARCH_PROFILE};
use crate::pool::WorkerPool;

/// Per-request search logic.
///
/// Resolves flags and profile, hands the blocking engine call to the worker
/// pool, and shapes the outcome into an HTTP status and JSON body.
pub struct SearchDispatcher {
    engine: Arc<dyn SearchEngine>,
    pool: Arc<WorkerPool>,
    options: DispatchOptions,
}

impl SearchDispatcher {
    pub fn new(
        engine: Arc<dyn SearchEngine>,
        pool: Arc<WorkerPool>,
        options: DispatchOptions,
    ) -> Self {
        Self {
            engine,
            pool,
            options,
        }
    }

    /// Runs one search request to completion.
    pub async fn dispatch(&self, payload: String, params: &SearchParams) -> (StatusCode, String) {
        let flags = match &params.flags {
            Some(raw) => match combine_flags(raw.split('|')) {
                Ok(mask) => mask,
                Err(err) => {
                    tracing::error!("{err} [{payload}]");
                    return self.error_response(&err);
                }
            },
            None => SEARCH_BY_ATTRIBUTES_DEFAULT_FLAGS,
        };
        let profile = params
            .profile
            .clone()
            .unwrap_or_else(|| DEFAULT_SEARCH_PROFILE.to_string());

        let engine = Arc::clone(&self.engine);
        let request = payload.clone();
        let submitted = self.pool.submit(move || {
            let result = engine.search_by_attributes(&request, &profile, flags);
            if let Err(err) = &result {
                tracing::error!("{err} [{request}]");
            }
            result
        });

        let handle = match submitted {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!("{err} [{payload}]");
                return (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err));
            }
        };

        match handle.join().await {
            Ok(Ok(response)) => self.success_response(&payload, response),
            Ok(Err(err)) => self.error_response(&err),
            Err(err) => {
                tracing::error!("{err} [{payload}]");
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err))
            }
        }
    }

    fn success_response(&self, request: &str, response: String) -> (StatusCode, String) {
        if !self.options.echo_request {
            // Default variant: the engine payload passes through untouched.
            return (StatusCode::OK, response);
        }

        let body = json!({
            "request": embed_json(request),
            "response": embed_json(&response),
        });
        (StatusCode::OK, body.to_string())
    }

    fn error_response(&self, err: &EngineError) -> (StatusCode, String) {
        let status = if self.options.map_error_status {
            error_status(err)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, error_body(err))
    }
}

/// The exhaustive failure-kind to HTTP status table.
///
/// Kinds absent from the 4xx rows report 500; nothing is ever derived from
/// the error message itself.
pub fn error_status(err: &EngineError) -> StatusCode {
    match err {
        EngineError::BadInput(_)
        | EngineError::Configuration(_)
        | EngineError::UnknownDataSource(_) => StatusCode::BAD_REQUEST,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::RetryTimeoutExceeded(_) => StatusCode::REQUEST_TIMEOUT,
        EngineError::Database(_)
        | EngineError::DatabaseConnectionLost(_)
        | EngineError::License(_)
        | EngineError::NotInitialized(_)
        | EngineError::Retryable(_)
        | EngineError::Unhandled(_)
        | EngineError::Unrecoverable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The `{"error": ...}` body reported for every failure kind.
fn error_body(err: &impl std::fmt::Display) -> String {
    json!({ "error": err.to_string() }).to_string()
}

/// Keeps JSON payloads structured inside the envelope; anything unparsable is
/// embedded as a plain string.
fn embed_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
