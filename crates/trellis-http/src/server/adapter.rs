//! axum adapter: every request reaches the dispatcher through one fallback

use std::error::Error as StdError;
use std::sync::Arc;

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::CONTENT_LENGTH;
use axum::http::request::Parts;
use axum::Router;
use http_body_util::LengthLimitError;
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;
use crate::dispatch::{DispatchRequest, DispatchResponse, Dispatcher};

#[derive(Clone)]
struct AdapterState {
    dispatcher: Arc<Dispatcher>,
    max_request_size: usize,
}

/// Router that feeds every request, whatever its verb or path, to `dispatcher`
pub fn build_router(dispatcher: Dispatcher, config: &HttpConfig) -> Router {
    let state = AdapterState {
        dispatcher: Arc::new(dispatcher),
        max_request_size: config.max_request_size,
    };

    let router = Router::new().fallback(dispatch_request).with_state(state);
    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

async fn dispatch_request(State(state): State<AdapterState>, request: Request) -> DispatchResponse {
    let (parts, body) = request.into_parts();

    let declared_length = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());
    if declared_length.is_some_and(|length| length > state.max_request_size) {
        tracing::warn!(limit = state.max_request_size, "Request body exceeds limit");
        return DispatchResponse::payload_too_large();
    }

    let body = match read_body(body, state.max_request_size).await {
        Ok(body) => body,
        Err(response) => return response,
    };

    let request = DispatchRequest::new(parts.method.as_str(), request_target(&parts)).with_body(body);
    state.dispatcher.dispatch(request).await
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, DispatchResponse> {
    to_bytes(body, limit).await.map_err(|error| {
        if exceeds_limit(&error) {
            tracing::warn!(limit, "Request body exceeds limit");
            DispatchResponse::payload_too_large()
        } else {
            tracing::warn!(error = %error, "Failed to read request body");
            DispatchResponse::bad_request("Failed to read request body")
        }
    })
}

fn exceeds_limit(error: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(error) = current {
        if error.is::<LengthLimitError>() {
            return true;
        }
        current = error.source();
    }
    false
}

/// Path and query exactly as received
fn request_target(parts: &Parts) -> String {
    parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |target| target.as_str().to_string())
}
