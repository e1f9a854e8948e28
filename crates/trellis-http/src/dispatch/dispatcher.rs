//! Request dispatch against a route table
//!
//! A request is matched on its verb and literal target, its handler
//! arguments are bound from the route's parameter declarations, and the
//! handler's result is wrapped in the JSON envelope. A failing handler only
//! ever affects its own response.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use trellis_core::{HandlerError, HttpMethod};

use crate::config::HttpConfig;
use crate::dispatch::binding::bind_arguments;
use crate::dispatch::request::DispatchRequest;
use crate::dispatch::response::DispatchResponse;
use crate::routing::{RouteEntry, RouteTable};

/// How a request target is compared with route paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare only the part before `?`
    pub strip_query_string: bool,
    /// Ignore one trailing `/` on both sides
    pub normalize_trailing_slash: bool,
}

impl MatchOptions {
    /// Exact string comparison of the whole target
    pub fn exact() -> Self {
        Self::default()
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            strip_query_string: config.strip_query_string,
            normalize_trailing_slash: config.normalize_trailing_slash,
        }
    }

    fn request_path<'t>(&self, target: &'t str) -> &'t str {
        let path = if self.strip_query_string {
            target.split_once('?').map_or(target, |(path, _)| path)
        } else {
            target
        };
        self.normalize(path)
    }

    fn normalize<'p>(&self, path: &'p str) -> &'p str {
        if !self.normalize_trailing_slash || path.len() <= 1 {
            return path;
        }
        path.strip_suffix('/').unwrap_or(path)
    }
}

/// Routes requests to the handlers of one application
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    options: MatchOptions,
    handler_timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self {
            routes,
            options: MatchOptions::exact(),
            handler_timeout: None,
        }
    }

    pub fn from_config(routes: Arc<RouteTable>, config: &HttpConfig) -> Self {
        Self {
            routes,
            options: MatchOptions::from_config(config),
            handler_timeout: config.handler_timeout(),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = Some(timeout);
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// The route a request would reach. Verbs outside the supported set
    /// match nothing.
    pub fn resolve(&self, method: &str, target: &str) -> Option<&RouteEntry> {
        let method = method.parse::<HttpMethod>().ok()?;
        if self.options == MatchOptions::exact() {
            return self.routes.find(method, target);
        }

        let path = self.options.request_path(target);
        self.routes
            .iter()
            .find(|route| route.method() == method && self.options.normalize(route.path()) == path)
    }

    /// Dispatch one request. Never fails: every outcome is a response.
    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResponse {
        let Some(route) = self.resolve(&request.method, &request.target) else {
            tracing::debug!(method = %request.method, target = %request.target, "No route matched");
            return DispatchResponse::not_found();
        };

        let response = self.invoke(route, &request).await;
        tracing::debug!(
            method = %request.method,
            target = %request.target,
            handler = route.handler_name(),
            status = response.status.as_u16(),
            "Request dispatched"
        );
        response
    }

    async fn invoke(&self, route: &RouteEntry, request: &DispatchRequest) -> DispatchResponse {
        let args = match bind_arguments(route.params(), request.query(), &request.body) {
            Ok(args) => args,
            Err(error) => return handler_failure(route, error),
        };

        let future = match std::panic::catch_unwind(AssertUnwindSafe(|| route.invoke(args))) {
            Ok(future) => future,
            Err(panic) => return handler_panic(route, panic),
        };
        let outcome = AssertUnwindSafe(future).catch_unwind();

        let outcome = match self.handler_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, outcome).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::error!(
                        controller = route.controller(),
                        handler = route.handler_name(),
                        timeout_ms = timeout.as_millis() as u64,
                        "Handler timed out"
                    );
                    return DispatchResponse::internal_error();
                }
            },
            None => outcome.await,
        };

        match outcome {
            Ok(Ok(value)) => DispatchResponse::ok(value),
            Ok(Err(error)) => handler_failure(route, error),
            Err(panic) => handler_panic(route, panic),
        }
    }
}

fn handler_failure(route: &RouteEntry, error: HandlerError) -> DispatchResponse {
    if error.is_client_error() {
        tracing::debug!(handler = route.handler_name(), error = %error, "Request rejected");
        return DispatchResponse::bad_request(error.to_string());
    }

    tracing::error!(
        controller = route.controller(),
        handler = route.handler_name(),
        error = %error,
        "Handler failed"
    );
    DispatchResponse::internal_error()
}

fn handler_panic(route: &RouteEntry, panic: Box<dyn Any + Send>) -> DispatchResponse {
    let message = panic
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());

    tracing::error!(
        controller = route.controller(),
        handler = route.handler_name(),
        panic = %message,
        "Handler panicked"
    );
    DispatchResponse::internal_error()
}
