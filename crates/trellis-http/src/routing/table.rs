use serde::{Deserialize, Serialize};
use std::fmt;
use trellis_core::{BoundHandler, HandlerArgs, HandlerFuture, HttpMethod, ParamBinding};

/// One mounted route: a verb, a full path and the handler bound to its
/// controller instance
#[derive(Clone)]
pub struct RouteEntry {
    method: HttpMethod,
    path: String,
    controller: &'static str,
    handler_name: &'static str,
    handler: BoundHandler,
    params: Vec<ParamBinding>,
}

impl RouteEntry {
    /// Parameter bindings are kept sorted by position
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        controller: &'static str,
        handler_name: &'static str,
        handler: BoundHandler,
        mut params: Vec<ParamBinding>,
    ) -> Self {
        params.sort_by_key(|binding| binding.index);
        Self {
            method,
            path: path.into(),
            controller,
            handler_name,
            handler,
            params,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn controller(&self) -> &'static str {
        self.controller
    }

    pub fn handler_name(&self) -> &'static str {
        self.handler_name
    }

    pub fn params(&self) -> &[ParamBinding] {
        &self.params
    }

    /// Call the bound method
    pub fn invoke(&self, args: HandlerArgs) -> HandlerFuture {
        (self.handler)(args)
    }

    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            method: self.method,
            path: self.path.clone(),
            controller: self.controller.to_string(),
            handler: self.handler_name.to_string(),
            params: self.params.clone(),
        }
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("controller", &self.controller)
            .field("handler", &self.handler_name)
            .field("params", &self.params)
            .finish()
    }
}

/// Route metadata for introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub method: HttpMethod,
    pub path: String,
    pub controller: String,
    pub handler: String,
    pub params: Vec<ParamBinding>,
}

impl fmt::Display for RouteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.method, self.path)
    }
}

/// Ordered routes of one application, fixed once bootstrap completes
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteEntry>) -> Self {
        Self { routes }
    }

    /// First route, in table order, whose verb and path both equal the request's
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&RouteEntry> {
        self.routes
            .iter()
            .find(|route| route.method == method && route.path == path)
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Serializable listing of the table in order
    pub fn describe(&self) -> Vec<RouteInfo> {
        self.routes.iter().map(RouteEntry::info).collect()
    }
}
