use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use trellis_core::Container;

use crate::config::HttpConfig;
use crate::dispatch::{DispatchRequest, DispatchResponse, Dispatcher};
use crate::errors::HttpResult;
use crate::logging::{log_route_table, log_shutdown_info, log_startup_info};
use crate::routing::RouteTable;
use crate::server::{self, build_router, shutdown_signal};

/// A bootstrapped application: its providers, its route table and the
/// dispatcher serving it
#[derive(Debug, Clone)]
pub struct Application {
    routes: Arc<RouteTable>,
    dispatcher: Dispatcher,
    container: Arc<Container>,
    config: HttpConfig,
}

impl Application {
    pub fn new(routes: RouteTable, container: Container, config: HttpConfig) -> Self {
        let routes = Arc::new(routes);
        Self {
            dispatcher: Dispatcher::from_config(routes.clone(), &config),
            routes,
            container: Arc::new(container),
            config,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Dispatch a request without going through a listener
    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResponse {
        self.dispatcher.dispatch(request).await
    }

    /// axum router serving this application
    pub fn router(&self) -> Router {
        build_router(self.dispatcher.clone(), &self.config)
    }

    pub fn into_router(self) -> Router {
        self.router()
    }

    /// Bind `host:port` and serve until Ctrl+C or SIGTERM
    pub async fn listen(self, port: u16) -> HttpResult<()> {
        let listener = server::bind(&self.config.bind_address(port)).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` completes
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> HttpResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = listener.local_addr()?;
        log_startup_info(&format!("http://{}", address), self.routes.len());
        log_route_table(&self.routes);

        server::serve(listener, self.router(), shutdown).await?;
        log_shutdown_info();
        Ok(())
    }
}
