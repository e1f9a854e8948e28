//! # trellis-http
//!
//! HTTP side of the trellis application framework:
//! - route table built from controller declarations
//! - request dispatcher with the `{"data"}` / `{"error"}` JSON envelope
//! - bootstrap engine (`TrellisFactory`) and an axum-backed listener
//! - HTTP configuration and structured logging setup

pub mod bootstrap;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod routing;
pub mod server;

pub use bootstrap::{AppBootstrapper, Application, BootstrapError, BootstrapResult, TrellisFactory};
pub use config::{HttpConfig, HttpDefaults};
pub use dispatch::{DispatchRequest, DispatchResponse, Dispatcher, Envelope, MatchOptions};
pub use errors::{HttpError, HttpResult};
pub use logging::{init_logging, LoggingConfig};
pub use routing::{RouteEntry, RouteInfo, RouteTable, RouteTableBuilder};
