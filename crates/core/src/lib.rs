//! trellis core: declaration metadata, component traits and the dependency
//! container a trellis application is bootstrapped from.

pub mod annotations;
pub mod config;
pub mod container;
pub mod errors;
pub mod foundation;
pub mod metadata;

pub use annotations::{declare_module, ClassRegistrar, Module, ModuleRegistrar};
pub use config::{AppConfigTrait, ConfigError};
pub use container::{Container, ResolutionPolicy};
pub use errors::{CoreError, HandlerError};
pub use foundation::{
    respond, Arguments, BoundHandler, ClassRef, Component, ComponentId, Controller, HandlerArgs,
    HandlerFuture, HandlerResult, Instance, MethodDecl, MethodFn, MethodRef,
};
pub use metadata::{
    HttpMethod, MetadataKey, MetadataStore, MetadataValue, ParamBinding, ParamSource, Subject,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Framework information
pub const FRAMEWORK_NAME: &str = "trellis";

/// Get framework version
pub fn version() -> &'static str {
    VERSION
}

/// Get framework name
pub fn name() -> &'static str {
    FRAMEWORK_NAME
}
