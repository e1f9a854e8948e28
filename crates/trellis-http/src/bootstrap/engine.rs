//! Bootstrap engine: turns one declared module into a ready application
//!
//! The sequence runs once, before anything is served:
//! declare the module, instantiate its providers in order, construct its
//! controllers and mount their routes.

use std::marker::PhantomData;

use trellis_core::{
    declare_module, AppConfigTrait, Container, MetadataKey, MetadataStore, Module,
    ResolutionPolicy,
};

use crate::bootstrap::application::Application;
use crate::bootstrap::error::BootstrapResult;
use crate::config::HttpConfig;
use crate::routing::RouteTableBuilder;

/// Configurable bootstrap of module `M`
#[derive(Debug)]
pub struct AppBootstrapper<M: Module> {
    config: HttpConfig,
    module: PhantomData<fn() -> M>,
}

impl<M: Module> AppBootstrapper<M> {
    pub fn new() -> Self {
        Self {
            config: HttpConfig::default(),
            module: PhantomData,
        }
    }

    /// Configure the HTTP server with custom configuration
    pub fn with_config(mut self, config: HttpConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_resolution(mut self, resolution: ResolutionPolicy) -> Self {
        self.config.resolution = resolution;
        self
    }

    pub fn build(self) -> BootstrapResult<Application> {
        self.config.validate()?;
        let policy = self.config.resolution;

        let mut store = MetadataStore::new();
        let module = declare_module::<M>(&mut store);
        let providers = store.classes(&module, MetadataKey::Providers);
        let controllers = store.classes(&module, MetadataKey::Controllers);

        tracing::info!(
            module = %module,
            providers = providers.len(),
            controllers = controllers.len(),
            resolution = %policy,
            "Bootstrap: module declared"
        );

        let container = Container::build(providers, &store, policy)?;
        let routes = RouteTableBuilder::new(&store, &container, policy).build(controllers)?;

        tracing::info!(
            providers = container.len(),
            routes = routes.len(),
            "Bootstrap: application ready"
        );
        Ok(Application::new(routes, container, self.config))
    }
}

impl<M: Module> Default for AppBootstrapper<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-call bootstrap of a module
pub struct TrellisFactory;

impl TrellisFactory {
    /// Bootstrap `M` with default configuration
    pub fn create<M: Module>() -> BootstrapResult<Application> {
        AppBootstrapper::<M>::new().build()
    }

    pub fn create_with_config<M: Module>(config: HttpConfig) -> BootstrapResult<Application> {
        AppBootstrapper::<M>::new().with_config(config).build()
    }
}
