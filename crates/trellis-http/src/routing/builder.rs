//! Turns declared controllers into a route table

use trellis_core::{
    ClassRef, Container, CoreError, MetadataKey, MetadataStore, ResolutionPolicy, Subject,
};

use crate::routing::table::{RouteEntry, RouteTable};

/// Builds the route table from controller declarations.
///
/// Each controller is constructed once, with constructor arguments resolved
/// from the container, and every declared method that carries both a verb and
/// a path becomes one route under the controller's prefix.
pub struct RouteTableBuilder<'a> {
    store: &'a MetadataStore,
    container: &'a Container,
    policy: ResolutionPolicy,
}

impl<'a> RouteTableBuilder<'a> {
    pub fn new(store: &'a MetadataStore, container: &'a Container, policy: ResolutionPolicy) -> Self {
        Self {
            store,
            container,
            policy,
        }
    }

    /// Controllers are mounted in the order given
    pub fn build(&self, controllers: &[ClassRef]) -> Result<RouteTable, CoreError> {
        let mut routes = Vec::new();
        for controller in controllers {
            self.mount(controller, &mut routes)?;
        }
        Ok(RouteTable::new(routes))
    }

    fn mount(&self, controller: &ClassRef, routes: &mut Vec<RouteEntry>) -> Result<(), CoreError> {
        let class = controller.concrete();
        let prefix = self
            .store
            .text(&Subject::Class(class), MetadataKey::Prefix)
            .unwrap_or_default();

        let args = self
            .container
            .resolve_arguments(controller, self.store, self.policy)?;
        let instance = controller.construct(&args)?;

        let methods = controller.methods(&instance);
        for declared in self.store.routed_methods(class) {
            if !methods.iter().any(|method| method.name == declared) {
                tracing::warn!(
                    controller = %class,
                    method = declared,
                    "Route declared for a method the controller does not expose; not mounted"
                );
            }
        }

        let mut mounted = 0;
        for method in methods {
            let subject = Subject::Method(class, method.name);
            let verb = self.store.verb(&subject);
            let path = self.store.text(&subject, MetadataKey::Path);

            let (verb, path) = match (verb, path) {
                (Some(verb), Some(path)) => (verb, path),
                _ => {
                    tracing::debug!(route = %subject, "Method has no route declaration; skipped");
                    continue;
                }
            };

            let full_path = format!("{}{}", prefix, path);
            tracing::debug!(route = %subject, method = %verb, path = %full_path, "Route registered");

            routes.push(RouteEntry::new(
                verb,
                full_path,
                controller.name(),
                method.name,
                method.handler,
                self.store.param_bindings(&subject).to_vec(),
            ));
            mounted += 1;
        }

        tracing::info!(controller = %class, prefix, routes = mounted, "Controller mounted");
        Ok(())
    }
}
