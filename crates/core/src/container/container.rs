use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::container::resolution::ResolutionPolicy;
use crate::errors::CoreError;
use crate::foundation::{Arguments, ClassRef, ComponentId, Instance};
use crate::metadata::{MetadataKey, MetadataStore, Subject};

/// Singleton instances of one application's providers, keyed by the identity
/// each was registered under.
#[derive(Clone, Default)]
pub struct Container {
    instances: HashMap<ComponentId, Instance>,
    order: Vec<ComponentId>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate `providers` strictly in the order given.
    ///
    /// A provider's dependencies are looked up among the providers built
    /// before it; nothing is reordered.
    pub fn build(
        providers: &[ClassRef],
        store: &MetadataStore,
        policy: ResolutionPolicy,
    ) -> Result<Self, CoreError> {
        let mut container = Self::new();
        for provider in providers {
            container.register(provider, store, policy)?;
        }
        Ok(container)
    }

    /// Build and register one provider. A provider already present is kept.
    pub fn register(
        &mut self,
        provider: &ClassRef,
        store: &MetadataStore,
        policy: ResolutionPolicy,
    ) -> Result<(), CoreError> {
        if self.contains(&provider.id()) {
            tracing::debug!(provider = %provider.id(), "Provider listed twice; keeping first instance");
            return Ok(());
        }

        let injectable = store.flag(&Subject::Class(provider.concrete()), MetadataKey::Injectable);
        if !injectable {
            if policy.is_strict() {
                return Err(CoreError::not_injectable(provider.name()));
            }
            tracing::debug!(provider = %provider.id(), "Provider is not marked injectable");
        }

        let args = self.resolve_arguments(provider, store, policy)?;
        let instance = provider.construct(&args)?;
        self.insert(provider.id(), instance);

        tracing::debug!(
            provider = %provider.id(),
            concrete = %provider.concrete(),
            "Provider instantiated"
        );
        Ok(())
    }

    /// Register an already built instance under `id`
    pub fn insert(&mut self, id: ComponentId, instance: Instance) {
        if self.instances.insert(id, instance).is_none() {
            self.order.push(id);
        }
    }

    /// Constructor arguments for `class`, one per position.
    ///
    /// Each position is looked up by its inject token when one was declared,
    /// else by the declared parameter type.
    pub fn resolve_arguments(
        &self,
        class: &ClassRef,
        store: &MetadataStore,
        policy: ResolutionPolicy,
    ) -> Result<Arguments, CoreError> {
        let declared = class.parameter_types();
        let tokens = store.inject_tokens(&Subject::Class(class.concrete()));
        let arity = declared.len().max(tokens.len());

        let mut values = Vec::with_capacity(arity);
        for position in 0..arity {
            let token = tokens
                .get(position)
                .copied()
                .flatten()
                .or_else(|| declared.get(position).copied());
            let value = token.and_then(|token| self.get(&token));

            if value.is_none() {
                let dependency = token.map_or("<undeclared>", |token| token.short_name());
                if policy.is_strict() {
                    return Err(CoreError::unresolved_dependency(class.name(), position, dependency));
                }
                tracing::warn!(
                    component = %class.concrete(),
                    position,
                    dependency,
                    "Unresolved dependency; passing absent argument"
                );
            }
            values.push(value);
        }

        Ok(Arguments::new(class.concrete(), values))
    }

    pub fn get(&self, id: &ComponentId) -> Option<Instance> {
        self.instances.get(id).cloned()
    }

    /// The instance registered under `T`
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.resolve_as::<T, T>()
    }

    /// The instance registered under `Token`, viewed as `T`
    pub fn resolve_as<Token: ?Sized + 'static, T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.get(&ComponentId::of::<Token>())?.downcast::<T>().ok()
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.instances.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered identities in registration order
    pub fn component_ids(&self) -> &[ComponentId] {
        &self.order
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("components", &self.order)
            .finish()
    }
}
