//! Class- and method-level declarations
//!
//! A component's `declare` receives a [`ClassRegistrar`] scoped to its own
//! class and records its injectability, controller prefix, per-method verbs and
//! paths, parameter sources and inject tokens.

use crate::foundation::{ClassRef, Component, ComponentId};
use crate::metadata::{
    HttpMethod, MetadataKey, MetadataStore, MetadataValue, ParamBinding, ParamSource, Subject,
};

/// Records declarations for one class
pub struct ClassRegistrar<'s> {
    store: &'s mut MetadataStore,
    class: ComponentId,
    parameter_types: Vec<ComponentId>,
}

impl<'s> ClassRegistrar<'s> {
    /// Registrar for the class behind `class`
    pub fn new(store: &'s mut MetadataStore, class: &ClassRef) -> Self {
        Self {
            store,
            class: class.concrete(),
            parameter_types: class.parameter_types(),
        }
    }

    /// Registrar for component type `T`
    pub fn for_type<T: Component>(store: &'s mut MetadataStore) -> Self {
        Self::new(store, &ClassRef::of::<T>())
    }

    pub fn class(&self) -> ComponentId {
        self.class
    }

    /// Mark the class as an injectable provider
    pub fn injectable(&mut self) -> &mut Self {
        self.store.set_metadata(
            Subject::Class(self.class),
            MetadataKey::Injectable,
            MetadataValue::Flag(true),
        );
        self
    }

    /// Resolve constructor parameter `index` by `token` instead of its declared type.
    /// Without a token the declared type at that position is recorded.
    pub fn inject(&mut self, index: usize, token: Option<ComponentId>) -> &mut Self {
        let subject = Subject::Class(self.class);
        let resolved = token.or_else(|| self.parameter_types.get(index).copied());
        if resolved.is_none() {
            tracing::warn!(
                class = %self.class,
                index,
                "Inject declared for a position without a token or declared type"
            );
        }

        let mut tokens = self.store.inject_tokens(&subject).to_vec();
        if tokens.len() <= index {
            tokens.resize(index + 1, None);
        }
        tokens[index] = resolved;
        self.store
            .set_metadata(subject, MetadataKey::InjectTokens, MetadataValue::Tokens(tokens));
        self
    }

    /// Mark the class as a controller mounted under `prefix`
    pub fn controller(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.store.set_metadata(
            Subject::Class(self.class),
            MetadataKey::Prefix,
            MetadataValue::Text(prefix.into()),
        );
        self
    }

    /// Map `method` to `verb` at `path`, relative to the controller prefix
    pub fn route(&mut self, method: &'static str, verb: HttpMethod, path: impl Into<String>) -> &mut Self {
        let subject = Subject::Method(self.class, method);
        self.store
            .set_metadata(subject, MetadataKey::Method, MetadataValue::Verb(verb));
        self.store
            .set_metadata(subject, MetadataKey::Path, MetadataValue::Text(path.into()));
        self
    }

    pub fn get(&mut self, method: &'static str, path: impl Into<String>) -> &mut Self {
        self.route(method, HttpMethod::GET, path)
    }

    pub fn post(&mut self, method: &'static str, path: impl Into<String>) -> &mut Self {
        self.route(method, HttpMethod::POST, path)
    }

    pub fn put(&mut self, method: &'static str, path: impl Into<String>) -> &mut Self {
        self.route(method, HttpMethod::PUT, path)
    }

    pub fn delete(&mut self, method: &'static str, path: impl Into<String>) -> &mut Self {
        self.route(method, HttpMethod::DELETE, path)
    }

    pub fn patch(&mut self, method: &'static str, path: impl Into<String>) -> &mut Self {
        self.route(method, HttpMethod::PATCH, path)
    }

    /// Bind parameter `index` of `method` to a request source.
    ///
    /// Bindings keep insertion order; declaring the same index again replaces
    /// the earlier binding for it.
    pub fn param(
        &mut self,
        method: &'static str,
        index: usize,
        source: ParamSource,
        key: Option<&str>,
    ) -> &mut Self {
        let subject = Subject::Method(self.class, method);
        let binding = ParamBinding::new(index, source, key.map(str::to_string));

        let mut params = self.store.param_bindings(&subject).to_vec();
        match params.iter_mut().find(|existing| existing.index == index) {
            Some(existing) => *existing = binding,
            None => params.push(binding),
        }
        self.store
            .set_metadata(subject, MetadataKey::RouteParams, MetadataValue::Params(params));
        self
    }

    pub fn query(&mut self, method: &'static str, index: usize, key: Option<&str>) -> &mut Self {
        self.param(method, index, ParamSource::Query, key)
    }

    pub fn route_param(&mut self, method: &'static str, index: usize, key: Option<&str>) -> &mut Self {
        self.param(method, index, ParamSource::Param, key)
    }

    pub fn body(&mut self, method: &'static str, index: usize, key: Option<&str>) -> &mut Self {
        self.param(method, index, ParamSource::Body, key)
    }
}
