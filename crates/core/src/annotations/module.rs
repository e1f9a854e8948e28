//! Module declarations: the single entry point the bootstrap reads

use crate::annotations::class::ClassRegistrar;
use crate::foundation::{ClassRef, Component, ComponentId, Controller};
use crate::metadata::{MetadataKey, MetadataStore, MetadataValue, Subject};

/// An application module listing its controllers and providers
pub trait Module: 'static {
    fn declare(module: &mut ModuleRegistrar<'_>);
}

/// Collects a module's controllers and providers.
///
/// Adding a class also runs that class's own declarations, so everything the
/// bootstrap needs is in the store once the module has been declared.
pub struct ModuleRegistrar<'s> {
    store: &'s mut MetadataStore,
    module: ComponentId,
    controllers: Vec<ClassRef>,
    providers: Vec<ClassRef>,
}

impl<'s> ModuleRegistrar<'s> {
    pub fn new(store: &'s mut MetadataStore, module: ComponentId) -> Self {
        Self {
            store,
            module,
            controllers: Vec::new(),
            providers: Vec::new(),
        }
    }

    pub fn controller<C: Controller>(&mut self) -> &mut Self {
        let class = ClassRef::controller::<C>();
        self.declare_class(&class);
        self.controllers.push(class);
        self
    }

    pub fn provider<P: Component>(&mut self) -> &mut Self {
        self.add_provider(ClassRef::of::<P>())
    }

    /// Register `P` under `Token`, for consumers that inject by token
    pub fn provider_as<Token: ?Sized + 'static, P: Component>(&mut self) -> &mut Self {
        self.add_provider(ClassRef::token::<Token, P>())
    }

    fn add_provider(&mut self, class: ClassRef) -> &mut Self {
        self.declare_class(&class);
        self.providers.push(class);
        self
    }

    fn declare_class(&mut self, class: &ClassRef) {
        let mut registrar = ClassRegistrar::new(&mut *self.store, class);
        class.run_declarations(&mut registrar);
    }

    /// Record the collected lists on the module. Empty lists are not recorded.
    pub fn finish(self) -> Subject {
        let subject = Subject::Class(self.module);
        if !self.controllers.is_empty() {
            self.store.set_metadata(
                subject,
                MetadataKey::Controllers,
                MetadataValue::Classes(self.controllers),
            );
        }
        if !self.providers.is_empty() {
            self.store.set_metadata(
                subject,
                MetadataKey::Providers,
                MetadataValue::Classes(self.providers),
            );
        }
        subject
    }
}

/// Run `M`'s declarations into `store` and return the module's subject
pub fn declare_module<M: Module>(store: &mut MetadataStore) -> Subject {
    let mut registrar = ModuleRegistrar::new(store, ComponentId::of::<M>());
    M::declare(&mut registrar);
    let subject = registrar.finish();

    tracing::debug!(
        module = %subject,
        controllers = store.classes(&subject, MetadataKey::Controllers).len(),
        providers = store.classes(&subject, MetadataKey::Providers).len(),
        "Module declared"
    );
    subject
}
