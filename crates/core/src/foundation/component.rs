//! Declared components and their type-erased class references
//!
//! A component is any type the bootstrap instantiates on the programmer's
//! behalf: providers and controllers. Rust has no constructor reflection, so
//! each component states its constructor parameter types explicitly and
//! builds itself from the positional [`Arguments`] the container resolved.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::annotations::ClassRegistrar;
use crate::errors::CoreError;
use crate::foundation::handler::{Controller, MethodRef};
use crate::foundation::identity::ComponentId;

/// A live, shared component instance
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A type the bootstrap can instantiate
pub trait Component: Send + Sync + Sized + 'static {
    /// Constructor parameter types, in positional order
    fn parameter_types() -> Vec<ComponentId> {
        Vec::new()
    }

    /// Record this component's class- and method-level metadata
    fn declare(_class: &mut ClassRegistrar<'_>) {}

    /// Build an instance from resolved constructor arguments
    fn construct(args: &Arguments) -> Result<Self, CoreError>;
}

/// Positional constructor arguments resolved for one component.
///
/// A position the container could not satisfy holds no value; the component
/// decides whether that is tolerable (`get`) or fatal (`require`).
pub struct Arguments {
    component: ComponentId,
    values: Vec<Option<Instance>>,
}

impl Arguments {
    pub fn new(component: ComponentId, values: Vec<Option<Instance>>) -> Self {
        Self { component, values }
    }

    /// Arguments for a component without constructor parameters
    pub fn empty(component: ComponentId) -> Self {
        Self::new(component, Vec::new())
    }

    /// The component these arguments are for
    pub fn component(&self) -> ComponentId {
        self.component
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the container produced a value at `index`
    pub fn is_resolved(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Some(_)))
    }

    /// The instance at `index`, if resolved and of type `T`
    pub fn get<T: Send + Sync + 'static>(&self, index: usize) -> Option<Arc<T>> {
        let instance = self.values.get(index)?.clone()?;
        instance.downcast::<T>().ok()
    }

    /// The instance at `index`, failing construction when it is absent
    pub fn require<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>, CoreError> {
        self.get::<T>(index).ok_or_else(|| {
            CoreError::unresolved_dependency(
                self.component.short_name(),
                index,
                ComponentId::of::<T>().short_name(),
            )
        })
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved: Vec<bool> = self.values.iter().map(Option::is_some).collect();
        f.debug_struct("Arguments")
            .field("component", &self.component)
            .field("resolved", &resolved)
            .finish()
    }
}

/// Type-erased handle to a component class, stored in module metadata the way
/// a constructor reference would be.
#[derive(Clone, Copy)]
pub struct ClassRef {
    id: ComponentId,
    concrete: ComponentId,
    parameter_types: fn() -> Vec<ComponentId>,
    declare: fn(&mut ClassRegistrar<'_>),
    construct: fn(&Arguments) -> Result<Instance, CoreError>,
    bind_methods: Option<fn(&Instance) -> Vec<MethodRef>>,
}

impl ClassRef {
    /// Reference to a component registered under its own type
    pub fn of<T: Component>() -> Self {
        Self {
            id: ComponentId::of::<T>(),
            concrete: ComponentId::of::<T>(),
            parameter_types: T::parameter_types,
            declare: T::declare,
            construct: construct_erased::<T>,
            bind_methods: None,
        }
    }

    /// Reference to a component registered under a separate token type
    pub fn token<Token: ?Sized + 'static, T: Component>() -> Self {
        Self {
            id: ComponentId::of::<Token>(),
            ..Self::of::<T>()
        }
    }

    /// Reference to a controller, whose methods can be bound after construction
    pub fn controller<C: Controller>() -> Self {
        Self {
            bind_methods: Some(bind_methods_erased::<C>),
            ..Self::of::<C>()
        }
    }

    /// Identity the instance is registered under
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Identity of the type that is actually constructed
    pub fn concrete(&self) -> ComponentId {
        self.concrete
    }

    pub fn name(&self) -> &'static str {
        self.concrete.short_name()
    }

    pub fn parameter_types(&self) -> Vec<ComponentId> {
        (self.parameter_types)()
    }

    pub fn is_controller(&self) -> bool {
        self.bind_methods.is_some()
    }

    pub fn construct(&self, args: &Arguments) -> Result<Instance, CoreError> {
        (self.construct)(args)
    }

    /// The class's own methods bound to `instance`, in declaration order.
    /// Non-controllers have none.
    pub fn methods(&self, instance: &Instance) -> Vec<MethodRef> {
        self.bind_methods
            .map(|bind| bind(instance))
            .unwrap_or_default()
    }

    pub(crate) fn run_declarations(&self, registrar: &mut ClassRegistrar<'_>) {
        (self.declare)(registrar)
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRef")
            .field("id", &self.id)
            .field("concrete", &self.concrete)
            .field("controller", &self.is_controller())
            .finish()
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.concrete == other.concrete
    }
}

fn construct_erased<T: Component>(args: &Arguments) -> Result<Instance, CoreError> {
    let component = T::construct(args)
        .map_err(|error| error.in_construction_of(ComponentId::of::<T>().short_name()))?;
    let instance: Instance = Arc::new(component);
    Ok(instance)
}

fn bind_methods_erased<C: Controller>(instance: &Instance) -> Vec<MethodRef> {
    match instance.clone().downcast::<C>() {
        Ok(controller) => C::methods()
            .into_iter()
            .map(|method| method.bind(controller.clone()))
            .collect(),
        Err(_) => {
            tracing::error!(
                controller = std::any::type_name::<C>(),
                "Instance does not match its controller class; no methods bound"
            );
            Vec::new()
        }
    }
}
