//! Controller methods and the handlers bound from them

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::HandlerError;
use crate::foundation::component::Component;

/// Result of a handler invocation, serialized into the response envelope
pub type HandlerResult = Result<Value, HandlerError>;

/// Future returned by a handler; handlers may suspend on I/O
pub type HandlerFuture = BoxFuture<'static, HandlerResult>;

/// A controller method taking its receiver explicitly
pub type MethodFn<C> = fn(Arc<C>, HandlerArgs) -> HandlerFuture;

/// A method bound to one controller instance
pub type BoundHandler = Arc<dyn Fn(HandlerArgs) -> HandlerFuture + Send + Sync>;

/// A component whose methods can be mapped to routes
pub trait Controller: Component {
    /// The controller's own methods, in declaration order.
    ///
    /// Whether a method becomes a route is decided by its metadata, not by
    /// its presence here.
    fn methods() -> Vec<MethodDecl<Self>>;
}

/// One named controller method
pub struct MethodDecl<C> {
    name: &'static str,
    method: MethodFn<C>,
}

impl<C: Send + Sync + 'static> MethodDecl<C> {
    pub fn new(name: &'static str, method: MethodFn<C>) -> Self {
        Self { name, method }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Bind the method to `instance`; every call goes through that instance
    pub fn bind(self, instance: Arc<C>) -> MethodRef {
        let method = self.method;
        MethodRef {
            name: self.name,
            handler: Arc::new(move |args| method(instance.clone(), args)),
        }
    }
}

/// A method bound to its controller instance
#[derive(Clone)]
pub struct MethodRef {
    pub name: &'static str,
    pub handler: BoundHandler,
}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRef").field("name", &self.name).finish()
    }
}

/// Positional handler arguments produced from the method's parameter bindings.
/// Positions without a binding hold `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerArgs {
    values: Vec<Value>,
}

impl HandlerArgs {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Deserialize the argument at `index`; a missing position reads as `null`
    pub fn extract<T: DeserializeOwned>(&self, index: usize) -> Result<T, HandlerError> {
        let value = self.values.get(index).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| {
            HandlerError::bad_request(format!("Invalid argument at position {}: {}", index, e))
        })
    }
}

/// Serialize a handler's return value
pub fn respond<T: Serialize>(value: T) -> HandlerResult {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreError;
    use crate::foundation::component::Arguments;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        hits: AtomicUsize,
    }

    impl Counter {
        fn hit(&self) -> usize {
            self.hits.fetch_add(1, Ordering::SeqCst) + 1
        }

        fn hit_route(this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
            Box::pin(async move { respond(this.hit()) })
        }
    }

    impl Component for Counter {
        fn construct(_args: &Arguments) -> Result<Self, CoreError> {
            Ok(Counter {
                hits: AtomicUsize::new(0),
            })
        }
    }

    impl Controller for Counter {
        fn methods() -> Vec<MethodDecl<Self>> {
            vec![MethodDecl::new("hit", Self::hit_route)]
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NewUser {
        name: String,
    }

    #[tokio::test]
    async fn test_bound_handler_shares_instance() {
        let counter = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        let bound = Counter::methods()
            .into_iter()
            .map(|method| method.bind(counter.clone()))
            .next()
            .unwrap();

        assert_eq!(bound.name, "hit");
        assert_eq!((bound.handler)(HandlerArgs::empty()).await.unwrap(), json!(1));
        assert_eq!((bound.handler)(HandlerArgs::empty()).await.unwrap(), json!(2));
        assert_eq!(counter.hit(), 3);
    }

    #[test]
    fn test_extract_arguments() {
        let args = HandlerArgs::new(vec![json!({"name": "Jane"}), Value::Null]);

        let user: NewUser = args.extract(0).unwrap();
        assert_eq!(user, NewUser { name: "Jane".into() });

        let missing: Option<String> = args.extract(5).unwrap();
        assert_eq!(missing, None);

        let error = args.extract::<NewUser>(1).unwrap_err();
        assert!(error.is_client_error());
    }
}
