#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use trellis_core::{
    respond, Arguments, ClassRegistrar, Component, ComponentId, Controller, CoreError,
    HandlerArgs, HandlerError, HandlerFuture, HandlerResult, MethodDecl, Module, ModuleRegistrar,
};

pub struct GreetingService {
    calls: AtomicUsize,
}

impl GreetingService {
    pub fn greet(&self) -> String {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        format!("hello #{}", call)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Component for GreetingService {
    fn declare(class: &mut ClassRegistrar<'_>) {
        class.injectable();
    }

    fn construct(_args: &Arguments) -> Result<Self, CoreError> {
        Ok(GreetingService {
            calls: AtomicUsize::new(0),
        })
    }
}

pub struct GreetingController {
    pub service: Option<Arc<GreetingService>>,
}

impl GreetingController {
    pub fn greeting(&self) -> Value {
        match &self.service {
            Some(service) => json!(service.greet()),
            None => Value::Null,
        }
    }

    fn hello(this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        Box::pin(async move { Ok(this.greeting()) })
    }

    fn echo(_this: Arc<Self>, args: HandlerArgs) -> HandlerFuture {
        Box::pin(async move { Ok(args.get(0).cloned().unwrap_or(Value::Null)) })
    }

    fn search(_this: Arc<Self>, args: HandlerArgs) -> HandlerFuture {
        Box::pin(async move {
            let term: Option<String> = args.extract(0)?;
            respond(json!({ "term": term, "all": args.get(1) }))
        })
    }

    fn reject(_this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        Box::pin(async { Err(HandlerError::bad_request("name is required")) })
    }

    fn fail(_this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        Box::pin(async { Err(HandlerError::internal("database unavailable")) })
    }

    fn explode(_this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        Box::pin(async { exploding_call() })
    }

    fn explode_early(_this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        panic!("handler exploded before returning a future")
    }

    fn slow(_this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Value::Null)
        })
    }

    fn helper(_this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        Box::pin(async { Ok(json!("not routed")) })
    }
}

impl Component for GreetingController {
    fn parameter_types() -> Vec<ComponentId> {
        vec![ComponentId::of::<GreetingService>()]
    }

    fn declare(class: &mut ClassRegistrar<'_>) {
        class
            .controller("/greetings")
            .get("hello", "/")
            .post("echo", "/echo")
            .body("echo", 0, None)
            .get("search", "/search")
            .query("search", 0, Some("q"))
            .query("search", 1, None)
            .post("reject", "/reject")
            .get("fail", "/fail")
            .get("explode", "/explode")
            .get("explode_early", "/explode-early")
            .get("slow", "/slow");
    }

    fn construct(args: &Arguments) -> Result<Self, CoreError> {
        Ok(GreetingController {
            service: args.get(0),
        })
    }
}

impl Controller for GreetingController {
    fn methods() -> Vec<MethodDecl<Self>> {
        vec![
            MethodDecl::new("hello", Self::hello),
            MethodDecl::new("echo", Self::echo),
            MethodDecl::new("search", Self::search),
            MethodDecl::new("reject", Self::reject),
            MethodDecl::new("fail", Self::fail),
            MethodDecl::new("explode", Self::explode),
            MethodDecl::new("explode_early", Self::explode_early),
            MethodDecl::new("slow", Self::slow),
            MethodDecl::new("helper", Self::helper),
        ]
    }
}

fn exploding_call() -> HandlerResult {
    panic!("handler exploded")
}

/// Declares its prefix twice; the second declaration is the one in effect
pub struct RedeclaredController;

impl RedeclaredController {
    fn list(_this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        Box::pin(async { Ok(json!([])) })
    }
}

impl Component for RedeclaredController {
    fn declare(class: &mut ClassRegistrar<'_>) {
        class.controller("/old").controller("/new").get("list", "/");
    }

    fn construct(_args: &Arguments) -> Result<Self, CoreError> {
        Ok(RedeclaredController)
    }
}

impl Controller for RedeclaredController {
    fn methods() -> Vec<MethodDecl<Self>> {
        vec![MethodDecl::new("list", Self::list)]
    }
}

pub struct GreetingModule;

impl Module for GreetingModule {
    fn declare(module: &mut ModuleRegistrar<'_>) {
        module
            .controller::<GreetingController>()
            .controller::<RedeclaredController>()
            .provider::<GreetingService>();
    }
}

/// Controller without its provider
pub struct MissingProviderModule;

impl Module for MissingProviderModule {
    fn declare(module: &mut ModuleRegistrar<'_>) {
        module.controller::<GreetingController>();
    }
}

pub struct EmptyModule;

impl Module for EmptyModule {
    fn declare(_module: &mut ModuleRegistrar<'_>) {}
}
