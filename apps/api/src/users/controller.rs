use std::sync::Arc;

use trellis_core::{
    respond, Arguments, ClassRegistrar, Component, ComponentId, Controller, CoreError,
    HandlerArgs, HandlerFuture, MethodDecl,
};

use crate::users::service::{CreateUser, UsersService};

pub struct UsersController {
    users: Arc<UsersService>,
}

impl UsersController {
    pub fn new(users: Arc<UsersService>) -> Self {
        Self { users }
    }

    fn find_all(this: Arc<Self>, _args: HandlerArgs) -> HandlerFuture {
        Box::pin(async move {
            tracing::debug!("UsersController.find_all called");
            respond(this.users.find_all().await)
        })
    }

    fn create(this: Arc<Self>, args: HandlerArgs) -> HandlerFuture {
        Box::pin(async move {
            let body: CreateUser = args.extract(0)?;
            respond(this.users.create(body.name).await)
        })
    }
}

impl Component for UsersController {
    fn parameter_types() -> Vec<ComponentId> {
        vec![ComponentId::of::<UsersService>()]
    }

    fn declare(class: &mut ClassRegistrar<'_>) {
        class
            .controller("/users")
            .get("find_all", "/")
            .post("create", "/")
            .body("create", 0, None);
    }

    fn construct(args: &Arguments) -> Result<Self, CoreError> {
        Ok(Self::new(args.require(0)?))
    }
}

impl Controller for UsersController {
    fn methods() -> Vec<MethodDecl<Self>> {
        vec![
            MethodDecl::new("find_all", Self::find_all),
            MethodDecl::new("create", Self::create),
        ]
    }
}
