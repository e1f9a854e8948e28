pub mod component;
pub mod handler;
pub mod identity;

pub use component::{Arguments, ClassRef, Component, Instance};
pub use handler::{
    respond, BoundHandler, Controller, HandlerArgs, HandlerFuture, HandlerResult, MethodDecl,
    MethodFn, MethodRef,
};
pub use identity::ComponentId;
