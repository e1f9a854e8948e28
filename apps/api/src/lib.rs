//! Sample trellis application: a `users` resource served from one module

pub mod app_module;
pub mod users;

pub use app_module::AppModule;
