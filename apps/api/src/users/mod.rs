pub mod controller;
pub mod service;

pub use controller::UsersController;
pub use service::{CreateUser, User, UsersService};
