pub mod adapter;
pub mod lifecycle;

pub use adapter::build_router;
pub use lifecycle::{bind, serve, shutdown_signal};
