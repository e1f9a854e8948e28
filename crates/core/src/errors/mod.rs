pub mod core;

pub use self::core::{CoreError, HandlerError};
