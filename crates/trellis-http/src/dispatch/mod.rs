//! Request dispatch: matching, argument binding and the response envelope

pub mod binding;
pub mod dispatcher;
pub mod request;
pub mod response;

pub use binding::bind_arguments;
pub use dispatcher::{Dispatcher, MatchOptions};
pub use request::DispatchRequest;
pub use response::{DispatchResponse, Envelope};
