pub mod store;
pub mod types;

pub use store::{MetadataKey, MetadataStore, MetadataValue, Subject};
pub use types::{HttpMethod, ParamBinding, ParamSource, UnknownMethod};
