#[allow(clippy::module_inception)]
pub mod container;
pub mod resolution;

pub use container::Container;
pub use resolution::ResolutionPolicy;
