pub mod class;
pub mod module;

pub use class::ClassRegistrar;
pub use module::{declare_module, Module, ModuleRegistrar};
