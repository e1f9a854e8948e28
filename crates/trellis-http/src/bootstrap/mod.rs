//! Bootstrap engine and the resulting application
//!
//! ```rust,ignore
//! let app = TrellisFactory::create::<AppModule>()?;
//! app.listen(3000).await?;
//! ```

pub mod application;
pub mod engine;
pub mod error;

pub use application::Application;
pub use engine::{AppBootstrapper, TrellisFactory};
pub use error::{BootstrapError, BootstrapResult};
