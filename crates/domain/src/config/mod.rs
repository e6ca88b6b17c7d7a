pub mod errors;
pub mod logging;
pub mod resolution;
pub mod root;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolution::{LookupBackend, ResolutionConfig};
pub use root::{CliOverrides, Config};
