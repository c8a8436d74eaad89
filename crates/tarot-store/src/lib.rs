pub mod config;
pub mod files;
pub mod logging;

pub use config::{ConfigError, LoggingConfig, StoreConfig, ValidationError};
pub use files::LocalFileStore;
pub use logging::{LoggingGuard, init_logging};
