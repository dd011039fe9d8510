#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod config;
pub mod logging;
pub mod signals;

pub use config::{AppConfig, ConfigError, ENV_PREFIX, LogFormat, LoggingConfig};
pub use logging::{build_env_filter, init_logging};
pub use signals::{shutdown_token, wait_for_shutdown};
