#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod config;
pub mod cors;
pub mod error;
pub mod middleware;
pub mod module;
pub mod web;

pub use config::{ApiGatewayConfig, CorsConfig, OpenApiConfig};
pub use error::GatewayError;
pub use module::ApiGateway;

/// Config section name under `modules.<name>.config`
pub const MODULE_NAME: &str = "api_gateway";
