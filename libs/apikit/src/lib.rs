//! REST building blocks shared by service modules.
//!
//! - [`OperationBuilder`] declares a route together with its `OpenAPI` metadata
//! - [`OpenApiRegistry`] collects operations and schemas into one document
//! - [`Problem`] is the RFC 9457 error body returned by handlers
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod contracts;
pub mod openapi_registry;
pub mod operation_builder;
pub mod problem;
pub mod response;
pub mod result;

pub use contracts::RestApiCapability;
pub use openapi_registry::{
    OpenApiContact, OpenApiInfo, OpenApiLicense, OpenApiRegistry, OpenApiRegistryImpl,
    SchemaCollection, ensure_schema,
};
pub use operation_builder::{
    Missing, OperationBuilder, OperationSpec, ParamLocation, ParamSpec, Present, ResponseSpec,
};
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, bad_request};
pub use result::ApiResult;

/// Prelude for handler modules
pub mod prelude {
    pub use crate::problem::Problem;
    pub use crate::response::{JsonBody, ok_text};
    pub use crate::result::ApiResult;

    pub use axum::{Json, http::StatusCode, response::IntoResponse};
}
