//! `OpenAPI` registry for schema and operation management.
//!
//! # Flow
//! 1. **Registration**: routes register their operations via `register_operation`.
//! 2. **Schema Collection**: request/response types are registered via `ensure_schema`.
//! 3. **Generation**: `build_openapi` aggregates everything into one `OpenAPI` document.

use anyhow::Result;
use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use utoipa::openapi::{
    OpenApi, OpenApiBuilder, Ref, RefOr, Required,
    content::ContentBuilder,
    info::{ContactBuilder, InfoBuilder, LicenseBuilder},
    path::{
        HttpMethod, OperationBuilder as UOperationBuilder, ParameterBuilder, ParameterIn,
        PathItemBuilder, PathsBuilder,
    },
    request_body::RequestBodyBuilder,
    response::{ResponseBuilder, ResponsesBuilder},
    schema::{ComponentsBuilder, KnownFormat, ObjectBuilder, Schema, SchemaFormat, SchemaType, Type},
};

use crate::operation_builder;

/// Type alias for schema collections used in API operations.
pub type SchemaCollection = Vec<(String, RefOr<Schema>)>;

/// Contact block of the document info
#[derive(Debug, Clone, Default)]
pub struct OpenApiContact {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// License block of the document info
#[derive(Debug, Clone)]
pub struct OpenApiLicense {
    pub name: String,
    pub url: Option<String>,
}

/// `OpenAPI` document metadata
#[derive(Debug, Clone)]
pub struct OpenApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<OpenApiContact>,
    pub license: Option<OpenApiLicense>,
}

impl Default for OpenApiInfo {
    fn default() -> Self {
        Self {
            title: "API Documentation".to_owned(),
            version: "0.1.0".to_owned(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }
}

/// Interface for registering API operations and schemas.
pub trait OpenApiRegistry: Send + Sync {
    /// Register an API operation specification.
    ///
    /// Returns `false` when the operation is rejected and must not be mounted.
    fn register_operation(&self, spec: &operation_builder::OperationSpec) -> bool;

    /// Ensure schema for a type (including transitive dependencies) is registered
    /// under components and return the canonical component name for `$ref`.
    fn ensure_schema_raw(&self, name: &str, schemas: SchemaCollection) -> String;
}

/// Registers a type and its dependencies into the registry and returns its component name.
#[must_use]
pub fn ensure_schema<T: utoipa::ToSchema + utoipa::PartialSchema + 'static>(
    registry: &dyn OpenApiRegistry,
) -> String {
    use utoipa::PartialSchema;

    let root_name = T::name().to_string();

    // T's own schema goes first (actual object, not a ref) to avoid self-referential components
    let mut collected: SchemaCollection = vec![(root_name.clone(), <T as PartialSchema>::schema())];
    T::schemas(&mut collected);

    registry.ensure_schema_raw(&root_name, collected)
}

/// Inline schema for a primitive JSON type name.
fn primitive_schema(type_name: &str) -> Schema {
    let builder = match type_name {
        "integer" => ObjectBuilder::new()
            .schema_type(SchemaType::Type(Type::Integer))
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int32))),
        "number" => ObjectBuilder::new()
            .schema_type(SchemaType::Type(Type::Number))
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Double))),
        "boolean" => ObjectBuilder::new().schema_type(SchemaType::Type(Type::Boolean)),
        _ => ObjectBuilder::new().schema_type(SchemaType::Type(Type::String)),
    };
    Schema::Object(builder.build())
}

fn http_method(method: &http::Method) -> HttpMethod {
    match *method {
        http::Method::POST => HttpMethod::Post,
        _ => HttpMethod::Get,
    }
}

/// Thread-safe registry implementation.
///
/// `DashMap` for concurrent operation registration and `ArcSwap` for
/// copy-on-write schema components.
pub struct OpenApiRegistryImpl {
    /// Operation specs keyed by "METHOD:path"
    pub operation_specs: DashMap<String, operation_builder::OperationSpec>,
    /// Schema components
    pub components_registry: ArcSwap<HashMap<String, RefOr<Schema>>>,
}

impl OpenApiRegistryImpl {
    #[must_use]
    pub fn new() -> Self {
        Self {
            operation_specs: DashMap::new(),
            components_registry: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    fn build_operation(
        spec: &operation_builder::OperationSpec,
    ) -> utoipa::openapi::path::Operation {
        let mut op = UOperationBuilder::new()
            .operation_id(spec.operation_id.clone().or(Some(spec.handler_id.clone())))
            .summary(spec.summary.clone())
            .description(spec.description.clone());

        for tag in &spec.tags {
            op = op.tag(tag.clone());
        }

        for p in &spec.params {
            let in_ = match p.location {
                operation_builder::ParamLocation::Query => ParameterIn::Query,
            };
            let required = if p.required {
                Required::True
            } else {
                Required::False
            };

            let param = ParameterBuilder::new()
                .name(&p.name)
                .parameter_in(in_)
                .required(required)
                .description(p.description.clone())
                .schema(Some(primitive_schema(&p.param_type)))
                .build();

            op = op.parameter(param);
        }

        if let Some(rb) = &spec.request_body {
            let content = ContentBuilder::new()
                .schema(Some(RefOr::Ref(Ref::from_schema_name(
                    rb.schema_name.clone(),
                ))))
                .build();
            let mut rbld = RequestBodyBuilder::new()
                .description(rb.description.clone())
                .content(rb.content_type, content);
            if rb.required {
                rbld = rbld.required(Some(Required::True));
            }
            op = op.request_body(Some(rbld.build()));
        }

        let mut responses = ResponsesBuilder::new();
        for r in &spec.responses {
            let content = match (&r.schema_name, r.inline_type) {
                (Some(name), _) => ContentBuilder::new()
                    .schema(Some(RefOr::Ref(Ref::from_schema_name(name.clone()))))
                    .build(),
                (None, Some(type_name)) => ContentBuilder::new()
                    .schema(Some(primitive_schema(type_name)))
                    .build(),
                (None, None) => ContentBuilder::new()
                    .schema(Some(Schema::Object(ObjectBuilder::new().build())))
                    .build(),
            };
            let resp = ResponseBuilder::new()
                .description(&r.description)
                .content(r.content_type, content)
                .build();
            responses = responses.response(r.status.to_string(), resp);
        }

        op.responses(responses.build()).build()
    }

    /// Generate the complete `OpenAPI` document from registered operations and schemas.
    ///
    /// # Errors
    /// Currently infallible; kept fallible so hosts can surface generation failures.
    pub fn build_openapi(&self, info: &OpenApiInfo) -> Result<OpenApi> {
        let op_count = self.operation_specs.len();
        tracing::info!("Building OpenAPI: found {op_count} registered operations");

        // Group by path so several methods on one path share a PathItem; BTreeMap keeps output stable
        let mut by_path: BTreeMap<String, PathItemBuilder> = BTreeMap::new();
        for entry in &self.operation_specs {
            let spec = entry.value();
            let openapi_path = operation_builder::axum_to_openapi_path(&spec.path);
            let item = by_path.remove(&openapi_path).unwrap_or_default();
            by_path.insert(
                openapi_path,
                item.operation(http_method(&spec.method), Self::build_operation(spec)),
            );
        }

        let mut paths = PathsBuilder::new();
        for (path, item) in by_path {
            paths = paths.path(path, item.build());
        }

        let mut components = ComponentsBuilder::new();
        for (name, schema) in self.components_registry.load().iter() {
            components = components.schema(name.clone(), schema.clone());
        }

        let openapi_info = InfoBuilder::new()
            .title(&info.title)
            .version(&info.version)
            .description(info.description.clone())
            .terms_of_service(info.terms_of_service.clone())
            .contact(info.contact.as_ref().map(|c| {
                ContactBuilder::new()
                    .name(c.name.clone())
                    .url(c.url.clone())
                    .build()
            }))
            .license(info.license.as_ref().map(|l| {
                LicenseBuilder::new()
                    .name(&l.name)
                    .url(l.url.clone())
                    .build()
            }))
            .build();

        let openapi = OpenApiBuilder::new()
            .info(openapi_info)
            .paths(paths.build())
            .components(Some(components.build()))
            .build();

        Ok(openapi)
    }
}

impl Default for OpenApiRegistryImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenApiRegistry for OpenApiRegistryImpl {
    fn register_operation(&self, spec: &operation_builder::OperationSpec) -> bool {
        let operation_key = format!("{}:{}", spec.method.as_str(), spec.path);
        self.operation_specs
            .insert(operation_key.clone(), spec.clone());

        tracing::debug!(
            handler_id = %spec.handler_id,
            method = %spec.method.as_str(),
            path = %spec.path,
            summary = %spec.summary.as_deref().unwrap_or("No summary"),
            operation_key = %operation_key,
            "Registered API operation in registry"
        );
        true
    }

    fn ensure_schema_raw(&self, root_name: &str, schemas: SchemaCollection) -> String {
        // Snapshot & copy-on-write
        let current = self.components_registry.load();
        let mut reg = (**current).clone();

        for (name, schema) in schemas {
            // identical → no-op; different → warn & override
            if let Some(existing) = reg.get(&name) {
                let a = serde_json::to_value(existing).ok();
                let b = serde_json::to_value(&schema).ok();
                if a == b {
                    continue;
                }
                tracing::warn!(%name, "Schema content conflict; overriding with latest");
            }
            reg.insert(name, schema);
        }

        self.components_registry.store(Arc::new(reg));
        root_name.to_owned()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::operation_builder::{OperationSpec, ParamLocation, ParamSpec, ResponseSpec};
    use http::Method;

    fn minimal_op(method: Method, path: &str, handler_id: &str) -> OperationSpec {
        OperationSpec {
            method,
            path: path.to_owned(),
            operation_id: Some(handler_id.to_owned()),
            summary: None,
            description: None,
            tags: vec![],
            params: vec![],
            request_body: None,
            responses: vec![ResponseSpec {
                status: 200,
                content_type: "text/plain",
                description: "Success".to_owned(),
                schema_name: None,
                inline_type: Some("string"),
            }],
            handler_id: handler_id.to_owned(),
        }
    }

    #[derive(utoipa::ToSchema, serde::Serialize)]
    struct Inner {
        name: String,
    }

    #[derive(utoipa::ToSchema, serde::Serialize)]
    struct Outer {
        items: Vec<Inner>,
    }

    #[test]
    fn test_registry_creation() {
        let registry = OpenApiRegistryImpl::new();
        assert_eq!(registry.operation_specs.len(), 0);
        assert_eq!(registry.components_registry.load().len(), 0);
    }

    #[test]
    fn test_build_empty_openapi_with_info() {
        let registry = OpenApiRegistryImpl::new();
        let info = OpenApiInfo {
            title: "Test API".to_owned(),
            version: "1.0.0".to_owned(),
            description: Some("Test API Description".to_owned()),
            terms_of_service: Some("https://example.com/tos".to_owned()),
            contact: Some(OpenApiContact {
                name: Some("Team".to_owned()),
                url: Some("https://example.com".to_owned()),
            }),
            license: Some(OpenApiLicense {
                name: "MIT".to_owned(),
                url: None,
            }),
        };
        let doc = registry.build_openapi(&info).unwrap();
        let json = serde_json::to_value(&doc).unwrap();

        assert!(json.get("openapi").is_some());
        assert!(json.get("paths").is_some());
        let openapi_info = &json["info"];
        assert_eq!(openapi_info["title"], "Test API");
        assert_eq!(openapi_info["version"], "1.0.0");
        assert_eq!(openapi_info["description"], "Test API Description");
        assert_eq!(openapi_info["termsOfService"], "https://example.com/tos");
        assert_eq!(openapi_info["contact"]["name"], "Team");
        assert_eq!(openapi_info["license"]["name"], "MIT");
    }

    #[test]
    fn test_build_openapi_with_query_param() {
        let registry = OpenApiRegistryImpl::new();
        let mut spec = minimal_op(Method::GET, "/things/get-one", "things.get_one");
        spec.params.push(ParamSpec {
            name: "index".to_owned(),
            location: ParamLocation::Query,
            required: true,
            description: Some("index".to_owned()),
            param_type: "integer".to_owned(),
        });
        registry.register_operation(&spec);

        let doc = registry.build_openapi(&OpenApiInfo::default()).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        let op = &json["paths"]["/things/get-one"]["get"];
        assert_eq!(op["operationId"], "things.get_one");
        assert_eq!(op["parameters"][0]["name"], "index");
        assert_eq!(op["parameters"][0]["in"], "query");
        assert_eq!(op["parameters"][0]["required"], true);
        assert_eq!(op["parameters"][0]["schema"]["type"], "integer");
        assert_eq!(
            op["responses"]["200"]["content"]["text/plain"]["schema"]["type"],
            "string"
        );
    }

    #[test]
    fn test_two_methods_on_one_path_share_item() {
        let registry = OpenApiRegistryImpl::new();
        registry.register_operation(&minimal_op(Method::GET, "/x", "x.get"));
        registry.register_operation(&minimal_op(Method::POST, "/x", "x.post"));

        let doc = registry.build_openapi(&OpenApiInfo::default()).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["paths"]["/x"]["get"].is_object());
        assert!(json["paths"]["/x"]["post"].is_object());
    }

    #[test]
    fn test_ensure_schema_collects_nested_types() {
        let registry = OpenApiRegistryImpl::new();
        let name = ensure_schema::<Outer>(&registry);
        assert_eq!(name, "Outer");

        let components = registry.components_registry.load();
        assert!(components.contains_key("Outer"));
        assert!(components.contains_key("Inner"));
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let registry = OpenApiRegistryImpl::new();
        ensure_schema::<Inner>(&registry);
        ensure_schema::<Inner>(&registry);
        assert_eq!(registry.components_registry.load().len(), 1);
    }
}
