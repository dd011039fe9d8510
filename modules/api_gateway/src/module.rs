//! REST host: owns the router, the `OpenAPI` document and the HTTP server loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use apikit::{
    OpenApiInfo, OpenApiRegistry, OpenApiRegistryImpl, OperationSpec, RestApiCapability,
    SchemaCollection,
};

use crate::config::ApiGatewayConfig;
use crate::error::GatewayError;
use crate::middleware::request_id;
use crate::web;

/// Collects typed operation specs from REST modules and serves them behind one router.
pub struct ApiGateway {
    config: ApiGatewayConfig,
    openapi_registry: Arc<OpenApiRegistryImpl>,

    // Duplicate detection per (method, path)
    registered_routes: DashMap<(Method, String), ()>,
}

impl Default for ApiGateway {
    fn default() -> Self {
        Self::new(ApiGatewayConfig::default())
    }
}

impl ApiGateway {
    #[must_use]
    pub fn new(config: ApiGatewayConfig) -> Self {
        Self {
            config,
            openapi_registry: Arc::new(OpenApiRegistryImpl::new()),
            registered_routes: DashMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiGatewayConfig {
        &self.config
    }

    /// Number of operations accepted so far
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.openapi_registry.operation_specs.len()
    }

    /// Add the built-in health endpoints.
    ///
    /// - `/health`: JSON status with a timestamp
    /// - `/healthz`: plain `ok` liveness probe
    pub fn rest_prepare(&self, router: Router) -> Router {
        tracing::debug!(
            bind_addr = %self.config.bind_addr,
            "REST host prepared base router with health check endpoints"
        );
        router
            .route("/health", get(web::health_check))
            .route("/healthz", get(web::healthz))
    }

    /// Add the documentation routes (when enabled) and wrap the router in the middleware stack.
    ///
    /// # Errors
    /// Returns an error if the `OpenAPI` document cannot be built or the CORS config is invalid.
    pub fn rest_finalize(&self, mut router: Router) -> Result<Router, GatewayError> {
        if self.config.enable_docs {
            router = self.add_openapi_routes(router)?;
        }

        router = Self::apply_middleware_stack(router, &self.config)?;

        tracing::info!(
            operations = self.operation_count(),
            docs = self.config.enable_docs,
            "REST host finalized router"
        );
        Ok(router)
    }

    /// Prepare, let every module register its routes, then finalize.
    ///
    /// # Errors
    /// Returns an error if a module fails to register or finalization fails.
    pub fn build_router(&self, modules: &[&dyn RestApiCapability]) -> anyhow::Result<Router> {
        let mut router = self.rest_prepare(Router::new());
        for module in modules {
            router = module.register_rest(router, self)?;
        }
        Ok(self.rest_finalize(router)?)
    }

    /// Build the `OpenAPI` document from the registered operations.
    ///
    /// # Errors
    /// Returns [`GatewayError::OpenApi`] if document generation fails.
    pub fn build_openapi(&self) -> Result<utoipa::openapi::OpenApi, GatewayError> {
        let info = OpenApiInfo::from(&self.config.openapi);
        self.openapi_registry
            .build_openapi(&info)
            .map_err(GatewayError::OpenApi)
    }

    /// Bind `bind_addr` and serve `router` until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the address is invalid, cannot be bound, or the server fails.
    pub async fn serve(
        &self,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<(), GatewayError> {
        let addr = parse_bind_address(&self.config.bind_addr)?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;
        tracing::info!(%addr, "HTTP server bound");

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(GatewayError::Serve)
    }

    /// Serve the `OpenAPI` document and the docs page.
    fn add_openapi_routes(&self, router: Router) -> Result<Router, GatewayError> {
        // Build once, serve as static JSON
        let openapi_doc = Arc::new(self.build_openapi()?);
        tracing::info!(
            operations = self.operation_count(),
            "Serving OpenAPI document at /openapi.json"
        );

        Ok(router
            .route(
                "/openapi.json",
                get(move || {
                    let doc = Arc::clone(&openapi_doc);
                    async move {
                        ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
                    }
                }),
            )
            .route("/", get(web::serve_docs))
            .route("/docs", get(web::serve_docs)))
    }

    /// Apply all middleware layers, innermost first.
    ///
    /// Runtime order (outermost to innermost):
    /// `SetRequestId` → `PropagateRequestId` → Trace → Timeout → `BodyLimit` → CORS → Router.
    fn apply_middleware_stack(
        mut router: Router,
        config: &ApiGatewayConfig,
    ) -> Result<Router, GatewayError> {
        // CORS
        if config.cors_enabled {
            router = router.layer(crate::cors::build_cors_layer(config)?);
        }

        // Body limit
        router = router.layer(RequestBodyLimitLayer::new(config.body_limit_bytes));
        router = router.layer(DefaultBodyLimit::max(config.body_limit_bytes));

        // Timeout
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ));

        // Trace
        router = Self::apply_trace_layer(router);

        // Request id: propagate to the response, then set (outermost)
        router = router.layer(PropagateRequestIdLayer::new(request_id::header()));
        router = router.layer(SetRequestIdLayer::new(
            request_id::header(),
            request_id::MakeReqId,
        ));

        Ok(router)
    }

    fn apply_trace_layer(router: Router) -> Router {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        request_id = %request_id::request_id_of(req),
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<axum::body::Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                        tracing::debug!(parent: span, "response sent");
                    },
                ),
        )
    }

    /// Check if route (method, path) is already registered (returns true if duplicate)
    fn check_duplicate_route(&self, spec: &OperationSpec) -> bool {
        let route_key = (spec.method.clone(), spec.path.clone());
        if self.registered_routes.insert(route_key, ()).is_some() {
            tracing::error!(
                method = %spec.method.as_str(),
                path = %spec.path,
                "Duplicate (method, path) detected; ignoring subsequent registration"
            );
            return true;
        }
        false
    }
}

fn parse_bind_address(bind_addr: &str) -> Result<SocketAddr, GatewayError> {
    bind_addr
        .parse()
        .map_err(|source| GatewayError::InvalidBindAddr {
            addr: bind_addr.to_owned(),
            source,
        })
}

impl OpenApiRegistry for ApiGateway {
    fn register_operation(&self, spec: &OperationSpec) -> bool {
        // First registration wins; the caller must not mount a rejected route
        if self.check_duplicate_route(spec) {
            return false;
        }

        if !self.openapi_registry.register_operation(spec) {
            return false;
        }
        tracing::debug!(
            handler_id = %spec.handler_id,
            method = %spec.method.as_str(),
            path = %spec.path,
            total_operations = self.operation_count(),
            "Registered API operation"
        );
        true
    }

    fn ensure_schema_raw(&self, root_name: &str, schemas: SchemaCollection) -> String {
        self.openapi_registry.ensure_schema_raw(root_name, schemas)
    }
}
