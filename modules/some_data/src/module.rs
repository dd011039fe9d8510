use std::sync::Arc;

use apikit::{OpenApiRegistry, RestApiCapability};
use axum::Router;
use tracing::info;

use crate::api::rest::routes;
use crate::domain::service::SomeDataService;

/// REST module exposing the `/some-data` operations
#[derive(Clone, Default)]
pub struct SomeDataModule {
    service: Arc<SomeDataService>,
}

impl SomeDataModule {
    #[must_use]
    pub fn new(service: Arc<SomeDataService>) -> Self {
        Self { service }
    }
}

impl RestApiCapability for SomeDataModule {
    fn register_rest(
        &self,
        router: Router,
        openapi: &dyn OpenApiRegistry,
    ) -> anyhow::Result<Router> {
        info!("Registering some_data REST routes");
        let router = routes::register_routes(router, openapi, Arc::clone(&self.service));
        info!(base_path = routes::BASE_PATH, "some_data REST routes registered");
        Ok(router)
    }
}
