use axum::Router;

use crate::openapi_registry::OpenApiRegistry;

/// A module that contributes REST operations to the host router.
///
/// Implementors declare every route through [`crate::OperationBuilder`] so that
/// the operation is both mounted on the router and described in the registry.
pub trait RestApiCapability: Send + Sync {
    /// Register this module's routes.
    ///
    /// # Errors
    /// Returns an error if the module cannot build its routes.
    fn register_rest(
        &self,
        router: Router,
        openapi: &dyn OpenApiRegistry,
    ) -> anyhow::Result<Router>;
}
