//! REST route definitions: `OpenAPI` metadata and axum routing.

use std::sync::Arc;

use apikit::{OpenApiRegistry, OperationBuilder};
use axum::{Extension, Router};
use http::StatusCode;

use crate::api::rest::{dto, handlers};
use crate::domain::service::SomeDataService;

pub const BASE_PATH: &str = "/some-data";
const TAG: &str = "SomeData";

/// Register the `/some-data` operations
pub fn register_routes(
    mut router: Router,
    openapi: &dyn OpenApiRegistry,
    service: Arc<SomeDataService>,
) -> Router {
    // GET /some-data/get-name
    router = OperationBuilder::get(format!("{BASE_PATH}/get-name"))
        .operation_id("some_data.get_name")
        .summary("Get a name by index")
        .description(
            "Returns \"Qwerty\" for 0, \"Asdf\" for 1, \"Zxcvbnm\" for 2 or 3 and \"Zero\" \
             for any other index.\n\nSample request: `GET /some-data/get-name?index=1`",
        )
        .tag(TAG)
        .query_param_typed("index", false, "Position in the name table", "integer")
        .text_response(StatusCode::OK, "Name for the index", "text/plain")
        .error_400(openapi)
        .handler(handlers::get_name)
        .register(router, openapi);

    // GET /some-data/get-country
    router = OperationBuilder::get(format!("{BASE_PATH}/get-country"))
        .operation_id("some_data.get_country")
        .summary("Get a country by prefix")
        .description(
            "Appends \"landia\" to the prefix.\n\nSample request: \
             `GET /some-data/get-country?prefix=Fin`",
        )
        .tag(TAG)
        .query_param("prefix", true, "Beginning of the country name")
        .text_response(StatusCode::OK, "Country name", "text/plain")
        .error_400(openapi)
        .handler(handlers::get_country)
        .register(router, openapi);

    // GET /some-data/get-planet
    router = OperationBuilder::get(format!("{BASE_PATH}/get-planet"))
        .operation_id("some_data.get_planet")
        .summary("Get a planet")
        .description("Returns a fixed planet with its satellites.")
        .tag(TAG)
        .json_response_with_schema::<dto::PlanetDto>(openapi, StatusCode::OK, "The planet")
        .error_400(openapi)
        .handler(handlers::get_planet)
        .register(router, openapi);

    // POST /some-data/get-planet-r
    router = OperationBuilder::post(format!("{BASE_PATH}/get-planet-r"))
        .operation_id("some_data.get_planet_radius")
        .summary("Get the radius of a planet")
        .description(
            "Returns half of the posted planet's diameter.\n\nSample request body: \
             `{\"Name\":\"Mars\",\"Mass\":2567.7,\"Diameter\":4244,\"Satellites\":[]}`",
        )
        .tag(TAG)
        .json_request::<dto::PlanetDto>(openapi, "Planet to measure")
        .json_response_primitive(StatusCode::OK, "Radius of the planet", "number")
        .error_400(openapi)
        .handler(handlers::get_planet_radius)
        .register(router, openapi);

    router.layer(Extension(service))
}
