use std::sync::Arc;

use axum::Extension;
use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::Uri;
use tracing::field::Empty;

use apikit::prelude::*;

use crate::api::rest::dto::{CountryQuery, NameQuery, PlanetDto};
use crate::api::rest::error::bad_request_from_rejection;
use crate::domain::service::SomeDataService;

/// Name looked up by index
#[tracing::instrument(skip(svc, query, uri), fields(index = Empty))]
pub async fn get_name(
    uri: Uri,
    Extension(svc): Extension<Arc<SomeDataService>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| bad_request_from_rejection(&e, uri.path()))?;
    tracing::Span::current().record("index", query.index);

    Ok(ok_text(svc.name_by_index(query.index)))
}

/// Country name built from a prefix
#[tracing::instrument(skip(svc, query, uri))]
pub async fn get_country(
    uri: Uri,
    Extension(svc): Extension<Arc<SomeDataService>>,
    query: Result<Query<CountryQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| bad_request_from_rejection(&e, uri.path()))?;

    Ok(ok_text(svc.country_by_prefix(&query.prefix)))
}

/// Placeholder planet
#[tracing::instrument(skip(svc))]
pub async fn get_planet(Extension(svc): Extension<Arc<SomeDataService>>) -> JsonBody<PlanetDto> {
    Json(svc.planet().into())
}

/// Radius of the posted planet
#[tracing::instrument(skip(svc, body, uri), fields(planet.name = Empty))]
pub async fn get_planet_radius(
    uri: Uri,
    Extension(svc): Extension<Arc<SomeDataService>>,
    body: Result<Json<PlanetDto>, JsonRejection>,
) -> ApiResult<JsonBody<f64>> {
    let Json(dto) = body.map_err(|e| bad_request_from_rejection(&e, uri.path()))?;
    tracing::Span::current().record("planet.name", dto.name.as_str());

    let radius = svc.planet_radius(&dto.into());
    tracing::debug!(radius, "Computed planet radius");
    Ok(Json(radius))
}
