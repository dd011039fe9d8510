#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the `/some-data` operations behind the REST host.

use api_gateway::ApiGateway;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use some_data::SomeDataModule;
use tower::ServiceExt;

fn app() -> Router {
    let gateway = ApiGateway::default();
    gateway.build_router(&[&SomeDataModule::default()]).unwrap()
}

async fn send(req: Request<Body>) -> (StatusCode, String, String) {
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_owned())
        .unwrap_or_default();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(uri: &str) -> (StatusCode, String, String) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, body: &str) -> (StatusCode, String, String) {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn get_name_covers_the_table() {
    for (index, expected) in [
        ("0", "Qwerty"),
        ("1", "Asdf"),
        ("2", "Zxcvbnm"),
        ("3", "Zxcvbnm"),
        ("4", "Zero"),
        ("-1", "Zero"),
        ("100", "Zero"),
    ] {
        let (status, content_type, body) = get(&format!("/some-data/get-name?index={index}")).await;
        assert_eq!(status, StatusCode::OK, "index {index}");
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body, expected, "index {index}");
    }
}

#[tokio::test]
async fn get_name_without_index_uses_zero() {
    let (status, _, body) = get("/some-data/get-name").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Qwerty");
}

#[tokio::test]
async fn get_name_rejects_bad_index() {
    for uri in [
        "/some-data/get-name?index=abc",
        "/some-data/get-name?index=99999999999",
        "/some-data/get-name?index=1.5",
    ] {
        let (status, content_type, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(content_type, "application/problem+json");
        let problem: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(problem["status"], 400);
        assert_eq!(problem["instance"], "/some-data/get-name");
    }
}

#[tokio::test]
async fn get_country_appends_suffix() {
    let (status, content_type, body) = get("/some-data/get-country?prefix=Fin").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, "Finlandia");

    let (_, _, body) = get("/some-data/get-country?prefix=").await;
    assert_eq!(body, "landia");

    let (_, _, body) = get("/some-data/get-country?prefix=New%20Ice").await;
    assert_eq!(body, "New Icelandia");
}

#[tokio::test]
async fn get_country_requires_prefix() {
    let (status, content_type, _) = get("/some-data/get-country").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, "application/problem+json");
}

#[tokio::test]
async fn get_planet_returns_constant_planet() {
    let (status, content_type, body) = get("/some-data/get-planet").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/json"));

    let planet: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(planet["name"], "Jupiter");
    assert!((planet["mass"].as_f64().unwrap() - 3511.12).abs() < f64::EPSILON);
    assert!((planet["diameter"].as_f64().unwrap() - 19000.0).abs() < f64::EPSILON);
    assert_eq!(
        planet["satellites"],
        json!([{ "name": "Io" }, { "name": "Europa" }])
    );

    let (_, _, again) = get("/some-data/get-planet").await;
    assert_eq!(body, again);
}

#[tokio::test]
async fn get_planet_radius_halves_diameter() {
    let (status, content_type, body) = post_json(
        "/some-data/get-planet-r",
        r#"{"name":"Mars","mass":2567.7,"diameter":4244,"satellites":[]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/json"));
    let radius: f64 = serde_json::from_str(&body).unwrap();
    assert!((radius - 2122.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn get_planet_radius_accepts_pascal_case_sample() {
    let (status, _, body) = post_json(
        "/some-data/get-planet-r",
        r#"{"Name":"Mars","Mass":2567.7,"Diameter":4244,"Satellites":[]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let radius: f64 = serde_json::from_str(&body).unwrap();
    assert!((radius - 2122.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn get_planet_radius_does_not_validate() {
    let (_, _, body) = post_json("/some-data/get-planet-r", r#"{"diameter":0}"#).await;
    let radius: f64 = serde_json::from_str(&body).unwrap();
    assert!(radius.abs() < f64::EPSILON);

    let (_, _, body) = post_json("/some-data/get-planet-r", r#"{"diameter":-8}"#).await;
    let radius: f64 = serde_json::from_str(&body).unwrap();
    assert!((radius + 4.0).abs() < f64::EPSILON);

    let (status, _, body) = post_json("/some-data/get-planet-r", "{}").await;
    assert_eq!(status, StatusCode::OK);
    let radius: f64 = serde_json::from_str(&body).unwrap();
    assert!(radius.abs() < f64::EPSILON);
}

#[tokio::test]
async fn get_planet_radius_rejects_bad_bodies() {
    for body in [
        "{not json",
        r#"{"diameter":"big"}"#,
        r#"{"satellites":"none"}"#,
        "",
    ] {
        let (status, content_type, _) = post_json("/some-data/get-planet-r", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(content_type, "application/problem+json");
    }

    let (status, _, _) = send(
        Request::builder()
            .method("POST")
            .uri("/some-data/get-planet-r")
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"diameter":2}"#))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let (status, _, _) = get("/some-data/get-planet-r").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn docs_page_is_served_at_root() {
    let (status, content_type, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains("/openapi.json"));
}

#[tokio::test]
async fn openapi_document_describes_all_operations() {
    let (status, _, body) = get("/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_str(&body).unwrap();

    let expected = [
        ("/some-data/get-name", "get"),
        ("/some-data/get-country", "get"),
        ("/some-data/get-planet", "get"),
        ("/some-data/get-planet-r", "post"),
    ];
    let paths = doc["paths"].as_object().unwrap();
    assert_eq!(paths.len(), expected.len());

    for (path, method) in expected {
        let op = &doc["paths"][path][method];
        assert!(op.is_object(), "{method} {path} missing");
        assert!(op["responses"]["200"].is_object(), "{path} lacks 200");
        assert!(op["responses"]["400"].is_object(), "{path} lacks 400");
        assert_eq!(op["tags"][0], "SomeData");
    }

    let name_params = &doc["paths"]["/some-data/get-name"]["get"]["parameters"];
    assert_eq!(name_params[0]["name"], "index");
    assert_eq!(name_params[0]["in"], "query");
    assert_eq!(name_params[0]["schema"]["type"], "integer");

    let country_params = &doc["paths"]["/some-data/get-country"]["get"]["parameters"];
    assert_eq!(country_params[0]["name"], "prefix");
    assert_eq!(country_params[0]["required"], true);

    let radius = &doc["paths"]["/some-data/get-planet-r"]["post"];
    assert_eq!(
        radius["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/Planet"
    );
    assert_eq!(
        radius["responses"]["200"]["content"]["application/json"]["schema"]["type"],
        "number"
    );

    let schemas = &doc["components"]["schemas"];
    assert!(schemas["Planet"].is_object());
    assert!(schemas["Satellite"].is_object());
    assert!(schemas["Problem"].is_object());

    assert_eq!(doc["info"]["license"]["name"], "MIT");
    assert_eq!(doc["info"]["termsOfService"], "https://learn.microsoft.com/");
}
