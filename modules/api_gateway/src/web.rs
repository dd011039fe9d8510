use axum::Json;
use axum::response::Html;
use serde_json::{Value, json};

/// Pinned Stoplight Elements release loaded from the CDN
pub const ELEMENTS_VERSION: &str = "9.0.15";

/// Liveness endpoint with a timestamp
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn healthz() -> &'static str {
    "ok"
}

/// Interactive API reference rendered from `/openapi.json`
pub async fn serve_docs() -> Html<String> {
    Html(docs_page(ELEMENTS_VERSION))
}

fn docs_page(version: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no" />
    <title>API Docs</title>
    <script src="https://unpkg.com/@stoplight/elements@{version}/web-components.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@{version}/styles.min.css" />
    <style>html, body {{ height: 100%; margin: 0; }}</style>
  </head>
  <body>
    <elements-api
      apiDescriptionUrl="/openapi.json"
      router="hash"
      layout="sidebar"
      tryItCredentialsPolicy="same-origin"
    />
  </body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_page_points_at_openapi_document() {
        let html = docs_page(ELEMENTS_VERSION);
        assert!(html.contains(r#"apiDescriptionUrl="/openapi.json""#));
        assert!(html.contains("@stoplight/elements@9.0.15"));
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }
}
