use axum::{
    Json,
    http::{StatusCode, header},
    response::IntoResponse,
};

/// Short alias for JSON responses
pub type JsonBody<T> = Json<T>;

/// 200 OK + `text/plain; charset=utf-8`
#[must_use]
pub fn ok_text(value: impl Into<String>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        value.into(),
    )
}
