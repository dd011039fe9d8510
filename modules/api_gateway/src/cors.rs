use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::{ApiGatewayConfig, CorsConfig};
use crate::error::GatewayError;

/// Build a CORS layer from config.
///
/// # Errors
/// Returns [`GatewayError::Cors`] if `allow_credentials` is combined with a `"*"` origin,
/// which browsers reject.
pub fn build_cors_layer(cfg: &ApiGatewayConfig) -> Result<CorsLayer, GatewayError> {
    let cors_cfg: CorsConfig = cfg.cors.clone().unwrap_or_default();

    let has_wildcard_origin = cors_cfg.allowed_origins.iter().any(|o| o == "*");

    if has_wildcard_origin && cors_cfg.allow_credentials {
        return Err(GatewayError::Cors(
            "allowed_origins=['*'] cannot be combined with allow_credentials=true".to_owned(),
        ));
    }

    if has_wildcard_origin {
        warn!("CORS is configured with allowed_origins=['*']; any website may call the API");
    }

    let mut layer = CorsLayer::new();

    if has_wildcard_origin {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_cfg
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if cors_cfg.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> = cors_cfg
            .allowed_methods
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if cors_cfg.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors_cfg
            .allowed_headers
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    if cors_cfg.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    if cors_cfg.max_age_seconds > 0 {
        layer = layer.max_age(std::time::Duration::from_secs(cors_cfg.max_age_seconds));
    }

    Ok(layer)
}
