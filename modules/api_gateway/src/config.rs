use serde::{Deserialize, Serialize};

use apikit::{OpenApiContact, OpenApiInfo, OpenApiLicense};

/// Gateway configuration, read from `modules.api_gateway.config`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayConfig {
    pub bind_addr: String,
    /// Serve `/openapi.json`, `/` and `/docs`
    pub enable_docs: bool,
    pub cors_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsConfig>,
    pub body_limit_bytes: usize,
    /// Requests running longer than this are answered with 504
    pub request_timeout_secs: u64,
    pub openapi: OpenApiConfig,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
            enable_docs: true,
            cors_enabled: false,
            cors: None,
            body_limit_bytes: 16 * 1024 * 1024,
            request_timeout_secs: 30,
            openapi: OpenApiConfig::default(),
        }
    }
}

impl ApiGatewayConfig {
    /// Replace the port of `bind_addr`, keeping the host part.
    pub fn override_port(&mut self, port: u16) {
        let host = match self.bind_addr.rsplit_once(':') {
            Some((host, _)) if !host.is_empty() => host.to_owned(),
            _ => "127.0.0.1".to_owned(),
        };
        self.bind_addr = format!("{host}:{port}");
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: vec!["GET".to_owned(), "POST".to_owned()],
            allowed_headers: vec!["*".to_owned()],
            allow_credentials: false,
            max_age_seconds: 600,
        }
    }
}

/// Document info block published in `/openapi.json`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact_name: Option<String>,
    pub contact_url: Option<String>,
    pub license_name: Option<String>,
    pub license_url: Option<String>,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: "Some Data API".to_owned(),
            version: "v1".to_owned(),
            description: Some(
                "Demo service returning hardcoded names, countries and planets".to_owned(),
            ),
            terms_of_service: Some("https://learn.microsoft.com/".to_owned()),
            contact_name: Some("Visit our site".to_owned()),
            contact_url: Some("https://learn.microsoft.com/".to_owned()),
            license_name: Some("MIT".to_owned()),
            license_url: Some("https://licenses.nuget.org/MIT".to_owned()),
        }
    }
}

impl From<&OpenApiConfig> for OpenApiInfo {
    fn from(cfg: &OpenApiConfig) -> Self {
        let contact = (cfg.contact_name.is_some() || cfg.contact_url.is_some()).then(|| {
            OpenApiContact {
                name: cfg.contact_name.clone(),
                url: cfg.contact_url.clone(),
            }
        });
        let license = cfg.license_name.as_ref().map(|name| OpenApiLicense {
            name: name.clone(),
            url: cfg.license_url.clone(),
        });

        Self {
            title: cfg.title.clone(),
            version: cfg.version.clone(),
            description: cfg.description.clone(),
            terms_of_service: cfg.terms_of_service.clone(),
            contact,
            license,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_port_keeps_host() {
        let mut cfg = ApiGatewayConfig {
            bind_addr: "0.0.0.0:8087".to_owned(),
            ..ApiGatewayConfig::default()
        };
        cfg.override_port(9090);
        assert_eq!(cfg.bind_addr, "0.0.0.0:9090");
    }

    #[test]
    fn override_port_without_host_uses_loopback() {
        let mut cfg = ApiGatewayConfig {
            bind_addr: "garbage".to_owned(),
            ..ApiGatewayConfig::default()
        };
        cfg.override_port(1234);
        assert_eq!(cfg.bind_addr, "127.0.0.1:1234");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ApiGatewayConfig =
            serde_json::from_value(serde_json::json!({ "enable_docs": false })).unwrap();
        assert!(!cfg.enable_docs);
        assert_eq!(cfg.bind_addr, "127.0.0.1:8087");
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<ApiGatewayConfig, _> =
            serde_json::from_value(serde_json::json!({ "bind_adr": "x" }));
        assert!(res.is_err());
    }

    #[test]
    fn openapi_info_carries_contact_and_license() {
        let info = OpenApiInfo::from(&OpenApiConfig::default());
        assert_eq!(info.license.as_ref().map(|l| l.name.as_str()), Some("MIT"));
        assert_eq!(
            info.contact.and_then(|c| c.url).as_deref(),
            Some("https://learn.microsoft.com/")
        );
    }
}
