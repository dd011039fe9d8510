use std::net::SocketAddr;

/// Errors raised while assembling or running the REST host
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("invalid bind address '{addr}': {source}")]
    InvalidBindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("CORS misconfiguration: {0}")]
    Cors(String),
    #[error("failed to build OpenAPI document: {0}")]
    OpenApi(#[source] anyhow::Error),
    #[error("HTTP server error: {0}")]
    Serve(#[source] std::io::Error),
}
