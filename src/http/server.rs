//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;
use crate::readiness::Readiness;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid http.host or http.port '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Parse the configured host and port into a socket address.
pub fn bind_addr(config: &HttpServerConfig) -> Result<SocketAddr, ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    addr.parse()
        .map_err(|source| ServerError::Address { addr, source })
}

/// Start the HTTP server.
///
/// This function blocks until the server shuts down.
pub async fn start_server(
    app: Router,
    config: &HttpServerConfig,
    readiness: Readiness,
) -> Result<(), ServerError> {
    let addr = bind_addr(config)?;
    let handle = Handle::new();

    shutdown::setup_shutdown_handler(
        handle.clone(),
        readiness,
        Duration::from_secs(config.drain_delay_secs),
    );

    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_default() {
        let addr = bind_addr(&HttpServerConfig::default()).unwrap();
        assert_eq!(addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn test_bind_addr_ipv6() {
        let config = HttpServerConfig {
            host: "[::1]".to_string(),
            port: 3001,
            ..HttpServerConfig::default()
        };
        assert_eq!(bind_addr(&config).unwrap().port(), 3001);
    }

    #[test]
    fn test_bind_addr_rejects_hostname() {
        let config = HttpServerConfig {
            host: "not a host".to_string(),
            ..HttpServerConfig::default()
        };
        assert!(matches!(bind_addr(&config), Err(ServerError::Address { .. })));
    }
}
