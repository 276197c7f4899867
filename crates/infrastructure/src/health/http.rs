use async_trait::async_trait;
use ferrous_failover_application::ports::{HealthCheckRequest, HealthChecker};
use ferrous_failover_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Issues one GET against `scheme://host:port` with the connection pinned to
/// the candidate address, so the check does not depend on what the resolver
/// currently returns.
#[derive(Debug, Default, Clone)]
pub struct HttpHealthChecker;

impl HttpHealthChecker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HealthChecker for HttpHealthChecker {
    async fn check(
        &self,
        request: &HealthCheckRequest,
        timeout: Duration,
    ) -> Result<u16, DomainError> {
        let failed = |reason: String| DomainError::HealthCheckFailed {
            url: request.url.clone(),
            reason,
        };

        let client = reqwest::Client::builder()
            .user_agent(concat!("Ferrous-Failover/", env!("CARGO_PKG_VERSION"), " (health)"))
            .timeout(timeout)
            .resolve(&request.host, SocketAddr::new(request.address, request.port))
            .build()
            .map_err(|e| failed(e.to_string()))?;

        let response = client
            .get(&request.url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status().as_u16();
        debug!(url = %request.url, address = %request.address, status, "Health check answered");
        Ok(status)
    }
}
