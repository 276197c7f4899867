use async_trait::async_trait;
use ferrous_failover_domain::{DomainError, PoolEntry};
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckRequest {
    pub url: String,
    pub host: String,
    pub port: u16,
    /// Address the connection is pinned to.
    pub address: IpAddr,
}

impl HealthCheckRequest {
    pub fn for_entry(host: &str, entry: &PoolEntry) -> Self {
        Self {
            url: entry.source.health_url(host),
            host: host.to_string(),
            port: entry.source.port,
            address: entry.candidate.address,
        }
    }
}

#[async_trait]
pub trait HealthChecker: Send + Sync {
    /// Returns the HTTP status code of the response.
    async fn check(
        &self,
        request: &HealthCheckRequest,
        timeout: Duration,
    ) -> Result<u16, DomainError>;
}
