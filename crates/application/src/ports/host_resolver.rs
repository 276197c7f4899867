use async_trait::async_trait;
use ferrous_failover_domain::DomainError;
use std::net::IpAddr;

#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, DomainError>;
}
