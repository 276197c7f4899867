use async_trait::async_trait;
use ferrous_failover_application::ports::HostResolver;
use ferrous_failover_domain::DomainError;
use std::net::IpAddr;
use tokio::net::lookup_host;

/// Resolves through the operating system's resolver, so answers follow
/// whatever caching the host applies.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        let answers = lookup_host((host, 0))
            .await
            .map_err(|e| DomainError::ResolutionFailed {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        let mut addresses: Vec<IpAddr> = Vec::new();
        for socket in answers {
            let ip = socket.ip();
            if !addresses.contains(&ip) {
                addresses.push(ip);
            }
        }
        Ok(addresses)
    }
}
