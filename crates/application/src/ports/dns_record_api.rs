use async_trait::async_trait;
use ferrous_failover_domain::DomainError;
use std::net::IpAddr;

/// An existing A record as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARecord {
    pub id: String,
    pub name: String,
    pub content: String,
    pub proxied: bool,
    pub ttl: u32,
}

/// Record-update capability of a DNS provider. There is deliberately no
/// create operation: only existing records are ever rewritten.
#[async_trait]
pub trait DnsRecordApi: Send + Sync {
    async fn find_zone_id(&self, domain: &str) -> Result<String, DomainError>;

    async fn find_a_record(&self, zone_id: &str, fqdn: &str)
        -> Result<Option<ARecord>, DomainError>;

    async fn update_a_record(
        &self,
        zone_id: &str,
        record: &ARecord,
        address: IpAddr,
    ) -> Result<(), DomainError>;
}
