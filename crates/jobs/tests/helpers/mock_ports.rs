use async_trait::async_trait;
use ferrous_failover_application::ports::{
    ARecord, CandidateFeed, DnsRecordApi, HealthCheckRequest, HealthChecker, HostResolver, Prober,
};
use ferrous_failover_domain::{Candidate, CandidateSource, DomainError, FeedEntry};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[derive(Clone, Default)]
pub struct MockProber {
    latencies: Arc<Mutex<HashMap<IpAddr, u32>>>,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, addr: &str, latency_ms: u32) {
        self.latencies.lock().unwrap().insert(ip(addr), latency_ms);
    }
}

#[async_trait]
impl Prober for MockProber {
    async fn probe(&self, address: IpAddr, _samples: u16) -> Candidate {
        match self.latencies.lock().unwrap().get(&address) {
            Some(&latency_ms) => Candidate {
                address,
                latency_ms,
                loss_rate: 0.0,
            },
            None => Candidate::unreachable(address),
        }
    }
}

/// Always answers with the same addresses.
#[derive(Clone)]
pub struct StaticResolver {
    addresses: Vec<IpAddr>,
}

impl StaticResolver {
    pub fn new(addrs: &[&str]) -> Self {
        Self {
            addresses: addrs.iter().map(|a| ip(a)).collect(),
        }
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve(&self, _host: &str) -> Result<Vec<IpAddr>, DomainError> {
        Ok(self.addresses.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockCandidateFeed {
    content: String,
    fetches: Arc<AtomicUsize>,
}

impl MockCandidateFeed {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateFeed for MockCandidateFeed {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![FeedEntry::new(
            CandidateSource::new("31898", true, 443),
            self.content.clone(),
        )])
    }
}

#[derive(Clone, Default)]
pub struct MockDnsRecordApi {
    published: Arc<Mutex<Vec<IpAddr>>>,
}

impl MockDnsRecordApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<IpAddr> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsRecordApi for MockDnsRecordApi {
    async fn find_zone_id(&self, _domain: &str) -> Result<String, DomainError> {
        Ok("zone-1".to_string())
    }

    async fn find_a_record(
        &self,
        _zone_id: &str,
        fqdn: &str,
    ) -> Result<Option<ARecord>, DomainError> {
        Ok(Some(ARecord {
            id: "rec-1".to_string(),
            name: fqdn.to_string(),
            content: "192.0.2.1".to_string(),
            proxied: false,
            ttl: 1,
        }))
    }

    async fn update_a_record(
        &self,
        _zone_id: &str,
        _record: &ARecord,
        address: IpAddr,
    ) -> Result<(), DomainError> {
        self.published.lock().unwrap().push(address);
        Ok(())
    }
}

/// Answers 200 unless a status was set for the pinned address.
#[derive(Clone, Default)]
pub struct MockHealthChecker {
    statuses: Arc<Mutex<HashMap<IpAddr, u16>>>,
}

impl MockHealthChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, addr: &str, status: u16) {
        self.statuses.lock().unwrap().insert(ip(addr), status);
    }
}

#[async_trait]
impl HealthChecker for MockHealthChecker {
    async fn check(
        &self,
        request: &HealthCheckRequest,
        _timeout: Duration,
    ) -> Result<u16, DomainError> {
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(&request.address)
            .copied()
            .unwrap_or(200))
    }
}
