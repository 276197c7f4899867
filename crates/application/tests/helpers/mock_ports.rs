#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_failover_application::ports::{
    ARecord, CandidateFeed, DnsRecordApi, HealthCheckRequest, HealthChecker, HostResolver, Prober,
};
use ferrous_failover_domain::{Candidate, CandidateSource, DomainError, FeedEntry};
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

pub fn candidate(addr: &str, latency_ms: u32, loss_rate: f64) -> Candidate {
    Candidate {
        address: ip(addr),
        latency_ms,
        loss_rate,
    }
}

pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Prober
// ============================================================================

/// Returns scripted measurements; unknown addresses are unreachable.
#[derive(Clone, Default)]
pub struct MockProber {
    results: Arc<Mutex<HashMap<IpAddr, Candidate>>>,
    probed: Arc<Mutex<Vec<IpAddr>>>,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set(&self, addr: &str, latency_ms: u32, loss_rate: f64) {
        self.results
            .lock()
            .unwrap()
            .insert(ip(addr), candidate(addr, latency_ms, loss_rate));
    }

    pub fn probed(&self) -> Vec<IpAddr> {
        self.probed.lock().unwrap().clone()
    }

    pub fn probe_count(&self) -> usize {
        self.probed.lock().unwrap().len()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for MockProber {
    async fn probe(&self, address: IpAddr, _samples: u16) -> Candidate {
        self.probed.lock().unwrap().push(address);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.results
            .lock()
            .unwrap()
            .get(&address)
            .cloned()
            .unwrap_or_else(|| Candidate::unreachable(address))
    }
}

// ============================================================================
// HostResolver
// ============================================================================

/// Plays back scripted answers per host; the last answer repeats.
#[derive(Clone, Default)]
pub struct MockHostResolver {
    answers: Arc<Mutex<HashMap<String, VecDeque<Result<Vec<IpAddr>, DomainError>>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockHostResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, host: &str, answer: Result<Vec<IpAddr>, DomainError>) {
        self.answers
            .lock()
            .unwrap()
            .entry(host.to_string())
            .or_default()
            .push_back(answer);
    }

    pub fn push_addrs(&self, host: &str, addrs: &[&str]) {
        self.push(host, Ok(addrs.iter().map(|a| ip(a)).collect()));
    }

    pub fn push_error(&self, host: &str) {
        self.push(
            host,
            Err(DomainError::ResolutionFailed {
                host: host.to_string(),
                reason: "mock failure".to_string(),
            }),
        );
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostResolver for MockHostResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut answers = self.answers.lock().unwrap();
        let queue = answers.get_mut(host).ok_or_else(|| DomainError::ResolutionFailed {
            host: host.to_string(),
            reason: "no mock answer".to_string(),
        })?;

        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}

// ============================================================================
// DnsRecordApi
// ============================================================================

#[derive(Clone)]
pub struct MockDnsRecordApi {
    zone_id: Arc<Mutex<Option<String>>>,
    record: Arc<Mutex<Option<ARecord>>>,
    update_failures: Arc<Mutex<VecDeque<DomainError>>>,
    zone_calls: Arc<AtomicUsize>,
    record_calls: Arc<AtomicUsize>,
    updates: Arc<Mutex<Vec<(String, String, IpAddr)>>>,
}

impl MockDnsRecordApi {
    /// Zone `zone-1` with an A record `rec-1` for `fqdn`.
    pub fn with_record(fqdn: &str) -> Self {
        Self {
            zone_id: Arc::new(Mutex::new(Some("zone-1".to_string()))),
            record: Arc::new(Mutex::new(Some(ARecord {
                id: "rec-1".to_string(),
                name: fqdn.to_string(),
                content: "192.0.2.1".to_string(),
                proxied: false,
                ttl: 1,
            }))),
            update_failures: Arc::new(Mutex::new(VecDeque::new())),
            zone_calls: Arc::new(AtomicUsize::new(0)),
            record_calls: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn without_record() -> Self {
        let api = Self::with_record("unused");
        *api.record.lock().unwrap() = None;
        api
    }

    pub fn without_zone() -> Self {
        let api = Self::with_record("unused");
        *api.zone_id.lock().unwrap() = None;
        api
    }

    /// The next `count` updates fail with HTTP 500.
    pub fn fail_updates(&self, count: usize) {
        let mut failures = self.update_failures.lock().unwrap();
        for _ in 0..count {
            failures.push_back(DomainError::ProviderStatus {
                url: "mock://update".to_string(),
                status: 500,
            });
        }
    }

    pub fn zone_calls(&self) -> usize {
        self.zone_calls.load(Ordering::SeqCst)
    }

    pub fn record_calls(&self) -> usize {
        self.record_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn updates(&self) -> Vec<(String, String, IpAddr)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsRecordApi for MockDnsRecordApi {
    async fn find_zone_id(&self, domain: &str) -> Result<String, DomainError> {
        self.zone_calls.fetch_add(1, Ordering::SeqCst);
        self.zone_id
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::NotFound(format!("zone {}", domain)))
    }

    async fn find_a_record(
        &self,
        _zone_id: &str,
        _fqdn: &str,
    ) -> Result<Option<ARecord>, DomainError> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.record.lock().unwrap().clone())
    }

    async fn update_a_record(
        &self,
        zone_id: &str,
        record: &ARecord,
        address: IpAddr,
    ) -> Result<(), DomainError> {
        self.updates
            .lock()
            .unwrap()
            .push((zone_id.to_string(), record.id.clone(), address));
        match self.update_failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ============================================================================
// HealthChecker
// ============================================================================

/// Answers per pinned address; unknown addresses get 200.
#[derive(Clone, Default)]
pub struct MockHealthChecker {
    statuses: Arc<Mutex<HashMap<IpAddr, Result<u16, DomainError>>>>,
    requests: Arc<Mutex<Vec<HealthCheckRequest>>>,
}

impl MockHealthChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, addr: &str, status: u16) {
        self.statuses.lock().unwrap().insert(ip(addr), Ok(status));
    }

    pub fn set_error(&self, addr: &str) {
        self.statuses.lock().unwrap().insert(
            ip(addr),
            Err(DomainError::HealthCheckFailed {
                url: addr.to_string(),
                reason: "connection refused".to_string(),
            }),
        );
    }

    pub fn requests(&self) -> Vec<HealthCheckRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HealthChecker for MockHealthChecker {
    async fn check(
        &self,
        request: &HealthCheckRequest,
        _timeout: Duration,
    ) -> Result<u16, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        self.statuses
            .lock()
            .unwrap()
            .get(&request.address)
            .cloned()
            .unwrap_or(Ok(200))
    }
}

// ============================================================================
// CandidateFeed
// ============================================================================

#[derive(Clone, Default)]
pub struct MockCandidateFeed {
    entries: Arc<Mutex<Vec<FeedEntry>>>,
    should_fail: Arc<Mutex<bool>>,
    fetches: Arc<AtomicUsize>,
}

impl MockCandidateFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, name: &str, content: &str) -> Self {
        let source = CandidateSource::from_entry_name(name).unwrap();
        self.entries
            .lock()
            .unwrap()
            .push(FeedEntry::new(source, content));
        self
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateFeed for MockCandidateFeed {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::FeedUnavailable("mock feed down".to_string()));
        }
        Ok(self.entries.lock().unwrap().clone())
    }
}
