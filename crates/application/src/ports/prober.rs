use async_trait::async_trait;
use ferrous_failover_domain::Candidate;
use std::net::IpAddr;

/// Reachability/latency measurement of a single address.
///
/// Implementations never fail: anything that prevents a measurement is
/// reported as [`Candidate::unreachable`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, address: IpAddr, samples: u16) -> Candidate;
}
