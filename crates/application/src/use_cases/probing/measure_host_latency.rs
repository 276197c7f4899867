use ferrous_failover_domain::Candidate;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::{HostResolver, Prober};

/// Measures the address a hostname currently resolves to.
pub struct MeasureHostLatencyUseCase {
    resolver: Arc<dyn HostResolver>,
    prober: Arc<dyn Prober>,
    samples: u16,
}

impl MeasureHostLatencyUseCase {
    pub fn new(resolver: Arc<dyn HostResolver>, prober: Arc<dyn Prober>, samples: u16) -> Self {
        Self {
            resolver,
            prober,
            samples,
        }
    }

    /// A hostname that cannot be resolved is as bad as an unreachable one.
    pub async fn execute(&self, host: &str) -> Candidate {
        let addresses = match self.resolver.resolve(host).await {
            Ok(addresses) => addresses,
            Err(e) => {
                warn!(host = %host, error = %e, "Cannot resolve current address");
                return Candidate::unreachable(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
            }
        };

        let Some(address) = addresses
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addresses.first())
            .copied()
        else {
            warn!(host = %host, "Hostname resolved to no addresses");
            return Candidate::unreachable(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        };

        let candidate = self.prober.probe(address, self.samples).await;
        debug!(
            host = %host,
            address = %address,
            latency_ms = candidate.latency_ms,
            loss_rate = candidate.loss_rate,
            "Current address measured"
        );
        candidate
    }
}
