use ferrous_failover_domain::{DomainTarget, FailoverSession, PoolEntry};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, instrument, warn};

use crate::ports::{HealthCheckRequest, HealthChecker, HostResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvergenceOutcome {
    /// Resolution returned the published address and it answered 2xx.
    Confirmed { ticks: u32 },

    /// The published address resolved but failed its health check. It has
    /// been blocklisted and the domain's selection cleared.
    Failed { address: IpAddr, reason: String },

    /// Tick budget spent before either of the above.
    TimedOut { ticks: u32 },
}

/// Polls resolution of a freshly published record until it serves the new
/// address, then verifies that address with one live request.
pub struct MonitorConvergenceUseCase {
    resolver: Arc<dyn HostResolver>,
    health_checker: Arc<dyn HealthChecker>,
    tick: Duration,
    max_ticks: u32,
    health_timeout: Duration,
}

impl MonitorConvergenceUseCase {
    pub fn new(resolver: Arc<dyn HostResolver>, health_checker: Arc<dyn HealthChecker>) -> Self {
        Self {
            resolver,
            health_checker,
            tick: Duration::from_secs(5),
            max_ticks: 120,
            health_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_tick(mut self, tick: Duration, max_ticks: u32) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    #[instrument(skip_all, fields(fqdn = %target.fqdn(), address = %published.candidate.address))]
    pub async fn execute(
        &self,
        session: &mut FailoverSession,
        target: &DomainTarget,
        published: &PoolEntry,
    ) -> ConvergenceOutcome {
        let fqdn = target.fqdn();
        let address = published.candidate.address;

        let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for tick in 1..=self.max_ticks {
            ticker.tick().await;

            let resolved = match self.resolver.resolve(&fqdn).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!(tick, error = %e, "Resolution failed, still polling");
                    continue;
                }
            };

            if !resolved.contains(&address) {
                info!(tick, resolved = ?resolved, "Propagation pending");
                continue;
            }

            let request = HealthCheckRequest::for_entry(&fqdn, published);
            return match self.health_checker.check(&request, self.health_timeout).await {
                Ok(status) if (200..300).contains(&status) => {
                    info!(tick, status, url = %request.url, "Health check passed, update complete");
                    ConvergenceOutcome::Confirmed { ticks: tick }
                }
                Ok(status) => self.reject(session, &fqdn, address, format!("HTTP {}", status)),
                Err(e) => self.reject(session, &fqdn, address, e.to_string()),
            };
        }

        warn!(
            ticks = self.max_ticks,
            "Published address never observed, giving up without verdict"
        );
        ConvergenceOutcome::TimedOut {
            ticks: self.max_ticks,
        }
    }

    fn reject(
        &self,
        session: &mut FailoverSession,
        fqdn: &str,
        address: IpAddr,
        reason: String,
    ) -> ConvergenceOutcome {
        let newly_blocked = session.reject(fqdn, address);
        warn!(
            reason = %reason,
            newly_blocked,
            blocklisted = session.blocklist().len(),
            "Health check failed, address blocklisted"
        );
        ConvergenceOutcome::Failed { address, reason }
    }
}
