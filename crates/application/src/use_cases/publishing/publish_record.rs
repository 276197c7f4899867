use ferrous_failover_domain::{DomainError, DomainTarget};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::ports::DnsRecordApi;

/// Points an existing A record at a new address.
///
/// Each attempt runs the whole zone → record → update sequence; any failure
/// along the way, including a missing record, consumes one attempt.
pub struct PublishRecordUseCase {
    api: Arc<dyn DnsRecordApi>,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl PublishRecordUseCase {
    pub fn new(api: Arc<dyn DnsRecordApi>) -> Self {
        Self {
            api,
            max_attempts: 5,
            retry_backoff: Duration::from_secs(1),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    #[instrument(skip(self, target), fields(fqdn = %target.fqdn()))]
    pub async fn execute(&self, address: IpAddr, target: &DomainTarget) -> Result<(), DomainError> {
        let fqdn = target.fqdn();

        for attempt in 1..=self.max_attempts {
            match self.attempt(address, &target.domain, &fqdn).await {
                Ok(()) => {
                    info!(address = %address, attempt, "A record updated");
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        address = %address,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Publish attempt failed"
                    );
                }
            }

            if attempt < self.max_attempts && !self.retry_backoff.is_zero() {
                tokio::time::sleep(self.retry_backoff).await;
            }
        }

        error!(address = %address, attempts = self.max_attempts, "A record update failed");
        Err(DomainError::PublishFailed {
            attempts: self.max_attempts,
        })
    }

    async fn attempt(&self, address: IpAddr, domain: &str, fqdn: &str) -> Result<(), DomainError> {
        let zone_id = self.api.find_zone_id(domain).await?;
        debug!(zone_id = %zone_id, "Zone resolved");

        let record = self
            .api
            .find_a_record(&zone_id, fqdn)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("A record for {}", fqdn)))?;
        debug!(record_id = %record.id, current = %record.content, "A record resolved");

        self.api.update_a_record(&zone_id, &record, address).await
    }
}
