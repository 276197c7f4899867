mod candidate_feed;
mod dns_record_api;
mod health_checker;
mod host_resolver;
mod prober;

pub use candidate_feed::CandidateFeed;
pub use dns_record_api::{ARecord, DnsRecordApi};
pub use health_checker::{HealthCheckRequest, HealthChecker};
pub use host_resolver::HostResolver;
pub use prober::Prober;
