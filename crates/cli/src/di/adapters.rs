use ferrous_failover_application::ports::{
    CandidateFeed, DnsRecordApi, HealthChecker, HostResolver, Prober,
};
use ferrous_failover_domain::config::ProbeMethod;
use ferrous_failover_domain::Config;
use ferrous_failover_infrastructure::feed::HttpCandidateFeed;
use ferrous_failover_infrastructure::health::HttpHealthChecker;
use ferrous_failover_infrastructure::probe::{IcmpProber, ProbeTiming, TcpConnectProber};
use ferrous_failover_infrastructure::provider::CloudflareClient;
use ferrous_failover_infrastructure::resolver::SystemResolver;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct Adapters {
    pub prober: Arc<dyn Prober>,
    pub resolver: Arc<dyn HostResolver>,
    pub feed: Arc<dyn CandidateFeed>,
    pub dns_api: Arc<dyn DnsRecordApi>,
    pub health_checker: Arc<dyn HealthChecker>,
}

impl Adapters {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let timing = ProbeTiming::new(
            Duration::from_millis(config.probe.timeout_ms),
            Duration::from_millis(config.probe.sample_interval_ms),
        );

        let prober: Arc<dyn Prober> = match config.probe.method {
            ProbeMethod::Icmp => Arc::new(IcmpProber::new(timing)),
            ProbeMethod::Tcp => Arc::new(TcpConnectProber::new(config.probe.tcp_port, timing)),
        };
        info!(method = config.probe.method.as_str(), "Prober ready");

        let dns_api = CloudflareClient::new(
            config.provider.api_base.clone(),
            config.account.clone(),
            Duration::from_secs(config.provider.timeout_secs),
        )?;

        Ok(Self {
            prober,
            resolver: Arc::new(SystemResolver::new()),
            feed: Arc::new(HttpCandidateFeed::new(&config.feed)?),
            dns_api: Arc::new(dns_api),
            health_checker: Arc::new(HttpHealthChecker::new()),
        })
    }
}
