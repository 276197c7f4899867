use super::Adapters;
use ferrous_failover_application::use_cases::{
    MeasureHostLatencyUseCase, MonitorConvergenceUseCase, PublishRecordUseCase,
    RankCandidatesUseCase, RunFailoverUseCase,
};
use ferrous_failover_domain::Config;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub failover: Arc<RunFailoverUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, adapters: &Adapters) -> Self {
        let measure = MeasureHostLatencyUseCase::new(
            adapters.resolver.clone(),
            adapters.prober.clone(),
            config.probe.host_samples,
        );

        let rank = RankCandidatesUseCase::new(adapters.prober.clone(), config.probe.samples)
            .with_max_parallel(config.probe.max_parallel);

        let publish = PublishRecordUseCase::new(adapters.dns_api.clone())
            .with_max_attempts(config.provider.max_attempts)
            .with_retry_backoff(Duration::from_millis(config.provider.retry_backoff_ms));

        let monitor = MonitorConvergenceUseCase::new(
            adapters.resolver.clone(),
            adapters.health_checker.clone(),
        )
        .with_tick(
            Duration::from_secs(config.monitor.tick_secs),
            config.monitor.max_ticks,
        )
        .with_health_timeout(Duration::from_secs(config.monitor.health_timeout_secs));

        let failover = RunFailoverUseCase::new(
            adapters.feed.clone(),
            Arc::new(measure),
            Arc::new(rank),
            Arc::new(publish),
            Arc::new(monitor),
        )
        .with_latency_threshold(config.probe.latency_threshold_ms)
        .with_max_rounds(config.monitor.max_episode_retries);

        Self {
            failover: Arc::new(failover),
        }
    }
}
