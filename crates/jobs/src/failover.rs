use ferrous_failover_application::use_cases::{EpisodeOutcome, EpisodeReport, RunFailoverUseCase};
use ferrous_failover_domain::{DomainTarget, FailoverSession};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Runs the failover pipeline for every target on a fixed interval.
///
/// Each cycle starts from an empty session: the feed is downloaded again and
/// addresses blocklisted in earlier cycles become eligible again. The first
/// cycle runs immediately. Cancellation is observed between cycles.
pub struct FailoverJob {
    failover: Arc<RunFailoverUseCase>,
    targets: Vec<DomainTarget>,
    period: Duration,
    shutdown: CancellationToken,
    cycles: AtomicU64,
}

impl FailoverJob {
    pub fn new(failover: Arc<RunFailoverUseCase>, targets: Vec<DomainTarget>) -> Self {
        Self {
            failover,
            targets,
            period: Duration::from_secs(1800),
            shutdown: CancellationToken::new(),
            cycles: AtomicU64::new(0),
        }
    }

    pub fn with_interval(self, interval_secs: u64) -> Self {
        self.with_period(Duration::from_secs(interval_secs))
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(Duration::from_millis(1));
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn completed_cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// One pass over all targets with a fresh session.
    pub async fn run_cycle(&self) -> Vec<EpisodeReport> {
        let mut session = FailoverSession::new();
        let reports = self.failover.run_all(&mut session, &self.targets).await;
        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        log_summary(cycle, &reports, session.blocklist().len());
        reports
    }

    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.period.as_secs(),
            targets = self.targets.len(),
            "Starting failover job"
        );

        tokio::spawn(async move { self.run().await })
    }

    async fn run(&self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!("FailoverJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }
}

fn log_summary(cycle: u64, reports: &[EpisodeReport], blocklisted: usize) {
    let mut converged = 0usize;
    let mut skipped = 0usize;
    let mut unresolved = 0usize;
    let mut failed = 0usize;

    for report in reports {
        match &report.result {
            Ok(EpisodeOutcome::Converged { .. }) => converged += 1,
            Ok(EpisodeOutcome::Skipped { .. }) => skipped += 1,
            Ok(outcome) => {
                unresolved += 1;
                warn!(fqdn = %report.fqdn, outcome = ?outcome, "Domain left unresolved");
            }
            Err(e) => {
                failed += 1;
                error!(fqdn = %report.fqdn, error = %e, "Domain failed");
            }
        }
    }

    info!(
        cycle,
        domains = reports.len(),
        converged,
        skipped,
        unresolved,
        failed,
        blocklisted,
        "Failover cycle completed"
    );
}
