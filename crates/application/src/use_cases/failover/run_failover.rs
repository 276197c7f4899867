use ferrous_failover_domain::{
    DomainError, DomainTarget, FailoverSession, FeedEntry, PoolKey, RankedPool,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::ports::CandidateFeed;
use crate::services::select;
use crate::use_cases::convergence::{ConvergenceOutcome, MonitorConvergenceUseCase};
use crate::use_cases::probing::MeasureHostLatencyUseCase;
use crate::use_cases::publishing::PublishRecordUseCase;
use crate::use_cases::ranking::RankCandidatesUseCase;

/// How one domain's episode ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeOutcome {
    /// Current address is fast enough; nothing was fetched or published.
    Skipped { latency_ms: u32 },

    /// Every ranked candidate is blocklisted or too lossy.
    NoCandidate,

    /// The provider update never succeeded.
    PublishFailed { address: IpAddr },

    Converged { address: IpAddr },

    /// Published but never observed in resolution within the tick budget.
    Unconfirmed { address: IpAddr },

    /// The round limit was reached while candidates kept failing.
    RetriesExhausted { rounds: u32 },
}

#[derive(Debug)]
pub struct EpisodeReport {
    pub fqdn: String,
    pub result: Result<EpisodeOutcome, DomainError>,
}

/// Probe → rank → select → publish → monitor, repeated with the failed
/// address excluded until a candidate converges or none remain.
pub struct RunFailoverUseCase {
    feed: Arc<dyn CandidateFeed>,
    measure: Arc<MeasureHostLatencyUseCase>,
    rank: Arc<RankCandidatesUseCase>,
    publish: Arc<PublishRecordUseCase>,
    monitor: Arc<MonitorConvergenceUseCase>,
    latency_threshold_ms: u32,
    max_rounds: u32,
}

impl RunFailoverUseCase {
    pub fn new(
        feed: Arc<dyn CandidateFeed>,
        measure: Arc<MeasureHostLatencyUseCase>,
        rank: Arc<RankCandidatesUseCase>,
        publish: Arc<PublishRecordUseCase>,
        monitor: Arc<MonitorConvergenceUseCase>,
    ) -> Self {
        Self {
            feed,
            measure,
            rank,
            publish,
            monitor,
            latency_threshold_ms: 200,
            max_rounds: 10,
        }
    }

    pub fn with_latency_threshold(mut self, threshold_ms: u32) -> Self {
        self.latency_threshold_ms = threshold_ms;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Runs every target in order against one shared session.
    pub async fn run_all(
        &self,
        session: &mut FailoverSession,
        targets: &[DomainTarget],
    ) -> Vec<EpisodeReport> {
        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            let result = self.execute(session, target).await;
            match &result {
                Ok(outcome) => info!(fqdn = %target, outcome = ?outcome, "Episode finished"),
                Err(e) => error!(fqdn = %target, error = %e, "Episode aborted"),
            }
            reports.push(EpisodeReport {
                fqdn: target.fqdn(),
                result,
            });
        }
        reports
    }

    #[instrument(skip_all, fields(fqdn = %target.fqdn()))]
    pub async fn execute(
        &self,
        session: &mut FailoverSession,
        target: &DomainTarget,
    ) -> Result<EpisodeOutcome, DomainError> {
        let fqdn = target.fqdn();

        let current = self.measure.execute(&fqdn).await;
        if current.latency_ms <= self.latency_threshold_ms {
            info!(
                latency_ms = current.latency_ms,
                threshold_ms = self.latency_threshold_ms,
                "Current address within threshold, not updating"
            );
            return Ok(EpisodeOutcome::Skipped {
                latency_ms: current.latency_ms,
            });
        }

        info!(
            latency_ms = current.latency_ms,
            threshold_ms = self.latency_threshold_ms,
            "Current address too slow, starting failover"
        );

        for round in 1..=self.max_rounds {
            let pool = self.ensure_pool(session, target).await?;

            let reusable = session
                .selection(&fqdn)
                .filter(|entry| !session.is_blocked(&entry.candidate.address))
                .cloned();

            let entry = match reusable {
                Some(entry) => entry,
                None => match select(pool.entries(), session.blocklist()) {
                    Some(entry) => entry.clone(),
                    None => {
                        warn!(
                            round,
                            pool = pool.len(),
                            blocklisted = session.blocklist().len(),
                            "No eligible candidate remains"
                        );
                        return Ok(EpisodeOutcome::NoCandidate);
                    }
                },
            };
            let address = entry.candidate.address;

            if let Err(e) = self.publish.execute(address, target).await {
                error!(address = %address, error = %e, "Giving up on this episode");
                return Ok(EpisodeOutcome::PublishFailed { address });
            }
            session.set_selection(&fqdn, entry.clone());

            match self.monitor.execute(session, target, &entry).await {
                ConvergenceOutcome::Confirmed { .. } => {
                    return Ok(EpisodeOutcome::Converged { address })
                }
                ConvergenceOutcome::TimedOut { .. } => {
                    return Ok(EpisodeOutcome::Unconfirmed { address })
                }
                ConvergenceOutcome::Failed { reason, .. } => {
                    warn!(round, address = %address, reason = %reason, "Retrying with next candidate");
                }
            }
        }

        warn!(rounds = self.max_rounds, "Round limit reached");
        Ok(EpisodeOutcome::RetriesExhausted {
            rounds: self.max_rounds,
        })
    }

    /// Returns the cached pool for the target, downloading the feed at most
    /// once per session and ranking at most once per pool key.
    async fn ensure_pool(
        &self,
        session: &mut FailoverSession,
        target: &DomainTarget,
    ) -> Result<Arc<RankedPool>, DomainError> {
        let key = PoolKey::for_target(target);
        if let Some(pool) = session.pool(&key) {
            return Ok(pool);
        }

        let feed = match session.feed() {
            Some(feed) => feed,
            None => {
                let entries = self.feed.fetch().await?;
                info!(entries = entries.len(), "Candidate feed downloaded");
                session.set_feed(entries)
            }
        };

        let mut ranked = Vec::new();
        for entry in feed.iter().filter(|entry| source_selected(target, entry)) {
            let lines = entry.lines();
            let candidates = self.rank.execute(&lines, target.exclusion_tag()).await;
            debug!(
                source = %entry.source,
                lines = lines.len(),
                ranked = candidates.len(),
                "Feed entry ranked"
            );
            ranked.push((Arc::new(entry.source.clone()), candidates));
        }

        if ranked.is_empty() {
            warn!(filter = ?target.source_filter, "No feed entry matches the source filter");
        }

        let pool = RankedPool::from_ranked(ranked);
        info!(candidates = pool.len(), "Candidate pool ready");
        Ok(session.store_pool(key, pool))
    }
}

fn source_selected(target: &DomainTarget, entry: &FeedEntry) -> bool {
    match &target.source_filter {
        Some(filter) => filter.matches(&entry.source),
        None => true,
    }
}
