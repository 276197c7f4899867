use ferrous_failover_domain::Candidate;
use futures::future::join_all;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::ports::Prober;

/// Splits an `address[#tag]` feed line. Returns `None` for blank lines.
pub fn parse_candidate_line(line: &str) -> Option<(&str, Option<&str>)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.split_once('#') {
        Some((address, tag)) => Some((address.trim(), Some(tag.trim()))),
        None => Some((line, None)),
    }
}

/// Probes every candidate of a list concurrently and orders the reachable
/// ones best-first.
pub struct RankCandidatesUseCase {
    prober: Arc<dyn Prober>,
    samples: u16,
    max_parallel: Option<usize>,
}

impl RankCandidatesUseCase {
    pub fn new(prober: Arc<dyn Prober>, samples: u16) -> Self {
        Self {
            prober,
            samples,
            max_parallel: None,
        }
    }

    pub fn with_max_parallel(mut self, max_parallel: Option<usize>) -> Self {
        self.max_parallel = max_parallel.filter(|n| *n > 0);
        self
    }

    pub async fn execute(&self, lines: &[String], exclusion_tag: Option<&str>) -> Vec<Candidate> {
        let addresses = self.collect_addresses(lines, exclusion_tag);
        if addresses.is_empty() {
            return Vec::new();
        }

        debug!(
            candidates = addresses.len(),
            max_parallel = ?self.max_parallel,
            "Probing candidates"
        );

        let semaphore = self.max_parallel.map(|n| Arc::new(Semaphore::new(n)));
        let handles: Vec<_> = addresses
            .iter()
            .map(|&address| {
                let prober = Arc::clone(&self.prober);
                let semaphore = semaphore.clone();
                let samples = self.samples;
                tokio::spawn(async move {
                    let _permit = match semaphore {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };
                    prober.probe(address, samples).await
                })
            })
            .collect();

        // Every task is joined before anything is aggregated.
        let results = join_all(handles).await;

        let mut ranked = Vec::with_capacity(results.len());
        for (address, result) in addresses.iter().zip(results) {
            match result {
                Ok(candidate) if candidate.is_rankable() => ranked.push(candidate),
                Ok(candidate) => {
                    debug!(address = %address, latency_ms = candidate.latency_ms, "Candidate dropped")
                }
                Err(e) => warn!(address = %address, error = %e, "Probe task failed"),
            }
        }

        ranked.sort_by_key(|candidate| candidate.latency_ms);

        info!(
            probed = addresses.len(),
            reachable = ranked.len(),
            "Candidates ranked"
        );
        ranked
    }

    fn collect_addresses(&self, lines: &[String], exclusion_tag: Option<&str>) -> Vec<IpAddr> {
        let exclusion_tag = exclusion_tag.filter(|tag| !tag.is_empty());
        let mut addresses = Vec::with_capacity(lines.len());

        for line in lines {
            let Some((address, tag)) = parse_candidate_line(line) else {
                continue;
            };

            if let (Some(excluded), Some(tag)) = (exclusion_tag, tag) {
                if tag.contains(excluded) {
                    debug!(address, tag, "Candidate excluded by tag");
                    continue;
                }
            }

            // Published as an A record, so only IPv4 can be used.
            match address.parse::<IpAddr>() {
                Ok(ip @ IpAddr::V4(_)) => addresses.push(ip),
                Ok(ip) => debug!(address = %ip, "Skipping non-IPv4 candidate"),
                Err(_) => debug!(line = %line, "Unparsable candidate address"),
            }
        }

        addresses
    }
}
